//! Static image assets: decoding and GPU upload.

mod image;

pub use self::image::{ImageAsset, ImageSource, ImageTexture};
