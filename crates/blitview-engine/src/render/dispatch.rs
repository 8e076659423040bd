/// Compute workgroup dimensions.
///
/// Must match `@workgroup_size` in `shaders/fill.wgsl`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WorkgroupSize {
    pub x: u32,
    pub y: u32,
}

impl WorkgroupSize {
    /// 8x8 = 64 invocations, within the WebGPU default limit of 256.
    pub const FILL: Self = Self { x: 8, y: 8 };

    pub const fn invocations(self) -> u32 {
        self.x * self.y
    }
}

/// Number of workgroups needed to cover a `width` x `height` pixel grid.
///
/// Rounds up; the kernel discards invocations outside the texture. Returns
/// `None` when either dimension is zero (nothing to dispatch).
pub fn dispatch_size(width: u32, height: u32, wg: WorkgroupSize) -> Option<(u32, u32)> {
    if width == 0 || height == 0 || wg.x == 0 || wg.y == 0 {
        return None;
    }
    Some((width.div_ceil(wg.x), height.div_ceil(wg.y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_multiple() {
        assert_eq!(dispatch_size(64, 32, WorkgroupSize::FILL), Some((8, 4)));
    }

    #[test]
    fn partial_groups_round_up() {
        // Right and bottom edges must be covered.
        assert_eq!(dispatch_size(65, 33, WorkgroupSize::FILL), Some((9, 5)));
        assert_eq!(dispatch_size(1, 1, WorkgroupSize::FILL), Some((1, 1)));
    }

    #[test]
    fn covers_every_pixel() {
        let wg = WorkgroupSize::FILL;
        for (w, h) in [(1920, 1080), (1366, 768), (375, 667), (7, 3)] {
            let (gx, gy) = dispatch_size(w, h, wg).unwrap();
            assert!(gx * wg.x >= w && (gx - 1) * wg.x < w);
            assert!(gy * wg.y >= h && (gy - 1) * wg.y < h);
        }
    }

    #[test]
    fn empty_grid_dispatches_nothing() {
        assert_eq!(dispatch_size(0, 100, WorkgroupSize::FILL), None);
        assert_eq!(dispatch_size(100, 0, WorkgroupSize::FILL), None);
    }

    #[test]
    fn fill_workgroup_fits_default_limits() {
        let limits = wgpu::Limits::default();
        let wg = WorkgroupSize::FILL;
        assert!(wg.invocations() <= limits.max_compute_invocations_per_workgroup);
        assert!(wg.x <= limits.max_compute_workgroup_size_x);
        assert!(wg.y <= limits.max_compute_workgroup_size_y);
    }
}
