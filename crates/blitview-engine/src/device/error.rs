/// What the view does after failing to acquire a drawable.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was lost or outdated and has been configured again; the
    /// next tick draws normally.
    Reconfigured,
    /// Acquisition timed out or failed transiently; this tick draws nothing.
    SkipFrame,
    /// Out of memory or an unrecoverable surface state; the runtime exits.
    Fatal,
}
