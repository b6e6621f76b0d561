/// Type alias for Result with anyhow::Error as the error type.
///
/// Domain failures are raised as [`SnapshotError`](super::SnapshotError) and
/// travel through `anyhow`, so callers can `downcast_ref` when they need the
/// category.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
