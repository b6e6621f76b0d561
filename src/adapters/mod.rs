/// Adapters layer - concrete implementations of the outbound ports
///
/// File access, console progress, report formatting and configured providers.
pub mod outbound;
