/// Ports between the snapshot engine's application layer and the outside world
///
/// Inbound ports are what a host (the CLI, an IDE integration) drives;
/// outbound ports are what replay needs from infrastructure.
pub mod inbound;
pub mod outbound;
