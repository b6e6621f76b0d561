/// Use cases module containing application business logic orchestration
mod replay_changes;

pub use replay_changes::ReplayChangesUseCase;
