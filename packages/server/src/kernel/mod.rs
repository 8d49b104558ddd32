//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod deps;
pub mod messenger;
pub mod postgres_store;
pub mod test_dependencies;
pub mod traits;

pub use ai::{OpenAIClient, UnconfiguredAI};
pub use deps::ServerDeps;
pub use messenger::LogOnlyMessenger;
pub use postgres_store::PostgresStore;
pub use test_dependencies::TestDependencies;
pub use traits::*;
