// Content Ops - API Core
//
// Backend for marketing agencies: advertisers, channel content drafts and the
// confirm workflow where an external approver answers through a preview link.
//
// Architecture follows domain-driven design; domain activities depend only on
// the kernel traits so they can run against Postgres or in-memory doubles.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
