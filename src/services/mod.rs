//! Service layer for notification dispatch.

pub mod notifications;

pub use notifications::{LocalTransport, NotifyDispatcher, NotifyTransport};
