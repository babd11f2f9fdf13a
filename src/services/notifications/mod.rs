//! Notification dispatch over a pluggable transport.
//!
//! The pipeline resolves the target spec into channels, partitions the
//! request parameters per channel, builds the shared payload and resolves
//! any requested templates before the [`NotifyDispatcher`] hands one call per
//! channel to a [`NotifyTransport`].

mod dispatcher;
mod local_transport;
mod partitioner;
mod payload;
mod resolver;
mod template;
mod transport;

pub use dispatcher::{ChannelCall, DispatchPlan, NotifyDispatcher};
pub use local_transport::LocalTransport;
pub use partitioner::{PartitionedParams, partition};
pub use payload::build_payload;
pub use resolver::{ResolvedTargets, resolve};
pub use template::{TemplateContent, resolve_template};
pub use transport::{ApiRequest, NotifyTransport, is_falsy};
