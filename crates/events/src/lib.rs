//! Inkpress workflow event bus.
//!
//! Provides the in-process publish/subscribe hub that decouples the
//! workflow engines from notification delivery:
//!
//! - [`EventBus`]: fan-out hub backed by `tokio::sync::broadcast`.
//! - [`WorkflowEvent`]: the canonical domain event envelope.
//! - [`Scope`]: the delivery room an event targets
//!   (`user:<id>`, `organization:<id>`, `content:<id>`).
//!
//! Publishing is fire-and-forget: the workflow never awaits delivery,
//! and a publish with zero subscribers is silently dropped. Durable
//! notification records are written by the router that consumes this bus.

pub mod bus;

pub use bus::{EventBus, Scope, WorkflowEvent};
