//! State-change notifications and their fan-out to observers.
//!
//! - `Event`: an immutable notification (`CardDrawn`, `StateUpdate`,
//!   `Win`, `Draw`) with an optional payload
//! - `EventSink`: where mutating code reports events
//! - `ListenerRegistry`: one unbounded queue per observer

mod event;
mod registry;

pub use event::{Event, EventData, EventName};
pub use registry::{EventSink, EventStream, ListenerRegistry};
