//! Turn state and the action stack.
//!
//! Cards are pushed onto a LIFO stack as they are played. The active
//! player opens a decision window by playing onto an empty stack; any
//! player may then answer with a response card. When every seat has
//! passed, the whole stack resolves top to bottom (see
//! [`crate::effects::resolve_stack`]) and a new decision round begins.

mod turn;

pub use turn::CurrentTurn;
