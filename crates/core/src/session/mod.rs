//! Per-session state machine.
//!
//! [`SessionState::update`] is a pure reducer over [`Message`]s; it never
//! performs I/O and instead declares a [`Command`]. [`SessionStore`] runs
//! those commands against the clients and feeds the completion messages back,
//! so one user action is fully applied before the next one is accepted.

pub mod message;
pub mod registry;
pub mod state;
pub mod store;
mod update;

pub use message::{Command, Message, Notice, Transition};
pub use registry::SessionRegistry;
pub use state::{MemoBuffer, MemoView, SessionState};
pub use store::{SessionSettings, SessionStore};
