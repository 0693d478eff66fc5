//! App layer - owns every feature state machine
//!
//! The App actor turns UI events into feature transitions, sends the
//! resulting calls to the network layer, routes replies back by request id
//! and publishes a render snapshot after each step.

pub mod actor;
pub mod commands;
pub mod state;

pub use actor::AppActor;
pub use state::AppState;
