//! Ad-campaign launch state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! `advance` reads the previous [`LaunchState`] and the latest turn and
//! returns the next state, plus any tool the caller has to run.

pub mod extract;
mod input;
pub mod state;
pub mod transition;

#[cfg(test)]
mod proptests;

pub use extract::FieldIssue;
pub use input::{FlowContext, TurnInput};
pub use state::{
    Confirmation, CreativeMode, LaunchState, LaunchStatus, Stage, ToolCall, ToolInput,
    ToolResult,
};
pub use transition::{advance, generated_creative_urls, question_for, Outcome, TransitionError};
