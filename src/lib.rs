// Standup Picker Library - hidden-order presenter queue
// This exposes the core components for testing and integration

pub mod board;
pub mod cli;
pub mod config;
pub mod presenter;
pub mod roster;
pub mod telemetry;
pub mod workflows;

// Re-export key types for easy access
pub use board::{Board, Team};
pub use config::PickerConfig;
pub use presenter::{JsonPresenter, Presenter, TerminalPresenter};
pub use roster::{shuffle, Roster, RosterError, TeamId};
pub use telemetry::{create_session_span, generate_correlation_id, init_telemetry};
pub use workflows::{
    Intent, Notice, Phase, PickerError, PickerEvent, PickerHandle, SelectionWorkflow, Snapshot,
    Speaker,
};
