// Selection workflow: the pick/confirm state machine and the task that drives it

pub mod picker;
pub mod state_machine;

pub use picker::{Intent, PickerError, PickerHandle};
pub use state_machine::{
    Notice, Phase, PickerEvent, SelectionSession, SelectionWorkflow, Snapshot, Speaker,
};
