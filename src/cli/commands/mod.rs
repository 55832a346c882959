use anyhow::Result;

pub mod init;
pub mod roster;
pub mod run;

#[allow(async_fn_in_trait)]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

pub fn show_session_help() -> String {
    [
        "Commands:",
        "  pick            🎲 Select the next team",
        "  confirm         ✅ Accept the selected team",
        "  cancel          🚫 Decide against the selected team",
        "  finish          🎤 End the current speaker's turn",
        "  toggle <team>   🔁 Mark a team done / not done",
        "  reset           🔄 Start the standup over",
        "  status          📋 Show the board",
        "  help            ❔ Show this list",
        "  quit            👋 Leave",
    ]
    .join("\n")
}
