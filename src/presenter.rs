use anyhow::Result;
use std::io::Write;

use crate::workflows::{Notice, Phase, Snapshot};

/// Boundary to whatever draws the board
pub trait Presenter {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()>;
}

/// Human-readable output for an interactive terminal
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render_notice(&mut self, notice: &Notice) -> Result<()> {
        match notice {
            Notice::AllTeamsCompleted => writeln!(
                self.out,
                "🎉 All teams have been selected! Resetting the board is recommended."
            )?,
            Notice::UnknownTeam(name) => writeln!(self.out, "❓ No team named '{name}' on the board")?,
            Notice::PickIgnored => writeln!(self.out, "⏳ Already selecting, hang on...")?,
        }
        Ok(())
    }

    fn render_board(&mut self, snapshot: &Snapshot) -> Result<()> {
        for team in &snapshot.teams {
            let mark = if team.is_completed { "✅" } else { "⬜" };
            writeln!(self.out, "   {mark} {}", team.name)?;
        }
        Ok(())
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()> {
        if let Some(notice) = &snapshot.notice {
            self.render_notice(notice)?;
        }

        match snapshot.phase {
            Phase::Thinking => writeln!(self.out, "🎲 Selecting...")?,
            Phase::PendingConfirm => {
                if let Some(team) = &snapshot.candidate {
                    writeln!(self.out)?;
                    writeln!(self.out, "🎯 Selected team: {}", team.name)?;
                    writeln!(
                        self.out,
                        "   It is {}'s turn to present. Are they ready? (confirm / cancel)",
                        team.name
                    )?;
                }
            }
            Phase::Speaking => {
                if let Some(speaker) = &snapshot.speaker {
                    writeln!(self.out)?;
                    writeln!(self.out, "🎤 {} is speaking", speaker.team.name)?;
                    writeln!(self.out, "   Type 'finish' when their turn is over.")?;
                }
                self.render_board(snapshot)?;
            }
            Phase::Idle => {
                writeln!(self.out)?;
                writeln!(self.out, "Who's up next?")?;
                if snapshot.remaining == 0 {
                    writeln!(self.out, "   All teams have presented.")?;
                } else {
                    writeln!(self.out, "   {} teams remaining in the queue.", snapshot.remaining)?;
                }
                self.render_board(snapshot)?;
            }
        }

        self.out.flush()?;
        Ok(())
    }
}

/// One JSON document per line, for a separate renderer to consume
pub struct JsonPresenter<W: Write> {
    out: W,
}

impl<W: Write> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
