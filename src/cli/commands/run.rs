use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{show_session_help, Command};
use crate::board::Board;
use crate::config::PickerConfig;
use crate::presenter::{JsonPresenter, Presenter, TerminalPresenter};
use crate::workflows::{Intent, PickerHandle, SelectionWorkflow};

/// One line typed at the session prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Intent(Intent),
    ResetRequested,
    Status,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "" => Input::Empty,
        "pick" | "p" | "next" => Input::Intent(Intent::Pick),
        "confirm" | "c" | "yes" => Input::Intent(Intent::Confirm),
        "cancel" | "x" | "no" => Input::Intent(Intent::Cancel),
        "finish" | "f" | "done" => Input::Intent(Intent::Finish),
        "toggle" | "t" if !rest.is_empty() => Input::Intent(Intent::Toggle(rest.to_string())),
        "reset" => Input::ResetRequested,
        "status" | "s" | "board" => Input::Status,
        "help" | "h" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

fn is_affirmative(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

pub struct RunCommand {
    pub json: bool,
    pub yes: bool,
    pub seed: Option<u64>,
    config: PickerConfig,
}

impl RunCommand {
    pub fn new(config: PickerConfig) -> Self {
        Self {
            json: false,
            yes: false,
            seed: None,
            config,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn with_yes(mut self, yes: bool) -> Self {
        self.yes = yes;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Fresh picker task for this session's roster and shuffle seed
    pub fn spawn_picker(&self) -> Result<(PickerHandle, tokio::task::JoinHandle<()>)> {
        let roster = self.config.roster()?;
        let mut rng = match self.seed.or(self.config.selection.shuffle_seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let board = Board::initialize(roster, &mut rng);
        tracing::info!(teams = board.teams().len(), "Standup session started");

        let workflow = SelectionWorkflow::new(board, rng);
        Ok(PickerHandle::spawn(
            workflow,
            self.config.selection.thinking_delay(),
        ))
    }

    /// Prompts and help go to stderr in JSON mode so stdout stays parseable
    fn say(&self, message: &str) {
        if self.json {
            eprintln!("{message}");
        } else {
            println!("{message}");
        }
    }
}

impl Command for RunCommand {
    async fn execute(&self) -> Result<()> {
        let (picker, task) = self.spawn_picker()?;
        let mut presenter: Box<dyn Presenter> = if self.json {
            Box::new(JsonPresenter::new(std::io::stdout()))
        } else {
            Box::new(TerminalPresenter::new(std::io::stdout()))
        };

        if !self.json {
            println!("🎯 Standup of Standups - Team Picker");
            println!("   Type 'pick' to select a team, 'help' for all commands.");
        }

        let mut updates = picker.subscribe();
        presenter.render(&updates.borrow_and_update())?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut confirming_reset = false;

        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = updates.borrow_and_update().clone();
                    presenter.render(&snapshot)?;
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };

                    if confirming_reset {
                        confirming_reset = false;
                        if is_affirmative(&line) {
                            picker.reset().await?;
                        } else {
                            self.say("↩️  Reset cancelled");
                        }
                        continue;
                    }

                    match parse_input(&line) {
                        Input::Intent(intent) => {
                            picker.send(intent).await?;
                        }
                        Input::ResetRequested if self.yes => {
                            picker.reset().await?;
                        }
                        Input::ResetRequested => {
                            self.say("⚠️  Are you sure you want to reset the standup? [y/N]");
                            confirming_reset = true;
                        }
                        Input::Status => presenter.render(&picker.snapshot())?,
                        Input::Help => self.say(&show_session_help()),
                        Input::Quit => break,
                        Input::Empty => {}
                        Input::Unknown(text) => {
                            self.say(&format!("❓ Unknown command '{text}'. Type 'help' for the list."));
                        }
                    }
                }
            }
        }

        picker.shutdown().await.ok();
        task.await?;
        tracing::info!("Standup session ended");
        Ok(())
    }
}
