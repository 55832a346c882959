use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use serde::Serialize;
use statig::blocking::StateMachine;
use statig::prelude::*;

use crate::board::{Board, Team};
use crate::roster::TeamId;
use crate::telemetry::generate_correlation_id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    RequestPick,
    DelayElapsed,
    Confirm,
    Cancel,
    Finish,
    Toggle(TeamId),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Thinking,
    PendingConfirm,
    Speaking,
}

/// Informational outcomes shown to the user. None of these are failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "team")]
pub enum Notice {
    AllTeamsCompleted,
    UnknownTeam(String),
    PickIgnored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Speaker {
    pub team: Team,
    pub started_at: DateTime<Utc>,
}

/// Context for the selection state machine: the board plus whatever the
/// current pick cycle has proposed or committed.
pub struct SelectionSession {
    board: Board,
    rng: StdRng,
    candidate: Option<Team>,
    speaker: Option<Speaker>,
    notice: Option<Notice>,
    session_id: Option<String>,
}

impl SelectionSession {
    pub fn new(board: Board, rng: StdRng) -> Self {
        Self {
            board,
            rng,
            candidate: None,
            speaker: None,
            notice: None,
            session_id: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn candidate(&self) -> Option<&Team> {
        self.candidate.as_ref()
    }

    pub fn speaker(&self) -> Option<&Speaker> {
        self.speaker.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn begin(&mut self, event: &PickerEvent) {
        self.notice = None;
        tracing::trace!(event = ?event, "Dispatching selection event");
    }

    fn finish_session(&mut self) {
        self.candidate = None;
        self.session_id = None;
    }

    fn apply_toggle(&mut self, id: &TeamId) {
        if self.board.team(id).is_none() {
            self.notice = Some(Notice::UnknownTeam(id.to_string()));
            return;
        }
        self.board = self.board.toggle_completed(id);
        if let Some(speaker) = self.speaker.as_mut().filter(|s| &s.team.id == id) {
            if let Some(team) = self.board.team(id) {
                speaker.team = team.clone();
            }
        }
        tracing::info!(
            team = %id,
            remaining = self.board.remaining_count(),
            "Team status toggled manually"
        );
    }

    fn apply_reset(&mut self) {
        self.board = self.board.reset(&mut self.rng);
        tracing::info!(teams = self.board.teams().len(), "Board reset");
    }
}

#[state_machine(initial = "State::idle()")]
impl SelectionSession {
    #[state(superstate = "board_view")]
    fn idle(&mut self, event: &PickerEvent) -> Outcome<State> {
        self.begin(event);
        match event {
            PickerEvent::RequestPick if self.board.is_finished() => {
                self.notice = Some(Notice::AllTeamsCompleted);
                tracing::info!("Pick requested but all teams have presented");
                Handled
            }
            PickerEvent::RequestPick => {
                let session_id = generate_correlation_id();
                tracing::info!(
                    session_id = %session_id,
                    remaining = self.board.remaining_count(),
                    "Selecting next team"
                );
                self.session_id = Some(session_id);
                Transition(State::thinking())
            }
            _ => Super,
        }
    }

    #[state(superstate = "board_view")]
    fn thinking(&mut self, event: &PickerEvent) -> Outcome<State> {
        self.begin(event);
        match event {
            PickerEvent::RequestPick => {
                self.notice = Some(Notice::PickIgnored);
                tracing::debug!(session_id = ?self.session_id, "Already selecting, pick ignored");
                Handled
            }
            PickerEvent::DelayElapsed => match self.board.next_candidate().cloned() {
                Some(team) => {
                    tracing::info!(
                        session_id = ?self.session_id,
                        team = %team.id,
                        "Candidate awaiting confirmation"
                    );
                    self.candidate = Some(team);
                    Transition(State::pending_confirm())
                }
                None => {
                    self.notice = Some(Notice::AllTeamsCompleted);
                    tracing::info!(session_id = ?self.session_id, "No teams left to select");
                    self.finish_session();
                    Transition(State::idle())
                }
            },
            // The outstanding lookup must still complete, so stay here and
            // let it scan the fresh board.
            PickerEvent::Reset => {
                self.apply_reset();
                Handled
            }
            _ => Super,
        }
    }

    #[state(superstate = "board_view")]
    fn pending_confirm(&mut self, event: &PickerEvent) -> Outcome<State> {
        self.begin(event);
        match event {
            PickerEvent::Confirm => {
                let Some(candidate) = self.candidate.take() else {
                    return Transition(State::idle());
                };
                self.board = self.board.mark_completed(&candidate.id);
                let team = self.board.team(&candidate.id).cloned().unwrap_or(candidate);
                tracing::info!(
                    session_id = ?self.session_id,
                    team = %team.id,
                    remaining = self.board.remaining_count(),
                    "Team confirmed and speaking"
                );
                self.speaker = Some(Speaker {
                    team,
                    started_at: Utc::now(),
                });
                self.finish_session();
                Transition(State::speaking())
            }
            PickerEvent::Cancel => {
                tracing::info!(
                    session_id = ?self.session_id,
                    team = ?self.candidate.as_ref().map(|t| &t.id),
                    "Selection cancelled, team stays in the queue"
                );
                self.finish_session();
                Transition(State::idle())
            }
            _ => Super,
        }
    }

    #[state(superstate = "board_view")]
    fn speaking(&mut self, event: &PickerEvent) -> Outcome<State> {
        self.begin(event);
        match event {
            PickerEvent::Finish => {
                if let Some(speaker) = self.speaker.take() {
                    let elapsed = Utc::now() - speaker.started_at;
                    tracing::info!(
                        team = %speaker.team.id,
                        seconds = elapsed.num_seconds(),
                        "Team finished speaking"
                    );
                }
                Transition(State::idle())
            }
            _ => Super,
        }
    }

    /// Manual overrides available from the board regardless of phase
    #[superstate]
    fn board_view(&mut self, event: &PickerEvent) -> Outcome<State> {
        match event {
            PickerEvent::Toggle(id) => {
                self.apply_toggle(id);
                Handled
            }
            PickerEvent::Reset => {
                self.apply_reset();
                self.finish_session();
                self.speaker = None;
                Transition(State::idle())
            }
            _ => Handled,
        }
    }
}

/// Owns the selection state machine and exposes the current phase.
pub struct SelectionWorkflow {
    machine: StateMachine<SelectionSession>,
}

impl SelectionWorkflow {
    pub fn new(board: Board, rng: StdRng) -> Self {
        Self {
            machine: SelectionSession::new(board, rng).state_machine(),
        }
    }

    pub fn handle(&mut self, event: &PickerEvent) -> Phase {
        self.machine.handle(event);
        self.phase()
    }

    pub fn phase(&self) -> Phase {
        match self.machine.state() {
            State::Idle { .. } => Phase::Idle,
            State::Thinking { .. } => Phase::Thinking,
            State::PendingConfirm { .. } => Phase::PendingConfirm,
            State::Speaking { .. } => Phase::Speaking,
        }
    }

    pub fn session(&self) -> &SelectionSession {
        self.machine.inner()
    }

    pub fn board(&self) -> &Board {
        self.session().board()
    }

    pub fn snapshot(&self) -> Snapshot {
        let session = self.session();
        Snapshot {
            phase: self.phase(),
            remaining: session.board.remaining_count(),
            teams: session.board.teams().to_vec(),
            candidate: session.candidate.clone(),
            speaker: session.speaker.clone(),
            notice: session.notice.clone(),
            session_id: session.session_id.clone(),
        }
    }
}

/// Everything a presenter needs to draw the board. The roster order is
/// deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub remaining: usize,
    pub teams: Vec<Team>,
    pub candidate: Option<Team>,
    pub speaker: Option<Speaker>,
    pub notice: Option<Notice>,
    pub session_id: Option<String>,
}
