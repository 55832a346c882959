use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::Instrument;

use super::state_machine::{Phase, PickerEvent, SelectionWorkflow, Snapshot};
use crate::roster::TeamId;
use crate::telemetry::create_session_span;

const INTENT_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("Picker task has stopped")]
    Closed,
}

impl<T> From<mpsc::error::SendError<T>> for PickerError {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        PickerError::Closed
    }
}

impl From<oneshot::error::RecvError> for PickerError {
    fn from(_: oneshot::error::RecvError) -> Self {
        PickerError::Closed
    }
}

/// What the user asked for. Team names are resolved against the board by
/// the picker task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Pick,
    Confirm,
    Cancel,
    Finish,
    Toggle(String),
    Reset,
}

enum Message {
    Intent {
        intent: Intent,
        reply: oneshot::Sender<Snapshot>,
    },
    DelayElapsed,
    Shutdown,
}

/// Cloneable handle to the task that owns the selection workflow.
///
/// Every intent is applied in arrival order, one at a time, and the reply
/// carries the snapshot taken right after it was applied.
#[derive(Clone)]
pub struct PickerHandle {
    tx: mpsc::Sender<Message>,
    snapshots: watch::Receiver<Snapshot>,
}

impl PickerHandle {
    pub fn spawn(workflow: SelectionWorkflow, thinking_delay: Duration) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(INTENT_BUFFER);
        let (snapshot_tx, snapshots) = watch::channel(workflow.snapshot());

        let task = PickerTask {
            workflow,
            thinking_delay,
            timer_tx: tx.downgrade(),
            snapshots: snapshot_tx,
        };
        let join = tokio::spawn(task.run(rx));

        (Self { tx, snapshots }, join)
    }

    pub async fn pick(&self) -> Result<Snapshot, PickerError> {
        self.send(Intent::Pick).await
    }

    pub async fn confirm(&self) -> Result<Snapshot, PickerError> {
        self.send(Intent::Confirm).await
    }

    pub async fn cancel(&self) -> Result<Snapshot, PickerError> {
        self.send(Intent::Cancel).await
    }

    pub async fn finish(&self) -> Result<Snapshot, PickerError> {
        self.send(Intent::Finish).await
    }

    pub async fn toggle(&self, team: impl Into<String>) -> Result<Snapshot, PickerError> {
        self.send(Intent::Toggle(team.into())).await
    }

    pub async fn reset(&self) -> Result<Snapshot, PickerError> {
        self.send(Intent::Reset).await
    }

    pub async fn send(&self, intent: Intent) -> Result<Snapshot, PickerError> {
        let (reply, response) = oneshot::channel();
        self.tx.send(Message::Intent { intent, reply }).await?;
        Ok(response.await?)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Wait until a published snapshot satisfies `predicate`
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&Snapshot) -> bool,
    ) -> Result<Snapshot, PickerError> {
        let mut rx = self.subscribe();
        let snapshot = rx
            .wait_for(predicate)
            .await
            .map_err(|_| PickerError::Closed)?;
        Ok(snapshot.clone())
    }

    pub async fn shutdown(&self) -> Result<(), PickerError> {
        self.tx.send(Message::Shutdown).await?;
        Ok(())
    }
}

struct PickerTask {
    workflow: SelectionWorkflow,
    thinking_delay: Duration,
    timer_tx: mpsc::WeakSender<Message>,
    snapshots: watch::Sender<Snapshot>,
}

impl PickerTask {
    async fn run(mut self, mut rx: mpsc::Receiver<Message>) {
        tracing::debug!(delay_ms = self.thinking_delay.as_millis() as u64, "Picker task started");

        while let Some(message) = rx.recv().await {
            match message {
                Message::Intent { intent, reply } => {
                    let event = self.resolve(intent);
                    self.apply(&event);
                    // The caller may have gone away; the snapshot is still published.
                    let _ = reply.send(self.workflow.snapshot());
                }
                Message::DelayElapsed => self.apply(&PickerEvent::DelayElapsed),
                Message::Shutdown => break,
            }
        }

        tracing::debug!("Picker task stopped");
    }

    fn resolve(&self, intent: Intent) -> PickerEvent {
        match intent {
            Intent::Pick => PickerEvent::RequestPick,
            Intent::Confirm => PickerEvent::Confirm,
            Intent::Cancel => PickerEvent::Cancel,
            Intent::Finish => PickerEvent::Finish,
            Intent::Reset => PickerEvent::Reset,
            Intent::Toggle(name) => {
                let id = self
                    .workflow
                    .board()
                    .resolve(&name)
                    .map(|team| team.id.clone())
                    .unwrap_or_else(|| TeamId::new(name.trim()));
                PickerEvent::Toggle(id)
            }
        }
    }

    fn apply(&mut self, event: &PickerEvent) {
        let before = self.workflow.phase();
        let after = self.workflow.handle(event);

        if before != Phase::Thinking && after == Phase::Thinking {
            self.schedule_delay();
        }

        self.snapshots.send_replace(self.workflow.snapshot());
    }

    /// Only one timer can be outstanding: a second pick is ignored while
    /// the workflow is thinking, so no new entry into Thinking happens.
    fn schedule_delay(&self) {
        let Some(tx) = self.timer_tx.upgrade() else {
            return;
        };
        let delay = self.thinking_delay;
        let span = create_session_span(self.workflow.session().session_id());

        tokio::spawn(
            async move {
                tokio::time::sleep(delay).await;
                if tx.send(Message::DelayElapsed).await.is_err() {
                    tracing::debug!("Picker stopped before selection finished");
                }
            }
            .instrument(span),
        );
    }
}
