use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use alertfeed_core::{ApiRequest, RequestId, TimerKind, ToastId};
use feed_logging::{feed_debug, feed_error};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::client::ApiClient;
use crate::{EngineError, EngineEvent};

enum EngineCommand {
    Call {
        request_id: RequestId,
        request: ApiRequest,
    },
    StartTimer {
        timer: TimerKind,
        period: Duration,
    },
    StopTimer {
        timer: TimerKind,
    },
    ScheduleToast {
        id: ToastId,
        fade_after: Duration,
        remove_after: Duration,
    },
}

/// Runs calls and timers on a tokio runtime owned by a dedicated thread. Results come
/// back through [`EngineHandle::try_recv`] / [`EngineHandle::recv_timeout`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    shutdown: CancellationToken,
}

impl EngineHandle {
    pub fn new(client: ApiClient) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = Runtime::new()?;
        let shutdown = CancellationToken::new();
        let worker_shutdown = shutdown.clone();

        thread::Builder::new()
            .name("alertfeed-engine".to_string())
            .spawn(move || {
                let mut worker = Worker {
                    runtime,
                    client,
                    event_tx,
                    shutdown: worker_shutdown,
                    timers: HashMap::new(),
                };
                while let Ok(command) = cmd_rx.recv() {
                    worker.handle(command);
                }
                worker.shutdown.cancel();
            })?;

        Ok(Self {
            cmd_tx,
            event_rx,
            shutdown,
        })
    }

    pub fn enqueue_call(&self, request_id: RequestId, request: ApiRequest) {
        self.send(EngineCommand::Call {
            request_id,
            request,
        });
    }

    /// Starts `timer`, replacing a running one of the same kind.
    pub fn start_timer(&self, timer: TimerKind, period: Duration) {
        self.send(EngineCommand::StartTimer { timer, period });
    }

    pub fn stop_timer(&self, timer: TimerKind) {
        self.send(EngineCommand::StopTimer { timer });
    }

    pub fn schedule_toast(&self, id: ToastId, fade_after: Duration, remove_after: Duration) {
        self.send(EngineCommand::ScheduleToast {
            id,
            fade_after,
            remove_after,
        });
    }

    /// Cancels every timer and pending toast. Calls already sent still complete.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            feed_error!("engine worker is gone; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

struct Worker {
    runtime: Runtime,
    client: ApiClient,
    event_tx: mpsc::Sender<EngineEvent>,
    shutdown: CancellationToken,
    timers: HashMap<TimerKind, CancellationToken>,
}

impl Worker {
    fn handle(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::Call {
                request_id,
                request,
            } => {
                let client = self.client.clone();
                let event_tx = self.event_tx.clone();
                self.runtime.spawn(async move {
                    let result = client.call(&request).await;
                    let _ = event_tx.send(EngineEvent::CallCompleted { request_id, result });
                });
            }
            EngineCommand::StartTimer { timer, period } => {
                let token = self.shutdown.child_token();
                if let Some(previous) = self.timers.insert(timer, token.clone()) {
                    previous.cancel();
                }
                feed_debug!("timer {:?} started, period {:?}", timer, period);
                self.runtime
                    .spawn(run_timer(timer, period, token, self.event_tx.clone()));
            }
            EngineCommand::StopTimer { timer } => {
                if let Some(token) = self.timers.remove(&timer) {
                    token.cancel();
                    feed_debug!("timer {:?} stopped", timer);
                }
            }
            EngineCommand::ScheduleToast {
                id,
                fade_after,
                remove_after,
            } => {
                self.runtime.spawn(run_toast(
                    id,
                    fade_after,
                    remove_after,
                    self.shutdown.child_token(),
                    self.event_tx.clone(),
                ));
            }
        }
    }
}

async fn run_timer(
    timer: TimerKind,
    period: Duration,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let period = period.max(Duration::from_millis(1));
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                if event_tx.send(EngineEvent::TimerFired(timer)).is_err() {
                    break;
                }
            }
        }
    }
}

async fn run_toast(
    id: ToastId,
    fade_after: Duration,
    remove_after: Duration,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    tokio::select! {
        _ = token.cancelled() => return,
        _ = tokio::time::sleep(fade_after) => {
            let _ = event_tx.send(EngineEvent::ToastFaded(id));
        }
    }
    tokio::select! {
        _ = token.cancelled() => {}
        _ = tokio::time::sleep(remove_after.saturating_sub(fade_after)) => {
            let _ = event_tx.send(EngineEvent::ToastExpired(id));
        }
    }
}
