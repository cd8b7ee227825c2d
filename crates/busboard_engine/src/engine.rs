use std::collections::HashMap;
use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use board_logging::{board_debug, board_warn};
use tokio::runtime::Runtime;
use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{decode_json, EngineEvent, FailureKind, FetchError, TimerId};

enum EngineCommand {
    Fetch { url: String },
    ArmTimer { timer_id: TimerId, delay: Duration },
    CancelTimer { timer_id: TimerId },
    Shutdown,
}

/// Handle to the engine thread. Cloning shares the same thread.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> io::Result<(Self, mpsc::Receiver<EngineEvent>)> {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(settings)))
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn Fetcher>,
    ) -> io::Result<(Self, mpsc::Receiver<EngineEvent>)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("busboard-io")
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("busboard-engine".to_string())
            .spawn(move || run_commands(runtime, fetcher, cmd_rx, event_tx))?;

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn fetch(&self, url: impl Into<String>) {
        self.send(EngineCommand::Fetch { url: url.into() });
    }

    /// Arms `timer_id`, replacing an earlier timer with the same id.
    pub fn arm_timer(&self, timer_id: TimerId, delay: Duration) {
        self.send(EngineCommand::ArmTimer { timer_id, delay });
    }

    pub fn cancel_timer(&self, timer_id: TimerId) {
        self.send(EngineCommand::CancelTimer { timer_id });
    }

    pub fn shutdown(&self) {
        self.send(EngineCommand::Shutdown);
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            board_warn!("Engine thread is gone; command dropped");
        }
    }
}

fn run_commands(
    runtime: Runtime,
    fetcher: Arc<dyn Fetcher>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let shutdown = CancellationToken::new();
    let mut timers: HashMap<TimerId, AbortHandle> = HashMap::new();

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Fetch { url } => {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                let shutdown = shutdown.clone();
                runtime.spawn(async move {
                    board_debug!("GET {}", url);
                    let result = tokio::select! {
                        _ = shutdown.cancelled() => return,
                        result = fetch_arrivals(fetcher.as_ref(), &url) => result,
                    };
                    let _ = event_tx.send(EngineEvent::FetchCompleted { url, result });
                });
            }
            EngineCommand::ArmTimer { timer_id, delay } => {
                if let Some(previous) = timers.remove(&timer_id) {
                    previous.abort();
                }
                timers.retain(|_, handle| !handle.is_finished());
                let event_tx = event_tx.clone();
                let shutdown = shutdown.clone();
                let task = runtime.spawn(async move {
                    tokio::select! {
                        _ = shutdown.cancelled() => {}
                        _ = tokio::time::sleep(delay) => {
                            let _ = event_tx.send(EngineEvent::TimerFired { timer_id });
                        }
                    }
                });
                timers.insert(timer_id, task.abort_handle());
            }
            EngineCommand::CancelTimer { timer_id } => {
                if let Some(handle) = timers.remove(&timer_id) {
                    handle.abort();
                }
            }
            EngineCommand::Shutdown => break,
        }
    }

    shutdown.cancel();
    for handle in timers.into_values() {
        handle.abort();
    }
    runtime.shutdown_timeout(Duration::from_secs(1));
}

async fn fetch_arrivals(
    fetcher: &dyn Fetcher,
    url: &str,
) -> Result<serde_json::Value, FetchError> {
    let output = fetcher.fetch(url).await?;
    board_debug!(
        "Fetched {} bytes ({:?}) from {} after {} redirect(s)",
        output.metadata.byte_len,
        output.metadata.content_type,
        output.metadata.final_url,
        output.metadata.redirect_count
    );
    decode_json(&output.bytes)
        .map_err(|err| FetchError::new(FailureKind::MalformedPayload, err.to_string()))
}
