use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::contract::handler::MiniAppHandler;
use crate::contract::model::Command;

struct Job {
    handler: Arc<dyn MiniAppHandler>,
    command: Command,
}

/// Fire-and-continue executor: a bounded queue drained by a fixed pool of
/// workers. Submission waits when the queue is full (backpressure instead of
/// drops). Handler outcomes are logged only; there is no result channel back
/// to the invoker.
pub struct Dispatcher {
    tx: Mutex<Option<mpsc::Sender<Job>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl Dispatcher {
    pub fn new(queue_capacity: usize, worker_count: usize) -> Self {
        let (tx, rx) = mpsc::channel::<Job>(queue_capacity.max(1));
        let rx = Arc::new(Mutex::new(rx));

        let workers = (0..worker_count.max(1))
            .map(|worker| {
                let rx = rx.clone();
                tokio::spawn(async move {
                    loop {
                        // The lock covers only the receive, never the run.
                        let job = {
                            let mut rx = rx.lock().await;
                            rx.recv().await
                        };
                        let Some(job) = job else {
                            debug!(worker, "Dispatch queue closed, worker exiting");
                            break;
                        };
                        let identity = job.command.identity.clone();
                        match job.handler.run_command(&job.command).await {
                            Ok(_) => debug!(worker, command = %identity, "Background command completed"),
                            Err(e) => {
                                warn!(worker, command = %identity, error = %e, "Background command failed")
                            }
                        }
                    }
                })
            })
            .collect();

        Self {
            tx: Mutex::new(Some(tx)),
            workers: Mutex::new(workers),
        }
    }

    /// Queue a command for background execution. Waits for queue space;
    /// fails only when the dispatcher has been shut down.
    pub async fn submit(
        &self,
        handler: Arc<dyn MiniAppHandler>,
        command: Command,
    ) -> Result<(), CommandDropped> {
        let tx = self.tx.lock().await.clone();
        let Some(tx) = tx else {
            return Err(CommandDropped {
                identity: command.identity.to_string(),
            });
        };
        tx.send(Job { handler, command })
            .await
            .map_err(|e| CommandDropped {
                identity: e.0.command.identity.to_string(),
            })
    }

    /// Stop accepting work and wait for the workers to drain the queue.
    pub async fn shutdown(&self) {
        self.tx.lock().await.take();
        let handles: Vec<_> = self.workers.lock().await.drain(..).collect();
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Dispatch worker panicked");
            }
        }
        info!("Dispatcher drained");
    }
}

/// The dispatcher was already shut down when a command was submitted.
#[derive(Debug)]
pub struct CommandDropped {
    pub identity: String,
}

impl std::fmt::Display for CommandDropped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dispatcher is shut down, command {} dropped", self.identity)
    }
}

impl std::error::Error for CommandDropped {}
