pub mod sequence;

pub use sequence::{RequestSequencer, RequestTicket};

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::error;

/// Spawns a task that will automatically trigger shutdown if it encounters an error
///
/// The polling loop and the ctrl-c listener share one `watch` channel; whichever
/// side fails first flips it so the other side can stop.
///
/// # Arguments
///
/// * `f` - The future to execute, which must return a `Result<()>`
/// * `shutdown_sender` - A channel sender used to signal shutdown to other parts of the application
///
/// # Returns
///
/// Returns a `JoinHandle` for the spawned task
///
/// # Example
///
/// ```rust,ignore
/// let (shutdown_tx, shutdown_rx) = watch::channel(false);
/// let handle = spawn_with_shutdown(run_polling(dashboard, interval, shutdown_rx), shutdown_tx);
/// ```
pub fn spawn_with_shutdown<F>(
    f: F,
    shutdown_sender: watch::Sender<bool>,
) -> tokio::task::JoinHandle<Result<()>>
where
    F: std::future::Future<Output = Result<()>> + Send + 'static,
{
    tokio::task::spawn(async move {
        let res = f.await;
        if let Err(e) = &res {
            error!(
                target = "greenprompt-utils",
                event = "task-failed",
                error = %e,
                "Task failed, sending shutdown signal"
            );
            shutdown_sender
                .send(true)
                .context("Failed to send shutdown signal")?;
        }
        res
    })
}
