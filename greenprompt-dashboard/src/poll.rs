use std::{sync::Arc, time::Duration};

use anyhow::Result;
use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, info, instrument};

use crate::{
    dashboard::{Dashboard, Source},
    snapshot::DashboardSnapshot,
};

/// Refreshes every region once per `interval` until shutdown is signalled.
///
/// The first tick fires immediately and doubles as the initial load. Each source gets
/// its own task, so a source that never answers does not delay the others. At most one
/// refresh per source is in flight: a tick skips any source whose previous refresh has
/// not finished yet. Refreshes still running at shutdown are aborted.
#[instrument(level = "info", skip_all, fields(interval_secs = interval.as_secs()))]
pub async fn run_polling(
    dashboard: Arc<Dashboard>,
    interval: Duration,
    mut shutdown_receiver: watch::Receiver<bool>,
) -> Result<()> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight: [Option<JoinHandle<bool>>; 3] = Default::default();
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                debug!(
                    target = "greenprompt-dashboard",
                    event = "poll-tick",
                );
                for (source, slot) in Source::ALL.into_iter().zip(in_flight.iter_mut()) {
                    if slot.as_ref().is_some_and(|handle| !handle.is_finished()) {
                        debug!(
                            target = "greenprompt-dashboard",
                            event = "refresh-still-running",
                            source = source.as_str(),
                            "Previous refresh has not finished, skipping this tick"
                        );
                        continue;
                    }
                    *slot = Some(dashboard.spawn_refresh(source));
                }
            }
            _ = shutdown_receiver.changed() => {
                for handle in in_flight.iter().flatten() {
                    handle.abort();
                }
                info!(
                    target = "greenprompt-dashboard",
                    event = "polling-stopped",
                    "Shutdown signal received, stopping polling"
                );
                return Ok(());
            }
        }
    }
}

/// Calls `render` with a fresh snapshot every time a region changes, until shutdown.
pub async fn run_render_loop<F>(
    dashboard: Arc<Dashboard>,
    mut shutdown_receiver: watch::Receiver<bool>,
    mut render: F,
) -> Result<()>
where
    F: FnMut(&DashboardSnapshot) + Send,
{
    let mut revisions = dashboard.subscribe();
    loop {
        tokio::select! {
            changed = revisions.changed() => {
                changed?;
                render(&dashboard.snapshot().await);
            }
            _ = shutdown_receiver.changed() => return Ok(()),
        }
    }
}
