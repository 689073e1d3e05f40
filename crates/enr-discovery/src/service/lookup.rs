//! Background tasks of a running session.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::{NodeId, NodeRecord};
use crate::service::core::{Counters, ServiceInner};

/// Random-target lookup loop.
///
/// Each iteration looks up a fresh random target, publishes every returned
/// record in order, then waits `lookup_interval`. Both the lookup and the
/// wait race the shutdown signal, so a stop never waits for a slow engine.
///
/// A failed lookup is logged and the loop carries on after the usual wait.
pub(crate) async fn run_lookup_loop(inner: Arc<ServiceInner>, mut shutdown: watch::Receiver<bool>) {
    debug!("[enr] Lookup loop started");

    while inner.is_running() && !*shutdown.borrow() {
        let target = NodeId::random();
        Counters::bump(&inner.counters.lookups);

        let result = tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            result = inner.engine.find_node(target) => result,
        };

        // Stop may have landed while the lookup was completing.
        if !inner.is_running() {
            break;
        }

        match result {
            Ok(records) => {
                debug!(%target, found = records.len(), "[enr] Lookup completed");
                for record in &records {
                    inner.ingest_record(record);
                }
            }
            Err(e) => {
                Counters::bump(&inner.counters.lookup_failures);
                warn!(%target, error = %e, "[enr] Lookup failed, retrying after interval");
            }
        }

        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = tokio::time::sleep(inner.lookup_interval) => {}
        }
    }

    debug!("[enr] Lookup loop exited");
}

/// Forward records the engine discovers on its own into the lazy path.
pub(crate) async fn run_notification_listener(
    inner: Arc<ServiceInner>,
    mut discovered: broadcast::Receiver<NodeRecord>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            received = discovered.recv() => match received {
                Ok(record) => {
                    inner.ingest_record(&record);
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "[enr] Discovery notifications dropped, listener lagging");
                }
                Err(RecvError::Closed) => {
                    debug!("[enr] Engine closed its discovery stream");
                    break;
                }
            },
        }
    }

    debug!("[enr] Notification listener exited");
}
