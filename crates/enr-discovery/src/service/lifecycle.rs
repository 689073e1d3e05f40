use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::DiscoveryError;
use crate::service::core::{EnrDiscoveryService, Session};
use crate::service::lookup::{run_lookup_loop, run_notification_listener};

impl EnrDiscoveryService {
    /// Start the engine and the background discovery tasks.
    ///
    /// No-op if already running. Returns once the engine is started; the
    /// lookup loop runs detached from the caller.
    ///
    /// # Errors
    ///
    /// `Engine` if the engine fails to start. The service stays stopped.
    pub async fn start(&self) -> Result<(), DiscoveryError> {
        let mut session = self.session.lock().await;
        if session.is_some() {
            debug!("[enr] start() ignored, already running");
            return Ok(());
        }

        self.inner.started.store(true, Ordering::SeqCst);
        if let Err(e) = self.inner.engine.start().await {
            self.inner.started.store(false, Ordering::SeqCst);
            warn!(error = %e, "[enr] Discovery engine failed to start");
            return Err(e.into());
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let discovered = self.inner.engine.subscribe_discovered();
        let notification_task = tokio::spawn(run_notification_listener(
            Arc::clone(&self.inner),
            discovered,
            shutdown_rx.clone(),
        ));
        let lookup_task = tokio::spawn(run_lookup_loop(Arc::clone(&self.inner), shutdown_rx));

        *session = Some(Session {
            shutdown_tx,
            lookup_task,
            notification_task,
        });

        info!(
            interval_ms = self.inner.lookup_interval.as_millis() as u64,
            "[enr] Discovery started"
        );
        Ok(())
    }

    /// Stop the background tasks and the engine.
    ///
    /// No-op if already stopped. The run flag is cleared first, then both
    /// tasks are cancelled and awaited before the engine is stopped, so no
    /// lookup-path event is published once this returns.
    ///
    /// # Errors
    ///
    /// `Engine` if the engine fails to stop. The service is stopped
    /// regardless.
    pub async fn stop(&self) -> Result<(), DiscoveryError> {
        let mut guard = self.session.lock().await;
        let Some(session) = guard.take() else {
            debug!("[enr] stop() ignored, not running");
            return Ok(());
        };

        self.inner.started.store(false, Ordering::SeqCst);
        let _ = session.shutdown_tx.send(true);

        for (name, task) in [
            ("lookup", session.lookup_task),
            ("notification", session.notification_task),
        ] {
            if let Err(e) = task.await {
                warn!(task = name, error = %e, "[enr] Background task ended abnormally");
            }
        }

        if let Err(e) = self.inner.engine.stop().await {
            warn!(error = %e, "[enr] Discovery engine failed to stop cleanly");
            return Err(e.into());
        }

        info!(stats = ?self.stats(), "[enr] Discovery stopped");
        Ok(())
    }

    /// Whether the service is running.
    pub fn is_started(&self) -> bool {
        self.inner.is_running()
    }
}
