use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::domain::{DiscoveryConfig, DiscoveryError, DiscoveryStats, NodeRecord};
use crate::ports::{DiscoveryEngine, PeerEventPublisher};

/// ENR discovery service implementing the `PeerDiscovery` driving port.
///
/// Wraps a `DiscoveryEngine`, seeds it with boot records, and while running
/// keeps a background lookup loop and a notification listener alive. Every
/// record either path produces is translated and published as a `"peer"`
/// event.
///
/// # Example
///
/// ```rust,ignore
/// let publisher = Arc::new(BroadcastPeerPublisher::new());
/// let mut peers = publisher.subscribe();
///
/// let service = EnrDiscoveryService::new(config, publisher, |local, bind| {
///     Arc::new(MyEngine::new(local.clone(), bind))
/// })?;
///
/// service.start().await?;
/// while let Ok(PeerDiscoveryEvent::Peer(peer)) = peers.recv().await {
///     dial(peer.peer_id, &peer.addresses);
/// }
/// ```
pub struct EnrDiscoveryService {
    /// State shared with background tasks
    pub(crate) inner: Arc<ServiceInner>,
    /// Running session; `None` while stopped
    pub(crate) session: Mutex<Option<Session>>,
}

/// State reachable from both the service handle and its background tasks.
pub(crate) struct ServiceInner {
    pub(crate) engine: Arc<dyn DiscoveryEngine>,
    pub(crate) publisher: Arc<dyn PeerEventPublisher>,
    /// Run flag checked by the lookup loop after each lookup
    pub(crate) started: AtomicBool,
    pub(crate) lookup_interval: Duration,
    pub(crate) counters: Counters,
}

impl ServiceInner {
    pub(crate) fn is_running(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

/// Handles owned by one start/stop cycle.
pub(crate) struct Session {
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) lookup_task: JoinHandle<()>,
    pub(crate) notification_task: JoinHandle<()>,
}

#[derive(Default)]
pub(crate) struct Counters {
    pub(crate) lookups: AtomicU64,
    pub(crate) lookup_failures: AtomicU64,
    pub(crate) peers_emitted: AtomicU64,
    pub(crate) records_ignored: AtomicU64,
}

impl Counters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> DiscoveryStats {
        DiscoveryStats {
            lookups: self.lookups.load(Ordering::Relaxed),
            lookup_failures: self.lookup_failures.load(Ordering::Relaxed),
            peers_emitted: self.peers_emitted.load(Ordering::Relaxed),
            records_ignored: self.records_ignored.load(Ordering::Relaxed),
        }
    }
}

impl EnrDiscoveryService {
    /// Create the service and seed the engine with the boot records.
    ///
    /// `build_engine` receives the local record and the UDP socket address
    /// the engine must bind to.
    ///
    /// Each boot record goes through the strict path (handed to the engine
    /// store) and then the lazy path (published as a `"peer"` event), so
    /// bootstrap peers surface before `start` is ever called.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the bind address is not UDP, or a boot record has
    ///   no UDP endpoint
    /// - `Decode` if an encoded boot record is malformed
    /// - `Engine` if the engine refuses a boot record
    pub fn new<F>(
        config: DiscoveryConfig,
        publisher: Arc<dyn PeerEventPublisher>,
        build_engine: F,
    ) -> Result<Self, DiscoveryError>
    where
        F: FnOnce(&NodeRecord, std::net::SocketAddr) -> Arc<dyn DiscoveryEngine>,
    {
        if !config.bind_address.is_udp() {
            return Err(DiscoveryError::InvalidInput(format!(
                "bind address {} must be a UDP address",
                config.bind_address
            )));
        }

        let engine = build_engine(&config.local_record, config.bind_address.socket_addr());
        info!(
            node_id = %config.local_record.node_id(),
            bind = %config.bind_address,
            boot_records = config.boot_records.len(),
            "[enr] Discovery engine created"
        );

        let inner = Arc::new(ServiceInner {
            engine,
            publisher,
            started: AtomicBool::new(false),
            lookup_interval: config.lookup_interval,
            counters: Counters::default(),
        });

        for input in config.boot_records {
            let record = input.into_record()?;
            inner.add_record(record.clone())?;
            inner.ingest_record(&record);
        }

        debug!(stats = ?inner.counters.snapshot(), "[enr] Boot records ingested");

        Ok(Self {
            inner,
            session: Mutex::new(None),
        })
    }

    /// Activity counters since construction.
    pub fn stats(&self) -> DiscoveryStats {
        self.inner.counters.snapshot()
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &Arc<dyn DiscoveryEngine> {
        &self.inner.engine
    }

    /// Configured wait between lookups.
    pub fn lookup_interval(&self) -> Duration {
        self.inner.lookup_interval
    }
}

impl Drop for EnrDiscoveryService {
    fn drop(&mut self) {
        // Background tasks hold their own Arc; tell them to wind down.
        if let Some(session) = self.session.get_mut().take() {
            self.inner.started.store(false, Ordering::SeqCst);
            let _ = session.shutdown_tx.send(true);
        }
    }
}
