use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::{broadcast, watch};

use crate::domain::{EngineError, NodeId, NodeRecord};
use crate::ports::DiscoveryEngine;

const DISCOVERED_CAPACITY: usize = 256;

/// In-memory discovery engine for testing.
///
/// Lookups answer from a queue of scripted responses (empty once the queue
/// runs dry). Lookups can be held open to simulate a slow network, and
/// "discovered" notifications can be injected at will. Every call is
/// counted so tests can assert on lifecycle behavior.
///
/// # Example
///
/// ```rust
/// use qc_enr_discovery::adapters::InMemoryDiscoveryEngine;
/// use qc_enr_discovery::{NodeRecord, PublicKey};
///
/// let mut key = [0u8; 33];
/// key[0] = 0x02;
/// let local = NodeRecord::new(1, PublicKey::new(key));
/// let engine = InMemoryDiscoveryEngine::new(local, "0.0.0.0:9000".parse().unwrap());
///
/// engine.queue_lookup_response(vec![]);
/// assert_eq!(engine.start_count(), 0);
/// ```
pub struct InMemoryDiscoveryEngine {
    local_record: NodeRecord,
    bind_addr: SocketAddr,
    running: AtomicBool,
    fail_start: AtomicBool,
    store: Mutex<Vec<NodeRecord>>,
    lookup_responses: Mutex<VecDeque<Result<Vec<NodeRecord>, EngineError>>>,
    lookup_targets: Mutex<Vec<NodeId>>,
    /// `true` while lookups are held open
    lookup_gate: watch::Sender<bool>,
    discovered: broadcast::Sender<NodeRecord>,
    start_calls: AtomicUsize,
    stop_calls: AtomicUsize,
    subscribe_calls: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryDiscoveryEngine {
    /// Create an engine advertising `local_record` on `bind_addr`.
    #[must_use]
    pub fn new(local_record: NodeRecord, bind_addr: SocketAddr) -> Self {
        let (discovered, _) = broadcast::channel(DISCOVERED_CAPACITY);
        let (lookup_gate, _) = watch::channel(false);
        Self {
            local_record,
            bind_addr,
            running: AtomicBool::new(false),
            fail_start: AtomicBool::new(false),
            store: Mutex::new(Vec::new()),
            lookup_responses: Mutex::new(VecDeque::new()),
            lookup_targets: Mutex::new(Vec::new()),
            lookup_gate,
            discovered,
            start_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
            subscribe_calls: AtomicUsize::new(0),
        }
    }

    /// Record the engine advertises.
    pub fn local_record(&self) -> &NodeRecord {
        &self.local_record
    }

    /// Address the engine was bound to.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Whether `start` succeeded without a later `stop`.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Make subsequent `start` calls fail.
    pub fn fail_next_start(&self, fail: bool) {
        self.fail_start.store(fail, Ordering::SeqCst);
    }

    /// Script the result of a future lookup.
    pub fn queue_lookup_response(&self, records: Vec<NodeRecord>) {
        lock(&self.lookup_responses).push_back(Ok(records));
    }

    /// Script a future lookup to fail.
    pub fn queue_lookup_failure(&self, message: impl Into<String>) {
        lock(&self.lookup_responses).push_back(Err(EngineError::new(message)));
    }

    /// Hold lookups open until `release_lookups` is called.
    pub fn hold_lookups(&self) {
        self.lookup_gate.send_replace(true);
    }

    /// Let held lookups complete.
    pub fn release_lookups(&self) {
        self.lookup_gate.send_replace(false);
    }

    /// Deliver a record on the "discovered" notification stream.
    ///
    /// Returns the number of listeners it reached.
    pub fn announce(&self, record: NodeRecord) -> usize {
        self.discovered.send(record).unwrap_or(0)
    }

    /// Records currently in the store, in insertion order.
    pub fn stored_records(&self) -> Vec<NodeRecord> {
        lock(&self.store).clone()
    }

    /// Targets of every lookup issued so far.
    pub fn lookup_targets(&self) -> Vec<NodeId> {
        lock(&self.lookup_targets).clone()
    }

    /// Number of lookups issued so far.
    pub fn lookup_count(&self) -> usize {
        lock(&self.lookup_targets).len()
    }

    /// Scripted responses not yet consumed.
    pub fn pending_responses(&self) -> usize {
        lock(&self.lookup_responses).len()
    }

    /// Number of `start` calls.
    pub fn start_count(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    /// Number of `stop` calls.
    pub fn stop_count(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    /// Number of notification subscriptions taken.
    pub fn subscribe_count(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    /// Live notification subscribers.
    pub fn listener_count(&self) -> usize {
        self.discovered.receiver_count()
    }
}

#[async_trait]
impl DiscoveryEngine for InMemoryDiscoveryEngine {
    async fn start(&self) -> Result<(), EngineError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(EngineError::new("bind failed"));
        }
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(EngineError::new("engine already started"));
        }
        Ok(())
    }

    async fn stop(&self) -> Result<(), EngineError> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn find_node(&self, target: NodeId) -> Result<Vec<NodeRecord>, EngineError> {
        if !self.is_running() {
            return Err(EngineError::new("engine not started"));
        }
        lock(&self.lookup_targets).push(target);

        let mut gate = self.lookup_gate.subscribe();
        let released = gate.wait_for(|held| !*held).await.is_ok();
        if !released {
            return Err(EngineError::new("engine dropped"));
        }

        lock(&self.lookup_responses)
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn add_record(&self, record: NodeRecord) -> Result<(), EngineError> {
        lock(&self.store).push(record);
        Ok(())
    }

    fn subscribe_discovered(&self) -> broadcast::Receiver<NodeRecord> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        self.discovered.subscribe()
    }
}
