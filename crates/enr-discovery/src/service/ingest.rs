use tracing::{debug, trace};

use crate::domain::{
    require_udp_endpoint, translate, DiscoveryError, NodeRecord, PeerDiscoveryEvent, RecordInput,
};
use crate::service::core::{Counters, EnrDiscoveryService, ServiceInner};

impl ServiceInner {
    /// Lazy path: publish the record as a peer if it is dialable.
    ///
    /// Returns `true` when an event was published.
    pub(crate) fn ingest_record(&self, record: &NodeRecord) -> bool {
        let Some(peer) = translate(record) else {
            Counters::bump(&self.counters.records_ignored);
            trace!(node_id = %record.node_id(), "[enr] Record has no UDP endpoint, ignored");
            return false;
        };

        debug!(
            peer = %peer.peer_id,
            addrs = peer.addresses.len(),
            "[enr] Peer discovered"
        );
        let receivers = self.publisher.publish(PeerDiscoveryEvent::Peer(peer));
        Counters::bump(&self.counters.peers_emitted);
        trace!(receivers, "[enr] Peer event published");
        true
    }

    /// Strict path: refuse records without a UDP endpoint, store the rest.
    pub(crate) fn add_record(&self, record: NodeRecord) -> Result<(), DiscoveryError> {
        require_udp_endpoint(&record)?;
        let node_id = record.node_id();
        self.engine.add_record(record)?;
        debug!(%node_id, "[enr] Record added to engine store");
        Ok(())
    }
}

impl EnrDiscoveryService {
    /// Translate a record and publish it as a `"peer"` event.
    ///
    /// Records without a UDP endpoint are skipped without error.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if an event was published, `Ok(false)` if the record was
    /// skipped.
    ///
    /// # Errors
    ///
    /// `Decode` if encoded input is malformed.
    pub fn ingest(&self, input: impl Into<RecordInput>) -> Result<bool, DiscoveryError> {
        let record = input.into().into_record()?;
        Ok(self.inner.ingest_record(&record))
    }

    /// Validate a trusted record and hand it to the engine store.
    ///
    /// # Errors
    ///
    /// - `Decode` if encoded input is malformed
    /// - `InvalidInput` if the record has no UDP endpoint; the engine is not
    ///   touched
    /// - `Engine` if the engine refuses the record
    pub fn add_record(&self, input: impl Into<RecordInput>) -> Result<(), DiscoveryError> {
        let record = input.into().into_record()?;
        self.inner.add_record(record)
    }
}
