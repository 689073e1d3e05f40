use async_trait::async_trait;

use crate::domain::{DiscoveryError, RecordInput};
use crate::ports::PeerDiscovery;
use crate::service::EnrDiscoveryService;

#[async_trait]
impl PeerDiscovery for EnrDiscoveryService {
    async fn start(&self) -> Result<(), DiscoveryError> {
        EnrDiscoveryService::start(self).await
    }

    async fn stop(&self) -> Result<(), DiscoveryError> {
        EnrDiscoveryService::stop(self).await
    }

    fn is_started(&self) -> bool {
        EnrDiscoveryService::is_started(self)
    }

    fn add_record(&self, input: RecordInput) -> Result<(), DiscoveryError> {
        EnrDiscoveryService::add_record(self, input)
    }
}
