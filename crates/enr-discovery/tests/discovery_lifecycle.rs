//! # Discovery Lifecycle Integration Tests
//!
//! Drive the service through its public API only: TOML config in, broadcast
//! `"peer"` events out, with the scriptable in-memory engine in between.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use qc_enr_discovery::{
    BroadcastPeerPublisher, ConfigProvider, DiscoveryEngine, EnrDiscoveryService,
    InMemoryDiscoveryEngine, NodeRecord, PeerAddress, PeerDiscoveryEvent, PublicKey,
    TomlConfigProvider,
};
use tokio::sync::broadcast;
use tokio::time::timeout;

fn record(byte: u8) -> NodeRecord {
    let mut key = [0u8; 33];
    key[0] = 0x02;
    key[1] = byte;
    NodeRecord::new(u64::from(byte), PublicKey::new(key))
        .with_ip(Ipv4Addr::new(10, 1, 0, byte))
        .with_udp(9000)
}

fn service_with(
    provider: &dyn ConfigProvider,
) -> (
    EnrDiscoveryService,
    Arc<InMemoryDiscoveryEngine>,
    broadcast::Receiver<PeerDiscoveryEvent>,
) {
    let config = provider.discovery_config();
    let publisher = Arc::new(BroadcastPeerPublisher::with_capacity(64));
    let events = publisher.subscribe();

    let engine = Arc::new(InMemoryDiscoveryEngine::new(
        config.local_record.clone(),
        config.bind_address.socket_addr(),
    ));
    let handle = Arc::clone(&engine);
    let service = EnrDiscoveryService::new(config, publisher, move |_, _| {
        handle as Arc<dyn DiscoveryEngine>
    })
    .expect("service should build");

    (service, engine, events)
}

async fn next_peer(
    events: &mut broadcast::Receiver<PeerDiscoveryEvent>,
) -> qc_enr_discovery::DiscoveredPeer {
    let event = timeout(Duration::from_secs(2), events.recv())
        .await
        .expect("timed out waiting for a peer event")
        .expect("event channel closed");
    assert_eq!(event.kind(), "peer");
    let PeerDiscoveryEvent::Peer(peer) = event;
    peer
}

/// A boot record with only a UDP endpoint surfaces at construction time.
#[tokio::test]
async fn test_boot_record_surfaces_before_start() {
    let content = format!(
        "[discovery]\nlocal_record = \"{}\"\nboot_records = [\"{}\"]\nlookup_interval_ms = 10\n",
        record(1).to_text(),
        record(2).to_text(),
    );
    let provider = TomlConfigProvider::parse(&content).unwrap();

    let (service, engine, mut events) = service_with(&provider);

    let peer = next_peer(&mut events).await;
    assert_eq!(peer.peer_id, record(2).peer_id());
    assert_eq!(
        peer.addresses,
        vec![PeerAddress::udp(Ipv4Addr::new(10, 1, 0, 2), 9000)]
    );
    assert!(events.try_recv().is_err());

    assert_eq!(engine.stored_records(), vec![record(2)]);
    assert!(!service.is_started());
}

/// Two valid records and one endpoint-less record yield two events, in order.
#[tokio::test]
async fn test_lookup_response_yields_valid_peers_in_order() {
    let content = format!(
        "[discovery]\nlocal_record = \"{}\"\nlookup_interval_ms = 10\n",
        record(1).to_text(),
    );
    let provider = TomlConfigProvider::parse(&content).unwrap();
    let (service, engine, mut events) = service_with(&provider);

    let unreachable = NodeRecord::new(1, record(4).pubkey).with_ip(Ipv4Addr::new(10, 1, 0, 4));
    engine.queue_lookup_response(vec![record(3), unreachable, record(5)]);

    service.start().await.unwrap();

    assert_eq!(next_peer(&mut events).await.peer_id, record(3).peer_id());
    assert_eq!(next_peer(&mut events).await.peer_id, record(5).peer_id());

    service.stop().await.unwrap();
    assert!(events.try_recv().is_err());
    assert_eq!(service.stats().peers_emitted, 2);
    assert_eq!(service.stats().records_ignored, 1);
}

/// A lookup parked in the engine when `stop` runs never produces events.
#[tokio::test]
async fn test_stop_discards_in_flight_lookup() {
    let content = format!(
        "[discovery]\nlocal_record = \"{}\"\nlookup_interval_ms = 10\n",
        record(1).to_text(),
    );
    let provider = TomlConfigProvider::parse(&content).unwrap();
    let (service, engine, mut events) = service_with(&provider);

    engine.hold_lookups();
    engine.queue_lookup_response(vec![record(6)]);
    service.start().await.unwrap();

    timeout(Duration::from_secs(2), async {
        while engine.lookup_count() == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("lookup never issued");

    service.stop().await.unwrap();
    engine.release_lookups();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(events.try_recv().is_err());
    assert!(!engine.is_running());
}

/// The engine's own discoveries reach subscribers while running.
#[tokio::test]
async fn test_engine_notifications_reach_subscribers() {
    let content = format!(
        "[discovery]\nlocal_record = \"{}\"\nlookup_interval_ms = 60000\n",
        record(1).to_text(),
    );
    let provider = TomlConfigProvider::parse(&content).unwrap();
    let (service, engine, mut events) = service_with(&provider);

    service.start().await.unwrap();
    engine.announce(record(7).with_tcp(30303));

    let peer = next_peer(&mut events).await;
    assert_eq!(peer.peer_id, record(7).peer_id());
    assert_eq!(
        peer.addresses,
        vec![
            PeerAddress::udp(Ipv4Addr::new(10, 1, 0, 7), 9000),
            PeerAddress::tcp(Ipv4Addr::new(10, 1, 0, 7), 30303),
        ]
    );

    service.stop().await.unwrap();
}
