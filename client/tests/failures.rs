mod common;

use std::time::Duration;

use common::{Cluster, NamenodeOptions, bytes, eventually};
use proto::generated::namenode_namenode::{
    RepairNodeRequest, namenode_peer_client::NamenodePeerClient,
};

#[tokio::test]
async fn repair_rehomes_blocks_of_a_stopped_node() {
    let mut cluster = Cluster::start(3, NamenodeOptions::default()).await;
    let client = cluster.client();
    let content = bytes(12);
    let source = cluster.local_file("payload", &content);
    client.put(&source, "repair", "payload").await.unwrap();

    let state = cluster.namenode.instance.state();
    let placements = state.lock().await.read_file("repair/", "payload");
    let victim = placements[0].addresses[0].clone();
    cluster.datanode_mut(&victim).stop().await;

    let mut peer = NamenodePeerClient::connect(cluster.namenode.addrs.endpoint())
        .await
        .unwrap();
    let report = peer
        .repair_node(tonic::Request::new(RepairNodeRequest {
            dead_node: Some(victim.clone()),
        }))
        .await
        .unwrap()
        .into_inner();
    assert!(report.attempted);
    assert!(report.failed_blocks.is_empty(), "{:?}", report.failed_blocks);
    assert!(report.repaired_blocks.contains(&placements[0].block_id));

    {
        let state = state.lock().await;
        assert_eq!(state.registry.len(), 2);
        for placement in state.read_file("repair/", "payload") {
            assert_eq!(placement.addresses.len(), 2);
            assert!(placement.addresses.iter().all(|a| !a.same_node(&victim)));
        }
        state.check_consistency().unwrap();
    }

    let target = cluster.scratch.path().join("payload.out");
    client.get("repair", "payload", &target).await.unwrap();
    assert_eq!(std::fs::read(&target).unwrap(), content);
}

#[tokio::test]
async fn repair_without_spare_nodes_reports_every_block_failed() {
    let mut cluster = Cluster::start(2, NamenodeOptions::default()).await;
    let client = cluster.client();
    let source = cluster.local_file("payload", &bytes(8));
    client.put(&source, "d", "payload").await.unwrap();

    let victim = cluster.datanodes[0].addrs.clone();
    cluster.datanodes[0].stop().await;
    let report = cluster
        .namenode
        .instance
        .repairer()
        .redistribute(&victim)
        .await
        .unwrap();
    assert!(!report.attempted);
    assert!(report.repaired.is_empty());
    assert_eq!(report.failed.len(), 2);
    cluster
        .namenode
        .instance
        .state()
        .lock()
        .await
        .check_consistency()
        .unwrap();
}

#[tokio::test]
async fn heartbeat_loop_deregisters_a_stopped_node() {
    let options = NamenodeOptions {
        heartbeat_interval: Duration::from_millis(200),
        ..NamenodeOptions::default()
    };
    let mut cluster = Cluster::start(3, options).await;
    let client = cluster.client();
    let content = bytes(10);
    let source = cluster.local_file("watched", &content);
    client.put(&source, "hb", "watched").await.unwrap();

    let victim = cluster.datanodes[1].addrs.clone();
    cluster.datanodes[1].stop().await;
    let state = cluster.namenode.instance.state();
    let removed = eventually(Duration::from_secs(15), || {
        let state = state.clone();
        async move { state.lock().await.registry.len() == 2 }
    })
    .await;
    assert!(removed, "dead datanode still registered");
    let live = state.lock().await.live_nodes();
    assert!(live.iter().all(|node| !node.same_node(&victim)));

    let target = cluster.scratch.path().join("watched.out");
    let read_back = eventually(Duration::from_secs(10), || {
        let client = client.clone();
        let target = target.clone();
        async move { client.get("hb", "watched", &target).await.is_ok() }
    })
    .await;
    assert!(read_back);
    assert_eq!(std::fs::read(&target).unwrap(), content);
}

#[tokio::test]
async fn reads_fall_back_to_the_next_replica() {
    let mut cluster = Cluster::start(2, NamenodeOptions::default()).await;
    let client = cluster.client();
    let content = bytes(7);
    let source = cluster.local_file("fallback", &content);
    client.put(&source, "f", "fallback").await.unwrap();

    let placements = cluster
        .namenode
        .instance
        .state()
        .lock()
        .await
        .read_file("f/", "fallback");
    // the namenode is not told, so the dead primary stays first in line
    let primary = placements[0].addresses[0].clone();
    cluster.datanode_mut(&primary).stop().await;

    let target = cluster.scratch.path().join("fallback.out");
    client.get("f", "fallback", &target).await.unwrap();
    assert_eq!(std::fs::read(&target).unwrap(), content);
}
