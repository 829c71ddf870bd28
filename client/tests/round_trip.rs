mod common;

use std::collections::HashSet;

use common::{Cluster, NamenodeOptions, bytes};
use storage::storage::Storage;
use utilities::error::DfsError;

#[tokio::test]
async fn put_then_get_returns_identical_bytes_around_block_boundaries() {
    let cluster = Cluster::start(3, NamenodeOptions::default()).await;
    let client = cluster.client();
    // block size 4
    for size in [0usize, 3, 4, 5, 12] {
        let name = format!("file_{size}");
        let content = bytes(size);
        let source = cluster.local_file(&format!("{name}.in"), &content);
        let report = client.put(&source, "data", &name).await.unwrap();
        assert_eq!(report.file_size, size as u64);
        assert_eq!(report.blocks, size.div_ceil(4));
        assert_eq!(report.under_replicated, 0);

        let target = cluster.scratch.path().join(format!("{name}.out"));
        let written = client.get("data", &name, &target).await.unwrap();
        assert_eq!(written, size as u64);
        assert_eq!(std::fs::read(&target).unwrap(), content, "size {size}");
        assert_eq!(client.stat("data", &name).await.unwrap(), size as u64);
    }
    let listed: Vec<String> = client
        .list("data")
        .await
        .unwrap()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(listed, ["file_0", "file_3", "file_4", "file_5", "file_12"]);
}

#[tokio::test]
async fn twelve_bytes_on_two_nodes_with_factor_two() {
    let cluster = Cluster::start(2, NamenodeOptions::default()).await;
    let client = cluster.client();
    let content = b"hello world!".to_vec();
    let source = cluster.local_file("greeting", &content);
    client.put(&source, "docs", "greeting").await.unwrap();

    let placements = cluster
        .namenode
        .instance
        .state()
        .lock()
        .await
        .read_file("docs/", "greeting");
    assert_eq!(placements.len(), 3);
    for (placement, chunk) in placements.iter().zip(content.chunks(4)) {
        assert_eq!(placement.addresses.len(), 2);
        let distinct: HashSet<String> = placement.addresses.iter().map(|a| a.to_string()).collect();
        assert_eq!(distinct.len(), 2);
        // chained replication put the same bytes on both nodes
        for addrs in &placement.addresses {
            let stored = cluster
                .datanode(addrs)
                .store()
                .get_block("docs/", &placement.block_id)
                .await
                .unwrap();
            assert_eq!(stored, chunk);
        }
    }
    assert_eq!(
        client.list("docs").await.unwrap(),
        vec![("greeting".to_owned(), 12)]
    );
    let target = cluster.scratch.path().join("greeting.out");
    client.get("docs", "greeting", &target).await.unwrap();
    assert_eq!(std::fs::read(&target).unwrap(), content);
}

#[tokio::test]
async fn get_replaces_existing_local_content() {
    let cluster = Cluster::start(2, NamenodeOptions::default()).await;
    let client = cluster.client();
    let source = cluster.local_file("short", b"abc");
    client.put(&source, "", "short").await.unwrap();
    let target = cluster.local_file("target", b"this is much longer than three bytes");
    client.get("", "short", &target).await.unwrap();
    assert_eq!(std::fs::read(&target).unwrap(), b"abc");
}

#[tokio::test]
async fn rewriting_a_file_replaces_its_blocks() {
    let cluster = Cluster::start(2, NamenodeOptions::default()).await;
    let client = cluster.client();
    let first = cluster.local_file("first", &bytes(9));
    client.put(&first, "d", "f").await.unwrap();
    let second = cluster.local_file("second", b"xy");
    client.put(&second, "d", "f").await.unwrap();

    let state = cluster.namenode.instance.state();
    let state = state.lock().await;
    assert_eq!(state.read_file("d/", "f").len(), 1);
    assert_eq!(state.block_to_nodes.len(), 1);
    state.check_consistency().unwrap();
    drop(state);

    let target = cluster.scratch.path().join("out");
    client.get("d", "f", &target).await.unwrap();
    assert_eq!(std::fs::read(&target).unwrap(), b"xy");
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let cluster = Cluster::start(1, NamenodeOptions::default()).await;
    let client = cluster.client();
    let target = cluster.scratch.path().join("never");
    let err = client.get("nowhere", "ghost", &target).await.unwrap_err();
    assert!(matches!(err, DfsError::NotFound(_)), "{err}");
    assert!(matches!(
        client.stat("nowhere", "ghost").await,
        Err(DfsError::NotFound(_))
    ));
}

#[tokio::test]
async fn put_fails_without_datanodes() {
    let cluster = Cluster::start(0, NamenodeOptions::default()).await;
    let client = cluster.client();
    let source = cluster.local_file("lonely", b"data");
    let err = client.put(&source, "d", "lonely").await.unwrap_err();
    assert!(!err.is_recoverable(), "{err}");
    assert!(client.list("d").await.unwrap().is_empty());
}
