mod common;

use client::config::DeleteMode;
use common::{Cluster, NamenodeOptions, TestNamenode, bytes};
use storage::storage::Storage;
use utilities::error::DfsError;

#[tokio::test]
async fn mkdir_creates_the_directory_on_every_node() {
    let cluster = Cluster::start(3, NamenodeOptions::default()).await;
    let client = cluster.client();
    assert_eq!(client.mkdir("photos/2024").await.unwrap(), 3);
    // a second run changes nothing
    assert_eq!(client.mkdir("photos/2024").await.unwrap(), 3);
    for node in &cluster.datanodes {
        assert!(node.root.path().join("photos/2024").is_dir());
    }
}

#[tokio::test]
async fn directory_rename_moves_prefixed_files_only() {
    let cluster = Cluster::start(2, NamenodeOptions::default()).await;
    let client = cluster.client();
    let a = bytes(6);
    let b = bytes(3);
    client
        .put(cluster.local_file("a", &a), "src", "a")
        .await
        .unwrap();
    client
        .put(cluster.local_file("b", &b), "src/inner", "b")
        .await
        .unwrap();
    client
        .put(cluster.local_file("c", b"c"), "srcx", "c")
        .await
        .unwrap();

    assert_eq!(client.rename("src/", "dst/").await.unwrap(), 2);

    let target = cluster.scratch.path().join("a.out");
    client.get("dst", "a", &target).await.unwrap();
    assert_eq!(std::fs::read(&target).unwrap(), a);
    client.get("dst/inner", "b", &target).await.unwrap();
    assert_eq!(std::fs::read(&target).unwrap(), b);
    assert_eq!(client.list("srcx").await.unwrap(), vec![("c".to_owned(), 1)]);
    assert!(client.list("src").await.unwrap().is_empty());
    assert!(matches!(
        client.stat("src", "a").await,
        Err(DfsError::NotFound(_))
    ));
    for node in &cluster.datanodes {
        assert!(!node.root.path().join("src").exists());
    }
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
async fn empty_directory_from_mkdir_can_be_renamed() {
    let cluster = Cluster::start(2, NamenodeOptions::default()).await;
    let client = cluster.client();
    client.mkdir("empty").await.unwrap();
    assert_eq!(client.rename("empty/", "moved/").await.unwrap(), 0);
    for node in &cluster.datanodes {
        assert!(!node.root.path().join("empty").exists());
        assert!(node.root.path().join("moved").is_dir());
    }
    // gone from every node and from metadata
    assert!(matches!(
        client.rename("empty/", "again/").await,
        Err(DfsError::NotFound(_))
    ));
}

#[tokio::test]
async fn directory_rename_onto_populated_directory_is_rejected() {
    let cluster = Cluster::start(2, NamenodeOptions::default()).await;
    let client = cluster.client();
    let a = bytes(5);
    client.put(cluster.local_file("a", &a), "src", "a").await.unwrap();
    client
        .put(cluster.local_file("b", b"b"), "dst", "b")
        .await
        .unwrap();
    assert!(matches!(
        client.rename("src/", "dst/").await,
        Err(DfsError::InvalidArgument(_))
    ));
    let target = cluster.scratch.path().join("a.out");
    client.get("src", "a", &target).await.unwrap();
    assert_eq!(std::fs::read(&target).unwrap(), a);
    assert_eq!(client.list("dst").await.unwrap(), vec![("b".to_owned(), 1)]);
}

#[tokio::test]
async fn file_rename_is_metadata_only() {
    let cluster = Cluster::start(2, NamenodeOptions::default()).await;
    let client = cluster.client();
    let content = bytes(9);
    client
        .put(cluster.local_file("old", &content), "d", "old")
        .await
        .unwrap();
    client.rename("d/old", "d/new").await.unwrap();

    let target = cluster.scratch.path().join("new.out");
    client.get("d", "new", &target).await.unwrap();
    assert_eq!(std::fs::read(&target).unwrap(), content);
    assert!(client.stat("d", "old").await.is_err());
    // another directory would need the bytes moved
    assert!(client.rename("d/new", "e/new").await.is_err());
}

#[tokio::test]
async fn delete_file_removes_blocks_and_metadata() {
    let cluster = Cluster::start(2, NamenodeOptions::default()).await;
    let client = cluster.client();
    client
        .put(cluster.local_file("doomed", &bytes(10)), "del", "doomed")
        .await
        .unwrap();
    client
        .put(cluster.local_file("kept", b"kept"), "del", "kept")
        .await
        .unwrap();
    let placements = cluster
        .namenode
        .instance
        .state()
        .lock()
        .await
        .read_file("del/", "doomed");

    assert!(client.delete_file("del", "doomed").await.unwrap());
    assert!(matches!(
        client.stat("del", "doomed").await,
        Err(DfsError::NotFound(_))
    ));
    for placement in &placements {
        for addrs in &placement.addresses {
            let result = cluster
                .datanode(addrs)
                .store()
                .get_block("del/", &placement.block_id)
                .await;
            assert!(matches!(result, Err(DfsError::NotFound(_))));
        }
    }
    {
        let state = cluster.namenode.instance.state();
        let state = state.lock().await;
        assert!(placements
            .iter()
            .all(|p| !state.block_to_nodes.contains_key(&p.block_id)));
        state.check_consistency().unwrap();
    }
    assert_eq!(client.list("del").await.unwrap(), vec![("kept".to_owned(), 4)]);
    // already gone
    assert!(!client.delete_file("del", "doomed").await.unwrap());
}

#[tokio::test]
async fn delete_path_skips_unreachable_nodes() {
    let mut cluster = Cluster::start(3, NamenodeOptions::default()).await;
    let client = cluster.client();
    client
        .put(cluster.local_file("one", &bytes(5)), "tmp", "one")
        .await
        .unwrap();
    client
        .put(cluster.local_file("two", &bytes(2)), "tmp/nested", "two")
        .await
        .unwrap();
    cluster.datanodes[2].stop().await;

    assert_eq!(client.delete_path("tmp").await.unwrap(), 2);
    assert!(client.list("tmp").await.unwrap().is_empty());
    assert!(client.list("tmp/nested").await.unwrap().is_empty());
    for node in &cluster.datanodes[..2] {
        assert!(!node.root.path().join("tmp").exists());
    }
    // deleting twice is fine
    assert_eq!(client.delete_path("tmp").await.unwrap(), 0);
}

#[tokio::test]
async fn best_effort_delete_matches_strict_on_a_healthy_cluster() {
    let cluster = Cluster::start(2, NamenodeOptions::default()).await;
    let client = cluster.namenode.client(DeleteMode::BestEffort);
    client
        .put(cluster.local_file("x", &bytes(4)), "be", "x")
        .await
        .unwrap();
    assert!(client.delete_file("be", "x").await.unwrap());
    assert_eq!(client.delete_path("be").await.unwrap(), 0);
}

#[tokio::test]
async fn root_directory_cannot_be_deleted() {
    let cluster = Cluster::start(1, NamenodeOptions::default()).await;
    let client = cluster.client();
    assert!(matches!(
        client.delete_path("").await,
        Err(DfsError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn namenode_discovers_datanodes_on_localhost_ports() {
    let cluster = Cluster::start(1, NamenodeOptions::default()).await;
    let port = cluster.datanodes[0].addrs.port as u16;
    let fresh = TestNamenode::start("namenode-discover", &[], NamenodeOptions::default()).await;
    let found = fresh
        .instance
        .register_and_discover(vec![], port..=port)
        .await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].host, "localhost");
    let live = fresh.instance.state().lock().await.live_nodes();
    assert!(live[0].same_node(&cluster.datanodes[0].addrs));
}
