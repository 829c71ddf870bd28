#![allow(dead_code)]

use std::{future::Future, sync::Arc, time::Duration};

use client::{config::DeleteMode, dfs_client::DfsClient};
use datanode::datanode_server::DatanodeServer;
use namenode::{
    namenode_server::{BackgroundTasks, NamenodeInstance, NamenodeSettings},
    namenode_state::ClusterConfig,
};
use proto::generated::client_namenode::NodeAddress;
use storage::file_storage::FileStorage;
use tempfile::TempDir;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use utilities::{error::DfsResult, grpc_channel_pool::ChannelSettings};

pub fn channel_settings() -> ChannelSettings {
    ChannelSettings {
        connect_timeout: Duration::from_millis(500),
        request_timeout: Duration::from_secs(3),
        connect_retries: 1,
        retry_base_delay: Duration::from_millis(20),
    }
}

async fn bind() -> (TcpListener, NodeAddress) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, NodeAddress::new("127.0.0.1", port))
}

/// A server task plus the switch that stops it.
struct Running {
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<DfsResult<()>>>,
}

impl Running {
    fn spawn<F>(serve: impl FnOnce(std::pin::Pin<Box<dyn Future<Output = ()> + Send>>) -> F) -> Self
    where
        F: Future<Output = DfsResult<()>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel::<()>();
        let signal = Box::pin(async move {
            let _ = rx.await;
        });
        Self {
            shutdown: Some(tx),
            handle: Some(tokio::spawn(serve(signal))),
        }
    }
    async fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let abort = handle.abort_handle();
            if tokio::time::timeout(Duration::from_secs(5), handle).await.is_err() {
                abort.abort();
            }
        }
    }
}

pub struct TestDatanode {
    pub addrs: NodeAddress,
    pub root: TempDir,
    running: Running,
}

impl TestDatanode {
    pub async fn start(id: &str) -> Self {
        let root = TempDir::new().unwrap();
        let store = FileStorage::new(root.path()).unwrap();
        let (listener, addrs) = bind().await;
        let server = DatanodeServer::new(id, store, channel_settings());
        let running = Running::spawn(move |shutdown| server.serve(listener, shutdown));
        Self {
            addrs,
            root,
            running,
        }
    }
    /// A second view on the node's block store, for checking what is on disk.
    pub fn store(&self) -> FileStorage {
        FileStorage::new(self.root.path()).unwrap()
    }
    pub async fn stop(&mut self) {
        self.running.stop().await;
    }
}

pub struct TestNamenode {
    pub addrs: NodeAddress,
    pub instance: Arc<NamenodeInstance>,
    pub tasks: Option<BackgroundTasks>,
    running: Running,
}

pub struct NamenodeOptions {
    pub block_size: u64,
    pub replication_factor: usize,
    pub heartbeat_interval: Duration,
    pub sync_interval: Duration,
    /// None makes the namenode its own primary
    pub primary: Option<NodeAddress>,
}

impl Default for NamenodeOptions {
    fn default() -> Self {
        Self {
            block_size: 4,
            replication_factor: 2,
            // long enough that tests drive failures by hand unless they ask
            heartbeat_interval: Duration::from_secs(3600),
            sync_interval: Duration::from_millis(100),
            primary: None,
        }
    }
}

impl TestNamenode {
    pub async fn start(id: &str, datanodes: &[NodeAddress], options: NamenodeOptions) -> Self {
        let (listener, addrs) = bind().await;
        let settings = NamenodeSettings {
            id: id.to_owned(),
            own_addrs: addrs.clone(),
            primary_addrs: options.primary.unwrap_or_else(|| addrs.clone()),
            cluster: ClusterConfig {
                block_size: options.block_size,
                replication_factor: options.replication_factor,
            },
            heartbeat_interval: options.heartbeat_interval,
            sync_interval: options.sync_interval,
            channel: channel_settings(),
            seed: Some(7),
        };
        let instance = Arc::new(NamenodeInstance::new(settings).unwrap());
        if !datanodes.is_empty() {
            let registered = instance
                .register_and_discover(datanodes.to_vec(), 1..=0)
                .await;
            assert_eq!(registered.len(), datanodes.len());
        }
        let tasks = Some(instance.start_background_tasks().await);
        let server = instance.clone();
        let running = Running::spawn(move |shutdown| async move {
            server.serve(listener, shutdown).await
        });
        Self {
            addrs,
            instance,
            tasks,
            running,
        }
    }
    pub fn client(&self, mode: DeleteMode) -> DfsClient {
        DfsClient::new(&self.addrs.endpoint(), channel_settings(), mode)
    }
    pub async fn stop(&mut self) {
        self.tasks.take();
        self.running.stop().await;
    }
}

pub struct Cluster {
    pub datanodes: Vec<TestDatanode>,
    pub namenode: TestNamenode,
    pub scratch: TempDir,
}

impl Cluster {
    pub async fn start(datanodes: usize, options: NamenodeOptions) -> Self {
        let mut nodes = vec![];
        for i in 0..datanodes {
            nodes.push(TestDatanode::start(&format!("datanode-{i}")).await);
        }
        let addrs: Vec<NodeAddress> = nodes.iter().map(|node| node.addrs.clone()).collect();
        let namenode = TestNamenode::start("namenode-0", &addrs, options).await;
        Self {
            datanodes: nodes,
            namenode,
            scratch: TempDir::new().unwrap(),
        }
    }
    pub fn client(&self) -> DfsClient {
        self.namenode.client(DeleteMode::Strict)
    }
    /// Writes `content` to a fresh local file and returns its path.
    pub fn local_file(&self, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = self.scratch.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }
    pub fn datanode(&self, addrs: &NodeAddress) -> &TestDatanode {
        self.datanodes
            .iter()
            .find(|node| node.addrs.same_node(addrs))
            .unwrap()
    }
    pub fn datanode_mut(&mut self, addrs: &NodeAddress) -> &mut TestDatanode {
        self.datanodes
            .iter_mut()
            .find(|node| node.addrs.same_node(addrs))
            .unwrap()
    }
}

pub fn bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Polls `check` until it holds or `limit` passes.
pub async fn eventually<F, Fut>(limit: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + limit;
    while tokio::time::Instant::now() < deadline {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    check().await
}
