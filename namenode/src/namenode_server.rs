use std::{future::Future, ops::RangeInclusive, sync::Arc, time::Duration};

use proto::generated::{
    client_namenode::{NodeAddress, client_namenode_server::ClientNamenodeServer},
    namenode_namenode::{Role, namenode_peer_server::NamenodePeerServer},
};
use tokio::{net::TcpListener, sync::Mutex, task::JoinHandle};
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use utilities::{
    error::{DfsError, DfsResult},
    grpc_channel_pool::{ChannelSettings, GrpcChannelPool},
    logger::{info, instrument, tracing, warn},
};

use crate::{
    block_id_generator::UuidBlockIdGenerator,
    client_handler::ClientHandler,
    datanode::{selection_policy::RandomSelectionPolicy, service::DatanodeService},
    namenode_state::{ClusterConfig, NamenodeState, state_mantainer::StateMantainer},
    peer_handler::PeerHandler,
    repair::Repairer,
    replication::{
        leader_election::{LeaderElection, PollingFailover},
        metadata_sync::MetadataSync,
    },
};

/// Everything an engine instance needs, passed in explicitly.
#[derive(Clone, Debug)]
pub struct NamenodeSettings {
    pub id: String,
    pub own_addrs: NodeAddress,
    pub primary_addrs: NodeAddress,
    pub cluster: ClusterConfig,
    pub heartbeat_interval: Duration,
    pub sync_interval: Duration,
    pub channel: ChannelSettings,
    pub seed: Option<u64>,
}

/// Handles of the heartbeat and sync loops, aborted on drop.
pub struct BackgroundTasks {
    handles: Vec<JoinHandle<()>>,
}

impl BackgroundTasks {
    /// Aborts every loop now instead of waiting for the value to drop.
    pub fn shutdown(mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for BackgroundTasks {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

pub struct NamenodeInstance {
    settings: NamenodeSettings,
    state: Arc<Mutex<NamenodeState>>,
    leadership: Arc<PollingFailover>,
    pool: GrpcChannelPool,
    datanode_service: DatanodeService,
    repairer: Repairer,
}

impl NamenodeInstance {
    pub fn new(settings: NamenodeSettings) -> DfsResult<Self> {
        let mut state = NamenodeState::new(
            settings.cluster,
            Box::new(RandomSelectionPolicy::new(settings.seed)),
            Box::new(UuidBlockIdGenerator),
        )?;
        if settings.own_addrs.same_node(&settings.primary_addrs) {
            state.term = 1;
        }
        let state = Arc::new(Mutex::new(state));
        let pool = GrpcChannelPool::new(settings.channel);
        let datanode_service = DatanodeService::new(pool.clone());
        let leadership = Arc::new(PollingFailover::new(
            settings.own_addrs.clone(),
            settings.primary_addrs.clone(),
            state.clone(),
        ));
        Ok(Self {
            repairer: Repairer::new(state.clone(), datanode_service.clone()),
            settings,
            state,
            leadership,
            pool,
            datanode_service,
        })
    }
    pub fn state(&self) -> Arc<Mutex<NamenodeState>> {
        self.state.clone()
    }
    pub fn leadership(&self) -> Arc<dyn LeaderElection> {
        self.leadership.clone()
    }
    pub fn repairer(&self) -> Repairer {
        self.repairer.clone()
    }

    /// Pings the given datanodes, or every port of `discovery_ports` on
    /// localhost when none are given, and registers the ones that answer.
    #[instrument(name = "namenode_register_and_discover", skip_all, fields(id = %self.settings.id))]
    pub async fn register_and_discover(
        &self,
        datanodes: Vec<NodeAddress>,
        discovery_ports: RangeInclusive<u16>,
    ) -> Vec<NodeAddress> {
        let candidates = if datanodes.is_empty() {
            info!(?discovery_ports, "No datanodes given, discovering");
            discovery_ports
                .map(|port| NodeAddress::new("localhost", port))
                .collect()
        } else {
            datanodes
        };
        let mut reachable = vec![];
        for node in candidates {
            match self
                .datanode_service
                .ping(&node, &self.settings.own_addrs)
                .await
            {
                Ok(ack) => {
                    info!(%node, ack, "Discovered datanode");
                    reachable.push(node);
                }
                Err(e) => {
                    warn!(%node, error = %e, "Datanode did not answer ping");
                }
            }
        }
        self.state
            .lock()
            .await
            .register_datanodes(reachable.clone());
        reachable
    }

    /// Spawns the heartbeat loop and, on a secondary, the metadata sync loop.
    pub async fn start_background_tasks(&self) -> BackgroundTasks {
        let leadership: Arc<dyn LeaderElection> = self.leadership.clone();
        let mut handles = vec![
            StateMantainer::new(
                self.state.clone(),
                self.datanode_service.clone(),
                self.repairer.clone(),
                leadership.clone(),
                self.settings.heartbeat_interval,
            )
            .start(),
        ];
        if leadership.role().await == Role::Secondary {
            info!(primary = %leadership.primary_addrs().await, "Starting as secondary");
            handles.push(
                MetadataSync::new(
                    self.state.clone(),
                    leadership,
                    self.pool.clone(),
                    self.settings.sync_interval,
                )
                .start(),
            );
        }
        BackgroundTasks { handles }
    }

    /// Serves the client and peer services on `listener` until `shutdown`.
    #[instrument(name = "namenode_serve", skip_all, fields(id = %self.settings.id))]
    pub async fn serve(
        &self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send,
    ) -> DfsResult<()> {
        info!(addr = ?listener.local_addr().ok(), "grpc server starting");
        Server::builder()
            .add_service(ClientNamenodeServer::new(ClientHandler::new(
                self.state.clone(),
            )))
            .add_service(NamenodePeerServer::new(PeerHandler::new(
                self.state.clone(),
                self.leadership.clone(),
                self.repairer.clone(),
            )))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
            .await
            .map_err(|e| DfsError::Internal(format!("namenode server failed: {e}")))?;
        info!("grpc server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::oneshot;

    use super::*;

    #[tokio::test]
    async fn shutdown_aborts_background_loops() {
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _tx = tx;
            std::future::pending::<()>().await;
        });
        let tasks = BackgroundTasks {
            handles: vec![handle],
        };
        tasks.shutdown();
        // the sender only drops once the loop is cancelled
        assert!(rx.await.is_err());
    }
}
