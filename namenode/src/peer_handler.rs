use std::sync::Arc;

use proto::generated::{
    client_namenode::NodeAddress,
    namenode_namenode::{
        MetadataSnapshot, RepairNodeRequest, RepairNodeResponse, SnapshotRequest,
        namenode_peer_server::NamenodePeer,
    },
};
use tokio::sync::Mutex;
use tonic::{Request, Response, Status};
use utilities::logger::{instrument, trace, tracing};

use crate::{
    namenode_state::NamenodeState, repair::Repairer, replication::leader_election::LeaderElection,
};

pub struct PeerHandler {
    state: Arc<Mutex<NamenodeState>>,
    leadership: Arc<dyn LeaderElection>,
    repairer: Repairer,
}

impl PeerHandler {
    pub fn new(
        state: Arc<Mutex<NamenodeState>>,
        leadership: Arc<dyn LeaderElection>,
        repairer: Repairer,
    ) -> Self {
        Self {
            state,
            leadership,
            repairer,
        }
    }
}

#[tonic::async_trait]
impl NamenodePeer for PeerHandler {
    #[instrument(name="grpc_peer_replicate_metadata_snapshot",skip(self,request))]
    async fn replicate_metadata_snapshot(
        &self,
        request: Request<SnapshotRequest>,
    ) -> Result<Response<MetadataSnapshot>, Status> {
        trace!(requester = ?request.get_ref(), "Snapshot requested");
        // role first, the election may take the state lock itself
        let role = self.leadership.role().await;
        let snapshot = self.state.lock().await.to_snapshot(role);
        Ok(Response::new(snapshot))
    }
    #[instrument(name="grpc_peer_repair_node",skip(self,request))]
    async fn repair_node(
        &self,
        request: Request<RepairNodeRequest>,
    ) -> Result<Response<RepairNodeResponse>, Status> {
        let dead: NodeAddress = request
            .into_inner()
            .dead_node
            .ok_or_else(|| Status::invalid_argument("dead_node is required"))?;
        let report = self.repairer.redistribute(&dead).await?;
        Ok(Response::new(RepairNodeResponse {
            attempted: report.attempted,
            repaired_blocks: report.repaired,
            failed_blocks: report.failed,
        }))
    }
}
