use proto::generated::datanode_datanode::{
    ReplicateBlockRequest, ReplicateBlockResponse, peer_server::Peer,
};
use tonic::{Request, Response, Status};
use utilities::logger::{error, instrument, trace, tracing};

use crate::block_writer::BlockWriter;

pub struct PeerHandler {
    writer: BlockWriter,
}

impl PeerHandler {
    pub fn new(writer: BlockWriter) -> Self {
        Self { writer }
    }
}

#[tonic::async_trait]
impl Peer for PeerHandler {
    #[instrument(name="grpc_peer_replicate_block",skip(self,request),fields(block_id = %request.get_ref().block_id))]
    async fn replicate_block(
        &self,
        request: Request<ReplicateBlockRequest>,
    ) -> Result<Response<ReplicateBlockResponse>, Status> {
        let replicate_request = request.into_inner();
        trace!(tail = ?replicate_request.replica_tail, "Got block from upstream replica");
        let outcome = self
            .writer
            .store_and_forward(
                &replicate_request.path,
                &replicate_request.block_id,
                &replicate_request.data,
                &replicate_request.replica_tail,
            )
            .await
            .inspect_err(|e| error!(error = %e, "Error while storing replicated block"))?;
        Ok(Response::new(ReplicateBlockResponse {
            stored: true,
            copies_written: outcome.copies_written,
            forward_error: outcome.forward_error,
        }))
    }
}
