use std::{future::Future, sync::Arc};

use proto::generated::{
    client_datanode::client_datanode_server::ClientDatanodeServer,
    datanode_datanode::peer_server::PeerServer,
    namenode_datanode::namenode_datanode_server::NamenodeDatanodeServer,
};
use storage::file_storage::FileStorage;
use tokio::{net::TcpListener, sync::Mutex};
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use utilities::{
    error::{DfsError, DfsResult},
    grpc_channel_pool::{ChannelSettings, GrpcChannelPool},
    logger::{info, instrument, tracing},
};

use crate::{
    block_writer::BlockWriter, client::handler::ClientHandler, datanode_state::DatanodeState,
    namenode::handler::NamenodeHandler, peer::handler::PeerHandler, peer::service::PeerService,
};

/// One storage node: its block store, the pool it forwards through and the
/// informational state touched by pings.
pub struct DatanodeServer {
    id: String,
    state: Arc<Mutex<DatanodeState>>,
    writer: BlockWriter,
}

impl DatanodeServer {
    pub fn new(id: impl Into<String>, store: FileStorage, settings: ChannelSettings) -> Self {
        let peer_service = PeerService::new(GrpcChannelPool::new(settings));
        Self {
            id: id.into(),
            state: Arc::new(Mutex::new(DatanodeState::new())),
            writer: BlockWriter::new(store, peer_service),
        }
    }
    pub fn state(&self) -> Arc<Mutex<DatanodeState>> {
        self.state.clone()
    }

    /// Serves every datanode service on `listener` until `shutdown` resolves.
    #[instrument(name = "datanode_serve", skip_all, fields(id = %self.id))]
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send,
    ) -> DfsResult<()> {
        info!(addr = ?listener.local_addr().ok(), "Starting datanode grpc server");
        Server::builder()
            .add_service(ClientDatanodeServer::new(ClientHandler::new(
                self.writer.clone(),
            )))
            .add_service(PeerServer::new(PeerHandler::new(self.writer.clone())))
            .add_service(NamenodeDatanodeServer::new(NamenodeHandler::new(
                self.state.clone(),
            )))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
            .await
            .map_err(|e| DfsError::Internal(format!("datanode server failed: {e}")))?;
        info!("Datanode grpc server stopped");
        Ok(())
    }
}
