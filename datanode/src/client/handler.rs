use proto::generated::client_datanode::{
    DeleteFileRequest, DeletePathRequest, GetDataRequest, GetDataResponse, MakeDirRequest,
    PutDataRequest, PutDataResponse, RenameDirRequest, StatusResponse,
    client_datanode_server::ClientDatanode,
};
use storage::storage::Storage;
use tonic::{Request, Response, Status};
use utilities::logger::{error, instrument, trace, tracing};

use crate::block_writer::BlockWriter;

pub struct ClientHandler {
    writer: BlockWriter,
}
impl ClientHandler {
    pub fn new(writer: BlockWriter) -> Self {
        Self { writer }
    }
}

fn status_ok() -> Response<StatusResponse> {
    Response::new(StatusResponse { status: true })
}

#[tonic::async_trait]
impl ClientDatanode for ClientHandler {
    #[instrument(name="grpc_client_put_data",skip(self,request),fields(block_id = %request.get_ref().block_id, path = %request.get_ref().path))]
    async fn put_data(
        &self,
        request: Request<PutDataRequest>,
    ) -> Result<Response<PutDataResponse>, Status> {
        let put_request = request.into_inner();
        trace!(len = put_request.data.len(), tail = ?put_request.replica_tail, "Got put data request");
        let outcome = self
            .writer
            .store_and_forward(
                &put_request.path,
                &put_request.block_id,
                &put_request.data,
                &put_request.replica_tail,
            )
            .await
            .inspect_err(|e| error!(error = %e, "Error while storing block"))?;
        Ok(Response::new(PutDataResponse {
            stored: true,
            copies_written: outcome.copies_written,
            forward_error: outcome.forward_error,
        }))
    }
    #[instrument(name="grpc_client_get_data",skip(self,request),fields(block_id = %request.get_ref().block_id, path = %request.get_ref().path))]
    async fn get_data(
        &self,
        request: Request<GetDataRequest>,
    ) -> Result<Response<GetDataResponse>, Status> {
        let get_request = request.into_inner();
        let data = self
            .writer
            .store()
            .get_block(&get_request.path, &get_request.block_id)
            .await?;
        trace!(len = data.len(), "Serving block");
        Ok(Response::new(GetDataResponse { data }))
    }
    #[instrument(name="grpc_client_make_dir",skip(self,request),fields(path = %request.get_ref().path))]
    async fn make_dir(
        &self,
        request: Request<MakeDirRequest>,
    ) -> Result<Response<StatusResponse>, Status> {
        self.writer
            .store()
            .make_dir(&request.get_ref().path)
            .await?;
        Ok(status_ok())
    }
    #[instrument(name="grpc_client_delete_path",skip(self,request),fields(path = %request.get_ref().path))]
    async fn delete_path(
        &self,
        request: Request<DeletePathRequest>,
    ) -> Result<Response<StatusResponse>, Status> {
        self.writer
            .store()
            .delete_path(&request.get_ref().path)
            .await?;
        Ok(status_ok())
    }
    #[instrument(name="grpc_client_delete_file",skip(self,request),fields(block_id = %request.get_ref().block_id, path = %request.get_ref().path))]
    async fn delete_file(
        &self,
        request: Request<DeleteFileRequest>,
    ) -> Result<Response<StatusResponse>, Status> {
        let delete_request = request.get_ref();
        let existed = self
            .writer
            .store()
            .delete_block(&delete_request.path, &delete_request.block_id)
            .await?;
        trace!(existed, "Block delete handled");
        Ok(status_ok())
    }
    #[instrument(name="grpc_client_rename_dir",skip(self,request),fields(src = %request.get_ref().src_path, dest = %request.get_ref().dest_path))]
    async fn rename_dir(
        &self,
        request: Request<RenameDirRequest>,
    ) -> Result<Response<StatusResponse>, Status> {
        let rename_request = request.get_ref();
        self.writer
            .store()
            .rename_dir(&rename_request.src_path, &rename_request.dest_path)
            .await?;
        Ok(status_ok())
    }
}
