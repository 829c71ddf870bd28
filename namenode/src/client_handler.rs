use std::sync::Arc;

use proto::generated::client_namenode::{
    DeleteFileMetaDataRequest, DeleteFileMetaDataResponse, DeleteMetaDataRequest,
    DeleteMetaDataResponse, FileEntry, FileSizeRequest, FileSizeResponse, GetBlockSizeRequest,
    GetBlockSizeResponse, GetLiveNodesRequest, GetLiveNodesResponse, ListRequest, ListResponse,
    ReadDataRequest, ReadDataResponse, RenameFileRequest, RenameFileResponse, RenameRequest,
    RenameResponse, WriteDataRequest, WriteDataResponse, client_namenode_server::ClientNamenode,
};
use tokio::sync::Mutex;
use tonic::{Request, Response, Status};
use utilities::logger::{error, info, instrument, trace, tracing};

use crate::namenode_state::NamenodeState;

pub struct ClientHandler {
    state: Arc<Mutex<NamenodeState>>,
}

impl ClientHandler {
    pub fn new(state: Arc<Mutex<NamenodeState>>) -> Self {
        Self { state }
    }
}

#[tonic::async_trait]
impl ClientNamenode for ClientHandler {
    async fn get_block_size(
        &self,
        _request: Request<GetBlockSizeRequest>,
    ) -> Result<Response<GetBlockSizeResponse>, Status> {
        let block_size = self.state.lock().await.cluster.block_size;
        Ok(Response::new(GetBlockSizeResponse { block_size }))
    }
    #[instrument(name="grpc_client_write_data",skip(self,request),fields(dir = %request.get_ref().dir_path, file = %request.get_ref().file_name, size = request.get_ref().file_size))]
    async fn write_data(
        &self,
        request: Request<WriteDataRequest>,
    ) -> Result<Response<WriteDataResponse>, Status> {
        let write_request = request.into_inner();
        let blocks = self
            .state
            .lock()
            .await
            .write_file(
                &write_request.dir_path,
                &write_request.file_name,
                write_request.file_size,
            )
            .inspect_err(|e| error!(error = %e, "Error while allocating blocks"))?;
        info!(blocks = blocks.len(), "Allocated blocks for file");
        Ok(Response::new(WriteDataResponse { blocks }))
    }
    #[instrument(name="grpc_client_read_data",skip(self,request),fields(dir = %request.get_ref().dir_path, file = %request.get_ref().file_name))]
    async fn read_data(
        &self,
        request: Request<ReadDataRequest>,
    ) -> Result<Response<ReadDataResponse>, Status> {
        let read_request = request.get_ref();
        let blocks = self
            .state
            .lock()
            .await
            .read_file(&read_request.dir_path, &read_request.file_name);
        trace!(blocks = blocks.len(), "Resolved block placements");
        Ok(Response::new(ReadDataResponse { blocks }))
    }
    #[instrument(name="grpc_client_file_size",skip(self,request),fields(path = %request.get_ref().path))]
    async fn file_size(
        &self,
        request: Request<FileSizeRequest>,
    ) -> Result<Response<FileSizeResponse>, Status> {
        let file_size = self.state.lock().await.file_size(&request.get_ref().path)?;
        Ok(Response::new(FileSizeResponse { file_size }))
    }
    async fn get_live_nodes(
        &self,
        _request: Request<GetLiveNodesRequest>,
    ) -> Result<Response<GetLiveNodesResponse>, Status> {
        let nodes = self.state.lock().await.live_nodes();
        Ok(Response::new(GetLiveNodesResponse { nodes }))
    }
    #[instrument(name="grpc_client_delete_meta_data",skip(self,request),fields(dir = %request.get_ref().dir_path))]
    async fn delete_meta_data(
        &self,
        request: Request<DeleteMetaDataRequest>,
    ) -> Result<Response<DeleteMetaDataResponse>, Status> {
        let files_removed = self
            .state
            .lock()
            .await
            .delete_path(&request.get_ref().dir_path)?;
        info!(files_removed, "Deleted directory metadata");
        Ok(Response::new(DeleteMetaDataResponse {
            files_removed: files_removed as u32,
        }))
    }
    #[instrument(name="grpc_client_delete_file_meta_data",skip(self,request),fields(dir = %request.get_ref().dir_path, file = %request.get_ref().file_name))]
    async fn delete_file_meta_data(
        &self,
        request: Request<DeleteFileMetaDataRequest>,
    ) -> Result<Response<DeleteFileMetaDataResponse>, Status> {
        let delete_request = request.get_ref();
        let file_present = self
            .state
            .lock()
            .await
            .delete_file(&delete_request.dir_path, &delete_request.file_name);
        Ok(Response::new(DeleteFileMetaDataResponse { file_present }))
    }
    #[instrument(name="grpc_client_rename",skip(self,request),fields(src = %request.get_ref().src_path, dest = %request.get_ref().dest_path))]
    async fn rename(
        &self,
        request: Request<RenameRequest>,
    ) -> Result<Response<RenameResponse>, Status> {
        let rename_request = request.get_ref();
        let mut state = self.state.lock().await;
        let files_renamed = state
            .rename_path(&rename_request.src_path, &rename_request.dest_path)
            .inspect_err(|e| error!(error = %e, "Error while renaming directory"))?;
        Ok(Response::new(RenameResponse {
            nodes: state.live_nodes(),
            files_renamed: files_renamed as u32,
        }))
    }
    #[instrument(name="grpc_client_rename_file",skip(self,request),fields(src = %request.get_ref().src_file, dest = %request.get_ref().dest_file))]
    async fn rename_file(
        &self,
        request: Request<RenameFileRequest>,
    ) -> Result<Response<RenameFileResponse>, Status> {
        let rename_request = request.get_ref();
        self.state
            .lock()
            .await
            .rename_file(&rename_request.src_file, &rename_request.dest_file)?;
        Ok(Response::new(RenameFileResponse { renamed: true }))
    }
    #[instrument(name="grpc_client_list",skip(self,request),fields(dir = %request.get_ref().dir_path))]
    async fn list(&self, request: Request<ListRequest>) -> Result<Response<ListResponse>, Status> {
        let entries = self
            .state
            .lock()
            .await
            .list(&request.get_ref().dir_path)
            .into_iter()
            .map(|(file_name, file_size)| FileEntry {
                file_name,
                file_size,
            })
            .collect();
        Ok(Response::new(ListResponse { entries }))
    }
}
