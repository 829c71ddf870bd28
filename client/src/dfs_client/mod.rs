//! Orchestration of multi block operations: placements come from the
//! metadata engine, bytes go straight to the storage nodes.

pub mod delete_handler;
pub mod directory_handler;
pub mod fetch_file_handler;
pub mod store_file_handler;

use std::path::Path;

use delete_handler::DeleteHandler;
use proto::generated::client_namenode::NodeAddress;
use directory_handler::DirectoryHandler;
use fetch_file_handler::FetchFileHandler;
use store_file_handler::{StoreFileHandler, StoreReport};
use utilities::{
    error::DfsResult,
    grpc_channel_pool::{ChannelSettings, GrpcChannelPool},
};

use crate::{
    config::DeleteMode, datanode_service::DatanodeService, namenode_service::NamenodeService,
};

#[derive(Clone, Debug)]
pub struct DfsClient {
    store_file_handler: StoreFileHandler,
    fetch_file_handler: FetchFileHandler,
    delete_handler: DeleteHandler,
    directory_handler: DirectoryHandler,
}

impl DfsClient {
    /// Nothing is dialed until the first call.
    pub fn new(namenode_addrs: &str, settings: ChannelSettings, delete_mode: DeleteMode) -> Self {
        let namenode_addrs = NodeAddress::parse(namenode_addrs)
            .map(|addrs| addrs.endpoint())
            .unwrap_or_else(|| namenode_addrs.to_owned());
        let pool = GrpcChannelPool::new(settings);
        let namenode = NamenodeService::new(namenode_addrs, pool.clone());
        let datanode = DatanodeService::new(pool);
        Self {
            store_file_handler: StoreFileHandler::new(namenode.clone(), datanode.clone()),
            fetch_file_handler: FetchFileHandler::new(namenode.clone(), datanode.clone()),
            delete_handler: DeleteHandler::new(namenode.clone(), datanode.clone(), delete_mode),
            directory_handler: DirectoryHandler::new(namenode, datanode),
        }
    }
    pub async fn put(
        &self,
        local_file_path: impl AsRef<Path>,
        dir_path: &str,
        file_name: &str,
    ) -> DfsResult<StoreReport> {
        self.store_file_handler
            .store_file(local_file_path, dir_path, file_name)
            .await
    }
    pub async fn get(
        &self,
        dir_path: &str,
        file_name: &str,
        local_file_path: impl AsRef<Path>,
    ) -> DfsResult<u64> {
        self.fetch_file_handler
            .fetch_file(dir_path, file_name, local_file_path)
            .await
    }
    pub async fn mkdir(&self, dir_path: &str) -> DfsResult<usize> {
        self.directory_handler.make_dir(dir_path).await
    }
    pub async fn rename(&self, src_path: &str, dest_path: &str) -> DfsResult<u32> {
        self.directory_handler.rename(src_path, dest_path).await
    }
    pub async fn stat(&self, dir_path: &str, file_name: &str) -> DfsResult<u64> {
        self.directory_handler.stat(dir_path, file_name).await
    }
    pub async fn list(&self, dir_path: &str) -> DfsResult<Vec<(String, u64)>> {
        self.directory_handler.list(dir_path).await
    }
    pub async fn delete_path(&self, dir_path: &str) -> DfsResult<u32> {
        self.delete_handler.delete_path(dir_path).await
    }
    pub async fn delete_file(&self, dir_path: &str, file_name: &str) -> DfsResult<bool> {
        self.delete_handler.delete_file(dir_path, file_name).await
    }
}
