use proto::generated::client_namenode::NodeAddress;
use utilities::{
    error::{DfsError, DfsResult},
    logger::{error, info, instrument, tracing, warn},
    paths::normalize_dir,
};

use crate::{
    config::DeleteMode, datanode_service::DatanodeService, namenode_service::NamenodeService,
};

#[derive(Clone, Debug)]
pub struct DeleteHandler {
    namenode: NamenodeService,
    datanode: DatanodeService,
    mode: DeleteMode,
}

/// Tally of storage side deletes for one operation.
#[derive(Debug, Default)]
struct Fanout {
    succeeded: usize,
    failed: usize,
    skipped: usize,
}

impl Fanout {
    /// Folds one node's answer in. Unreachable nodes are skipped, other
    /// failures abort in strict mode.
    fn record(&mut self, mode: DeleteMode, datanode: &NodeAddress, result: DfsResult<()>) -> DfsResult<()> {
        match result {
            Ok(()) => self.succeeded += 1,
            Err(e) if e.is_unreachable() => {
                warn!(%datanode, error = %e, "Skipping unreachable datanode");
                self.skipped += 1;
            }
            Err(e) => {
                self.failed += 1;
                error!(%datanode, error = %e, "Datanode failed to delete");
                if mode == DeleteMode::Strict {
                    return Err(DfsError::PartialFailure {
                        succeeded: self.succeeded,
                        failed: self.failed,
                    });
                }
            }
        }
        Ok(())
    }
}

impl DeleteHandler {
    pub fn new(namenode: NamenodeService, datanode: DatanodeService, mode: DeleteMode) -> Self {
        Self {
            namenode,
            datanode,
            mode,
        }
    }
    /// Removes a directory subtree from every live node, then from metadata.
    /// Returns how many files the metadata held under it.
    #[instrument(name = "delete_path", skip(self))]
    pub async fn delete_path(&self, dir_path: &str) -> DfsResult<u32> {
        let dir_path = normalize_dir(dir_path);
        if dir_path.is_empty() {
            return Err(DfsError::InvalidArgument(
                "refusing to delete the root directory".to_owned(),
            ));
        }
        let mut fanout = Fanout::default();
        for datanode in self.namenode.get_live_nodes().await? {
            let result = self.datanode.delete_path(&datanode, &dir_path).await;
            fanout.record(self.mode, &datanode, result)?;
        }
        let files_removed = self.namenode.delete_meta_data(&dir_path).await?;
        info!(?fanout, files_removed, "Deleted directory");
        Ok(files_removed)
    }
    /// Removes each block of the file from the nodes holding it, then the
    /// file's metadata. Returns whether the metadata knew the file.
    #[instrument(name = "delete_file", skip(self))]
    pub async fn delete_file(&self, dir_path: &str, file_name: &str) -> DfsResult<bool> {
        let dir_path = normalize_dir(dir_path);
        let placements = self.namenode.read_data(&dir_path, file_name).await?;
        let mut fanout = Fanout::default();
        for placement in &placements {
            for datanode in &placement.addresses {
                let result = self
                    .datanode
                    .delete_file(datanode, &dir_path, &placement.block_id)
                    .await;
                fanout.record(self.mode, datanode, result)?;
            }
        }
        let file_present = self
            .namenode
            .delete_file_meta_data(&dir_path, file_name)
            .await?;
        info!(?fanout, file_present, "Deleted file");
        Ok(file_present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> NodeAddress {
        NodeAddress::new("127.0.0.1", 7000)
    }

    #[test]
    fn unreachable_nodes_are_skipped_in_both_modes() {
        for mode in [DeleteMode::Strict, DeleteMode::BestEffort] {
            let mut fanout = Fanout::default();
            fanout
                .record(mode, &node(), Err(DfsError::Unreachable("down".to_owned())))
                .unwrap();
            fanout.record(mode, &node(), Ok(())).unwrap();
            assert_eq!((fanout.succeeded, fanout.skipped, fanout.failed), (1, 1, 0));
        }
    }

    #[test]
    fn strict_mode_aborts_on_a_real_failure() {
        let mut fanout = Fanout::default();
        fanout.record(DeleteMode::Strict, &node(), Ok(())).unwrap();
        let result = fanout.record(
            DeleteMode::Strict,
            &node(),
            Err(DfsError::Internal("disk".to_owned())),
        );
        assert!(matches!(
            result,
            Err(DfsError::PartialFailure {
                succeeded: 1,
                failed: 1
            })
        ));
    }

    #[test]
    fn best_effort_mode_counts_and_continues() {
        let mut fanout = Fanout::default();
        fanout
            .record(
                DeleteMode::BestEffort,
                &node(),
                Err(DfsError::Internal("disk".to_owned())),
            )
            .unwrap();
        assert_eq!(fanout.failed, 1);
    }
}
