use proto::generated::namenode_namenode::{
    BlockIdList, FileNameList, MetadataSnapshot, NodeIdList, Role,
};

use crate::namenode_state::NamenodeState;

impl NamenodeState {
    /// Full copy of the five indexes, tagged with this instance's term and role.
    pub fn to_snapshot(&self, role: Role) -> MetadataSnapshot {
        let mut snapshot = MetadataSnapshot {
            term: self.term,
            file_to_blocks: self
                .file_to_blocks
                .iter()
                .map(|(key, blocks)| {
                    (
                        key.clone(),
                        BlockIdList {
                            block_ids: blocks.clone(),
                        },
                    )
                })
                .collect(),
            registry: self
                .registry
                .iter()
                .map(|(id, node)| (*id, node.clone()))
                .collect(),
            block_to_nodes: self
                .block_to_nodes
                .iter()
                .map(|(block_id, ids)| {
                    (
                        block_id.clone(),
                        NodeIdList {
                            node_ids: ids.clone(),
                        },
                    )
                })
                .collect(),
            file_sizes: self.file_sizes.clone(),
            directory_to_files: self
                .directory_to_files
                .iter()
                .map(|(dir, files)| {
                    (
                        dir.clone(),
                        FileNameList {
                            file_names: files.clone(),
                        },
                    )
                })
                .collect(),
            ..MetadataSnapshot::default()
        };
        snapshot.set_role(role);
        snapshot
    }

    /// Replaces every index with the snapshot, last writer wins.
    pub fn apply_snapshot(&mut self, snapshot: MetadataSnapshot) {
        self.term = snapshot.term;
        self.registry = snapshot.registry.into_iter().collect();
        self.next_node_id = self
            .registry
            .keys()
            .next_back()
            .map_or(0, |id| id + 1)
            .max(self.next_node_id);
        self.file_to_blocks = snapshot
            .file_to_blocks
            .into_iter()
            .map(|(key, blocks)| (key, blocks.block_ids))
            .collect();
        self.block_to_nodes = snapshot
            .block_to_nodes
            .into_iter()
            .map(|(block_id, ids)| (block_id, ids.node_ids))
            .collect();
        self.file_sizes = snapshot.file_sizes;
        self.directory_to_files = snapshot
            .directory_to_files
            .into_iter()
            .map(|(dir, files)| (dir, files.file_names))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namenode_state::tests::state_with_nodes;

    #[test]
    fn snapshot_reproduces_metadata_and_term() {
        let mut primary = state_with_nodes(4, 2, 3);
        primary.term = 4;
        primary.write_file("d/", "f", 10).unwrap();
        primary.write_file("", "root", 3).unwrap();

        let snapshot = primary.to_snapshot(Role::Primary);
        assert_eq!(snapshot.role(), Role::Primary);

        let mut secondary = state_with_nodes(8, 1, 0);
        secondary.apply_snapshot(snapshot);
        assert_eq!(secondary.term, 4);
        assert_eq!(secondary.registry, primary.registry);
        assert_eq!(secondary.file_to_blocks, primary.file_to_blocks);
        assert_eq!(secondary.block_to_nodes, primary.block_to_nodes);
        assert_eq!(secondary.file_sizes, primary.file_sizes);
        assert_eq!(secondary.directory_to_files, primary.directory_to_files);
        assert_eq!(secondary.read_file("d/", "f"), primary.read_file("d/", "f"));
        secondary.check_consistency().unwrap();
    }

    #[test]
    fn applying_an_empty_snapshot_clears_state() {
        let mut state = state_with_nodes(4, 1, 2);
        state.write_file("d/", "f", 4).unwrap();
        state.apply_snapshot(MetadataSnapshot::default());
        assert!(state.registry.is_empty());
        assert!(state.file_to_blocks.is_empty());
        assert!(state.list("d/").is_empty());
        let ids = state.register_datanodes(vec![proto::generated::client_namenode::NodeAddress::new(
            "127.0.0.1",
            9000,
        )]);
        // ids are never reused
        assert_eq!(ids, vec![2]);
    }
}
