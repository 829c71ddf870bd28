pub mod state_mantainer;
pub mod state_snapshot;

use std::collections::{BTreeMap, HashMap, HashSet};

use proto::generated::client_namenode::{BlockPlacement, NodeAddress};
use utilities::{
    error::{DfsError, DfsResult},
    logger::{debug, info, warn},
    paths::{file_key, normalize_dir, split_file_key, validate_file_name},
};

use crate::{
    block_id_generator::{BlockIdGenerator, block_count},
    datanode::selection_policy::SelectionPolicy,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClusterConfig {
    pub block_size: u64,
    // desired copies per block, degrades to the live node count
    pub replication_factor: usize,
}

/// One block to re-home after its node died.
#[derive(Clone, Debug, PartialEq)]
pub struct RepairTask {
    pub block_id: String,
    pub source: NodeAddress,
    // directory of the owning file, which is also the on-disk directory
    pub dir_path: String,
    // surviving hosts that held the block before, cleaned up before rewrite
    pub stale_hosts: Vec<NodeAddress>,
}

#[derive(Debug, Default)]
pub struct RepairPlan {
    pub dead_id: u64,
    pub tasks: Vec<RepairTask>,
    // blocks whose only copies were on the dead node
    pub lost: Vec<String>,
    pub live_count: usize,
    pub capacity_ok: bool,
}

/// All metadata of the engine. The five indexes are only mutated through the
/// methods below so a file path is always present in every file index or in
/// none of them.
pub struct NamenodeState {
    pub cluster: ClusterConfig,
    pub term: u64,
    pub registry: BTreeMap<u64, NodeAddress>,
    pub file_to_blocks: HashMap<String, Vec<String>>,
    pub block_to_nodes: HashMap<String, Vec<u64>>,
    pub file_sizes: HashMap<String, u64>,
    pub directory_to_files: HashMap<String, Vec<String>>,
    next_node_id: u64,
    selection_policy: Box<dyn SelectionPolicy>,
    block_id_generator: Box<dyn BlockIdGenerator>,
}

impl std::fmt::Debug for NamenodeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamenodeState")
            .field("cluster", &self.cluster)
            .field("term", &self.term)
            .field("registry", &self.registry)
            .field("files", &self.file_to_blocks.len())
            .field("blocks", &self.block_to_nodes.len())
            .finish()
    }
}

impl NamenodeState {
    pub fn new(
        cluster: ClusterConfig,
        selection_policy: Box<dyn SelectionPolicy>,
        block_id_generator: Box<dyn BlockIdGenerator>,
    ) -> DfsResult<Self> {
        if cluster.block_size == 0 || cluster.replication_factor == 0 {
            return Err(DfsError::InvalidArgument(format!(
                "block size and replication factor must be positive, got {cluster:?}"
            )));
        }
        Ok(Self {
            cluster,
            term: 0,
            registry: BTreeMap::new(),
            file_to_blocks: HashMap::new(),
            block_to_nodes: HashMap::new(),
            file_sizes: HashMap::new(),
            directory_to_files: HashMap::new(),
            next_node_id: 0,
            selection_policy,
            block_id_generator,
        })
    }

    /// Assigns dense ids in the given order. Already registered addresses keep
    /// their id.
    pub fn register_datanodes(&mut self, nodes: Vec<NodeAddress>) -> Vec<u64> {
        nodes
            .into_iter()
            .map(|node| {
                if let Some(id) = self.node_id(&node) {
                    return id;
                }
                let id = self.next_node_id;
                self.next_node_id += 1;
                info!(id, %node, "Registered datanode");
                self.registry.insert(id, node);
                id
            })
            .collect()
    }

    pub fn node_id(&self, node: &NodeAddress) -> Option<u64> {
        self.registry
            .iter()
            .find(|(_, registered)| registered.same_node(node))
            .map(|(id, _)| *id)
    }

    pub fn live_nodes(&self) -> Vec<NodeAddress> {
        self.registry.values().cloned().collect()
    }

    fn addresses(&self, node_ids: &[u64]) -> Vec<NodeAddress> {
        node_ids
            .iter()
            .filter_map(|id| self.registry.get(id).cloned())
            .collect()
    }

    /// Picks `min(replication_factor, live)` distinct live nodes, primary first.
    pub fn select_placement(&mut self) -> DfsResult<Vec<(u64, NodeAddress)>> {
        let candidates: Vec<u64> = self.registry.keys().copied().collect();
        if candidates.is_empty() {
            return Err(DfsError::InsufficientReplicas {
                needed: self.cluster.replication_factor,
                available: 0,
            });
        }
        let count = self.cluster.replication_factor.min(candidates.len());
        Ok(self
            .selection_policy
            .select(&candidates, count)
            .into_iter()
            .filter_map(|id| self.registry.get(&id).map(|node| (id, node.clone())))
            .collect())
    }

    /// Allocates and records every block of a new file. Writing over an
    /// existing file replaces its blocks.
    pub fn write_file(
        &mut self,
        dir_path: &str,
        file_name: &str,
        file_size: u64,
    ) -> DfsResult<Vec<BlockPlacement>> {
        validate_file_name(file_name)?;
        if self.registry.is_empty() {
            return Err(DfsError::InsufficientReplicas {
                needed: self.cluster.replication_factor,
                available: 0,
            });
        }
        let dir_path = normalize_dir(dir_path);
        let key = file_key(&dir_path, file_name);
        if self.remove_file(&key).is_some() {
            debug!(%key, "Overwriting existing file");
        }
        let mut placements = vec![];
        let mut block_ids = vec![];
        for _ in 0..block_count(file_size, self.cluster.block_size) {
            let block_id = self.block_id_generator.next_block_id();
            let chosen = self.select_placement()?;
            self.block_to_nodes
                .insert(block_id.clone(), chosen.iter().map(|(id, _)| *id).collect());
            block_ids.push(block_id.clone());
            placements.push(BlockPlacement {
                block_id,
                addresses: chosen.into_iter().map(|(_, node)| node).collect(),
            });
        }
        self.file_to_blocks.insert(key.clone(), block_ids);
        self.file_sizes.insert(key, file_size);
        self.directory_to_files
            .entry(dir_path)
            .or_default()
            .push(file_name.to_owned());
        Ok(placements)
    }

    /// Blocks of the file in write order with their current addresses. An
    /// unknown file yields no blocks.
    pub fn read_file(&self, dir_path: &str, file_name: &str) -> Vec<BlockPlacement> {
        let key = file_key(dir_path, file_name);
        self.file_to_blocks
            .get(&key)
            .map(|blocks| {
                blocks
                    .iter()
                    .map(|block_id| BlockPlacement {
                        block_id: block_id.clone(),
                        addresses: self
                            .block_to_nodes
                            .get(block_id)
                            .map(|ids| self.addresses(ids))
                            .unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn file_size(&self, path: &str) -> DfsResult<u64> {
        self.file_sizes
            .get(path)
            .copied()
            .ok_or_else(|| DfsError::NotFound(format!("file {path:?}")))
    }

    /// Drops one file from every index, placements included. Returns its blocks.
    fn remove_file(&mut self, key: &str) -> Option<Vec<String>> {
        let blocks = self.file_to_blocks.remove(key)?;
        self.file_sizes.remove(key);
        let (dir_path, file_name) = split_file_key(key);
        if let Some(files) = self.directory_to_files.get_mut(dir_path) {
            files.retain(|name| name != file_name);
            if files.is_empty() {
                self.directory_to_files.remove(dir_path);
            }
        }
        for block_id in &blocks {
            self.block_to_nodes.remove(block_id);
        }
        Some(blocks)
    }

    /// Removes every file whose directory lies under `dir_path`.
    pub fn delete_path(&mut self, dir_path: &str) -> DfsResult<usize> {
        let dir_path = normalize_dir(dir_path);
        if dir_path.is_empty() {
            return Err(DfsError::InvalidArgument(
                "deleting the root directory is not allowed".to_owned(),
            ));
        }
        let doomed: Vec<String> = self
            .file_to_blocks
            .keys()
            .filter(|key| key.starts_with(&dir_path))
            .cloned()
            .collect();
        for key in &doomed {
            self.remove_file(key);
        }
        Ok(doomed.len())
    }

    pub fn delete_file(&mut self, dir_path: &str, file_name: &str) -> bool {
        self.remove_file(&file_key(dir_path, file_name)).is_some()
    }

    /// Moves every file under `src_path` to `dest_path`. Block ids stay put.
    /// A directory holding no files renames to nothing on this side; the
    /// storage nodes decide whether it exists.
    pub fn rename_path(&mut self, src_path: &str, dest_path: &str) -> DfsResult<usize> {
        let src_path = normalize_dir(src_path);
        let dest_path = normalize_dir(dest_path);
        if src_path.is_empty() || dest_path.is_empty() {
            return Err(DfsError::InvalidArgument(
                "the root directory cannot be renamed".to_owned(),
            ));
        }
        if dest_path.starts_with(&src_path) {
            return Err(DfsError::InvalidArgument(format!(
                "cannot move {src_path:?} inside itself"
            )));
        }
        // storage nodes cannot rename onto a directory that holds blocks
        if let Some(clash) = self
            .file_to_blocks
            .keys()
            .find(|key| key.starts_with(&dest_path))
        {
            return Err(DfsError::InvalidArgument(format!(
                "destination {dest_path:?} already holds {clash:?}"
            )));
        }
        let moved: Vec<String> = self
            .file_to_blocks
            .keys()
            .filter(|key| key.starts_with(&src_path))
            .cloned()
            .collect();
        for key in &moved {
            self.move_file(key, &key.replacen(&src_path, &dest_path, 1));
        }
        Ok(moved.len())
    }

    /// Renames a single file given by full keys. Blocks are stored under
    /// their directory, so both keys must share one.
    pub fn rename_file(&mut self, src_file: &str, dest_file: &str) -> DfsResult<()> {
        if !self.file_to_blocks.contains_key(src_file) {
            return Err(DfsError::NotFound(format!("file {src_file:?}")));
        }
        let (dest_dir, dest_name) = split_file_key(dest_file);
        validate_file_name(dest_name)?;
        if split_file_key(src_file).0 != dest_dir {
            return Err(DfsError::InvalidArgument(format!(
                "{src_file:?} and {dest_file:?} are in different directories"
            )));
        }
        if self.file_to_blocks.contains_key(dest_file) {
            return Err(DfsError::InvalidArgument(format!(
                "destination {dest_file:?} already exists"
            )));
        }
        self.move_file(src_file, dest_file);
        Ok(())
    }

    fn move_file(&mut self, src_key: &str, dest_key: &str) {
        let Some(blocks) = self.file_to_blocks.remove(src_key) else {
            return;
        };
        let size = self.file_sizes.remove(src_key).unwrap_or_default();
        let (src_dir, src_name) = split_file_key(src_key);
        if let Some(files) = self.directory_to_files.get_mut(src_dir) {
            files.retain(|name| name != src_name);
            if files.is_empty() {
                self.directory_to_files.remove(src_dir);
            }
        }
        let (dest_dir, dest_name) = split_file_key(dest_key);
        self.directory_to_files
            .entry(dest_dir.to_owned())
            .or_default()
            .push(dest_name.to_owned());
        self.file_to_blocks.insert(dest_key.to_owned(), blocks);
        self.file_sizes.insert(dest_key.to_owned(), size);
    }

    /// Files directly under `dir_path` with their sizes, in write order.
    pub fn list(&self, dir_path: &str) -> Vec<(String, u64)> {
        let dir_path = normalize_dir(dir_path);
        self.directory_to_files
            .get(&dir_path)
            .map(|files| {
                files
                    .iter()
                    .map(|name| {
                        let size = self
                            .file_sizes
                            .get(&file_key(&dir_path, name))
                            .copied()
                            .unwrap_or_default();
                        (name.clone(), size)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn owning_file(&self, block_id: &str) -> Option<&str> {
        self.file_to_blocks
            .iter()
            .find(|(_, blocks)| blocks.iter().any(|id| id == block_id))
            .map(|(key, _)| key.as_str())
    }

    /// First half of repair: deregisters the dead node, drops every placement
    /// that named it and returns what has to be copied again.
    pub fn begin_repair(&mut self, dead: &NodeAddress) -> DfsResult<RepairPlan> {
        let dead_id = self
            .node_id(dead)
            .ok_or_else(|| DfsError::NotFound(format!("datanode {dead} is not registered")))?;
        self.registry.remove(&dead_id);
        let mut plan = RepairPlan {
            dead_id,
            ..RepairPlan::default()
        };
        let affected: Vec<(String, Vec<u64>)> = self
            .block_to_nodes
            .iter()
            .filter(|(_, ids)| ids.contains(&dead_id))
            .map(|(block_id, ids)| (block_id.clone(), ids.clone()))
            .collect();
        for (block_id, ids) in affected {
            self.block_to_nodes.remove(&block_id);
            let Some(dead_pos) = ids.iter().position(|id| *id == dead_id) else {
                continue;
            };
            // next surviving holder, wrapping around the placement list
            let source = (1..ids.len())
                .map(|step| ids[(dead_pos + step) % ids.len()])
                .find_map(|id| self.registry.get(&id).cloned());
            let Some(source) = source else {
                warn!(%block_id, "Block had no surviving copy");
                plan.lost.push(block_id);
                continue;
            };
            let Some(owner) = self.owning_file(&block_id) else {
                debug!(%block_id, "Placement without owning file dropped");
                continue;
            };
            let dir_path = split_file_key(owner).0.to_owned();
            let stale_hosts = ids
                .iter()
                .filter(|id| **id != dead_id)
                .filter_map(|id| self.registry.get(id).cloned())
                .collect();
            plan.tasks.push(RepairTask {
                block_id,
                source,
                dir_path,
                stale_hosts,
            });
        }
        plan.live_count = self.registry.len();
        plan.capacity_ok = plan.live_count >= self.cluster.replication_factor;
        Ok(plan)
    }

    /// Records a repaired placement unless the block was deleted or placed
    /// again in the meantime.
    pub fn install_placement(&mut self, block_id: &str, node_ids: Vec<u64>) -> bool {
        if self.block_to_nodes.contains_key(block_id) || self.owning_file(block_id).is_none() {
            return false;
        }
        self.block_to_nodes.insert(block_id.to_owned(), node_ids);
        true
    }

    /// Verifies that the file indexes and the placement map agree.
    pub fn check_consistency(&self) -> DfsResult<()> {
        let inconsistent = |msg: String| Err(DfsError::Inconsistent(msg));
        if self.file_to_blocks.len() != self.file_sizes.len() {
            return inconsistent(format!(
                "{} files have blocks but {} have sizes",
                self.file_to_blocks.len(),
                self.file_sizes.len()
            ));
        }
        let mut listed = 0;
        for (dir_path, files) in &self.directory_to_files {
            let unique: HashSet<&String> = files.iter().collect();
            if unique.len() != files.len() {
                return inconsistent(format!("directory {dir_path:?} lists a file twice"));
            }
            for name in files {
                let key = file_key(dir_path, name);
                if !self.file_to_blocks.contains_key(&key) || !self.file_sizes.contains_key(&key) {
                    return inconsistent(format!("listed file {key:?} has no metadata"));
                }
            }
            listed += files.len();
        }
        if listed != self.file_to_blocks.len() {
            return inconsistent(format!(
                "{} files listed in directories, {} known",
                listed,
                self.file_to_blocks.len()
            ));
        }
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for (key, blocks) in &self.file_to_blocks {
            for block_id in blocks {
                if let Some(other) = owners.insert(block_id, key) {
                    return inconsistent(format!(
                        "block {block_id} owned by both {other:?} and {key:?}"
                    ));
                }
            }
        }
        for (block_id, ids) in &self.block_to_nodes {
            if !owners.contains_key(block_id.as_str()) {
                return inconsistent(format!("placement for unowned block {block_id}"));
            }
            let unique: HashSet<&u64> = ids.iter().collect();
            if unique.len() != ids.len() {
                return inconsistent(format!("block {block_id} placed twice on one node"));
            }
            if let Some(id) = ids.iter().find(|id| !self.registry.contains_key(*id)) {
                return inconsistent(format!("block {block_id} placed on unknown node {id}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::datanode::selection_policy::RandomSelectionPolicy;

    /// Ids `b0`, `b1`, ... so assertions can name blocks.
    pub(crate) struct SequentialIds(pub u64);
    impl BlockIdGenerator for SequentialIds {
        fn next_block_id(&mut self) -> String {
            self.0 += 1;
            format!("b{}", self.0 - 1)
        }
    }

    pub(crate) fn state_with_nodes(
        block_size: u64,
        replication_factor: usize,
        nodes: u16,
    ) -> NamenodeState {
        let mut state = NamenodeState::new(
            ClusterConfig {
                block_size,
                replication_factor,
            },
            Box::new(RandomSelectionPolicy::new(Some(11))),
            Box::new(SequentialIds(0)),
        )
        .unwrap();
        state.register_datanodes(
            (0..nodes)
                .map(|i| NodeAddress::new("127.0.0.1", 7000 + i))
                .collect(),
        );
        state
    }

    #[test]
    fn rejects_zero_block_size() {
        let result = NamenodeState::new(
            ClusterConfig {
                block_size: 0,
                replication_factor: 1,
            },
            Box::new(RandomSelectionPolicy::new(None)),
            Box::new(SequentialIds(0)),
        );
        assert!(matches!(result, Err(DfsError::InvalidArgument(_))));
    }

    #[test]
    fn registration_assigns_dense_ids() {
        let mut state = state_with_nodes(4, 1, 3);
        assert_eq!(state.registry.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        let ids = state.register_datanodes(vec![
            NodeAddress::new("localhost", 7001),
            NodeAddress::new("127.0.0.1", 7010),
        ]);
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn allocates_ceil_blocks_with_capped_replicas() {
        for (size, expected_blocks) in [(0, 0), (3, 1), (4, 1), (5, 2), (17, 5)] {
            for (rf, nodes, expected_replicas) in [(1, 3, 1), (2, 3, 2), (3, 3, 3), (5, 2, 2)] {
                let mut state = state_with_nodes(4, rf, nodes);
                let placements = state.write_file("dir", "f", size).unwrap();
                assert_eq!(placements.len(), expected_blocks);
                for placement in &placements {
                    assert_eq!(placement.addresses.len(), expected_replicas);
                    let ids = &state.block_to_nodes[&placement.block_id];
                    let unique: HashSet<_> = ids.iter().collect();
                    assert_eq!(unique.len(), ids.len());
                }
                state.check_consistency().unwrap();
            }
        }
    }

    #[test]
    fn twelve_bytes_over_two_nodes() {
        let mut state = state_with_nodes(4, 2, 2);
        let placements = state.write_file("Test1/", "foo", 12).unwrap();
        assert_eq!(placements.len(), 3);
        for placement in &placements {
            let mut ports: Vec<u32> = placement.addresses.iter().map(|a| a.port).collect();
            ports.sort();
            assert_eq!(ports, vec![7000, 7001]);
        }
        assert_eq!(state.list("Test1"), vec![("foo".to_owned(), 12)]);
        assert_eq!(state.file_size("Test1/foo").unwrap(), 12);
        let read = state.read_file("Test1/", "foo");
        assert_eq!(read, placements);
    }

    #[test]
    fn write_without_nodes_fails() {
        let mut state = state_with_nodes(4, 1, 0);
        assert!(matches!(
            state.write_file("d", "f", 10),
            Err(DfsError::InsufficientReplicas { available: 0, .. })
        ));
        assert!(state.file_to_blocks.is_empty());
        state.check_consistency().unwrap();
    }

    #[test]
    fn overwrite_replaces_blocks_without_duplicate_listing() {
        let mut state = state_with_nodes(4, 1, 2);
        let first = state.write_file("d/", "f", 8).unwrap();
        let second = state.write_file("d/", "f", 4).unwrap();
        assert_eq!(second.len(), 1);
        for old in &first {
            assert!(!state.block_to_nodes.contains_key(&old.block_id));
        }
        assert_eq!(state.list("d/"), vec![("f".to_owned(), 4)]);
        state.check_consistency().unwrap();
    }

    #[test]
    fn unknown_file_reads_empty_and_has_no_size() {
        let state = state_with_nodes(4, 1, 1);
        assert!(state.read_file("nope/", "f").is_empty());
        assert!(matches!(state.file_size("nope/f"), Err(DfsError::NotFound(_))));
    }

    #[test]
    fn delete_file_clears_every_index() {
        let mut state = state_with_nodes(4, 2, 3);
        let placements = state.write_file("d/", "gone", 9).unwrap();
        state.write_file("d/", "kept", 2).unwrap();
        assert!(state.delete_file("d/", "gone"));
        assert!(!state.delete_file("d/", "gone"));
        for placement in placements {
            assert!(!state.block_to_nodes.contains_key(&placement.block_id));
        }
        assert!(state.read_file("d/", "gone").is_empty());
        assert!(matches!(state.file_size("d/gone"), Err(DfsError::NotFound(_))));
        assert_eq!(state.list("d/"), vec![("kept".to_owned(), 2)]);
        state.check_consistency().unwrap();
    }

    #[test]
    fn delete_path_covers_nested_directories() {
        let mut state = state_with_nodes(4, 1, 2);
        state.write_file("a/", "x", 4).unwrap();
        state.write_file("a/b/", "y", 4).unwrap();
        state.write_file("ab/", "z", 4).unwrap();
        assert_eq!(state.delete_path("a").unwrap(), 2);
        assert!(state.list("a/").is_empty());
        assert!(state.list("a/b/").is_empty());
        assert_eq!(state.list("ab/"), vec![("z".to_owned(), 4)]);
        assert!(state.delete_path("").is_err());
        state.check_consistency().unwrap();
    }

    #[test]
    fn rename_rewrites_prefix_only() {
        let mut state = state_with_nodes(4, 1, 2);
        let moved = state.write_file("src/", "a", 5).unwrap();
        state.write_file("src/inner/", "b", 1).unwrap();
        state.write_file("srcx/", "c", 1).unwrap();
        assert_eq!(state.rename_path("src/", "dst/").unwrap(), 2);
        assert_eq!(state.read_file("dst/", "a"), moved);
        assert_eq!(state.file_size("dst/inner/b").unwrap(), 1);
        assert_eq!(state.list("srcx/"), vec![("c".to_owned(), 1)]);
        assert!(state.list("src/").is_empty());
        // nothing left under src/, the rename is a metadata no-op
        assert_eq!(state.rename_path("src/", "again/").unwrap(), 0);
        assert!(state.rename_path("dst/", "dst/sub/").is_err());
        state.check_consistency().unwrap();
    }

    #[test]
    fn rename_onto_populated_directory_is_rejected() {
        let mut state = state_with_nodes(4, 1, 2);
        state.write_file("src/", "a", 5).unwrap();
        state.write_file("dst/", "other", 1).unwrap();
        state.write_file("dst/deep/", "x", 1).unwrap();
        assert!(matches!(
            state.rename_path("src/", "dst/"),
            Err(DfsError::InvalidArgument(_))
        ));
        assert!(matches!(
            state.rename_path("src/", "dst/deep/"),
            Err(DfsError::InvalidArgument(_))
        ));
        // nothing moved
        assert_eq!(state.file_size("src/a").unwrap(), 5);
        assert_eq!(state.list("dst/"), vec![("other".to_owned(), 1)]);
        assert_eq!(state.rename_path("src/", "fresh/").unwrap(), 1);
        state.check_consistency().unwrap();
    }

    #[test]
    fn rename_file_moves_single_key() {
        let mut state = state_with_nodes(4, 1, 1);
        let placements = state.write_file("d/", "old", 6).unwrap();
        state.write_file("d/", "other", 1).unwrap();
        assert!(matches!(
            state.rename_file("d/old", "e/new"),
            Err(DfsError::InvalidArgument(_))
        ));
        state.rename_file("d/old", "d/new").unwrap();
        assert_eq!(state.read_file("d/", "new"), placements);
        assert_eq!(
            state.list("d/"),
            vec![("other".to_owned(), 1), ("new".to_owned(), 6)]
        );
        assert!(matches!(
            state.rename_file("d/old", "d/x"),
            Err(DfsError::NotFound(_))
        ));
        assert!(state.rename_file("d/new", "d/other").is_err());
        state.check_consistency().unwrap();
    }

    #[test]
    fn repair_plan_uses_next_surviving_holder() {
        let mut state = state_with_nodes(4, 3, 4);
        let placements = state.write_file("d/", "f", 8).unwrap();
        let dead = placements[0].addresses[1].clone();
        let plan = state.begin_repair(&dead).unwrap();
        assert!(plan.capacity_ok);
        assert_eq!(plan.live_count, 3);
        assert!(!state.registry.values().any(|node| node.same_node(&dead)));
        let first = plan
            .tasks
            .iter()
            .find(|task| task.block_id == placements[0].block_id)
            .unwrap();
        assert_eq!(first.source, placements[0].addresses[2]);
        assert_eq!(first.dir_path, "d/");
        assert_eq!(first.stale_hosts.len(), 2);
        assert!(!first.stale_hosts.contains(&dead));
        for task in &plan.tasks {
            assert!(!state.block_to_nodes.contains_key(&task.block_id));
        }
        assert!(matches!(state.begin_repair(&dead), Err(DfsError::NotFound(_))));
    }

    #[test]
    fn repair_wraps_around_when_last_holder_dies() {
        let mut state = state_with_nodes(4, 2, 3);
        let placements = state.write_file("", "f", 4).unwrap();
        let holders = placements[0].addresses.clone();
        let plan = state.begin_repair(&holders[1]).unwrap();
        assert_eq!(
            plan.tasks,
            vec![RepairTask {
                block_id: placements[0].block_id.clone(),
                source: holders[0].clone(),
                dir_path: String::new(),
                stale_hosts: vec![holders[0].clone()],
            }]
        );
    }

    #[test]
    fn repair_under_capacity_is_flagged() {
        let mut state = state_with_nodes(4, 2, 2);
        state.write_file("d/", "f", 4).unwrap();
        let plan = state.begin_repair(&NodeAddress::new("127.0.0.1", 7000)).unwrap();
        assert!(!plan.capacity_ok);
        assert_eq!(plan.live_count, 1);
    }

    #[test]
    fn single_copy_blocks_are_lost_with_their_node() {
        let mut state = state_with_nodes(4, 1, 1);
        let placements = state.write_file("d/", "f", 4).unwrap();
        let plan = state.begin_repair(&placements[0].addresses[0]).unwrap();
        assert!(plan.tasks.is_empty());
        assert_eq!(plan.lost, vec![placements[0].block_id.clone()]);
    }

    #[test]
    fn install_skips_deleted_blocks() {
        let mut state = state_with_nodes(4, 2, 3);
        let placements = state.write_file("d/", "f", 4).unwrap();
        let block_id = placements[0].block_id.clone();
        let plan = state.begin_repair(&placements[0].addresses[0]).unwrap();
        assert_eq!(plan.tasks.len(), 1);
        let ids: Vec<u64> = state.registry.keys().copied().take(2).collect();
        assert!(state.install_placement(&block_id, ids.clone()));
        assert!(!state.install_placement(&block_id, ids.clone()));
        state.check_consistency().unwrap();
        state.delete_file("d/", "f");
        assert!(!state.install_placement(&block_id, ids));
    }

    #[test]
    fn consistency_check_catches_half_updates() {
        let mut state = state_with_nodes(4, 1, 1);
        state.write_file("d/", "f", 4).unwrap();
        state.file_sizes.remove("d/f");
        assert!(matches!(state.check_consistency(), Err(DfsError::Inconsistent(_))));

        let mut state = state_with_nodes(4, 1, 1);
        state.write_file("d/", "f", 4).unwrap();
        state.directory_to_files.clear();
        assert!(matches!(state.check_consistency(), Err(DfsError::Inconsistent(_))));

        let mut state = state_with_nodes(4, 1, 1);
        state.block_to_nodes.insert("orphan".to_owned(), vec![0]);
        assert!(matches!(state.check_consistency(), Err(DfsError::Inconsistent(_))));
    }
}
