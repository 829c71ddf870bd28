pub trait BlockIdGenerator: Send {
    fn next_block_id(&mut self) -> String;
}

/// Random v4 uuids, unique for the lifetime of the cluster.
#[derive(Default)]
pub struct UuidBlockIdGenerator;

impl BlockIdGenerator for UuidBlockIdGenerator {
    fn next_block_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Number of blocks a file of `file_size` bytes is split into.
pub fn block_count(file_size: u64, block_size: u64) -> u64 {
    file_size.div_ceil(block_size)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn block_count_rounds_up() {
        assert_eq!(block_count(0, 4), 0);
        assert_eq!(block_count(3, 4), 1);
        assert_eq!(block_count(4, 4), 1);
        assert_eq!(block_count(5, 4), 2);
        assert_eq!(block_count(12, 4), 3);
    }

    #[test]
    fn uuid_ids_do_not_repeat() {
        let mut generator = UuidBlockIdGenerator;
        let ids: HashSet<String> = (0..1000).map(|_| generator.next_block_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
