use std::path::Path;

use tokio::{fs::File, io::AsyncReadExt};
use utilities::{
    error::DfsResult,
    logger::{instrument, tracing},
};

/// Reads a local file front to back in block sized pieces, the last one
/// possibly shorter.
pub struct FileChunker {
    file: File,
    block_size: u64,
    remaining: u64,
}

impl FileChunker {
    pub async fn open(path: impl AsRef<Path>, block_size: u64) -> DfsResult<Self> {
        let file = File::open(path).await?;
        let remaining = file.metadata().await?.len();
        Ok(Self {
            file,
            block_size,
            remaining,
        })
    }
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
    #[instrument(name = "file_chunker_next_chunk", skip(self))]
    pub async fn next_chunk(&mut self) -> DfsResult<Option<Vec<u8>>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let len = self.remaining.min(self.block_size) as usize;
        let mut chunk = vec![0; len];
        self.file.read_exact(&mut chunk).await?;
        self.remaining -= len as u64;
        Ok(Some(chunk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn splits_into_block_sized_chunks() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"abcdefghij").unwrap();
        let mut chunker = FileChunker::open(file.path(), 4).await.unwrap();
        assert_eq!(chunker.remaining(), 10);
        let mut chunks = vec![];
        while let Some(chunk) = chunker.next_chunk().await.unwrap() {
            chunks.push(chunk);
        }
        assert_eq!(chunks, vec![b"abcd".to_vec(), b"efgh".to_vec(), b"ij".to_vec()]);
    }

    #[tokio::test]
    async fn empty_file_has_no_chunks() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut chunker = FileChunker::open(file.path(), 4).await.unwrap();
        assert!(chunker.next_chunk().await.unwrap().is_none());
    }
}
