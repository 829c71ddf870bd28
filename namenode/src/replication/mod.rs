pub mod leader_election;
pub mod metadata_sync;
