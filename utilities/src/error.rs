use thiserror::Error;
use tonic::{Code, Status};

/// Failure classes shared by every service of the cluster.
#[derive(Debug, Error)]
pub enum DfsError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unreachable: {0}")]
    Unreachable(String),
    #[error("insufficient replicas: needed {needed}, {available} available")]
    InsufficientReplicas { needed: usize, available: usize },
    #[error("partial failure: {succeeded} succeeded, {failed} failed")]
    PartialFailure { succeeded: usize, failed: usize },
    #[error("inconsistent metadata: {0}")]
    Inconsistent(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type DfsResult<T> = std::result::Result<T, DfsError>;

impl DfsError {
    /// Errors a reader may answer by trying the next replica.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DfsError::NotFound(_) | DfsError::Unreachable(_))
    }
    pub fn is_unreachable(&self) -> bool {
        matches!(self, DfsError::Unreachable(_))
    }
}

impl From<DfsError> for Status {
    fn from(value: DfsError) -> Self {
        let message = value.to_string();
        match value {
            DfsError::NotFound(_) => Status::not_found(message),
            DfsError::Unreachable(_) => Status::unavailable(message),
            DfsError::InsufficientReplicas { .. } => Status::resource_exhausted(message),
            DfsError::PartialFailure { .. } => Status::aborted(message),
            DfsError::Inconsistent(_) => Status::data_loss(message),
            DfsError::InvalidArgument(_) => Status::invalid_argument(message),
            DfsError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound => {
                Status::not_found(message)
            }
            DfsError::Io(_) | DfsError::Internal(_) => Status::internal(message),
        }
    }
}

impl From<Status> for DfsError {
    fn from(value: Status) -> Self {
        let message = value.message().to_owned();
        match value.code() {
            Code::NotFound => DfsError::NotFound(message),
            // tonic reports an expired request timeout as Cancelled
            Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled => {
                DfsError::Unreachable(message)
            }
            Code::DataLoss => DfsError::Inconsistent(message),
            Code::InvalidArgument => DfsError::InvalidArgument(message),
            _ => DfsError::Internal(format!("{:?}: {message}", value.code())),
        }
    }
}

impl From<tonic::transport::Error> for DfsError {
    fn from(value: tonic::transport::Error) -> Self {
        DfsError::Unreachable(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip_keeps_recoverable_classes() {
        let not_found: Status = DfsError::NotFound("block b1".to_owned()).into();
        assert_eq!(not_found.code(), Code::NotFound);
        assert!(DfsError::from(not_found).is_recoverable());

        let unreachable: Status = DfsError::Unreachable("127.0.0.1:7000".to_owned()).into();
        assert_eq!(unreachable.code(), Code::Unavailable);
        assert!(DfsError::from(unreachable).is_unreachable());
    }

    #[test]
    fn timeouts_count_as_unreachable() {
        let timed_out = Status::cancelled("Timeout expired");
        assert!(DfsError::from(timed_out).is_unreachable());
        let deadline = Status::deadline_exceeded("deadline");
        assert!(DfsError::from(deadline).is_unreachable());
    }

    #[test]
    fn missing_file_io_error_maps_to_not_found_status() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let status: Status = DfsError::from(io).into();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[test]
    fn replica_shortage_is_not_recoverable() {
        let err = DfsError::InsufficientReplicas {
            needed: 3,
            available: 1,
        };
        assert!(!err.is_recoverable());
        let status: Status = err.into();
        assert_eq!(status.code(), Code::ResourceExhausted);
    }
}
