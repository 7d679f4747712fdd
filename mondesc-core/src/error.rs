use std::fmt;

/// Error type for all mondesc operations.
///
/// Remote failures are folded into a small taxonomy at the service
/// boundary; anything that does not fit one of the named kinds is carried
/// as `Unknown` with the original status intact.
#[derive(Debug)]
pub enum MonitoringError {
    /// A bad or missing argument (empty project, unrecognized kind, invalid
    /// header, or an `INVALID_ARGUMENT` status from the service).
    InvalidArgument(String),

    /// The caller lacks rights to the project, or presented no credentials.
    PermissionDenied(String),

    /// The service could not be reached (connect failure, `UNAVAILABLE`).
    RemoteUnavailable(String),

    /// The operation was aborted by the caller or hit its deadline.
    Cancelled(String),

    /// Any other status reported by the service, passed through unchanged.
    Unknown(tonic::Status),

    /// Writing output failed.
    Io(std::io::Error),
}

impl MonitoringError {
    /// The gRPC status code this error corresponds to.
    ///
    /// Used by the CLI to derive its exit status. Local I/O failures have no
    /// remote counterpart and report `Internal`.
    pub fn code(&self) -> tonic::Code {
        match self {
            MonitoringError::InvalidArgument(_) => tonic::Code::InvalidArgument,
            MonitoringError::PermissionDenied(_) => tonic::Code::PermissionDenied,
            MonitoringError::RemoteUnavailable(_) => tonic::Code::Unavailable,
            MonitoringError::Cancelled(_) => tonic::Code::Cancelled,
            MonitoringError::Unknown(status) => status.code(),
            MonitoringError::Io(_) => tonic::Code::Internal,
        }
    }
}

impl fmt::Display for MonitoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitoringError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            MonitoringError::PermissionDenied(msg) => write!(f, "permission denied: {msg}"),
            MonitoringError::RemoteUnavailable(msg) => write!(f, "service unavailable: {msg}"),
            MonitoringError::Cancelled(msg) => write!(f, "cancelled: {msg}"),
            MonitoringError::Unknown(status) => {
                write!(f, "gRPC error: {} - {}", status.code(), status.message())
            }
            MonitoringError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for MonitoringError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MonitoringError::Io(err) => Some(err),
            MonitoringError::Unknown(status) => Some(status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MonitoringError {
    fn from(err: std::io::Error) -> Self {
        MonitoringError::Io(err)
    }
}

impl From<tonic::Status> for MonitoringError {
    fn from(status: tonic::Status) -> Self {
        let message = status.message().to_string();
        match status.code() {
            tonic::Code::PermissionDenied | tonic::Code::Unauthenticated => {
                MonitoringError::PermissionDenied(message)
            }
            tonic::Code::Unavailable => MonitoringError::RemoteUnavailable(message),
            tonic::Code::InvalidArgument => MonitoringError::InvalidArgument(message),
            tonic::Code::Cancelled | tonic::Code::DeadlineExceeded => {
                MonitoringError::Cancelled(message)
            }
            _ => MonitoringError::Unknown(status),
        }
    }
}

/// Convenience type alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MonitoringError>;
