use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::transport::TransportError;

pub type Result<T> = std::result::Result<T, DownloadError>;

/// Failure surface of one download attempt.
///
/// The variants separate configuration, filesystem, transport, and
/// protocol failures so the caller can tell which ones a later retry can
/// fix. Whatever the failure, the partial file keeps the bytes already
/// written to disk and the next attempt resumes from there.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The source URL does not parse. Retrying cannot help; the target
    /// descriptor itself is wrong.
    #[error("invalid upgrade URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A local I/O operation on the partial file or the final path failed.
    #[error("failed to {op} {path:?}: {source}")]
    Filesystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The transport could not complete the request or its body: network
    /// failure, timeout, connection reset. Worth retrying on a later
    /// attempt or tunnel session.
    #[error("transport failure: {source}")]
    Transport {
        #[source]
        source: TransportError,
    },

    /// The server answered with something other than 206 or 416, e.g. a
    /// plain 200 from a server without range support, or a 404.
    #[error("unexpected response status: {status}")]
    UnexpectedStatus { status: StatusCode },
}

impl DownloadError {
    pub(crate) fn fs(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        DownloadError::Filesystem {
            op,
            path: path.into(),
            source,
        }
    }
}
