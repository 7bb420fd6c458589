use std::path::Path;

/// Signals a download invocation emits for an external notification layer.
///
/// `bytes_transferred` reports how much this invocation moved over the
/// wire (0 when the resource was already fully staged); it fires after a
/// successful copy phase and before publish. `artifact_available` fires
/// once the artifact is present at its final path, whether it was just
/// published or found there already.
pub trait DownloadEvents: Send + Sync {
    fn bytes_transferred(&self, count: u64);

    fn artifact_available(&self, path: &Path);
}

/// Event sink that forwards both signals to `tracing`, for callers that
/// only want logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogEvents;

impl DownloadEvents for LogEvents {
    fn bytes_transferred(&self, count: u64) {
        tracing::info!(bytes = count, "upgrade package bytes downloaded");
    }

    fn artifact_available(&self, path: &Path) {
        tracing::info!(path = %path.display(), "upgrade package available");
    }
}
