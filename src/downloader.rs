use std::path::Path;

use futures::StreamExt;
use reqwest::StatusCode;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::{DownloadError, Result};
use crate::events::DownloadEvents;
use crate::target::UpgradeTarget;
use crate::transport::{BodyStream, Transport};

/// Bytes streamed between fsyncs of the partial file. An interruption
/// loses at most this much already-received data.
const SYNC_INTERVAL: u64 = 4 * 1024 * 1024;

/// Download the upgrade package described by `target`, resuming any
/// compatible partial download left behind by an earlier attempt.
///
/// One call is one attempt: no internal retries, no internal concurrency.
/// On success the artifact is at `target.install_path` and `events` has
/// been told how many bytes this attempt moved. On failure the partial
/// file keeps whatever was already written, and a later call with the
/// same target resumes from there.
///
/// An existing file at `target.install_path` counts as a completed
/// earlier download and short-circuits the call; its contents are not
/// re-checked here. Whether the bytes are the expected package is for the
/// downstream verifier to decide. That also covers the one corruption
/// window this scheme has: a server replacing the resource under an
/// unchanged version identifier between two resumed attempts splices old
/// and new content into the partial file, which only the verifier can
/// catch.
pub async fn download_upgrade(
    target: &UpgradeTarget,
    transport: &dyn Transport,
    events: &dyn DownloadEvents,
) -> Result<()> {
    if target.install_path.exists() {
        events.artifact_available(&target.install_path);
        return Ok(());
    }

    // Validate before touching disk; a bad URL is a configuration bug,
    // not something a retry can fix.
    url::Url::parse(&target.url).map_err(|source| DownloadError::InvalidUrl {
        url: target.url.clone(),
        source,
    })?;

    let partial_path = target.partial_path();
    let mut file = open_partial(&partial_path).await?;

    let resume_offset = file
        .metadata()
        .await
        .map_err(|e| DownloadError::fs("stat", &partial_path, e))?
        .len();

    tracing::debug!(
        url = %target.url,
        offset = resume_offset,
        "requesting upgrade package suffix"
    );

    let response = transport
        .get_range(&target.url, resume_offset, target.timeout)
        .await
        .map_err(|source| DownloadError::Transport { source })?;
    tracing::debug!(status = %response.status, "upgrade download response");

    let transferred = match response.status {
        StatusCode::PARTIAL_CONTENT => copy_body(response.body, &mut file, &partial_path).await?,
        // A prior attempt can have written the full resource and died
        // before the rename; the next request then asks for bytes past
        // the end and the server answers 416. Nothing left to fetch,
        // only to publish.
        StatusCode::RANGE_NOT_SATISFIABLE => 0,
        status => return Err(DownloadError::UnexpectedStatus { status }),
    };

    // All appended bytes must be durable before the rename; publishing a
    // not-yet-flushed file could expose truncated content.
    file.flush()
        .await
        .map_err(|e| DownloadError::fs("flush", &partial_path, e))?;
    file.sync_all()
        .await
        .map_err(|e| DownloadError::fs("sync", &partial_path, e))?;
    drop(file);

    tokio::fs::rename(&partial_path, &target.install_path)
        .await
        .map_err(|e| DownloadError::fs("rename", &partial_path, e))?;

    events.bytes_transferred(transferred);
    events.artifact_available(&target.install_path);
    Ok(())
}

async fn open_partial(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    options.mode(0o600);
    options
        .open(path)
        .await
        .map_err(|e| DownloadError::fs("open", path, e))
}

/// Append the response body to the partial file, returning the byte
/// count. Received bytes are synced every [`SYNC_INTERVAL`] so an
/// interruption only costs the tail written since the last sync.
async fn copy_body(mut body: BodyStream, file: &mut File, path: &Path) -> Result<u64> {
    let mut transferred = 0u64;
    let mut unsynced = 0u64;

    while let Some(chunk) = body.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(source) => {
                // Keep what already arrived durable so the next attempt
                // resumes past it, then surface the transport failure.
                let _ = file.flush().await;
                return Err(DownloadError::Transport { source });
            }
        };

        file.write_all(&chunk)
            .await
            .map_err(|e| DownloadError::fs("append to", path, e))?;
        transferred += chunk.len() as u64;
        unsynced += chunk.len() as u64;

        if unsynced >= SYNC_INTERVAL {
            file.sync_data()
                .await
                .map_err(|e| DownloadError::fs("sync", path, e))?;
            unsynced = 0;
        }
    }

    Ok(transferred)
}
