//! Resumable downloader for client upgrade packages.
//!
//! The crate does one job: given a destination path, a source URL, and a
//! version identifier, deliver the complete upgrade package to the
//! destination, resuming a compatible partial download from an earlier
//! attempt instead of starting over. The HTTP client is supplied by the
//! caller (typically routed through a tunnel or proxy) and is asked for a
//! single ranged GET per invocation.
//!
//! ```no_run
//! use upfetch::{download_upgrade, LogEvents, UpgradeTarget};
//!
//! # async fn example(client: reqwest::Client) -> Result<(), upfetch::DownloadError> {
//! let target = UpgradeTarget::new(
//!     "/var/lib/app/upgrade.pkg",
//!     "https://updates.example.org/upgrade.pkg",
//!     "20240901",
//! );
//! download_upgrade(&target, &client, &LogEvents).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Completion is judged by the existence of the file at the install path;
//! content verification (signature or hash) belongs to the caller after
//! the download returns. In-progress bytes are staged in a
//! version-stamped `.part` file next to the install path and published
//! with an atomic rename, so the install path never holds a half-written
//! package.

mod downloader;
mod error;
mod events;
mod target;
mod transport;

pub use downloader::download_upgrade;
pub use error::{DownloadError, Result};
pub use events::{DownloadEvents, LogEvents};
pub use target::UpgradeTarget;
pub use transport::{BodyStream, RangeResponse, Transport, TransportError};
