use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// Where an upgrade package comes from and where it lands.
///
/// One descriptor drives one [`download_upgrade`](crate::download_upgrade)
/// invocation. The version identifier is embedded in the partial-file name
/// so a version change can never resume onto stale bytes left behind by a
/// previous build.
#[derive(Clone, Debug)]
pub struct UpgradeTarget {
    /// Canonical path of the published artifact.
    pub install_path: PathBuf,
    /// Source URL of the upgrade package.
    pub url: String,
    /// Stable identifier of the upgrade build, unique per version.
    pub version: String,
    /// Per-attempt timeout handed to the transport, if any.
    pub timeout: Option<Duration>,
}

impl UpgradeTarget {
    pub fn new(
        install_path: impl Into<PathBuf>,
        url: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            install_path: install_path.into(),
            url: url.into(),
            version: version.into(),
            timeout: None,
        }
    }

    /// Bound the single HTTP request this attempt issues. Callers whose
    /// client already enforces a timeout policy can leave this unset.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Staging path for the in-progress download:
    /// `<install_path>.<version>.part`.
    pub fn partial_path(&self) -> PathBuf {
        let mut name = OsString::from(self.install_path.as_os_str());
        name.push(format!(".{}.part", self.version));
        PathBuf::from(name)
    }
}
