//! Scratch storage for uploaded render captures.
//!
//! A capture lives on disk only for the duration of one export. The file is removed
//! when the `StagedCapture` drops, whichever way the export ends.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

#[derive(Debug)]
pub struct StagedCapture {
    file: NamedTempFile,
}

impl StagedCapture {
    /// Writes `bytes` to a fresh temp file under `dir`.
    pub fn stage(dir: &Path, bytes: &[u8]) -> std::io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("render-target-")
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl Drop for StagedCapture {
    fn drop(&mut self) {
        debug!("Releasing staged capture {:?}", self.file.path());
    }
}
