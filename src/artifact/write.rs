//! Idempotent artifact writing.

use std::fs;
use std::io;
use std::path::Path;

/// Result of [`write_if_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

impl WriteOutcome {
    #[inline]
    pub const fn is_written(self) -> bool {
        matches!(self, Self::Written)
    }
}

/// Write `content` to `path` unless the file already holds exactly these bytes.
///
/// Logs the artifact location when a write occurs.
pub fn write_if_changed(path: &Path, content: &str) -> io::Result<WriteOutcome> {
    match fs::read(path) {
        Ok(existing) if existing == content.as_bytes() => {
            crate::debug!("routes"; "unchanged {}", path.display());
            return Ok(WriteOutcome::Unchanged);
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    crate::log!("routes"; "generated at {}", path.display());
    Ok(WriteOutcome::Written)
}
