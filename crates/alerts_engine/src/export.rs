use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use alerts_logging::alert_info;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::filename::deterministic_filename;

pub const EXPORT_EXTENSION: &str = "txt";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot use {} as export directory: {reason}", .dir.display())]
    ExportDir { dir: PathBuf, reason: String },
    #[error("writing export failed: {0}")]
    Io(#[from] io::Error),
}

/// Creates `dir` (and parents) unless it already exists as a directory.
pub fn ensure_export_dir(dir: &Path) -> Result<(), ExportError> {
    let unusable = |reason: String| ExportError::ExportDir {
        dir: dir.to_path_buf(),
        reason,
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(unusable("not a directory".to_string())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|err| unusable(err.to_string()))
        }
        Err(err) => Err(unusable(err.to_string())),
    }
}

/// Writes files into one directory through a sibling temp file, so a reader
/// never sees a half-written alert.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Replaces `{dir}/{filename}` with `content` and returns its path.
    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, ExportError> {
        ensure_export_dir(&self.dir)?;

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(content.as_bytes())?;
        staged.as_file().sync_all()?;

        let target = self.dir.join(filename);
        staged
            .persist(&target)
            .map_err(|err| ExportError::Io(err.error))?;
        Ok(target)
    }
}

/// Saves a rendered alert card as `<headline>--<hash of id>.txt` under `dir`.
pub fn export_alert(
    dir: &Path,
    headline: &str,
    compound_id: &str,
    rendered: &str,
) -> Result<PathBuf, ExportError> {
    let filename = deterministic_filename(headline, compound_id, EXPORT_EXTENSION);
    let path = AtomicFileWriter::new(dir.to_path_buf()).write(&filename, rendered)?;
    alert_info!("exported alert {} to {}", compound_id, path.display());
    Ok(path)
}
