use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use modex_core::{modules_to_pretty_json, Module};
use modex_logging::modex_info;
use tempfile::NamedTempFile;

use crate::ExportError;

pub const EXPORT_FILENAME: &str = "extracted_modules.json";

/// Ensure the export directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| ExportError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(ExportError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| ExportError::OutputDir(e.to_string()))
}

/// Writes module lists as pretty JSON into a directory.
///
/// Files are written to a temp file in the same directory and renamed into
/// place, so a reader never sees a half-written export.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    dir: PathBuf,
}

impl JsonExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn export(&self, modules: &[Module]) -> Result<PathBuf, ExportError> {
        self.export_as(EXPORT_FILENAME, modules)
    }

    pub fn export_as(&self, filename: &str, modules: &[Module]) -> Result<PathBuf, ExportError> {
        let json = modules_to_pretty_json(modules)?;
        let path = self.write_atomic(filename, &json)?;
        modex_info!("Exported {} module(s) to {:?}", modules.len(), path);
        Ok(path)
    }

    fn write_atomic(&self, filename: &str, content: &str) -> Result<PathBuf, ExportError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| ExportError::Io(e.error))?;
        Ok(target)
    }
}
