//! Zip pre-extraction for datasets that ship their payload archived.
//!
//! A couple of raw downloads contain a zip inside the raw directory; the
//! adapters extract it in place before file discovery. Extraction
//! overwrites prior contents, keeping re-runs idempotent.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::{HarmonizeError, Result};

/// Find archives under `raw_dir` whose file name matches `pattern` and
/// extract each into its parent directory. Returns the number of archives
/// extracted.
pub fn extract_matching_archives(raw_dir: &Path, pattern: &str) -> Result<usize> {
    let matcher = glob::Pattern::new(pattern).map_err(|e| HarmonizeError::Configuration {
        message: format!("invalid archive pattern '{}': {}", pattern, e),
    })?;

    let mut extracted = 0;
    for entry in WalkDir::new(raw_dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !matcher.matches(&name) {
            continue;
        }
        let dest = entry.path().parent().unwrap_or(raw_dir);
        info!("Extracting archive {} into {}", entry.path().display(), dest.display());
        extract_zip_into(entry.path(), dest)?;
        extracted += 1;
    }

    Ok(extracted)
}

/// Extract every entry of a zip archive into `dest_dir`, preserving the
/// archive's internal layout. Entries whose names would escape the
/// destination are skipped.
pub fn extract_zip_into(zip_path: &Path, dest_dir: &Path) -> Result<usize> {
    let archive_err = |reason: String| HarmonizeError::Archive {
        path: zip_path.to_path_buf(),
        reason,
    };

    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| archive_err(e.to_string()))?;

    let mut files_written = 0;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| archive_err(e.to_string()))?;

        let Some(relative) = entry.enclosed_name() else {
            debug!("Skipping archive entry with unsafe name: {}", entry.name());
            continue;
        };
        let target = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        files_written += 1;
    }

    debug!(
        "Extracted {} files from {} into {}",
        files_written,
        zip_path.display(),
        dest_dir.display()
    );

    Ok(files_written)
}
