use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::{ErrorReporting, SourceContext, SqfError};

/// Extension of translatable source files.
pub const SOURCE_EXTENSION: &str = "py";

/// Extension given to translated files.
pub const TARGET_EXTENSION: &str = "sqf";

/// Finds Python sources under a directory and decides where their SQF
/// translations go.
#[derive(Debug)]
pub struct SourceDiscoverer;

impl SourceDiscoverer {
    // =====================
    // Public API - File Discovery
    // =====================

    /// Recursively scans a directory for `.py` files.
    ///
    /// The returned list is sorted so builds report in a stable order.
    pub fn discover_source_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, SqfError> {
        let root = root.as_ref();
        let mut files = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).display().to_string();
                SourceContext::fallback("source discovery").io_error(&path, &std::io::Error::from(e))
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !Self::is_source_file(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }
        files.sort();
        Ok(files)
    }

    /// Where the translation of `source` is written.
    ///
    /// Without `out_dir` the file lands next to its source; with it, the
    /// layout below `root` is mirrored under `out_dir`.
    pub fn target_path(source: &Path, root: &Path, out_dir: Option<&Path>) -> PathBuf {
        let target = source.with_extension(TARGET_EXTENSION);
        let Some(out_dir) = out_dir else {
            return target;
        };
        match target.strip_prefix(root) {
            Ok(relative) => out_dir.join(relative),
            Err(_) => out_dir.join(target.file_name().unwrap_or(target.as_os_str())),
        }
    }

    // =====================
    // Internal Helpers
    // =====================

    fn is_source_file(path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
    }
}
