use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @checks: Extension is in the accepted list (case-insensitive, leading dot optional)
    pub fn has_extension<P: AsRef<Path>>(path: P, extensions: &[String]) -> bool {
        path.as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| {
                extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(&ext))
            })
    }

    /// Collect the source files under `roots`
    ///
    /// Directories are walked recursively, skipping any directory whose name
    /// is in `exclude_dirs`. Files given directly are kept if their extension
    /// matches. Missing paths are reported and skipped. The result is sorted
    /// and free of duplicates. Unreadable entries such as dangling links are
    /// reported and skipped.
    pub fn find_source_files<P: AsRef<Path>>(
        roots: &[P],
        extensions: &[String],
        exclude_dirs: &[String],
    ) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for root in roots {
            let root = root.as_ref();
            if Self::file_exists(root) {
                if Self::has_extension(root, extensions) {
                    result.push(root.to_path_buf());
                } else {
                    debug!("Skipping {:?}: unsupported extension", root);
                }
                continue;
            }
            if !Self::dir_exists(root) {
                warn!("Path does not exist: {:?}", root);
                continue;
            }

            let walker = WalkDir::new(root)
                .follow_links(true)
                .into_iter()
                .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry, exclude_dirs));

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("Skipping unreadable entry under {:?}: {}", root, e);
                        continue;
                    }
                };
                let path = entry.path();
                if entry.file_type().is_file() && Self::has_extension(path, extensions) {
                    result.push(path.to_path_buf());
                }
            }
        }

        result.sort();
        result.dedup();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}

fn is_excluded(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    entry.file_type().is_dir()
        && exclude_dirs
            .iter()
            .any(|name| entry.file_name().to_string_lossy() == name.as_str())
}
