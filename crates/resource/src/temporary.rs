//! Scratch files handed to the renderer by path.
//!
//! Every file created here is registered and deleted again by
//! [`TemporaryFiles::remove_all`], which also runs when the manager is
//! dropped.

use std::fs;
use std::path::{Path, PathBuf};
use weasy_traits::ResourceError;

/// Prefix of every generated file name.
pub const DEFAULT_PREFIX: &str = "weasy";

/// Creates uniquely named scratch files and tracks them for cleanup.
#[derive(Debug)]
pub struct TemporaryFiles {
    folder: Option<PathBuf>,
    prefix: String,
    files: Vec<PathBuf>,
}

impl Default for TemporaryFiles {
    fn default() -> Self {
        Self {
            folder: None,
            prefix: DEFAULT_PREFIX.to_string(),
            files: Vec::new(),
        }
    }
}

impl TemporaryFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the manager with files placed in `folder`.
    pub fn in_folder<P: AsRef<Path>>(folder: P) -> Self {
        let mut files = Self::default();
        files.folder = Some(folder.as_ref().to_path_buf());
        files
    }

    /// The folder new files go to. Defaults to the OS temp directory.
    pub fn folder(&self) -> PathBuf {
        self.folder.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn set_folder<P: AsRef<Path>>(&mut self, folder: P) {
        self.folder = Some(folder.as_ref().to_path_buf());
    }

    /// Makes sure `dir` exists and accepts writes.
    fn ensure_folder(dir: &Path) -> Result<(), ResourceError> {
        if !dir.is_dir() {
            if let Err(e) = fs::create_dir_all(dir)
                && !dir.is_dir()
            {
                return Err(ResourceError::Directory {
                    path: dir.display().to_string(),
                    message: format!("unable to create directory: {e}"),
                });
            }
            return Ok(());
        }

        // Permission bits alone miss ACLs and read-only mounts.
        tempfile::Builder::new()
            .prefix(DEFAULT_PREFIX)
            .tempfile_in(dir)
            .map(drop)
            .map_err(|e| ResourceError::Directory {
                path: dir.display().to_string(),
                message: format!("unable to write in directory: {e}"),
            })
    }

    /// Registers a new, uniquely named file and returns its path.
    ///
    /// The file is only written when `content` is given; otherwise just the
    /// path is reserved, which suits outputs the renderer creates itself.
    /// `extension` is appended as `.{extension}`.
    ///
    /// # Errors
    ///
    /// - `ResourceError::Directory` if the folder cannot be created or written
    /// - `ResourceError::Write` if writing `content` fails
    pub fn create(
        &mut self,
        content: Option<&[u8]>,
        extension: Option<&str>,
    ) -> Result<PathBuf, ResourceError> {
        let dir = self.folder();
        Self::ensure_folder(&dir)?;

        let mut name = format!("{}{}", self.prefix, uuid::Uuid::new_v4().simple());
        if let Some(extension) = extension {
            name.push('.');
            name.push_str(extension);
        }
        let path = dir.join(name);

        if let Some(content) = content {
            fs::write(&path, content).map_err(|e| ResourceError::Write {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        }

        log::trace!("Registered temporary file '{}'.", path.display());
        self.files.push(path.clone());
        Ok(path)
    }

    /// Registered paths, oldest first.
    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Deletes every registered file. Missing files are fine; files that
    /// could not be deleted stay registered for the next attempt.
    pub fn remove_all(&mut self) {
        self.files.retain(|path| match fs::remove_file(path) {
            Ok(()) => false,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => {
                log::warn!("Could not remove temporary file '{}': {}", path.display(), e);
                true
            }
        });
    }
}

impl Drop for TemporaryFiles {
    fn drop(&mut self) {
        self.remove_all();
    }
}
