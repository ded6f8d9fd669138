//! Filesystem and process checks run before and after the renderer.

use crate::error::{GeneratorError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use weasy_traits::ProcessOutput;

/// Path prefixes of archive-backed virtual filesystems. The renderer cannot
/// write into those.
const ARCHIVE_PREFIXES: &[&str] = &["phar://", "zip://", "jar:"];

/// Makes `output` ready to be written by the renderer.
///
/// - rejects archive-style virtual paths
/// - rejects existing directories and links
/// - an existing regular file is an error unless `overwrite` is set, in
///   which case it is deleted
/// - a missing parent directory is created
/// - any other failure to inspect the path is an error
pub fn prepare_output(output: &Path, overwrite: bool) -> Result<()> {
    let display = output.to_string_lossy();
    if let Some(prefix) = ARCHIVE_PREFIXES.iter().find(|p| display.starts_with(**p)) {
        return Err(GeneratorError::InvalidArgument(format!(
            "The output file cannot be inside a '{prefix}' archive."
        )));
    }

    match fs::symlink_metadata(output) {
        Ok(metadata) if metadata.is_file() => {
            if !overwrite {
                return Err(GeneratorError::FileAlreadyExists(output.to_path_buf()));
            }
            fs::remove_file(output).map_err(|e| GeneratorError::OutputPreparation {
                path: output.to_path_buf(),
                message: format!(
                    "Could not delete already existing output file '{}': {e}",
                    output.display()
                ),
            })
        }
        Ok(metadata) => {
            let kind = if metadata.is_dir() { "directory" } else { "link" };
            Err(GeneratorError::InvalidArgument(format!(
                "The output file '{}' already exists and it is a {kind}.",
                output.display()
            )))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => create_parent(output),
        Err(e) => Err(GeneratorError::OutputPreparation {
            path: output.to_path_buf(),
            message: format!("Could not inspect output file '{}': {e}", output.display()),
        }),
    }
}

fn create_parent(output: &Path) -> Result<()> {
    let Some(directory) = output.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(());
    };
    if directory.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(directory).map_err(|e| GeneratorError::OutputPreparation {
        path: directory.to_path_buf(),
        message: format!(
            "The output file's directory '{}' could not be created: {e}",
            directory.display()
        ),
    })
}

/// Validates the renderer's exit.
///
/// A missing status means the process never terminated. A non-zero status is
/// only fatal when the renderer also wrote to stderr: some renderers exit
/// non-zero on mere warnings, so an exit code alone is tolerated.
pub fn check_process_status(output: &ProcessOutput, command: &str) -> Result<()> {
    if !output.terminated() {
        return Err(GeneratorError::ProcessNotTerminated {
            command: command.to_string(),
            stdout: output.stdout.clone(),
            stderr: output.stderr.clone(),
        });
    }
    match output.status {
        Some(status) if status != 0 && !output.stderr.is_empty() => {
            Err(GeneratorError::ProcessFailed {
                status,
                command: command.to_string(),
                stdout: output.stdout.clone(),
                stderr: output.stderr.clone(),
            })
        }
        _ => Ok(()),
    }
}

/// The output must exist and must not be empty.
pub fn check_output(output: &Path, command: &str) -> Result<()> {
    let metadata = match fs::metadata(output) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(GeneratorError::OutputMissing {
                path: output.to_path_buf(),
                command: command.to_string(),
            });
        }
        Err(source) => {
            return Err(GeneratorError::FileSize {
                path: output.to_path_buf(),
                source,
            });
        }
    };

    if metadata.len() == 0 {
        return Err(GeneratorError::OutputEmpty {
            path: output.to_path_buf(),
            command: command.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn status_zero_is_success() {
        assert!(check_process_status(&ProcessOutput::new(Some(0), "", ""), "cmd").is_ok());
        assert!(check_process_status(&ProcessOutput::new(Some(0), "", "warning"), "cmd").is_ok());
    }

    #[test]
    fn non_zero_status_without_stderr_is_tolerated() {
        assert!(check_process_status(&ProcessOutput::new(Some(1), "", ""), "cmd").is_ok());
    }

    #[test]
    fn non_zero_status_with_stderr_fails_with_code() {
        let output = ProcessOutput::new(Some(1), "", "Could not connect to X");
        let err = check_process_status(&output, "the command").unwrap_err();
        assert_eq!(err.code(), Some(1));
        assert!(matches!(err, GeneratorError::ProcessFailed { ref command, .. } if command == "the command"));
    }

    #[test]
    fn missing_status_means_not_terminated() {
        let err = check_process_status(&ProcessOutput::new(None, "", ""), "cmd").unwrap_err();
        assert!(matches!(err, GeneratorError::ProcessNotTerminated { .. }));
    }

    #[test]
    fn check_output_accepts_non_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        fs::write(&path, b"%PDF-").unwrap();
        assert!(check_output(&path, "cmd").is_ok());
    }

    #[test]
    fn check_output_missing_file() {
        let dir = tempdir().unwrap();
        let err = check_output(&dir.path().join("nope.pdf"), "the command").unwrap_err();
        assert!(matches!(err, GeneratorError::OutputMissing { .. }));
        assert!(err.to_string().contains("the command"));
    }

    #[test]
    fn check_output_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        fs::write(&path, b"").unwrap();
        let err = check_output(&path, "the command").unwrap_err();
        assert!(matches!(err, GeneratorError::OutputEmpty { .. }));
        assert!(err.to_string().contains("the command"));
    }

    #[test]
    fn prepare_rejects_existing_file_without_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        fs::write(&path, b"old").unwrap();

        let err = prepare_output(&path, false).unwrap_err();
        assert!(matches!(err, GeneratorError::FileAlreadyExists(ref p) if p == &path));
        assert!(path.exists());
    }

    #[test]
    fn prepare_deletes_existing_file_with_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        fs::write(&path, b"old").unwrap();

        prepare_output(&path, true).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn prepare_rejects_directory() {
        let dir = tempdir().unwrap();
        let err = prepare_output(dir.path(), true).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidArgument(ref m) if m.contains("directory")));
    }

    #[cfg(unix)]
    #[test]
    fn prepare_rejects_symlink() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target.pdf");
        fs::write(&target, b"x").unwrap();
        let link = dir.path().join("link.pdf");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = prepare_output(&link, true).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidArgument(ref m) if m.contains("link")));
    }

    #[test]
    fn prepare_rejects_archive_paths() {
        let err = prepare_output(Path::new("phar://archive.phar/out.pdf"), false).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidArgument(_)));
    }

    #[test]
    fn prepare_creates_missing_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("out.pdf");

        prepare_output(&path, false).unwrap();
        assert!(path.parent().unwrap().is_dir());
        assert!(!path.exists());
    }

    #[test]
    fn prepare_fails_when_output_cannot_be_inspected() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        // A regular file used as a directory: not "missing", just unusable.
        let err = prepare_output(&blocker.join("out.pdf"), false).unwrap_err();
        assert!(
            matches!(err, GeneratorError::OutputPreparation { ref message, .. } if message.contains("Could not inspect"))
        );
        assert!(blocker.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn prepare_fails_when_parent_cannot_be_created() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();
        // Permission bits do not bind a privileged user.
        if fs::create_dir(locked.join("check")).is_ok() {
            return;
        }

        let err = prepare_output(&locked.join("sub").join("out.pdf"), false).unwrap_err();
        assert!(
            matches!(err, GeneratorError::OutputPreparation { ref message, .. } if message.contains("could not be created"))
        );
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
