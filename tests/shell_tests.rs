#![cfg(unix)]
//! End-to-end runs through `ShellRunner` against small shell scripts that
//! stand in for the renderer.

mod common;

use common::{RecordingSink, TestResult};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::tempdir;
use weasy::{Generator, GeneratorConfig, GeneratorError, MediaKind, ShellRunner, Version};

fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Writes its stylesheet argument (or a marker) to the last argument.
const FAKE_RENDERER: &str = r#"
if [ "$1" = "--version" ]; then echo "WeasyPrint version 52.5"; exit 0; fi
css=""
while [ $# -gt 2 ]; do
  if [ "$1" = "--stylesheet" ]; then css=$(cat "$2"); shift; fi
  shift
done
printf '%%PDF-fake %s' "$css" > "$2""#;

#[test]
fn renders_through_a_real_shell() -> TestResult {
    let dir = tempdir()?;
    let binary = script(dir.path(), "fake renderer", FAKE_RENDERER);
    let mut generator = Generator::pdf(binary.to_string_lossy())?
        .with_sink(RecordingSink::default())
        .with_temporary_folder(dir.path().join("scratch"));

    let bytes = generator.get_output_from_html("<p>hi</p>", &[("stylesheet", ["p{}"].into())])?;
    assert_eq!(bytes, b"%PDF-fake p{}");
    Ok(())
}

#[test]
fn probes_version_through_a_real_shell() -> TestResult {
    let dir = tempdir()?;
    let binary = script(dir.path(), "weasyprint", FAKE_RENDERER);

    let version = Version::probe(&ShellRunner::new(), &binary.to_string_lossy(), None, None)?;
    assert_eq!(version.major, 52);
    assert_eq!(version.minor, "5");
    Ok(())
}

#[test]
fn renderer_errors_surface_with_exit_code() -> TestResult {
    let dir = tempdir()?;
    let binary = script(dir.path(), "broken", "echo 'CSS parse error' >&2\nexit 3");
    let mut generator = Generator::pdf(binary.to_string_lossy())?.with_sink(RecordingSink::default());

    let err = generator
        .generate("in.html", dir.path().join("out.pdf"), &[], false)
        .unwrap_err();
    assert_eq!(err.code(), Some(3));
    assert!(matches!(err, GeneratorError::ProcessFailed { ref stderr, .. } if stderr.contains("CSS parse error")));
    Ok(())
}

#[test]
fn slow_renderer_hits_the_timeout() -> TestResult {
    let dir = tempdir()?;
    let binary = script(dir.path(), "slow", "sleep 5");
    let mut generator = Generator::pdf(binary.to_string_lossy())?
        .with_sink(RecordingSink::default())
        .with_timeout(Some(Duration::from_millis(200)));

    let start = Instant::now();
    let err = generator
        .generate("in.html", dir.path().join("out.pdf"), &[], false)
        .unwrap_err();
    assert!(matches!(err, GeneratorError::ProcessNotTerminated { .. }));
    assert!(start.elapsed() < Duration::from_secs(4));
    Ok(())
}

#[test]
fn config_environment_is_visible_to_renderer() -> TestResult {
    let dir = tempdir()?;
    let binary = script(dir.path(), "envdump", r#"for last; do :; done; printf '%s' "$WEASY_MARKER" > "$last""#);
    let config = GeneratorConfig::from_json_str(&format!(
        r#"{{"binary": "{}", "env": {{"WEASY_MARKER": "from-config"}}}}"#,
        binary.display()
    ))?;
    let mut generator = Generator::from_config(MediaKind::Pdf, &config)?.with_sink(RecordingSink::default());

    let output = dir.path().join("out.pdf");
    generator.generate("in.html", &output, &[], false)?;
    assert_eq!(fs::read_to_string(&output)?, "from-config");
    Ok(())
}
