use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn cli_requires_root_arguments() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("silencesplit")?;
    cmd.assert().failure().stderr(contains("<DIR>"));
    Ok(())
}

#[test]
fn cli_rejects_invalid_min_silence() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut cmd = Command::cargo_bin("silencesplit")?;
    cmd.args(["--min-silence", "5x"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("invalid duration '5x'"));
    Ok(())
}

#[cfg(unix)]
mod with_stub_ffmpeg {
    use std::error::Error;
    use std::fs::{self, File};
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use assert_cmd::Command;
    use predicates::str::contains;
    use tempfile::tempdir;

    /// Stand-in ffmpeg, written at runtime so the tests depend neither on a
    /// real install nor on committed audio assets. Probe invocations replay
    /// canned silencedetect diagnostics; export invocations create their
    /// output file.
    const STUB_TWO_SEGMENTS: &str = r#"#!/bin/sh
case "$*" in
  *"-f null -"*)
    printf 'silence_start: 0.000000\n' >&2
    printf 'silence_end: 2.500000 | silence_duration: 2.500000\n' >&2
    printf 'silence_start: 10.000000\n' >&2
    printf 'silence_end: 10.800000 | silence_duration: 0.800000\n' >&2
    printf 'silence_start: 20.000000\n' >&2
    ;;
  *)
    for arg in "$@"; do out="$arg"; done
    : > "$out"
    ;;
esac
"#;

    const STUB_PROBE_FAILS: &str = r#"#!/bin/sh
printf 'Invalid data found when processing input\n' >&2
exit 1
"#;

    fn install_stub(dir: &Path, body: &str) -> Result<(), Box<dyn Error>> {
        let path = dir.join("ffmpeg");
        fs::write(&path, body)?;
        let mut permissions = fs::metadata(&path)?.permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&path, permissions)?;
        Ok(())
    }

    #[test]
    fn cli_splits_discovered_files() -> Result<(), Box<dyn Error>> {
        let tools = tempdir()?;
        install_stub(tools.path(), STUB_TWO_SEGMENTS)?;

        let root = tempdir()?;
        let nested = root.path().join("sub");
        fs::create_dir(&nested)?;
        File::create(root.path().join("a.mp3"))?;
        File::create(nested.join("b.MP3"))?;
        File::create(root.path().join("note.txt"))?;

        let mut cmd = Command::cargo_bin("silencesplit")?;
        cmd.env("PATH", tools.path())
            .args(["--workers", "1"])
            .arg(root.path())
            .assert()
            .success()
            .stdout(contains(
                "Processed 2 file(s): 2 split into 4 segment(s), 0 without silence, 0 failed",
            ));

        for expected in [
            root.path().join("a_part_000.mp3"),
            root.path().join("a_part_001.mp3"),
            nested.join("b_part_000.mp3"),
            nested.join("b_part_001.mp3"),
        ] {
            assert!(expected.is_file(), "missing output {}", expected.display());
        }
        assert!(!root.path().join("note_part_000.mp3").exists());

        Ok(())
    }

    #[test]
    fn cli_exits_nonzero_when_files_fail() -> Result<(), Box<dyn Error>> {
        let tools = tempdir()?;
        install_stub(tools.path(), STUB_PROBE_FAILS)?;

        let root = tempdir()?;
        File::create(root.path().join("broken.mp3"))?;

        let mut cmd = Command::cargo_bin("silencesplit")?;
        cmd.env("PATH", tools.path())
            .args(["--workers", "1"])
            .arg(root.path())
            .assert()
            .failure()
            .stdout(contains("1 failed"))
            .stderr(contains("1 file(s) failed to process"));

        Ok(())
    }

    #[test]
    fn cli_reports_missing_ffmpeg() -> Result<(), Box<dyn Error>> {
        let empty = tempdir()?;
        let root = tempdir()?;

        let mut cmd = Command::cargo_bin("silencesplit")?;
        cmd.env("PATH", empty.path())
            .arg(root.path())
            .assert()
            .failure()
            .stderr(contains("ffmpeg not found"));

        Ok(())
    }
}
