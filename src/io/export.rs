//! Write run results to disk.
//!
//! Every data command produces one JSON document and one Markdown report, each
//! written twice: a timestamped copy that is never touched again and a
//! "latest" copy that is overwritten on every run.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use crate::error::AppError;

/// Timestamp used in file names (`20260205_083000`).
pub fn run_timestamp(now: DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

/// Where and under which names one command's output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    pub json_dir: PathBuf,
    pub markdown_dir: PathBuf,
    pub stem: String,
    pub latest_stem: String,
}

impl ArtifactSpec {
    /// JSON and Markdown side by side in `dir`; latest copy is `{stem}_latest`.
    pub fn flat(dir: impl Into<PathBuf>, stem: &str) -> Self {
        let dir = dir.into();
        Self {
            json_dir: dir.clone(),
            markdown_dir: dir,
            stem: stem.to_string(),
            latest_stem: format!("{stem}_latest"),
        }
    }

    /// JSON under `base/json`, Markdown under `base/markdown`.
    pub fn split(base: impl AsRef<Path>, stem: &str) -> Self {
        let base = base.as_ref();
        Self {
            json_dir: base.join("json"),
            markdown_dir: base.join("markdown"),
            stem: stem.to_string(),
            latest_stem: format!("{stem}_latest"),
        }
    }

    pub fn with_latest(mut self, latest_stem: &str) -> Self {
        self.latest_stem = latest_stem.to_string();
        self
    }
}

/// Paths written by [`write_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifacts {
    pub json: PathBuf,
    pub markdown: PathBuf,
    pub latest_json: PathBuf,
    pub latest_markdown: PathBuf,
}

fn ensure_dir(dir: &Path) -> Result<(), AppError> {
    fs::create_dir_all(dir)
        .map_err(|e| AppError::io(format!("Failed to create output directory '{}': {e}", dir.display())))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create JSON '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| AppError::io(format!("Failed to write JSON '{}': {e}", path.display())))?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| AppError::io(format!("Failed to write JSON '{}': {e}", path.display())))
}

fn write_text(path: &Path, text: &str) -> Result<(), AppError> {
    fs::write(path, text).map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))
}

/// Write `value` as JSON and `markdown` as-is, timestamped and latest.
pub fn write_artifacts<T: Serialize>(
    spec: &ArtifactSpec,
    timestamp: &str,
    value: &T,
    markdown: &str,
) -> Result<WrittenArtifacts, AppError> {
    ensure_dir(&spec.json_dir)?;
    ensure_dir(&spec.markdown_dir)?;

    let written = WrittenArtifacts {
        json: spec.json_dir.join(format!("{}_{timestamp}.json", spec.stem)),
        markdown: spec.markdown_dir.join(format!("{}_{timestamp}.md", spec.stem)),
        latest_json: spec.json_dir.join(format!("{}.json", spec.latest_stem)),
        latest_markdown: spec.markdown_dir.join(format!("{}.md", spec.latest_stem)),
    };

    write_json(&written.json, value)?;
    write_json(&written.latest_json, value)?;
    write_text(&written.markdown, markdown)?;
    write_text(&written.latest_markdown, markdown)?;

    info!(path = %written.json.display(), "saved JSON");
    info!(path = %written.markdown.display(), "saved Markdown");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{Value, json};

    #[test]
    fn timestamp_format() {
        let now = Local.with_ymd_and_hms(2026, 2, 5, 8, 3, 9).unwrap();
        assert_eq!(run_timestamp(now), "20260205_080309");
    }

    #[test]
    fn writes_timestamped_and_latest_copies() {
        let dir = tempfile::tempdir().unwrap();
        let spec = ArtifactSpec::flat(dir.path().join("daily"), "calendar");

        let first = write_artifacts(&spec, "20260205_080000", &json!({ "n": 1 }), "# one\n").unwrap();
        let second = write_artifacts(&spec, "20260205_090000", &json!({ "n": 2 }), "# two\n").unwrap();

        assert!(first.json.ends_with("calendar_20260205_080000.json"));
        assert!(first.json.exists() && second.json.exists());
        assert_eq!(first.latest_json, second.latest_json);
        assert!(second.latest_json.ends_with("calendar_latest.json"));

        let latest: Value = serde_json::from_str(&fs::read_to_string(&second.latest_json).unwrap()).unwrap();
        assert_eq!(latest["n"], 2);
        let kept: Value = serde_json::from_str(&fs::read_to_string(&first.json).unwrap()).unwrap();
        assert_eq!(kept["n"], 1);
        assert_eq!(fs::read_to_string(&second.latest_markdown).unwrap(), "# two\n");
    }

    #[test]
    fn split_layout_and_custom_latest_name() {
        let dir = tempfile::tempdir().unwrap();
        let spec = ArtifactSpec::split(dir.path().join("yield_curves"), "yield_curve");
        let w = write_artifacts(&spec, "20260205_080000", &json!({}), "").unwrap();
        assert!(w.json.starts_with(dir.path().join("yield_curves/json")));
        assert!(w.markdown.starts_with(dir.path().join("yield_curves/markdown")));

        let spec = ArtifactSpec::flat(dir.path(), "indicators").with_latest("latest");
        let w = write_artifacts(&spec, "20260205_080000", &json!([]), "").unwrap();
        assert!(w.latest_json.ends_with("latest.json"));
    }

    #[test]
    fn unwritable_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("daily");
        fs::write(&blocker, "not a directory").unwrap();
        let err = write_artifacts(&ArtifactSpec::flat(&blocker, "x"), "ts", &json!({}), "").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
        assert_eq!(err.exit_code(), 3);
    }
}
