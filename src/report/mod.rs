// ============================================================
// Layer 7 — Report Pages
// ============================================================
// Static HTML pages summarising clustering experiments:
//
//   portal.rs      — index of every BERTopic_Results_* folder
//   topic_table.rs — year × topic document counts
//   experiment.rs  — parameters and grid-search history of one run
//   html.rs        — escaping, tables, and the shared page shell
//
// Rendering is pure (string in, string out); writing to disk
// goes through `write_page` so renderers are testable without
// touching the filesystem.

pub mod html;

pub mod portal;

pub mod topic_table;

pub mod experiment;

use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no result folders with index pages found under '{0}'")]
    NothingToIndex(PathBuf),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse '{path}': {source}")]
    Csv {
        path:   PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot parse '{path}': {source}")]
    Json {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ReportError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }
}

/// Write a rendered page, creating parent directories first.
pub fn write_page(path: &Path, html: &str) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
    }
    fs::write(path, html).map_err(|e| ReportError::io(path, e))?;
    tracing::info!("Page written: '{}'", path.display());
    Ok(())
}

/// Local time in the format printed at the bottom of every page
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
