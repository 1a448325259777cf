// ============================================================
// Experiment Portal
// ============================================================
// Walks a base directory for BERTopic_Results_* folders and
// links every index*.html page inside them from one page.
//
//   base/
//     BERTopic_Results_mpnet_w512/   → section "mpnet_w512"
//       index.html                   → link "BERTopic_Results_mpnet_w512/index.html"
//       index_hierarchy.html
//     BERTopic_Results_empty/        → omitted (no index pages)
//     notes/                         → ignored (wrong prefix)

use std::{fs, path::Path};

use crate::report::{html, ReportError};

pub const RESULTS_PREFIX: &str = "BERTopic_Results_";
pub const DEFAULT_PORTAL_FILE: &str = "Experiment_Portal.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentFolder {
    pub folder:      String,
    pub index_files: Vec<String>,
}

impl ExperimentFolder {
    /// Folder name without the results prefix
    pub fn display_name(&self) -> &str {
        self.folder.strip_prefix(RESULTS_PREFIX).unwrap_or(&self.folder)
    }
}

/// Collect result folders that hold at least one index page, sorted by name.
pub fn scan(base: &Path) -> Result<Vec<ExperimentFolder>, ReportError> {
    let mut folders = Vec::new();

    for entry in fs::read_dir(base).map_err(|e| ReportError::io(base, e))? {
        let entry = entry.map_err(|e| ReportError::io(base, e))?;
        let path  = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !path.is_dir() || !name.starts_with(RESULTS_PREFIX) {
            continue;
        }

        let mut index_files = Vec::new();
        for file in fs::read_dir(&path).map_err(|e| ReportError::io(&path, e))? {
            let file = file.map_err(|e| ReportError::io(&path, e))?;
            if let Some(f) = file.file_name().to_str() {
                if f.starts_with("index") && f.ends_with(".html") {
                    index_files.push(f.to_string());
                }
            }
        }

        if index_files.is_empty() {
            tracing::debug!("Skipping '{}': no index pages", name);
            continue;
        }
        index_files.sort();
        folders.push(ExperimentFolder { folder: name.to_string(), index_files });
    }

    folders.sort_by(|a, b| a.folder.cmp(&b.folder));
    Ok(folders)
}

pub fn render(folders: &[ExperimentFolder], generated_at: &str) -> String {
    let mut body = String::from("<p>Result indexes found under the current directory.</p>\n");

    for item in folders {
        body.push_str(&format!(
            "<section>\n<h2 title=\"{}\">{}</h2>\n<ul>\n",
            html::escape(&item.folder),
            html::escape(item.display_name())
        ));
        for file in &item.index_files {
            let href = format!("{}/{}", item.folder, file);
            body.push_str(&format!(
                "<li><a href=\"{}\" target=\"_blank\">{}</a></li>\n",
                html::escape(&href),
                html::escape(file)
            ));
        }
        body.push_str(&format!(
            "</ul>\n<p>{} index file(s)</p>\n</section>\n",
            item.index_files.len()
        ));
    }

    html::page("BERTopic Experiment Portal", &body, generated_at)
}

/// Scan `base` and write the portal to `output`. Nothing is written
/// when no folder qualifies.
pub fn generate(base: &Path, output: &Path, generated_at: &str) -> Result<usize, ReportError> {
    let folders = scan(base)?;
    if folders.is_empty() {
        return Err(ReportError::NothingToIndex(base.to_path_buf()));
    }
    crate::report::write_page(output, &render(&folders, generated_at))?;
    Ok(folders.len())
}
