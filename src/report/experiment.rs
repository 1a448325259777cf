// ============================================================
// Experiment Report
// ============================================================
// One page per clustering run: which embedding model, which
// UMAP / HDBSCAN / CountVectorizer parameters, the HDBSCAN
// grid-search history with the chosen min_cluster_size
// highlighted, and optionally the hierarchical topic merge.
//
// Input is the JSON record the analysis notebook dumps:
//
//   {
//     "model_name": "all-mpnet-base-v2",
//     "umap":       { "n_neighbors": 15, "n_components": 5 },
//     "hdbscan":    { "metric": "euclidean" },
//     "vectorizer": { "ngram_range": [1, 2] },
//     "history":    [ { "min_cluster_size": 10, "topics": 80, "noise": 0.31 }, ... ],
//     "best_size":  15,
//     "hierarchical": { "n_groups": 12, "all_topics": [0, 1, 2, ...] }
//   }

use serde::Deserialize;
use serde_json::{Map, Value};
use std::{fs, path::Path};

use crate::report::{html, ReportError};

#[derive(Debug, Clone, Deserialize)]
pub struct ExperimentRecord {
    pub model_name: String,
    #[serde(default)]
    pub umap:       Map<String, Value>,
    #[serde(default)]
    pub hdbscan:    Map<String, Value>,
    #[serde(default)]
    pub vectorizer: Map<String, Value>,
    #[serde(default)]
    pub history:    Vec<Map<String, Value>>,
    pub best_size:  Value,
    #[serde(default)]
    pub hierarchical: Option<HierarchicalMerge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HierarchicalMerge {
    pub n_groups:   usize,
    #[serde(default)]
    pub all_topics: Vec<Value>,
}

impl ExperimentRecord {
    pub fn from_file(path: &Path) -> Result<Self, ReportError> {
        let raw = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        serde_json::from_str(&raw)
            .map_err(|source| ReportError::Json { path: path.to_path_buf(), source })
    }
}

/// Plain text for a JSON value: strings unquoted, everything else as JSON.
fn cell(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn params(map: &Map<String, Value>) -> String {
    let pairs: Vec<(String, String)> = map.iter().map(|(k, v)| (k.clone(), cell(v))).collect();
    html::key_values(&pairs)
}

/// History columns in first-seen order across all rows.
fn history_table(history: &[Map<String, Value>], best: &str) -> String {
    let mut headers: Vec<String> = Vec::new();
    for row in history {
        for k in row.keys() {
            if !headers.contains(k) {
                headers.push(k.clone());
            }
        }
    }

    let rows: Vec<Vec<String>> = history
        .iter()
        .map(|row| headers.iter().map(|h| row.get(h).map(cell).unwrap_or_default()).collect())
        .collect();

    html::table("history", &headers, &rows, |_, r| {
        (r.first().map(String::as_str) == Some(best)).then_some("best-row")
    })
}

pub fn render(record: &ExperimentRecord, generated_at: &str) -> String {
    let best = cell(&record.best_size);
    let mut body = String::new();

    body.push_str(&format!(
        "<section>\n<h2>1. Embedding model</h2>\n<p><code>{}</code></p>\n</section>\n",
        html::escape(&record.model_name)
    ));
    body.push_str(&format!("<section>\n<h2>2. UMAP parameters</h2>\n{}</section>\n", params(&record.umap)));
    body.push_str(&format!("<section>\n<h2>3. HDBSCAN parameters</h2>\n{}</section>\n", params(&record.hdbscan)));
    body.push_str(&format!(
        "<section>\n<h2>4. HDBSCAN grid search</h2>\n\
         <p>Best <code>min_cluster_size</code>: <strong>{}</strong></p>\n{}</section>\n",
        html::escape(&best),
        history_table(&record.history, &best)
    ));
    body.push_str(&format!(
        "<section>\n<h2>5. CountVectorizer parameters</h2>\n{}</section>\n",
        params(&record.vectorizer)
    ));

    if let Some(h) = &record.hierarchical {
        body.push_str(&format!(
            "<section>\n<h2>6. Hierarchical topic merging</h2>\n\
             <p>The topic hierarchy is cut into {} groups.</p>\n{}</section>\n",
            h.n_groups,
            html::key_values(&[
                ("Topics before merge".to_string(), h.all_topics.len().to_string()),
                ("Target groups (n_groups)".to_string(), h.n_groups.to_string()),
            ])
        ));
    }

    html::page("BERTopic experiment report", &body, generated_at)
}

pub fn generate(input: &Path, output: &Path, generated_at: &str) -> Result<(), ReportError> {
    let record = ExperimentRecord::from_file(input)?;
    crate::report::write_page(output, &render(&record, generated_at))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> ExperimentRecord {
        serde_json::from_str(json).unwrap()
    }

    const BASE: &str = r#"{
        "model_name": "all-mpnet-base-v2",
        "umap": {"n_neighbors": 15, "metric": "cosine"},
        "hdbscan": {"min_samples": 5},
        "vectorizer": {"ngram_range": [1, 2]},
        "history": [
            {"min_cluster_size": 10, "topics": 80},
            {"min_cluster_size": 15, "topics": 52},
            {"min_cluster_size": 150, "topics": 9}
        ],
        "best_size": 15
    }"#;

    #[test]
    fn test_best_row_is_highlighted() {
        let page = render(&record(BASE), "now");
        assert!(page.contains("<tr class=\"best-row\"><td>15</td><td>52</td></tr>"));
        assert!(page.contains("<tr><td>150</td><td>9</td></tr>"));
        assert_eq!(page.matches("best-row").count(), 1);
    }

    #[test]
    fn test_parameters_are_listed() {
        let page = render(&record(BASE), "now");
        assert!(page.contains("<dt>n_neighbors</dt><dd>15</dd>"));
        assert!(page.contains("<dt>metric</dt><dd>cosine</dd>"));
        assert!(page.contains("<dt>ngram_range</dt><dd>[1,2]</dd>"));
    }

    #[test]
    fn test_hierarchical_section_only_when_present() {
        assert!(!render(&record(BASE), "now").contains("Hierarchical"));

        let with = BASE.replace(
            "\"best_size\": 15",
            "\"best_size\": 15, \"hierarchical\": {\"n_groups\": 4, \"all_topics\": [0, 1, 2, 3, 4, 5]}",
        );
        let page = render(&record(&with), "now");
        assert!(page.contains("Hierarchical topic merging"));
        assert!(page.contains("<dd>6</dd>"));
        assert!(page.contains("cut into 4 groups"));
    }

    #[test]
    fn test_model_name_is_escaped() {
        let json = BASE.replace("all-mpnet-base-v2", "<script>");
        assert!(render(&record(&json), "now").contains("&lt;script&gt;"));
    }

    #[test]
    fn test_generate_creates_parent_directories() {
        let dir    = tempfile::tempdir().unwrap();
        let input  = dir.path().join("run.json");
        let output = dir.path().join("BERTopic_Results_x").join("index.html");
        fs::write(&input, BASE).unwrap();

        generate(&input, &output, "now").unwrap();
        assert!(output.exists());
    }
}
