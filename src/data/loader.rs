// ============================================================
// Layer 4 — Patent Corpus Loader
// ============================================================
// Loads the patent corpus from a JSON array such as:
//
//   [
//     { "title": "Battery separator", "abstract": "A porous ...", "year": 2019 },
//     ...
//   ]
//
// The text encoded for each patent is `title + abstract`,
// concatenated without a separator. Document order is the
// array order, and the encoder output follows it one-to-one,
// so no record is ever skipped or reordered here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::domain::document::Document;
use crate::domain::traits::DocumentSource;

/// One row of the corpus file. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatentRecord {
    #[serde(default)]
    pub title: String,

    #[serde(default, rename = "abstract")]
    pub abstract_text: String,

    /// Publication year; some exports write it as a string
    #[serde(default)]
    pub year: Option<serde_json::Value>,
}

impl PatentRecord {
    /// The text that gets tokenised and embedded
    pub fn combined_text(&self) -> String {
        format!("{}{}", self.title, self.abstract_text)
    }
}

/// Reads a JSON array of PatentRecords from a file.
pub struct PatentJsonLoader {
    path: PathBuf,
}

impl PatentJsonLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse the raw records without converting them to Documents
    pub fn load_records(&self) -> Result<Vec<PatentRecord>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read corpus '{}'", self.path.display()))?;

        let records: Vec<PatentRecord> = serde_json::from_str(&raw)
            .with_context(|| {
                format!("Corpus '{}' is not a JSON array of patent records", self.path.display())
            })?;

        Ok(records)
    }
}

impl DocumentSource for PatentJsonLoader {
    fn load_all(&self) -> Result<Vec<Document>> {
        let records = self.load_records()?;

        let docs: Vec<Document> = records
            .iter()
            .enumerate()
            .map(|(idx, r)| {
                // Fall back to the row number so every document stays traceable
                let source = if r.title.trim().is_empty() {
                    format!("#{idx}")
                } else {
                    r.title.trim().to_string()
                };
                Document::new(source, r.combined_text())
            })
            .collect();

        let empty = docs.iter().filter(|d| d.text.trim().is_empty()).count();
        if empty > 0 {
            tracing::warn!("{} records have neither title nor abstract", empty);
        }

        tracing::info!("Loaded {} patents from '{}'", docs.len(), self.path.display());
        Ok(docs)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_corpus(json: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_title_and_abstract_are_concatenated() {
        let f = write_corpus(
            r#"[{"title": "Lithium cell", "abstract": " with a ceramic separator", "year": 2020}]"#,
        );
        let docs = PatentJsonLoader::new(f.path()).load_all().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text, "Lithium cell with a ceramic separator");
        assert_eq!(docs[0].source, "Lithium cell");
    }

    #[test]
    fn test_order_is_preserved_and_missing_fields_default() {
        let f = write_corpus(
            r#"[{"title": "A"}, {"abstract": "only abstract"}, {"title": "C", "abstract": "c", "year": "2001"}]"#,
        );
        let docs = PatentJsonLoader::new(f.path()).load_all().unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].text, "A");
        assert_eq!(docs[1].source, "#1");
        assert_eq!(docs[1].text, "only abstract");
        assert_eq!(docs[2].text, "Cc");
    }

    #[test]
    fn test_malformed_corpus_is_an_error() {
        let f = write_corpus(r#"{"title": "not an array"}"#);
        assert!(PatentJsonLoader::new(f.path()).load_all().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let loader = PatentJsonLoader::new("/definitely/not/here.json");
        assert!(loader.load_all().is_err());
    }
}
