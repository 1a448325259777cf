// ============================================================
// Layer 6 — Embedding Output
// ============================================================
// Persists an EncodedCorpus as JSON:
//
//   { "dimension": 768, "vectors": [[...], [...], ...] }
//
// vectors[i] belongs to record i of the input corpus.

use anyhow::{Context, Result};
use std::{fs, io::BufWriter, path::Path};

use crate::domain::document::EncodedCorpus;

pub fn write_embeddings(path: &Path, corpus: &EncodedCorpus) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create '{}'", parent.display()))?;
    }

    let file = fs::File::create(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), corpus)
        .with_context(|| format!("Cannot write embeddings to '{}'", path.display()))?;

    tracing::info!(
        "Wrote {} vectors (dim {}) to '{}'",
        corpus.len(),
        corpus.dimension,
        path.display()
    );
    Ok(())
}
