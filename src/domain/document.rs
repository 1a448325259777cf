// ============================================================
// Layer 3 — Document Domain Types
// ============================================================
// A Document is identified by its position in the input slice.
// `source` is only kept for traceability in logs and errors.

use serde::{Deserialize, Serialize};

/// A raw document to be encoded. Immutable for the duration of a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Where the text came from (patent title, file name, row number)
    pub source: String,

    /// The full text, before tokenisation
    pub text: String,
}

impl Document {
    /// Create a new Document with a source label and text content.
    ///
    /// Example:
    ///   let doc = Document::new("CN1234567A", "A battery separator ...");
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
        }
    }
}

/// The ordered result of encoding a corpus:
/// `vectors[i]` is the DocumentVector of input document `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedCorpus {
    /// Embedding dimension; 0 when the corpus was empty
    pub dimension: usize,

    /// One mean vector per input document, in input order
    pub vectors: Vec<Vec<f32>>,
}

impl EncodedCorpus {
    pub fn empty() -> Self {
        Self { dimension: 0, vectors: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
