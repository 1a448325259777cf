// ============================================================
// Layer 3 — Encoder Error Taxonomy
// ============================================================
// Every failure identifies the chunk or document it came from.
// There is no internal retry: errors surface to the caller and
// no partial output is returned.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    /// Bad window_size / stride / batch sizes; raised before any work
    #[error("invalid encoder configuration: {0}")]
    InvalidConfiguration(String),

    /// The tokenizer failed to encode or decode a document
    #[error("tokenization failed for document {doc_index}: {message}")]
    Tokenization { doc_index: usize, message: String },

    /// The embedder raised, or returned the wrong count or dimension
    #[error("embedding failed in chunk {chunk}: {message}")]
    EmbeddingFailure { chunk: usize, message: String },

    /// A document produced no windows; unreachable unless windowing is broken
    #[error("document {doc_index} produced no windows")]
    EmptyWindowSet { doc_index: usize },
}
