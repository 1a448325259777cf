// ============================================================
// Layer 3 — Core Traits (Capabilities)
// ============================================================
// The encoder never talks to a tokenizer or a model directly.
// It consumes these capabilities, which lets tests swap in
// deterministic fakes and lets the CLI plug in the real
// HuggingFace tokenizer and the Burn encoder.

use anyhow::Result;
use crate::domain::document::Document;

// ─── DocumentSource ───────────────────────────────────────────────────────────
/// Any component that can load documents from a source.
///
/// Implementations:
///   - PatentJsonLoader → a JSON array of patent records
pub trait DocumentSource {
    fn load_all(&self) -> Result<Vec<Document>>;
}

// ─── TokenCodec ───────────────────────────────────────────────────────────────
/// Text ↔ token id conversion.
///
/// `encode` must not truncate or pad. `decode` strips special tokens,
/// so a window decoded from the middle of a document carries no
/// stray [CLS] / [SEP] markers into the embedder.
pub trait TokenCodec {
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    fn decode(&self, ids: &[u32]) -> Result<String>;
}

// ─── Embedder ─────────────────────────────────────────────────────────────────
/// Batch text → fixed-dimension vector conversion.
///
/// Implementations:
///   - BurnEmbedder → transformer encoder with mean pooling
///
/// Must return exactly one vector per input text, in input order.
pub trait Embedder {
    /// Dimension of every returned vector
    fn dimension(&self) -> usize;

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
