// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the corpus file and the document vectors.
//
//   patents.json
//       │
//       ▼
//   PatentJsonLoader  → one Document per record, order preserved
//       │
//       ▼
//   WindowedEncoder   → tokenize, plan windows, decode windows
//       │                  │
//       │                  ▼
//       │              Embedder (Layer 5) ← TokenBatcher pads ids
//       ▼
//   mean per document → EncodedCorpus
//
// token_stats sits beside the pipeline: it only measures
// token lengths to help pick window_size and stride.

/// Loads the patent corpus from JSON
pub mod loader;

/// Plans overlapping token windows
pub mod windowing;

/// Sliding-window encoder with per-document mean aggregation
pub mod encoder;

/// Pads token sequences into Burn tensors
pub mod batcher;

/// Token length statistics and histogram
pub mod token_stats;
