// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives here (the token batcher in Layer 4
// only builds tensors).
//
//   model.rs    — transformer encoder with masked mean pooling
//   embedder.rs — the Embedder capability backed by that model

/// Sentence encoder architecture
pub mod model;

/// Embedder implementation on the NdArray backend
pub mod embedder;
