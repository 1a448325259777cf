// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each.
//
// Rules for this layer:
//   - No model math here (Layer 5)
//   - No printing here (Layer 1)
//   - Only workflow coordination

// Build tokenizer + fresh encoder checkpoint
pub mod init_model_use_case;

// Corpus → windowed mean embeddings → JSON
pub mod encode_use_case;

// Corpus → token length statistics
pub mod token_stats_use_case;
