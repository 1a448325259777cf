// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the model directory or output files:
//
//   tokenizer_store.rs — loads tokenizer.json (or builds a
//                        word-level one from the corpus) and
//                        adapts it to the TokenCodec trait
//
//   model_store.rs     — encoder config + weights via Burn's
//                        CompactRecorder
//
//   output.rs          — EncodedCorpus JSON writer

/// Tokenizer loading, building, and TokenCodec adapter
pub mod tokenizer_store;

/// Encoder checkpoint saving and loading
pub mod model_store;

/// Embedding output file
pub mod output;
