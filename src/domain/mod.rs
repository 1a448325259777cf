// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits describing the core
// concepts of the encoder:
//
//   document.rs — a raw input text and its traceable source
//   window.rs   — a token range of one document, plus the
//                 encoder configuration that shapes windows
//   error.rs    — the typed error taxonomy of the encoder
//   traits.rs   — capabilities the encoder consumes
//                 (tokenizer, embedder, document source)
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits

pub mod document;

pub mod window;

pub mod error;

pub mod traits;
