// ============================================================
// Layer 4 — Windowed Document Encoder
// ============================================================
// Produces exactly one vector per input document, in input order,
// even when a document is longer than the model accepts.
//
// Per outer chunk of `chunk_size` documents:
//
//   1. tokenize each document (no truncation)
//   2. plan windows and decode each window back to text
//   3. remember which contiguous run of windows belongs to which
//      document (window_groups[i] = positions of document i)
//   4. embed all window texts in sub-batches of inference_batch_size
//   5. average each document's window vectors component-wise
//   6. append the chunk's vectors to the output
//
// A chunk either completes fully or the whole call fails: vectors
// are only appended after every embedding call of the chunk
// returned a well-formed result.

use std::ops::Range;

use crate::data::windowing::plan_windows;
use crate::domain::document::{Document, EncodedCorpus};
use crate::domain::error::EncodeError;
use crate::domain::traits::{Embedder, TokenCodec};
use crate::domain::window::EncoderConfig;

/// Window texts of one chunk plus the document → window-position map.
struct ChunkWindows {
    texts:  Vec<String>,
    groups: Vec<Range<usize>>,
}

pub struct WindowedEncoder<'a, T: TokenCodec, E: Embedder> {
    tokenizer: &'a T,
    embedder:  &'a E,
    config:    EncoderConfig,
}

impl<'a, T: TokenCodec, E: Embedder> WindowedEncoder<'a, T, E> {
    /// Build an encoder, rejecting invalid window parameters up front.
    pub fn new(tokenizer: &'a T, embedder: &'a E, config: EncoderConfig) -> Result<Self, EncodeError> {
        config.validate()?;
        if embedder.dimension() == 0 {
            return Err(EncodeError::InvalidConfiguration(
                "embedder declares a zero vector dimension".into(),
            ));
        }
        Ok(Self { tokenizer, embedder, config })
    }

    /// Encode every document into its mean window vector.
    pub fn encode(&self, docs: &[Document]) -> Result<EncodedCorpus, EncodeError> {
        if docs.is_empty() {
            return Ok(EncodedCorpus::empty());
        }

        let chunk_size  = self.config.chunk_size;
        let num_chunks  = docs.len().div_ceil(chunk_size);
        let mut vectors = Vec::with_capacity(docs.len());

        for (chunk_idx, chunk) in docs.chunks(chunk_size).enumerate() {
            let base = chunk_idx * chunk_size;
            tracing::info!(
                "Encoding chunk {}/{} (documents {}..{})",
                chunk_idx + 1,
                num_chunks,
                base,
                base + chunk.len()
            );

            let windows = self.window_chunk(base, chunk)?;
            let window_vectors = self.embed_windows(chunk_idx, &windows.texts)?;

            // Aggregate into a chunk-local buffer so a failure leaves `vectors` untouched
            let mut chunk_vectors = Vec::with_capacity(chunk.len());
            for (offset, group) in windows.groups.iter().enumerate() {
                let doc_index = base + offset;
                let mean = mean_vector(&window_vectors[group.clone()])
                    .ok_or(EncodeError::EmptyWindowSet { doc_index })?;
                chunk_vectors.push(mean);
            }
            vectors.extend(chunk_vectors);
        }

        Ok(EncodedCorpus {
            dimension: self.embedder.dimension(),
            vectors,
        })
    }

    /// Tokenize, window and decode every document of one chunk.
    fn window_chunk(&self, base: usize, chunk: &[Document]) -> Result<ChunkWindows, EncodeError> {
        let mut texts  = Vec::new();
        let mut groups = Vec::with_capacity(chunk.len());

        for (offset, doc) in chunk.iter().enumerate() {
            let doc_index = base + offset;
            let ids = self
                .tokenizer
                .encode(&doc.text)
                .map_err(|e| EncodeError::Tokenization { doc_index, message: format!("{e:#}") })?;

            let windows = plan_windows(doc_index, ids.len(), self.config.window_size, self.config.stride);
            if windows.len() > 1 {
                tracing::debug!(
                    "Document {} ('{}') has {} tokens → {} windows",
                    doc_index,
                    doc.source,
                    ids.len(),
                    windows.len()
                );
            }

            let first = texts.len();
            for w in &windows {
                let text = self
                    .tokenizer
                    .decode(&ids[w.start..w.end])
                    .map_err(|e| EncodeError::Tokenization { doc_index, message: format!("{e:#}") })?;
                texts.push(text);
            }
            groups.push(first..texts.len());
        }

        Ok(ChunkWindows { texts, groups })
    }

    /// Embed window texts in sub-batches and check every result
    /// against the embedder's declared dimension.
    fn embed_windows(&self, chunk_idx: usize, texts: &[String]) -> Result<Vec<Vec<f32>>, EncodeError> {
        let expected = self.embedder.dimension();
        let mut out  = Vec::with_capacity(texts.len());

        for (batch_idx, batch) in texts.chunks(self.config.inference_batch_size).enumerate() {
            let first = batch_idx * self.config.inference_batch_size;
            let fail  = |message: String| EncodeError::EmbeddingFailure { chunk: chunk_idx, message };

            let embedded = self
                .embedder
                .embed(batch)
                .map_err(|e| fail(format!("windows {}..{}: {e:#}", first, first + batch.len())))?;

            if embedded.len() != batch.len() {
                return Err(fail(format!(
                    "windows {}..{}: expected {} vectors, got {}",
                    first,
                    first + batch.len(),
                    batch.len(),
                    embedded.len()
                )));
            }

            for (i, v) in embedded.iter().enumerate() {
                if v.len() != expected {
                    return Err(fail(format!(
                        "window {}: vector dimension {} (expected {})",
                        first + i,
                        v.len(),
                        expected
                    )));
                }
            }

            tracing::debug!("Embedded windows {}..{} of chunk {}", first, first + batch.len(), chunk_idx);
            out.extend(embedded);
        }

        Ok(out)
    }
}

/// Component-wise arithmetic mean. `None` for an empty selection.
pub fn mean_vector(vectors: &[Vec<f32>]) -> Option<Vec<f32>> {
    let first = vectors.first()?;
    if vectors.len() == 1 {
        return Some(first.clone());
    }

    let mut sum = vec![0f64; first.len()];
    for v in vectors {
        for (acc, x) in sum.iter_mut().zip(v) {
            *acc += f64::from(*x);
        }
    }

    let n = vectors.len() as f64;
    Some(sum.into_iter().map(|s| (s / n) as f32).collect())
}
