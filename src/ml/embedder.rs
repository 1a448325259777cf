// ============================================================
// Layer 5 — Burn Embedder
// ============================================================
// Implements the domain Embedder capability with the Burn
// SentenceEncoder on the CPU (NdArray) backend.
//
//   texts ──TokenCodec──▶ ids (clipped to max_seq_len)
//         ──TokenBatcher─▶ padded [batch, seq] tensors
//         ──SentenceEncoder─▶ [batch, d_model] ──▶ Vec<Vec<f32>>
//
// Like a sentence-transformers model, a text longer than the
// model's max_seq_len is truncated here. The windowed encoder
// keeps windows at or below that length so nothing is lost.

use anyhow::{anyhow, bail, Result};
use burn::prelude::*;

use crate::data::batcher::TokenBatcher;
use crate::domain::traits::{Embedder, TokenCodec};
use crate::ml::model::{SentenceEncoder, SentenceEncoderConfig};

pub type InferBackend = burn::backend::NdArray;

pub struct BurnEmbedder<'a, T: TokenCodec> {
    model:      SentenceEncoder<InferBackend>,
    tokenizer:  &'a T,
    batcher:    TokenBatcher<InferBackend>,
    vocab_size: usize,
}

impl<'a, T: TokenCodec> BurnEmbedder<'a, T> {
    pub fn new(
        model:     SentenceEncoder<InferBackend>,
        config:    &SentenceEncoderConfig,
        tokenizer: &'a T,
        pad_id:    u32,
    ) -> Self {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        Self {
            model,
            tokenizer,
            batcher:    TokenBatcher::new(device, pad_id),
            vocab_size: config.vocab_size,
        }
    }

    /// Tokenize one text for the model, clipping to the position table.
    fn ids_for(&self, text: &str) -> Result<Vec<u32>> {
        let mut ids = self.tokenizer.encode(text)?;
        ids.truncate(self.model.max_seq_len);

        if let Some(&bad) = ids.iter().find(|&&id| id as usize >= self.vocab_size) {
            bail!(
                "token id {} is outside the model vocabulary ({}); tokenizer and checkpoint do not match",
                bad,
                self.vocab_size
            );
        }
        Ok(ids)
    }
}

impl<T: TokenCodec> Embedder for BurnEmbedder<'_, T> {
    fn dimension(&self) -> usize {
        self.model.d_model
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let sequences = texts
            .iter()
            .map(|t| self.ids_for(t))
            .collect::<Result<Vec<_>>>()?;

        let batch  = self.batcher.batch(&sequences);
        let pooled = self.model.forward(batch.input_ids, batch.attention_mask);

        let flat: Vec<f32> = pooled
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow!("Cannot read embeddings back from the backend: {e:?}"))?;

        let dim = self.dimension();
        if dim == 0 {
            bail!("Encoder has a zero-width output (d_model = 0)");
        }
        Ok(flat.chunks(dim).map(<[f32]>::to_vec).collect())
    }
}
