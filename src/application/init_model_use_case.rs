// ============================================================
// Layer 2 — InitModelUseCase
// ============================================================
// Prepares a model directory so `encode` has something to load:
//
//   Step 1: Load the corpus                 (Layer 4 - data)
//   Step 2: Load or build tokenizer.json    (Layer 6 - infra)
//   Step 3: Initialise the encoder          (Layer 5 - ml)
//   Step 4: Save config + weights           (Layer 6 - infra)
//
// If the directory already holds a tokenizer (e.g. copied from a
// pretrained model), it is reused and the encoder's vocabulary is
// sized to fit it.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::loader::PatentJsonLoader;
use crate::domain::traits::DocumentSource;
use crate::infra::{model_store::ModelStore, tokenizer_store::TokenizerStore};
use crate::ml::embedder::InferBackend;
use crate::ml::model::{SentenceEncoder, SentenceEncoderConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitModelConfig {
    pub corpus:      PathBuf,
    pub model_dir:   PathBuf,
    pub vocab_size:  usize,
    pub max_seq_len: usize,
    pub d_model:     usize,
    pub num_heads:   usize,
    pub num_layers:  usize,
    pub d_ff:        usize,
}

impl Default for InitModelConfig {
    fn default() -> Self {
        Self {
            corpus:      PathBuf::from("data/patents.json"),
            model_dir:   PathBuf::from("model"),
            vocab_size:  30522,
            max_seq_len: 512,
            d_model:     256,
            num_heads:   8,
            num_layers:  6,
            d_ff:        1024,
        }
    }
}

pub struct InitModelUseCase {
    config: InitModelConfig,
}

impl InitModelUseCase {
    pub fn new(config: InitModelConfig) -> Self {
        Self { config }
    }

    /// Returns the encoder configuration that was saved
    pub fn execute(&self) -> Result<SentenceEncoderConfig> {
        let cfg = &self.config;
        ensure!(
            cfg.num_heads > 0 && cfg.d_model % cfg.num_heads == 0,
            "d_model ({}) must be divisible by num_heads ({})",
            cfg.d_model,
            cfg.num_heads
        );
        ensure!(cfg.d_model > 0, "d_model must be positive");
        ensure!(cfg.max_seq_len > 0, "max_seq_len must be positive");

        // ── Step 1: Load corpus ───────────────────────────────────────────────
        let docs  = PatentJsonLoader::new(&cfg.corpus).load_all()?;
        let texts: Vec<String> = docs.into_iter().map(|d| d.text).collect();

        // ── Step 2: Tokenizer ─────────────────────────────────────────────────
        let tokenizer  = TokenizerStore::new(&cfg.model_dir).load_or_build(&texts, cfg.vocab_size)?;
        let vocab_size = tokenizer.get_vocab_size(true).max(cfg.vocab_size);

        // ── Step 3: Encoder ───────────────────────────────────────────────────
        let model_cfg = SentenceEncoderConfig::new(
            vocab_size, cfg.max_seq_len, cfg.d_model,
            cfg.num_heads, cfg.num_layers, cfg.d_ff,
        );
        let device = Default::default();
        let model: SentenceEncoder<InferBackend> = model_cfg.init(&device);
        tracing::info!(
            "Encoder ready: {} layers, d_model={}, vocab={}",
            cfg.num_layers,
            cfg.d_model,
            vocab_size
        );

        // ── Step 4: Save ──────────────────────────────────────────────────────
        ModelStore::new(&cfg.model_dir).save(&model, &model_cfg)?;

        Ok(model_cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_indivisible_heads() {
        let cfg = InitModelConfig { d_model: 10, num_heads: 3, ..Default::default() };
        assert!(InitModelUseCase::new(cfg).execute().is_err());
    }

    #[test]
    fn test_rejects_zero_width_model() {
        let cfg = InitModelConfig { d_model: 0, num_heads: 4, ..Default::default() };
        let err = InitModelUseCase::new(cfg).execute().unwrap_err();
        assert!(err.to_string().contains("d_model must be positive"));
    }
}
