// ============================================================
// Layer 2 — EncodeUseCase
// ============================================================
// Runs the full encoding pipeline:
//
//   Step 1: Load the corpus                   (Layer 4 - data)
//   Step 2: Load tokenizer + encoder          (Layer 6 - infra)
//   Step 3: Windowed encoding                 (Layer 4 + 5)
//   Step 4: Write the vectors                 (Layer 6 - infra)

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{encoder::WindowedEncoder, loader::PatentJsonLoader};
use crate::domain::document::EncodedCorpus;
use crate::domain::traits::DocumentSource;
use crate::domain::window::EncoderConfig;
use crate::infra::{
    model_store::ModelStore,
    output::write_embeddings,
    tokenizer_store::{pad_token_id, TokenizerStore},
};
use crate::ml::embedder::{BurnEmbedder, InferBackend};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeJob {
    pub corpus:    PathBuf,
    pub model_dir: PathBuf,
    pub output:    PathBuf,
    pub encoder:   EncoderConfig,
}

pub struct EncodeUseCase {
    job: EncodeJob,
}

impl EncodeUseCase {
    pub fn new(job: EncodeJob) -> Self {
        Self { job }
    }

    pub fn execute(&self) -> Result<EncodedCorpus> {
        let job = &self.job;
        job.encoder.validate()?;

        // ── Step 1: Load corpus ───────────────────────────────────────────────
        let docs = PatentJsonLoader::new(&job.corpus).load_all()?;

        // ── Step 2: Tokenizer and encoder ─────────────────────────────────────
        let tokenizer = TokenizerStore::new(&job.model_dir).load()?;
        let (model, model_cfg) = ModelStore::new(&job.model_dir)
            .load::<InferBackend>(&Default::default())?;

        // A window longer than the model accepts would be silently truncated
        ensure!(
            job.encoder.window_size <= model_cfg.max_seq_len,
            "window_size ({}) exceeds the encoder's max_seq_len ({})",
            job.encoder.window_size,
            model_cfg.max_seq_len
        );

        let embedder = BurnEmbedder::new(model, &model_cfg, &tokenizer, pad_token_id(&tokenizer));

        // ── Step 3: Encode ────────────────────────────────────────────────────
        tracing::info!(
            "Encoding {} documents: window={}, stride={} (overlap {}), batch={}, chunk={}",
            docs.len(),
            job.encoder.window_size,
            job.encoder.stride,
            job.encoder.overlap(),
            job.encoder.inference_batch_size,
            job.encoder.chunk_size
        );
        let encoder = WindowedEncoder::new(&tokenizer, &embedder, job.encoder.clone())?;
        let corpus  = encoder
            .encode(&docs)
            .with_context(|| format!("Encoding '{}' failed", job.corpus.display()))?;

        // ── Step 4: Persist ───────────────────────────────────────────────────
        write_embeddings(&job.output, &corpus)?;
        Ok(corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init_model_use_case::{InitModelConfig, InitModelUseCase};
    use std::fs;

    fn small_model(dir: &std::path::Path, corpus: &std::path::Path) {
        let cfg = InitModelConfig {
            corpus:      corpus.to_path_buf(),
            model_dir:   dir.to_path_buf(),
            vocab_size:  64,
            max_seq_len: 16,
            d_model:     8,
            num_heads:   2,
            num_layers:  1,
            d_ff:        16,
        };
        InitModelUseCase::new(cfg).execute().unwrap();
    }

    #[test]
    fn test_end_to_end_encoding() {
        let dir    = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("patents.json");
        fs::write(
            &corpus,
            r#"[
                {"title": "Battery separator", "abstract": " porous ceramic layer on a polymer film"},
                {"title": "Motor", "abstract": ""},
                {"title": "Long", "abstract": " one two three four five six seven eight nine ten eleven twelve"}
            ]"#,
        )
        .unwrap();
        let model_dir = dir.path().join("model");
        small_model(&model_dir, &corpus);

        let job = EncodeJob {
            corpus:    corpus.clone(),
            model_dir: model_dir.clone(),
            output:    dir.path().join("out").join("embeddings.json"),
            encoder:   EncoderConfig { window_size: 4, stride: 2, inference_batch_size: 3, chunk_size: 2 },
        };
        let out = EncodeUseCase::new(job.clone()).execute().unwrap();

        assert_eq!(out.len(), 3);
        assert_eq!(out.dimension, 8);
        assert!(out.vectors.iter().all(|v| v.len() == 8));
        assert!(job.output.exists());

        // Same weights, same input → identical output
        let again = EncodeUseCase::new(job).execute().unwrap();
        assert_eq!(out, again);
    }

    #[test]
    fn test_window_larger_than_model_is_rejected() {
        let dir    = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("patents.json");
        fs::write(&corpus, r#"[{"title": "A", "abstract": "b"}]"#).unwrap();
        let model_dir = dir.path().join("model");
        small_model(&model_dir, &corpus);

        let job = EncodeJob {
            corpus,
            model_dir,
            output:  dir.path().join("embeddings.json"),
            encoder: EncoderConfig { window_size: 64, stride: 32, ..Default::default() },
        };
        assert!(EncodeUseCase::new(job).execute().is_err());
    }
}
