// ============================================================
// Layer 6 — Model Store
// ============================================================
// Saves and restores the sentence encoder using Burn's
// CompactRecorder (MessagePack + gzip, half precision).
//
// Model directory layout:
//   model_dir/
//     tokenizer.json        ← TokenizerStore
//     encoder_config.json   ← SentenceEncoderConfig
//     encoder.mpk.gz        ← weights
//
// The config is stored separately because the architecture
// must be rebuilt before the weights can be loaded into it.

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use std::{fs, path::PathBuf};

use crate::ml::model::{SentenceEncoder, SentenceEncoderConfig};

const CONFIG_FILE:  &str = "encoder_config.json";
const WEIGHTS_STEM: &str = "encoder";

pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write config and weights. Creates the directory if needed.
    pub fn save<B: Backend>(
        &self,
        model:  &SentenceEncoder<B>,
        config: &SentenceEncoderConfig,
    ) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create model directory '{}'", self.dir.display()))?;

        let config_path = self.dir.join(CONFIG_FILE);
        fs::write(&config_path, serde_json::to_string_pretty(config)?)
            .with_context(|| format!("Cannot write config to '{}'", config_path.display()))?;

        // The recorder appends its own extension
        let path = self.dir.join(WEIGHTS_STEM);
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save weights to '{}'", path.display()))?;

        tracing::info!("Saved encoder to '{}'", self.dir.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<SentenceEncoderConfig> {
        let path = self.dir.join(CONFIG_FILE);

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. \
                     Run 'init-model' first.",
                    path.display()
                )
            })?;

        serde_json::from_str(&json)
            .with_context(|| format!("Malformed encoder config '{}'", path.display()))
    }

    /// Rebuild the architecture from the saved config and load the weights into it.
    pub fn load<B: Backend>(&self, device: &B::Device) -> Result<(SentenceEncoder<B>, SentenceEncoderConfig)> {
        let config = self.load_config()?;
        let model: SentenceEncoder<B> = config.init(device);

        let path = self.dir.join(WEIGHTS_STEM);
        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load weights '{}'. Run 'init-model' first.", path.display())
            })?;

        tracing::info!(
            "Loaded encoder: {} layers, d_model={}, max_seq_len={}",
            config.num_layers,
            config.d_model,
            config.max_seq_len
        );
        Ok((model.load_record(record), config))
    }
}
