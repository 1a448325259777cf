// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads the model directory's tokenizer.json, or builds a
// word-level vocabulary from the corpus when there is none.
//
// Any HuggingFace tokenizer.json works (e.g. the one shipped
// with all-mpnet-base-v2). Truncation and padding are switched
// off on load: the windowed encoder needs the full token
// sequence of every document.

use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use tokenizers::Tokenizer;

use crate::domain::traits::TokenCodec;

pub const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load existing tokenizer or build a new one from texts
    pub fn load_or_build(
        &self,
        texts:      &[String],
        vocab_size: usize,
    ) -> Result<Tokenizer> {
        let tok_path = self.dir.join(TOKENIZER_FILE);
        if tok_path.exists() {
            tracing::info!("Loading existing tokenizer from disk");
            self.load()
        } else {
            tracing::info!("Building new tokenizer (vocab_size={})", vocab_size);
            self.build_and_save(texts, vocab_size)
        }
    }

    /// Load a previously saved tokenizer from JSON file
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.dir.join(TOKENIZER_FILE);
        let mut tokenizer = Tokenizer::from_file(&path)
            .map_err(|e| anyhow!(
                "Cannot load tokenizer from '{}': {}", path.display(), e
            ))?;

        tokenizer
            .with_truncation(None)
            .map_err(|e| anyhow!("Cannot disable truncation: {e}"))?;
        tokenizer.with_padding(None);

        Ok(tokenizer)
    }

    /// Build a word-level vocabulary from document texts and
    /// write a valid tokenizer JSON directly, then load it back.
    fn build_and_save(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        // ── Step 1: Build vocabulary from word frequencies ────────────────────
        let mut freq: HashMap<String, usize> = HashMap::new();

        for text in texts {
            for word in text.split_whitespace() {
                let w = word.to_lowercase();
                let w = w.trim_matches(|c: char| !c.is_alphanumeric());
                if !w.is_empty() {
                    *freq.entry(w.to_string()).or_insert(0) += 1;
                }
            }
        }

        // Most frequent first; ties broken alphabetically so builds are reproducible
        let mut words: Vec<(String, usize)> = freq.into_iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        words.truncate(vocab_size.saturating_sub(SPECIAL_TOKENS.len()));

        // ── Step 2: Build vocab JSON ──────────────────────────────────────────
        // Special tokens take the first ids so the vocabulary stays dense
        let mut vocab = serde_json::Map::new();
        for (id, tok) in SPECIAL_TOKENS.iter().enumerate() {
            vocab.insert(tok.to_string(), serde_json::json!(id));
        }
        for (word, _) in &words {
            if !vocab.contains_key(word) {
                let id = vocab.len();
                vocab.insert(word.clone(), serde_json::json!(id));
            }
        }
        let total = vocab.len();

        let added_tokens: Vec<serde_json::Value> = SPECIAL_TOKENS
            .iter()
            .enumerate()
            .map(|(id, tok)| serde_json::json!({
                "id": id, "content": tok, "single_word": false, "lstrip": false,
                "rstrip": false, "normalized": false, "special": true
            }))
            .collect();

        // ── Step 3: Write tokenizer JSON in HuggingFace format ────────────────
        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": added_tokens,
            "normalizer": {
                "type": "BertNormalizer",
                "clean_text": true,
                "handle_chinese_chars": true,
                "strip_accents": null,
                "lowercase": true
            },
            "pre_tokenizer": {
                "type": "Whitespace"
            },
            "post_processor": null,
            "decoder": {
                "type": "WordPiece",
                "prefix": "##",
                "cleanup": true
            },
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": "[UNK]"
            }
        });

        let tok_path = self.dir.join(TOKENIZER_FILE);
        std::fs::write(
            &tok_path,
            serde_json::to_string_pretty(&tokenizer_json)?
        ).with_context(|| format!("Cannot write '{}'", tok_path.display()))?;

        tracing::info!(
            "Tokenizer built with {} entries, saved to '{}'",
            total,
            tok_path.display()
        );

        self.load()
    }
}

/// Special tokens of the built vocabulary, in id order
const SPECIAL_TOKENS: [&str; 5] = ["[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]"];

/// Id used to pad batches: the tokenizer's [PAD] / <pad> token, else 0
pub fn pad_token_id(tokenizer: &Tokenizer) -> u32 {
    ["[PAD]", "<pad>"]
        .iter()
        .find_map(|t| tokenizer.token_to_id(t))
        .unwrap_or(0)
}

impl TokenCodec for Tokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let enc = (**self)
            .encode(text, true)
            .map_err(|e| anyhow!("Tokenisation error: {e}"))?;
        Ok(enc.get_ids().to_vec())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        (**self)
            .decode(ids, true)
            .map_err(|e| anyhow!("Decode error: {e}"))
    }
}
