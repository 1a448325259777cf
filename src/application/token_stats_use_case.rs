// ============================================================
// Layer 2 — TokenStatsUseCase
// ============================================================
// Measures how many tokens each document needs (special tokens
// included) against the model limit.

use anyhow::Result;
use std::path::PathBuf;

use crate::data::{loader::PatentJsonLoader, token_stats::TokenStats};
use crate::domain::traits::{DocumentSource, TokenCodec};
use crate::infra::tokenizer_store::TokenizerStore;

pub struct TokenStatsReport {
    pub stats:   TokenStats,
    pub lengths: Vec<usize>,
}

pub struct TokenStatsUseCase {
    corpus:    PathBuf,
    model_dir: PathBuf,
    limit:     usize,
}

impl TokenStatsUseCase {
    pub fn new(corpus: PathBuf, model_dir: PathBuf, limit: usize) -> Self {
        Self { corpus, model_dir, limit }
    }

    pub fn execute(&self) -> Result<TokenStatsReport> {
        let docs      = PatentJsonLoader::new(&self.corpus).load_all()?;
        let tokenizer = TokenizerStore::new(&self.model_dir).load()?;
        measure(&docs.iter().map(|d| d.text.as_str()).collect::<Vec<_>>(), &tokenizer, self.limit)
    }
}

fn measure<T: TokenCodec>(texts: &[&str], tokenizer: &T, limit: usize) -> Result<TokenStatsReport> {
    let lengths = texts
        .iter()
        .map(|t| tokenizer.encode(t).map(|ids| ids.len()))
        .collect::<Result<Vec<_>>>()?;

    let stats = TokenStats::from_lengths(&lengths, limit)?;
    tracing::info!("Measured {} documents, {} over the limit", stats.count, stats.over_limit);
    Ok(TokenStatsReport { stats, lengths })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CharCodec;

    impl TokenCodec for CharCodec {
        fn encode(&self, text: &str) -> Result<Vec<u32>> {
            Ok(text.chars().map(|c| c as u32).collect())
        }

        fn decode(&self, _ids: &[u32]) -> Result<String> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_measures_every_document() {
        let report = measure(&["abc", "abcdefgh", ""], &CharCodec, 4).unwrap();
        assert_eq!(report.lengths, vec![3, 8, 0]);
        assert_eq!(report.stats.over_limit, 1);
        assert_eq!(report.stats.max, 8);
    }

    #[test]
    fn test_empty_corpus_fails() {
        assert!(measure(&[], &CharCodec, 4).is_err());
    }
}
