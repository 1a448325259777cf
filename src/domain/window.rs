// ============================================================
// Layer 3 — Window and Encoder Configuration
// ============================================================
// A Window is a half-open token range [start, end) of one
// document's token sequence. Windows never cross documents.
//
// Example with window_size=4, stride=2 over 7 tokens:
//   Tokens:   t0 t1 t2 t3 t4 t5 t6
//   Window 1: t0 t1 t2 t3             [0, 4)
//   Window 2:       t2 t3 t4 t5       [2, 6)
//   Window 3:             t4 t5 t6    [4, 7)  ← reaches the end, stop
//
// overlap = window_size - stride

use serde::{Deserialize, Serialize};

use crate::domain::error::EncodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Index of the owning document in the input slice
    pub doc_index: usize,
    /// First token position (inclusive)
    pub start: usize,
    /// Last token position (exclusive)
    pub end: usize,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Parameters of one encoding run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Maximum tokens a single embedding call accepts
    pub window_size: usize,
    /// Step between successive window start offsets
    pub stride: usize,
    /// Number of window texts per embedder call
    pub inference_batch_size: usize,
    /// Number of documents per outer chunk; bounds peak memory
    pub chunk_size: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            window_size:          512,
            stride:               256,
            inference_batch_size: 32,
            chunk_size:           128,
        }
    }
}

impl EncoderConfig {
    /// Reject configurations that would loop forever or leave
    /// tokens between windows un-embedded.
    pub fn validate(&self) -> Result<(), EncodeError> {
        if self.window_size == 0 {
            return Err(EncodeError::InvalidConfiguration(
                "window_size must be positive".into(),
            ));
        }
        if self.stride == 0 {
            return Err(EncodeError::InvalidConfiguration(
                "stride must be positive".into(),
            ));
        }
        if self.stride > self.window_size {
            return Err(EncodeError::InvalidConfiguration(format!(
                "stride ({}) must not exceed window_size ({})",
                self.stride, self.window_size
            )));
        }
        if self.inference_batch_size == 0 {
            return Err(EncodeError::InvalidConfiguration(
                "inference_batch_size must be positive".into(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(EncodeError::InvalidConfiguration(
                "chunk_size must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Tokens shared between two adjacent windows
    pub fn overlap(&self) -> usize {
        self.window_size.saturating_sub(self.stride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = EncoderConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.overlap(), 256);
    }

    #[test]
    fn test_stride_larger_than_window_is_rejected() {
        let cfg = EncoderConfig { window_size: 4, stride: 5, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(EncodeError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_zero_values_are_rejected() {
        let zero_window = EncoderConfig { window_size: 0, stride: 0, ..Default::default() };
        let zero_stride = EncoderConfig { stride: 0, ..Default::default() };
        let zero_batch  = EncoderConfig { inference_batch_size: 0, ..Default::default() };
        let zero_chunk  = EncoderConfig { chunk_size: 0, ..Default::default() };
        for cfg in [zero_window, zero_stride, zero_batch, zero_chunk] {
            assert!(cfg.validate().is_err(), "{cfg:?} should be rejected");
        }
    }

    #[test]
    fn test_stride_equal_to_window_is_allowed() {
        let cfg = EncoderConfig { window_size: 8, stride: 8, ..Default::default() };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.overlap(), 0);
    }
}
