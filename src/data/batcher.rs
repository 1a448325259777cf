// ============================================================
// Layer 4 — Token Batcher
// ============================================================
// Stacks variable-length token id sequences into the padded
// tensors the Burn sentence encoder expects.
//
// How batching works here:
//   Input:  N id sequences of lengths l_1 .. l_N
//   Output: TokenBatch with tensors of shape [N, S], S = max(l_i)
//
//   Shorter rows are right-padded with pad_id and get a 0 in the
//   attention mask so mean pooling ignores them.
//
//   A sequence with no tokens at all gets one pad token with mask 1
//   so it still pools to a finite vector.

use burn::prelude::*;

#[derive(Debug, Clone)]
pub struct TokenBatch<B: Backend> {
    /// Token ids — shape: [batch_size, seq_len]
    pub input_ids: Tensor<B, 2, Int>,

    /// 1 = real token, 0 = padding — shape: [batch_size, seq_len]
    pub attention_mask: Tensor<B, 2, Int>,
}

#[derive(Clone, Debug)]
pub struct TokenBatcher<B: Backend> {
    device: B::Device,
    pad_id: u32,
}

impl<B: Backend> TokenBatcher<B> {
    pub fn new(device: B::Device, pad_id: u32) -> Self {
        Self { device, pad_id }
    }

    /// Pad and stack the sequences. `sequences` must not be empty.
    pub fn batch(&self, sequences: &[Vec<u32>]) -> TokenBatch<B> {
        let (ids, mask, batch_size, seq_len) = pad_sequences(sequences, self.pad_id);

        let input_ids = Tensor::<B, 1, Int>::from_ints(ids.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        let attention_mask = Tensor::<B, 1, Int>::from_ints(mask.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        TokenBatch { input_ids, attention_mask }
    }
}

/// Flattened row-major ids and mask, plus the [batch, seq] shape.
fn pad_sequences(sequences: &[Vec<u32>], pad_id: u32) -> (Vec<i32>, Vec<i32>, usize, usize) {
    let batch_size = sequences.len();
    let seq_len    = sequences.iter().map(Vec::len).max().unwrap_or(0).max(1);

    let mut ids  = Vec::with_capacity(batch_size * seq_len);
    let mut mask = Vec::with_capacity(batch_size * seq_len);

    for seq in sequences {
        if seq.is_empty() {
            ids.push(pad_id as i32);
            mask.push(1);
            ids.extend(std::iter::repeat(pad_id as i32).take(seq_len - 1));
            mask.extend(std::iter::repeat(0).take(seq_len - 1));
            continue;
        }
        ids.extend(seq.iter().map(|&x| x as i32));
        mask.extend(std::iter::repeat(1).take(seq.len()));
        ids.extend(std::iter::repeat(pad_id as i32).take(seq_len - seq.len()));
        mask.extend(std::iter::repeat(0).take(seq_len - seq.len()));
    }

    (ids, mask, batch_size, seq_len)
}
