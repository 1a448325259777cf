// ============================================================
// Layer 4 — Token Length Statistics
// ============================================================
// Diagnostic used to choose window_size / stride before an
// encoding run: how long are the documents in tokens, and how
// many of them exceed the model limit?
//
// Percentiles use linear interpolation between the two closest
// ranks: p-th percentile of sorted x[0..n] sits at rank
// (n - 1) * p / 100.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("cannot compute token statistics of an empty corpus")]
    EmptyCorpus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenStats {
    pub count:            usize,
    pub mean:             f64,
    pub min:              usize,
    pub max:              usize,
    pub p95:              f64,
    pub limit:            usize,
    pub over_limit:       usize,
    pub percent_over:     f64,
}

impl TokenStats {
    /// Summarise per-document token lengths against a model limit.
    pub fn from_lengths(lengths: &[usize], limit: usize) -> Result<Self, StatsError> {
        if lengths.is_empty() {
            return Err(StatsError::EmptyCorpus);
        }

        let mut sorted = lengths.to_vec();
        sorted.sort_unstable();

        let count      = sorted.len();
        let total: u64 = sorted.iter().map(|&l| l as u64).sum();
        let over_limit = sorted.iter().filter(|&&l| l > limit).count();

        Ok(Self {
            count,
            mean:         total as f64 / count as f64,
            min:          sorted[0],
            max:          sorted[count - 1],
            p95:          percentile(&sorted, 95.0),
            limit,
            over_limit,
            percent_over: over_limit as f64 / count as f64 * 100.0,
        })
    }
}

impl fmt::Display for TokenStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Token length statistics ({} documents) ---", self.count)?;
        writeln!(f, "Mean length:      {:.2}", self.mean)?;
        writeln!(f, "Max length:       {}", self.max)?;
        writeln!(f, "95% of documents: <= {:.2} tokens", self.p95)?;
        write!(
            f,
            "Over {} tokens:   {} ({:.2}%)",
            self.limit, self.over_limit, self.percent_over
        )
    }
}

/// Percentile of an ascending, non-empty slice with linear interpolation.
pub fn percentile(sorted: &[usize], p: f64) -> f64 {
    let rank  = (sorted.len() - 1) as f64 * p / 100.0;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac  = rank - lower as f64;
    sorted[lower] as f64 + (sorted[upper] as f64 - sorted[lower] as f64) * frac
}

/// Fixed-width histogram over [min, max]; returns (bin_start, count) pairs.
pub fn histogram(lengths: &[usize], bins: usize) -> Vec<(usize, usize)> {
    let (Some(&min), Some(&max)) = (lengths.iter().min(), lengths.iter().max()) else {
        return Vec::new();
    };
    let bins  = bins.max(1);
    let width = ((max - min) / bins + 1).max(1);

    let mut counts = vec![0usize; bins];
    for &l in lengths {
        let bin = ((l - min) / width).min(bins - 1);
        counts[bin] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, c)| (min + i * width, c))
        .collect()
}

/// Render a histogram as text rows, marking the bin holding the limit.
/// `max` is the longest length counted; the last bin ends there, so a
/// limit beyond every document is not marked.
pub fn render_histogram(hist: &[(usize, usize)], max: usize, limit: usize, bar_width: usize) -> String {
    let peak = hist.iter().map(|&(_, c)| c).max().unwrap_or(0).max(1);
    let mut out = String::new();

    for (i, &(start, count)) in hist.iter().enumerate() {
        let next   = hist.get(i + 1).map(|&(s, _)| s).unwrap_or(max.saturating_add(1));
        let marker = if (start..next).contains(&limit) { " <- limit" } else { "" };
        let bar    = "#".repeat(count * bar_width / peak);
        out.push_str(&format!("{start:>7} | {bar:<bar_width$} {count}{marker}\n"));
    }

    out
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_statistics() {
        let lengths = [100, 200, 300, 600, 800];
        let s = TokenStats::from_lengths(&lengths, 512).unwrap();

        assert_eq!(s.count, 5);
        assert!((s.mean - 400.0).abs() < 1e-9);
        assert_eq!(s.max, 800);
        assert_eq!(s.min, 100);
        assert_eq!(s.over_limit, 2);
        assert!((s.percent_over - 40.0).abs() < 1e-9);
        // rank = 4 * 0.95 = 3.8 → 600 + 0.8 * 200
        assert!((s.p95 - 760.0).abs() < 1e-9);
    }

    #[test]
    fn test_length_equal_to_limit_is_not_over() {
        let s = TokenStats::from_lengths(&[512, 513], 512).unwrap();
        assert_eq!(s.over_limit, 1);
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        assert_eq!(TokenStats::from_lengths(&[], 512), Err(StatsError::EmptyCorpus));
    }

    #[test]
    fn test_percentile_of_single_value() {
        assert_eq!(percentile(&[42], 95.0), 42.0);
    }

    #[test]
    fn test_histogram_counts_everything() {
        let lengths: Vec<usize> = (0..100).collect();
        let hist = histogram(&lengths, 10);
        assert_eq!(hist.len(), 10);
        assert_eq!(hist.iter().map(|&(_, c)| c).sum::<usize>(), 100);
        assert_eq!(hist[0].0, 0);
    }

    #[test]
    fn test_histogram_of_identical_lengths() {
        let hist = histogram(&[7, 7, 7], 5);
        assert_eq!(hist[0], (7, 3));
    }

    #[test]
    fn test_render_marks_limit_bin() {
        let text = render_histogram(&[(0, 1), (10, 4)], 19, 12, 8);
        let lines: Vec<&str> = text.lines().collect();
        assert!(!lines[0].contains("limit"));
        assert!(lines[1].ends_with("<- limit"));
    }

    #[test]
    fn test_render_does_not_mark_limit_above_longest_document() {
        let lengths: Vec<usize> = (10..=40).collect();
        let text = render_histogram(&histogram(&lengths, 4), 40, 512, 8);
        assert!(!text.contains("limit"));

        let text = render_histogram(&histogram(&lengths, 4), 40, 40, 8);
        assert!(text.lines().last().unwrap().ends_with("<- limit"));
    }
}
