// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// clap's derive macros generate --help text, error messages
// for missing args, and string → number conversion.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::encode_use_case::EncodeJob;
use crate::application::init_model_use_case::InitModelConfig;
use crate::domain::window::EncoderConfig;
use crate::report::{portal::DEFAULT_PORTAL_FILE, topic_table::{DEFAULT_TABLE_FILE, DEFAULT_TITLE}};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Embed every patent with sliding windows and mean pooling
    Encode(EncodeArgs),

    /// Build the tokenizer and a fresh encoder checkpoint
    InitModel(InitModelArgs),

    /// Token length statistics of the corpus
    TokenStats(TokenStatsArgs),

    /// Index page linking every BERTopic_Results_* folder
    Portal(PortalArgs),

    /// Year × topic document count table
    TopicTable(TopicTableArgs),

    /// Parameter report of one clustering experiment
    Report(ReportArgs),
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// JSON array of patent records (title, abstract)
    #[arg(long, default_value = "data/patents.json")]
    pub corpus: PathBuf,

    /// Directory holding tokenizer.json and the encoder checkpoint
    #[arg(long, default_value = "model")]
    pub model_dir: PathBuf,

    /// Where to write the document vectors (JSON)
    #[arg(long, default_value = "embeddings.json")]
    pub output: PathBuf,

    /// Maximum tokens per window; must not exceed the encoder's max_seq_len
    #[arg(long, default_value_t = 512)]
    pub window_size: usize,

    /// Step between window starts; overlap = window_size - stride
    #[arg(long, default_value_t = 256)]
    pub stride: usize,

    /// Windows per forward pass
    #[arg(long, default_value_t = 32)]
    pub inference_batch_size: usize,

    /// Documents per outer chunk; bounds peak memory
    #[arg(long, default_value_t = 128)]
    pub chunk_size: usize,
}

/// The application layer never sees clap types.
impl From<EncodeArgs> for EncodeJob {
    fn from(a: EncodeArgs) -> Self {
        EncodeJob {
            corpus:    a.corpus,
            model_dir: a.model_dir,
            output:    a.output,
            encoder:   EncoderConfig {
                window_size:          a.window_size,
                stride:               a.stride,
                inference_batch_size: a.inference_batch_size,
                chunk_size:           a.chunk_size,
            },
        }
    }
}

#[derive(Args, Debug)]
pub struct InitModelArgs {
    /// Corpus used to build the vocabulary when the model dir has no tokenizer.json
    #[arg(long, default_value = "data/patents.json")]
    pub corpus: PathBuf,

    #[arg(long, default_value = "model")]
    pub model_dir: PathBuf,

    /// Upper bound on a built vocabulary; raised to fit an existing tokenizer
    #[arg(long, default_value_t = 30522)]
    pub vocab_size: usize,

    /// Longest token sequence the encoder accepts
    #[arg(long, default_value_t = 512)]
    pub max_seq_len: usize,

    /// Embedding dimension
    #[arg(long, default_value_t = 256)]
    pub d_model: usize,

    /// d_model must be divisible by num_heads
    #[arg(long, default_value_t = 8)]
    pub num_heads: usize,

    #[arg(long, default_value_t = 6)]
    pub num_layers: usize,

    /// Inner dimension of the feed-forward network
    #[arg(long, default_value_t = 1024)]
    pub d_ff: usize,
}

impl From<InitModelArgs> for InitModelConfig {
    fn from(a: InitModelArgs) -> Self {
        InitModelConfig {
            corpus:      a.corpus,
            model_dir:   a.model_dir,
            vocab_size:  a.vocab_size,
            max_seq_len: a.max_seq_len,
            d_model:     a.d_model,
            num_heads:   a.num_heads,
            num_layers:  a.num_layers,
            d_ff:        a.d_ff,
        }
    }
}

#[derive(Args, Debug)]
pub struct TokenStatsArgs {
    #[arg(long, default_value = "data/patents.json")]
    pub corpus: PathBuf,

    #[arg(long, default_value = "model")]
    pub model_dir: PathBuf,

    /// Model input limit to compare against
    #[arg(long, default_value_t = 512)]
    pub limit: usize,

    /// Histogram bins; 0 disables the histogram
    #[arg(long, default_value_t = 50)]
    pub bins: usize,
}

#[derive(Args, Debug)]
pub struct PortalArgs {
    /// Directory containing the BERTopic_Results_* folders
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_PORTAL_FILE)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct TopicTableArgs {
    /// CSV export of topics_over_time (Topic, Timestamp, Frequency)
    #[arg(long)]
    pub input: PathBuf,

    /// JSON object mapping topic id to a custom label
    #[arg(long)]
    pub labels: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_TABLE_FILE)]
    pub output: PathBuf,

    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Keep topic -1 (outliers) in the table
    #[arg(long)]
    pub keep_outliers: bool,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Experiment record (JSON)
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: PathBuf,
}
