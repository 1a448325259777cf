// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes each subcommand to its
// use case. Printing happens here and nowhere else.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use std::collections::HashMap;

use commands::{Commands, EncodeArgs, InitModelArgs, PortalArgs, ReportArgs, TokenStatsArgs, TopicTableArgs};
use crate::data::token_stats::{histogram, render_histogram};
use crate::report::{self, experiment, portal, topic_table};

#[derive(Parser, Debug)]
#[command(
    name = "patent-encoder",
    version,
    about = "Sliding-window patent embeddings, token diagnostics and experiment pages."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Encode(args)     => run_encode(args),
            Commands::InitModel(args)  => run_init_model(args),
            Commands::TokenStats(args) => run_token_stats(args),
            Commands::Portal(args)     => run_portal(args),
            Commands::TopicTable(args) => run_topic_table(args),
            Commands::Report(args)     => run_report(args),
        }
    }
}

fn run_encode(args: EncodeArgs) -> Result<()> {
    use crate::application::encode_use_case::EncodeUseCase;

    let output = args.output.clone();
    let corpus = EncodeUseCase::new(args.into()).execute()?;

    println!(
        "Encoded {} documents (dim {}) → {}",
        corpus.len(),
        corpus.dimension,
        output.display()
    );
    Ok(())
}

fn run_init_model(args: InitModelArgs) -> Result<()> {
    use crate::application::init_model_use_case::InitModelUseCase;

    let model_dir = args.model_dir.clone();
    let cfg = InitModelUseCase::new(args.into()).execute()?;

    println!(
        "Encoder initialised in {} (vocab {}, d_model {}, max_seq_len {})",
        model_dir.display(),
        cfg.vocab_size,
        cfg.d_model,
        cfg.max_seq_len
    );
    Ok(())
}

fn run_token_stats(args: TokenStatsArgs) -> Result<()> {
    use crate::application::token_stats_use_case::TokenStatsUseCase;

    let report = TokenStatsUseCase::new(args.corpus, args.model_dir, args.limit).execute()?;
    println!("{}", report.stats);

    if args.bins > 0 {
        println!();
        print!("{}", render_histogram(&histogram(&report.lengths, args.bins), report.stats.max, args.limit, 40));
    }
    Ok(())
}

fn run_portal(args: PortalArgs) -> Result<()> {
    let count = portal::generate(&args.base_dir, &args.output, &report::timestamp())?;
    println!("Portal with {} experiments written: {}", count, args.output.display());
    Ok(())
}

fn run_topic_table(args: TopicTableArgs) -> Result<()> {
    let rows   = topic_table::read_frequencies(&args.input)?;
    let labels = match &args.labels {
        Some(path) => topic_table::read_labels(path)?,
        None       => HashMap::new(),
    };

    let table = topic_table::TopicTable::pivot(&rows, !args.keep_outliers);
    report::write_page(&args.output, &table.render(&labels, &args.title, &report::timestamp()))?;

    println!(
        "Topic table ({} years × {} topics) written: {}",
        table.years.len(),
        table.topics.len(),
        args.output.display()
    );
    Ok(())
}

fn run_report(args: ReportArgs) -> Result<()> {
    experiment::generate(&args.input, &args.output, &report::timestamp())?;
    println!("Experiment report written: {}", args.output.display());
    Ok(())
}
