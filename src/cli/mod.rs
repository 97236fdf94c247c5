//! Command-line interface for journal-scorer.
//!
//! Provides commands for scoring a predictions file against gold,
//! inspecting how one journal was matched, and showing configuration.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::ResolvedConfig;
use crate::core::{CorpusSummary, Evaluation, Evaluator};
use crate::domain::{align_journals, AlignedJournal};
use crate::ingest::{load_gold, load_predicted};
use crate::report::{
    digest_file, write_journal_scores, write_pretty_json, write_summary, RunManifest,
};

pub mod explain;

/// journal-scorer - Score extracted items against a gold standard
#[derive(Parser, Debug)]
#[command(name = "journal-scorer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score every gold journal against its predictions
    Score {
        /// Gold-standard journals (JSONL)
        #[arg(long)]
        gold: PathBuf,

        /// Predicted journals (JSONL)
        #[arg(long)]
        pred: PathBuf,

        /// Summary output: JSON array of per-journal scores
        #[arg(long)]
        out: PathBuf,

        /// Per-journal JSONL output (overrides config)
        #[arg(long)]
        per_journal: Option<PathBuf>,

        /// Write a run manifest to this path (overrides config)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Show how a single journal's items were matched
    Explain {
        /// Gold-standard journals (JSONL)
        #[arg(long)]
        gold: PathBuf,

        /// Predicted journals (JSONL)
        #[arg(long)]
        pred: PathBuf,

        /// Journal ID to explain
        #[arg(short, long)]
        journal: String,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Score {
                gold,
                pred,
                out,
                per_journal,
                manifest,
            } => score(&gold, &pred, &out, per_journal, manifest).await,
            Commands::Explain {
                gold,
                pred,
                journal,
            } => explain::execute(&gold, &pred, &journal).await,
            Commands::Config => show_config(),
        }
    }
}

/// Load both files and pair journals by id
pub(crate) async fn load_aligned(gold: &Path, pred: &Path) -> Result<Vec<AlignedJournal>> {
    let gold_journals = load_gold(gold).await?;
    let predicted_journals = load_predicted(pred).await?;

    Ok(align_journals(gold_journals, predicted_journals))
}

/// Where a `score` run writes its per-journal rows and manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreOutputs {
    pub per_journal: PathBuf,
    pub manifest: Option<PathBuf>,
}

impl ScoreOutputs {
    /// Apply command-line paths over the resolved configuration
    pub fn resolve(
        per_journal: Option<PathBuf>,
        manifest: Option<PathBuf>,
        config: &ResolvedConfig,
    ) -> Self {
        Self {
            per_journal: per_journal.unwrap_or_else(|| config.per_journal.clone()),
            manifest: manifest.or_else(|| config.manifest.clone()),
        }
    }
}

/// Score all journals and write result files
async fn score(
    gold: &Path,
    pred: &Path,
    out: &Path,
    per_journal: Option<PathBuf>,
    manifest: Option<PathBuf>,
) -> Result<()> {
    let outputs = match (per_journal, manifest) {
        (Some(per_journal), Some(manifest)) => ScoreOutputs {
            per_journal,
            manifest: Some(manifest),
        },
        (per_journal, manifest) => {
            ScoreOutputs::resolve(per_journal, manifest, crate::config::config()?)
        }
    };

    let evaluation = run_score(gold, pred, out, &outputs).await?;
    print_summary(&evaluation.summary);

    Ok(())
}

/// Load, score and write every output file.
///
/// Nothing is written unless every journal scores successfully.
pub async fn run_score(
    gold: &Path,
    pred: &Path,
    out: &Path,
    outputs: &ScoreOutputs,
) -> Result<Evaluation> {
    let journals = load_aligned(gold, pred).await?;
    let evaluation = Evaluator::new().evaluate(&journals)?;

    write_journal_scores(&outputs.per_journal, &evaluation.scores)?;
    eprintln!("Per-journal scores: {}", outputs.per_journal.display());

    write_summary(out, &evaluation.scores)?;
    eprintln!("Summary: {}", out.display());

    if let Some(manifest_path) = &outputs.manifest {
        let run_manifest = RunManifest::new(&evaluation, digest_file(gold)?, digest_file(pred)?);
        write_pretty_json(manifest_path, &run_manifest)?;
        eprintln!("Manifest: {}", manifest_path.display());
    }

    Ok(evaluation)
}

/// Print corpus totals and averages to stderr
fn print_summary(summary: &CorpusSummary) {
    eprint!("{}", format_summary(summary));
}

fn format_summary(summary: &CorpusSummary) -> String {
    format!(
        "Journals: {}\ntp={} fp={} fn={}\n\
         micro: precision={:.4} recall={:.4} f1={:.4}\n\
         macro: precision={:.4} recall={:.4} f1={:.4}\n",
        summary.journals,
        summary.true_positives,
        summary.false_positives,
        summary.false_negatives,
        summary.micro.precision,
        summary.micro.recall,
        summary.micro.f1,
        summary.macro_avg.precision,
        summary.macro_avg.recall,
        summary.macro_avg.f1
    )
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    let config = crate::config::config()?;

    println!("journal-scorer configuration");
    println!("============================");
    println!();
    match &config.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none found, using defaults)"),
    }
    println!("Home:        {}", config.home.display());
    println!("Per-journal: {}", config.per_journal.display());
    match &config.manifest {
        Some(path) => println!("Manifest:    {}", path.display()),
        None => println!("Manifest:    (disabled)"),
    }

    Ok(())
}
