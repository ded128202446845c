//! AIDX CLI - search a first-aid guide corpus from the command line

use aidx::{Category, Guide, GuideIndex, SearchOptions, Searcher, Severity};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "aidx")]
#[command(author, version, about = "AIDX - Emergency guide search engine")]
#[command(propagate_version = true)]
struct Cli {
    /// Guide file (JSON/YAML) or directory of guide files
    #[arg(long, short = 'g', env = "AIDX_GUIDES", global = true)]
    guides: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search guides
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(long, short = 'n', default_value = "20")]
        limit: usize,

        /// Minimum score threshold
        #[arg(long)]
        min_score: Option<i64>,

        /// Filter by category (e.g. wounds_bleeding)
        #[arg(long, short = 'c')]
        category: Option<String>,

        /// Only guides at or above this severity (low, medium, high, critical)
        #[arg(long, short = 's')]
        min_severity: Option<String>,

        /// Only guides available offline
        #[arg(long)]
        offline_only: bool,

        /// Output format (text, json)
        #[arg(long, short = 'o', default_value = "text")]
        format: String,
    },

    /// Autocomplete a partial query
    Suggest {
        /// Partial query
        partial: String,

        /// Maximum number of suggestions
        #[arg(long, short = 'n', default_value = "5")]
        limit: usize,

        /// Output format (text, json)
        #[arg(long, short = 'o', default_value = "text")]
        format: String,
    },

    /// Show the terms found in the most guides
    TopTerms {
        /// Maximum number of terms
        #[arg(long, short = 'n', default_value = "10")]
        limit: usize,

        /// Output format (text, json)
        #[arg(long, short = 'o', default_value = "text")]
        format: String,
    },

    /// Show index statistics
    Stats {
        /// Output format (text, json)
        #[arg(long, short = 'o', default_value = "text")]
        format: String,
    },
}

/// Index statistics as printed by `aidx stats`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsOutput {
    guides_loaded: usize,
    guides_indexed: usize,
    unique_terms: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (stderr, so JSON output stays clean)
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let guides_path = cli
        .guides
        .context("No guide corpus given. Use --guides <PATH> or set AIDX_GUIDES")?;
    let guides = load_corpus(&guides_path)?;
    let index = GuideIndex::from_guides(&guides);

    match cli.command {
        Commands::Search {
            query,
            limit,
            min_score,
            category,
            min_severity,
            offline_only,
            format,
        } => {
            let options = SearchOptions {
                limit,
                min_score,
                category: category.as_deref().map(str::parse::<Category>).transpose()?,
                min_severity: min_severity
                    .as_deref()
                    .map(str::parse::<Severity>)
                    .transpose()?,
                offline_only,
            };
            cmd_search(&index, &guides, &query, &options, &format)
        }
        Commands::Suggest {
            partial,
            limit,
            format,
        } => cmd_suggest(&index, &partial, limit, &format),
        Commands::TopTerms { limit, format } => cmd_top_terms(&index, limit, &format),
        Commands::Stats { format } => cmd_stats(&index, guides.len(), &format),
    }
}

fn load_corpus(path: &Path) -> Result<Vec<Guide>> {
    let guides = aidx::load_guides(path)
        .with_context(|| format!("Failed to load guides from {}", path.display()))?;
    tracing::debug!("Loaded {} guides from {}", guides.len(), path.display());
    Ok(guides)
}

fn cmd_search(
    index: &GuideIndex,
    guides: &[Guide],
    query: &str,
    options: &SearchOptions,
    format: &str,
) -> Result<()> {
    let results = Searcher::new(index).search_with_options(query, guides, options);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results found for '{}'", query);
        return Ok(());
    }

    println!("Found {} results for '{}':\n", results.len(), query);
    for (i, result) in results.iter().enumerate() {
        let guide = &result.document;
        println!("{}. {} (score: {})", i + 1, guide.title, result.score);
        println!(
            "   id: {}  category: {}  severity: {}{}",
            guide.id,
            guide.category,
            guide.severity,
            if guide.is_offline_available { "  [offline]" } else { "" }
        );
        let fields: Vec<String> = result
            .matches
            .iter()
            .map(|m| format!("{}:{}", m.field, m.term))
            .collect();
        println!("   matched: {}", fields.join(", "));
        println!();
    }

    Ok(())
}

fn cmd_suggest(index: &GuideIndex, partial: &str, limit: usize, format: &str) -> Result<()> {
    let suggestions = index.suggested_searches(partial, limit);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("No suggestions for '{}'", partial);
        return Ok(());
    }

    for suggestion in suggestions {
        println!("{}", suggestion);
    }
    Ok(())
}

fn cmd_top_terms(index: &GuideIndex, limit: usize, format: &str) -> Result<()> {
    let terms = index.top_search_terms(limit);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&terms)?);
        return Ok(());
    }

    if terms.is_empty() {
        println!("Index is empty.");
        return Ok(());
    }

    let width = terms.iter().map(|t| t.term.len()).max().unwrap_or(0);
    for t in terms {
        println!("{:<width$}  {}", t.term, t.frequency, width = width);
    }
    Ok(())
}

fn cmd_stats(index: &GuideIndex, guides_loaded: usize, format: &str) -> Result<()> {
    let stats = StatsOutput {
        guides_loaded,
        guides_indexed: index.index_size(),
        unique_terms: index.term_count(),
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("AIDX Index Status");
        println!("=================\n");
        println!("Guides loaded:  {}", stats.guides_loaded);
        println!("Guides indexed: {}", stats.guides_indexed);
        println!("Unique terms:   {}", stats.unique_terms);
    }

    Ok(())
}
