//! reldata CLI: inspect, validate and normalize rel-data datasets.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use reldata::codec::Codec;
use reldata::config::CodecConfig;
use reldata::export::{GraphSummary, export_dataset};
use reldata::graph::stats::{LayerCounts, OccurrenceStats, PolarityCounts};

#[derive(Parser)]
#[command(name = "reldata", version, about = "Relational knowledge-graph datasets")]
struct Cli {
    /// Directory containing the datasets.
    #[arg(long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Codec configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a dataset and report its size; fails on the first format error.
    Check {
        /// Basename shared by the dataset's files.
        basename: String,

        /// Read a graph sequence (indexed data files) instead of a single graph.
        #[arg(long)]
        sequence: bool,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print occurrence statistics for one dataset, or for all datasets in the directory.
    Stats {
        /// Basename of the dataset; all discovered datasets when omitted.
        basename: Option<String>,

        /// Print the statistics as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the basenames of all complete datasets in the directory.
    Discover,

    /// Rewrite a dataset in canonical order.
    Normalize {
        /// Basename of the dataset to read.
        basename: String,

        /// Target directory (defaults to the source directory).
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Target basename (defaults to the source basename).
        #[arg(long)]
        out_name: Option<String>,
    },

    /// Export a dataset as JSON with all IDs resolved to names.
    Dump {
        /// Basename of the dataset.
        basename: String,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CodecConfig::load(path)?,
        None => CodecConfig::default(),
    };
    let codec = Codec::new(config);

    match cli.command {
        Commands::Check {
            basename,
            sequence,
            json,
        } => {
            let graphs = if sequence {
                codec.read_sequence(&cli.dir, &basename)?
            } else {
                vec![codec.read(&cli.dir, &basename)?]
            };
            let summaries: Vec<GraphSummary> = graphs.iter().map(GraphSummary::from_graph).collect();

            if json {
                let json = serde_json::to_string_pretty(&summaries).into_diagnostic()?;
                println!("{json}");
            } else {
                for (index, summary) in summaries.iter().enumerate() {
                    if sequence {
                        println!("graph {index}:");
                    }
                    print_summary(summary);
                }
                println!("OK: {basename}");
            }
        }

        Commands::Stats { basename, json } => {
            let basenames = match basename {
                Some(name) => vec![name],
                None => codec.discover(&cli.dir)?,
            };
            if basenames.is_empty() {
                println!("No data was found in '{}'!", cli.dir.display());
                return Ok(());
            }

            let mut stats = OccurrenceStats::new();
            for name in &basenames {
                tracing::info!(dataset = %name, "processing");
                let kg = codec.read(&cli.dir, name)?;
                stats.accumulate(&kg);
            }

            if json {
                let json = serde_json::to_string_pretty(&stats).into_diagnostic()?;
                println!("{json}");
            } else {
                print_stats(&stats);
            }
        }

        Commands::Discover => {
            let found = codec.discover(&cli.dir)?;
            if found.is_empty() {
                println!("No datasets found in '{}'.", cli.dir.display());
            }
            for name in found {
                println!("{name}");
            }
        }

        Commands::Normalize {
            basename,
            out_dir,
            out_name,
        } => {
            let kg = codec.read(&cli.dir, &basename)?;
            let out_dir = out_dir.unwrap_or_else(|| cli.dir.clone());
            let out_name = out_name.unwrap_or_else(|| basename.clone());
            codec.write(&kg, &out_dir, &out_name)?;
            println!(
                "Wrote {} statements to {}/{out_name}",
                kg.statement_count(),
                out_dir.display()
            );
        }

        Commands::Dump { basename } => {
            let export = export_dataset(&codec, &cli.dir, &basename)?;
            let json = serde_json::to_string_pretty(&export).into_diagnostic()?;
            println!("{json}");
        }
    }

    Ok(())
}

fn print_summary(summary: &GraphSummary) {
    println!("  individuals:   {}", summary.individuals);
    println!("  classes:       {}", summary.classes);
    println!("  relations:     {}", summary.relations);
    println!("  literal types: {}", summary.literal_types);
    for layer in &summary.layers {
        println!(
            "  {:<9}      {} memberships, {} relations, {} literals",
            layer.layer.to_string(),
            layer.memberships,
            layer.relations,
            layer.literals
        );
    }
}

fn print_stats(stats: &OccurrenceStats) {
    println!("TOTAL INDIVIDUALS: {}\n", stats.individuals);

    if stats.classes.is_empty() {
        println!("No classes were found!");
    } else {
        let rows = polarity_rows(&stats.classes);
        print_table(
            "CLASSES",
            &rows,
            &["name", "fact members (+/-)", "inf. members (+/-)", "pred. members (+/-)"],
        );
        print_totals(&stats.class_totals());
    }
    println!();

    if stats.relations.is_empty() {
        println!("No relations were found!");
    } else {
        let rows = polarity_rows(&stats.relations);
        print_table(
            "RELATIONS",
            &rows,
            &["name", "fact triples (+/-)", "inf. triples (+/-)", "pred. triples (+/-)"],
        );
        print_totals(&stats.relation_totals());
    }
    println!();

    if stats.literals.is_empty() {
        println!("No literals were found!");
    } else {
        let rows: Vec<Vec<String>> = stats
            .literals
            .iter()
            .map(|(name, counts)| {
                vec![
                    name.clone(),
                    counts.fact.to_string(),
                    counts.inferred.to_string(),
                    counts.predicted.to_string(),
                ]
            })
            .collect();
        print_table("LITERALS", &rows, &["name", "fact", "inf.", "pred."]);
    }
}

fn polarity_rows<'a>(
    counts: impl IntoIterator<Item = (&'a String, &'a LayerCounts<PolarityCounts>)>,
) -> Vec<Vec<String>> {
    counts
        .into_iter()
        .map(|(name, c)| {
            vec![
                name.clone(),
                c.fact.to_string(),
                c.inferred.to_string(),
                c.predicted.to_string(),
            ]
        })
        .collect()
}

fn print_totals(totals: &LayerCounts<PolarityCounts>) {
    println!(
        "(TOTAL: {}, {}, {})",
        totals.fact, totals.inferred, totals.predicted
    );
}

/// Print a framed table with a centered title.
fn print_table(title: &str, rows: &[Vec<String>], labels: &[&str]) {
    let mut widths: Vec<usize> = labels.iter().map(|l| l.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let total = widths.iter().sum::<usize>() + widths.len() * 3 + 1;

    let format_row = |cells: &mut dyn Iterator<Item = &str>| {
        let mut line = String::from("|");
        for (cell, width) in cells.zip(&widths) {
            line.push_str(&format!(" {cell:<width$} |"));
        }
        line
    };

    println!("{}", "=".repeat(total));
    println!("|{:^width$}|", title, width = total - 2);
    println!("{}", "=".repeat(total));
    println!("{}", format_row(&mut labels.iter().copied()));
    println!("{}", "-".repeat(total));
    for row in rows {
        println!("{}", format_row(&mut row.iter().map(String::as_str)));
    }
    println!("{}", "=".repeat(total));
}
