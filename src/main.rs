use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use travel_parser::export::{self, ExportRequest, TripHints};
use travel_parser::{process_response, render, ChatReply, ParsedResponse};

#[derive(Parser)]
#[command(name = "travel_parser", about = "Structure travel-assistant chat replies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one saved reply (raw text or {"response": ...} envelope)
    Parse {
        /// Reply file, or "-" for stdin
        input: String,
        /// Print the structured blocks as JSON
        #[arg(long)]
        json: bool,
        /// Print the section split instead of the blocks
        #[arg(long)]
        sections: bool,
    },
    /// Parse every reply in a directory and summarize the records found
    Batch {
        dir: PathBuf,
        /// Max files to parse (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Build the PDF export request for a reply's itinerary
    Export {
        /// Reply file, or "-" for stdin
        input: String,
        /// Traveller message the destination and trip length are read from
        #[arg(short, long)]
        message: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { input, json, sections } => {
            let parsed = process_response(&read_reply(&input)?);
            if parsed.is_empty() {
                println!("Empty reply.");
                return Ok(());
            }
            if sections {
                print_sections(&parsed);
            } else if json {
                println!("{}", serde_json::to_string_pretty(&parsed.blocks)?);
            } else {
                println!("{}", render::render_response(&parsed));
            }
            Ok(())
        }
        Commands::Batch { dir, limit } => {
            let files = list_replies(&dir, limit)?;
            if files.is_empty() {
                println!("No reply files in {}.", dir.display());
                return Ok(());
            }
            info!(files = files.len(), dir = %dir.display(), "parsing replies");
            let counts = parse_files(&files);
            counts.print();
            Ok(())
        }
        Commands::Export { input, message } => {
            let parsed = process_response(&read_reply(&input)?);
            let hints = message
                .as_deref()
                .map(TripHints::from_message)
                .unwrap_or_default();
            match ExportRequest::new(&parsed, &hints) {
                Some(request) => {
                    let today = chrono::Local::now().date_naive();
                    println!(
                        "File: {}",
                        export::export_filename(hints.destination.as_deref(), today)
                    );
                    println!("{}", serde_json::to_string_pretty(&request)?);
                    println!("\n--- Layout ---");
                    for line in export::layout_lines(&request.itinerary) {
                        println!("{:<14} | {}", format!("{:?}", line.style), line.text);
                    }
                }
                None => println!("No itinerary in this reply."),
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Reply text from a file or stdin; a JSON envelope is unwrapped, anything
/// else is taken as the raw reply.
fn read_reply(input: &str) -> anyhow::Result<String> {
    let content = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading reply from stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("reading {}", input))?
    };
    Ok(unwrap_envelope(content))
}

fn unwrap_envelope(content: String) -> String {
    match serde_json::from_str::<ChatReply>(&content) {
        Ok(reply) => reply.response,
        Err(_) => content,
    }
}

fn list_replies(dir: &Path, limit: Option<usize>) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("listing {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("txt" | "json" | "md")
                )
        })
        .collect();
    files.sort();
    if let Some(n) = limit {
        files.truncate(n);
    }
    Ok(files)
}

fn print_sections(parsed: &ParsedResponse) {
    println!("{:>3} | {:<9} | {:>5} | {:<40}", "#", "Kind", "Lines", "Title");
    println!("{}", "-".repeat(66));
    for (i, s) in parsed.sections.iter().enumerate() {
        let title = s.title.as_deref().unwrap_or("-");
        println!(
            "{:>3} | {:<9} | {:>5} | {:<40}",
            i + 1,
            format!("{:?}", s.kind),
            s.lines.len(),
            truncate(title, 40)
        );
    }
}

#[derive(Default)]
struct ParseCounts {
    replies: usize,
    failed: usize,
    sections: usize,
    flights: usize,
    hotels: usize,
    days: usize,
    forecasts: usize,
}

impl ParseCounts {
    fn add(&mut self, parsed: &ParsedResponse) {
        self.replies += 1;
        self.sections += parsed.sections.len();
        self.flights += parsed.flights().count();
        self.hotels += parsed.hotels().count();
        self.days += parsed.days().count();
        self.forecasts += parsed.weather().count();
    }

    fn print(&self) {
        println!(
            "Parsed {} replies ({} unreadable): {} sections, {} flights, {} hotels, {} days, {} forecasts.",
            self.replies, self.failed, self.sections, self.flights, self.hotels, self.days, self.forecasts,
        );
    }
}

fn parse_files(files: &[PathBuf]) -> ParseCounts {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            let parsed = fs::read_to_string(path)
                .map(|content| process_response(&unwrap_envelope(content)));
            pb.inc(1);
            (path, parsed)
        })
        .collect();
    pb.finish_and_clear();

    let mut counts = ParseCounts::default();
    for (path, parsed) in results {
        match parsed {
            Ok(parsed) => counts.add(&parsed),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable reply");
                counts.failed += 1;
            }
        }
    }
    counts
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
