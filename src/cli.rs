use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::evaluator::evaluate;
use crate::report::{render_json, render_text};

pub const DEFAULT_URL_FILE: &str = "urls.txt";
pub const BATCH_TERMINATOR: &str = "END";

#[derive(Parser)]
#[command(name = "urlrisk")]
#[command(version)]
#[command(about = "🕵️ Score URLs for surface-level phishing signals")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze URLs given on the command line
    Check {
        #[arg(required = true)]
        urls: Vec<String>,

        #[arg(short, long)]
        json: bool,
    },
    /// Read URLs from stdin until a line containing END
    Batch {
        #[arg(short, long)]
        json: bool,
    },
    /// Read one URL per line from a file
    File {
        #[arg(default_value = DEFAULT_URL_FILE)]
        path: PathBuf,

        #[arg(short, long)]
        json: bool,
    },
    /// Serve the analyzer over HTTP
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },
}

pub fn read_batch<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    for line in reader.lines() {
        let line = line.context("failed to read from stdin")?;
        let trimmed = line.trim();
        if trimmed == BATCH_TERMINATOR {
            break;
        }
        urls.extend(trimmed.split_whitespace().map(str::to_string));
    }
    Ok(urls)
}

pub fn read_url_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(content
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

/// Evaluates each URL and prints its report. A URL that fails validation is
/// reported and skipped. Returns how many URLs were scored.
pub fn print_reports(urls: &[String], as_json: bool) -> Result<usize> {
    let mut scored = 0;
    let mut reports = Vec::new();

    if !as_json {
        println!("\n🔍 Analyzing {} URLs...", urls.len());
    }

    for url in urls {
        match evaluate(url) {
            Ok(result) => {
                scored += 1;
                if as_json {
                    reports.push(render_json(url, &result));
                } else {
                    println!("{}", render_text(url, &result));
                }
            }
            Err(e) => {
                tracing::warn!(%url, "skipping url: {}", e);
                if !as_json {
                    println!("{} {:?}: {}", "❌ Skipped".red(), url, e);
                }
            }
        }
    }

    if as_json {
        let out = serde_json::to_string_pretty(&reports).context("failed to encode reports")?;
        println!("{}", out);
    }
    Ok(scored)
}
