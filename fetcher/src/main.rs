use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pulse_core::trending::{aggregate, RandomGrowth, TrendingEntry};
use pulse_core::youtube::{VideoCatalog, YouTubeClient, DEFAULT_API_BASE, DEFAULT_REGION};
use pulse_core::VideoSummary;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "pulse-fetch")]
#[command(about = "Snapshot the most-popular video chart to JSONL and aggregate snapshots offline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one page of the most-popular chart (needs YOUTUBE_API_KEY)
    Snapshot {
        /// Output JSONL file path
        #[arg(long, default_value = "./sample_data/popular.jsonl")]
        output: String,
        /// Region code for the chart
        #[arg(long, default_value = DEFAULT_REGION)]
        region: String,
        /// Restrict the chart to one category id
        #[arg(long)]
        category_id: Option<String>,
        /// YouTube Data API base URL
        #[arg(long, default_value = DEFAULT_API_BASE)]
        api_base: String,
    },
    /// Print trending hashtags for a snapshot as JSON
    Aggregate {
        /// Snapshot JSONL file path
        #[arg(long)]
        input: String,
        /// Seed for the growth column; random when omitted
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRecord {
    fetched_at: String,
    region_code: String,
    video: VideoSummary,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    match Cli::parse().command {
        Command::Snapshot { output, region, category_id, api_base } => {
            let api_key = std::env::var("YOUTUBE_API_KEY").ok();
            let client = YouTubeClient::with_base_url(&api_base, api_key)?;
            let videos = client.most_popular(&region, category_id.as_deref()).await?;
            let written = write_snapshot(Path::new(&output), &region, &videos)?;
            tracing::info!(written, output = %output, "snapshot saved");
        }
        Command::Aggregate { input, seed } => {
            let videos = read_snapshot(Path::new(&input))?;
            let entries = trending_for(&videos, seed);
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &entries)?;
            out.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn trending_for(videos: &[VideoSummary], seed: Option<u64>) -> Vec<TrendingEntry> {
    match seed {
        Some(seed) => aggregate(videos, &mut RandomGrowth::seeded(seed)),
        None => aggregate(videos, &mut RandomGrowth::new()),
    }
}

fn write_snapshot(path: &Path, region: &str, videos: &[VideoSummary]) -> Result<usize> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok();
    }
    let fetched_at = time::OffsetDateTime::now_utc().format(&Rfc3339)?;
    let mut out = BufWriter::new(File::create(path).with_context(|| format!("creating {}", path.display()))?);
    for video in videos {
        let rec = SnapshotRecord { fetched_at: fetched_at.clone(), region_code: region.to_string(), video: video.clone() };
        serde_json::to_writer(&mut out, &rec)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(videos.len())
}

fn read_snapshot(path: &Path) -> Result<Vec<VideoSummary>> {
    let reader = BufReader::new(File::open(path).with_context(|| format!("opening {}", path.display()))?);
    let mut videos = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let rec: SnapshotRecord = serde_json::from_str(&line)
            .with_context(|| format!("{}: malformed record on line {}", path.display(), idx + 1))?;
        videos.push(rec.video);
    }
    tracing::debug!(count = videos.len(), "snapshot loaded");
    Ok(videos)
}
