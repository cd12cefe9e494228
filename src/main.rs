//! tidbits CLI - poll an endpoint or count words

use std::io::Read;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;

use tidbits::{Counter, FixSuggestion, Json, PollConfig, Poller, RawText, TidbitsError};

#[derive(Parser)]
#[command(name = "tidbits")]
#[command(about = "Polling HTTP fetcher and word counter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET a URL, polling again while it answers 202
    Fetch {
        /// Absolute http(s) URL
        url: String,

        /// Decode and pretty-print the body as JSON
        #[arg(long)]
        json: bool,

        /// Delay between polls in milliseconds (overrides TIDBITS_POLL_INTERVAL_MS)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Give up after this many requests (overrides TIDBITS_MAX_ATTEMPTS)
        #[arg(long)]
        max_attempts: Option<u32>,
    },

    /// Count whitespace-separated words from a file or stdin
    Count {
        /// Input file (stdin when omitted)
        file: Option<String>,

        /// Keys reported even when never seen
        #[arg(long = "seed")]
        seeds: Vec<String>,

        /// Only print the N most common words
        #[arg(long)]
        top: Option<usize>,

        /// Print the counter as a JSON object
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch {
            url,
            json,
            interval_ms,
            max_attempts,
        } => fetch(&url, json, interval_ms, max_attempts).await,
        Commands::Count {
            file,
            seeds,
            top,
            json,
        } => count(file.as_deref(), seeds, top, json),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn fetch(
    url: &str,
    json: bool,
    interval_ms: Option<u64>,
    max_attempts: Option<u32>,
) -> Result<(), TidbitsError> {
    let mut config = PollConfig::from_env()?;
    if let Some(ms) = interval_ms {
        config = config.with_poll_interval(Duration::from_millis(ms));
    }
    if let Some(max) = max_attempts {
        config = config.with_max_attempts(max)?;
    }

    let poller = Poller::new(config)?;

    let (status, attempts, body) = if json {
        let polled = poller.poll(url, &Json::<serde_json::Value>::new()).await?;
        let body = serde_json::to_string_pretty(&polled.body)?;
        (polled.status, polled.attempts, body)
    } else {
        let polled = poller.poll(url, &RawText).await?;
        (polled.status, polled.attempts, polled.body)
    };

    tracing::info!(status = status.as_u16(), attempts, "fetch finished");

    if status != reqwest::StatusCode::OK {
        return Err(TidbitsError::Rejected {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    println!("{}", body);
    Ok(())
}

fn count(
    file: Option<&str>,
    seeds: Vec<String>,
    top: Option<usize>,
    json: bool,
) -> Result<(), TidbitsError> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut counter: Counter<String> = Counter::with_keys(seeds);
    counter.extend(text.split_whitespace().map(str::to_string));

    if json {
        println!("{}", counter);
        return Ok(());
    }

    for (word, n) in counter.most_common(top) {
        println!("{}\t{}", word, n);
    }
    Ok(())
}
