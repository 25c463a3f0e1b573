use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use newznab::{
    CATEGORY_TV_HD, CATEGORY_TV_SD, Indexer, NewznabClient, Nzb, ReqwestClient,
    USENET_CRAWLER_API,
};

/// Search newznab indexers from the command line
#[derive(Parser, Debug)]
#[command(name = "newznab")]
#[command(version, about)]
struct Args {
    /// Indexer API key
    #[arg(long, env = "NEWZNAB_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// Indexer API endpoint
    #[arg(long, env = "NEWZNAB_BASE_URL", default_value = USENET_CRAWLER_API)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Verbose output (-vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for a TV episode
    Search {
        /// TVRage ID of the show
        #[arg(long)]
        rid: i64,

        #[arg(short, long)]
        season: i32,

        #[arg(short, long)]
        episode: i32,

        /// Search standard-definition instead of HD
        #[arg(long)]
        sd: bool,

        /// Also fetch comments for every result
        #[arg(long)]
        comments: bool,
    },

    /// Show the comments of an NZB
    Comments {
        /// NZB id (the indexer's guid)
        id: String,
    },

    /// Print the download URL of an NZB
    Url {
        id: String,
    },

    /// Download an NZB file
    Download {
        id: String,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn nzb_with_id(id: String) -> Nzb {
    Nzb {
        id,
        ..Default::default()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let http = ReqwestClient::with_timeout(Duration::from_secs(args.timeout))
        .context("Failed to create HTTP client")?;
    let client = NewznabClient::with_base_url(http, &args.base_url, args.api_key)
        .context("Invalid indexer URL")?;

    match args.command {
        Command::Search {
            rid,
            season,
            episode,
            sd,
            comments,
        } => {
            let category = if sd { CATEGORY_TV_SD } else { CATEGORY_TV_HD };
            let mut nzbs = client
                .search(category, rid, season, episode)
                .await
                .context("Search failed")?;

            if comments {
                for nzb in nzbs.iter_mut().filter(|n| n.num_comments > 0) {
                    client
                        .populate_comments(nzb)
                        .await
                        .with_context(|| format!("Failed to fetch comments for {}", nzb.id))?;
                }
            }

            eprintln!(
                "{} {} results for S{:02}E{:02}",
                "Found".green().bold(),
                nzbs.len().to_string().cyan(),
                season,
                episode
            );
            for nzb in &nzbs {
                println!("{}", nzb.json_string());
            }
        }

        Command::Comments { id } => {
            let mut nzb = nzb_with_id(id);
            client
                .populate_comments(&mut nzb)
                .await
                .context("Failed to fetch comments")?;
            for comment in &nzb.comments {
                println!("{}", comment.json_string());
            }
        }

        Command::Url { id } => {
            println!("{}", client.download_url(&nzb_with_id(id)));
        }

        Command::Download { id, output } => {
            let bytes = client
                .download(&nzb_with_id(id))
                .await
                .context("Download failed")?;
            tokio::fs::write(&output, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            eprintln!(
                "{} {} bytes to {}",
                "Saved".green().bold(),
                bytes.len(),
                output.display().to_string().cyan()
            );
        }
    }

    Ok(())
}
