mod cmd;
mod modules;
mod types;

use crate::cmd::export::{self, ExportArgs};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::{env, io, str::FromStr};
use tokio::runtime::Builder;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt::{self, time::OffsetTime},
};

#[derive(Debug, Parser)]
#[command(name = "exercise_extractor")]
#[command(about = "Replays accepted LeetCode submissions as a dated git history")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a shell script that recreates the history of accepted submissions.
    Export(ExportArgs),
}

fn main() {
    dotenv().ok();

    let log_level = env::var("RUST_LOG").unwrap_or(String::from("info"));
    let filter = EnvFilter::builder()
        .with_default_directive(
            LevelFilter::from_str(&log_level)
                .unwrap_or(LevelFilter::INFO)
                .into(),
        )
        .from_env_lossy();
    let format = fmt::format()
        .with_level(true)
        .with_target(true)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_timer(OffsetTime::local_rfc_3339().expect("couldn't get local time offset"));
    // The script goes to stdout, logs must not be mixed into it.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .event_format(format)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set tracing subscriber");

    let runtime = Builder::new_current_thread().enable_all().build().unwrap();

    let result = match Cli::parse().command {
        Commands::Export(args) => runtime.block_on(export::run(args)),
    };

    if let Err(e) = result {
        tracing::error!("command failed: {:?}", e);
        std::process::exit(1);
    }
}
