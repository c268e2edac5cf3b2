//! CLI for checking a site snapshot
//!
//! Reads a JSON snapshot of pages, collections and navigation (the
//! serialized `SiteState`) and prints JSON for scripts and CI.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use content_engine::{audit, resolve, EngineConfig, Finding, LanguageCode, PageId, SiteState};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "site_audit")]
#[command(about = "Consistency checks for site snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report broken tags, publish-state drift and navigation problems
    Check {
        snapshot: PathBuf,
        /// Also fail on advisory findings (under-filled containers, orphan pages)
        #[arg(long)]
        strict: bool,
    },

    /// List pages without a navigation node
    Orphans {
        snapshot: PathBuf,
        /// Language for page titles (defaults to SITE_DEFAULT_LANGUAGE)
        #[arg(long)]
        lang: Option<LanguageCode>,
    },
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
struct CheckResponse {
    success: bool,
    errors: usize,
    advisories: usize,
    findings: Vec<Finding>,
}

#[derive(Serialize)]
struct OrphanPage {
    id: PageId,
    title: String,
    slug: String,
}

fn output<T: Serialize>(resp: &T) -> Result<()> {
    println!("{}", serde_json::to_string(resp).context("Failed to encode response")?);
    Ok(())
}

async fn read_snapshot(path: &PathBuf) -> Result<SiteState> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let state: SiteState = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
    tracing::debug!(
        pages = state.pages().len(),
        nav_items = state.nav().items().len(),
        "Snapshot loaded"
    );
    Ok(state)
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,content_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Check { snapshot, strict } => {
            let state = read_snapshot(&snapshot).await?;
            let findings = audit(&state);
            let advisories = findings.iter().filter(|f| f.is_advisory()).count();
            let errors = findings.len() - advisories;
            let success = errors == 0 && (!strict || advisories == 0);

            tracing::info!(errors, advisories, "Audit finished");
            output(&CheckResponse {
                success,
                errors,
                advisories,
                findings,
            })?;

            Ok(if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Orphans { snapshot, lang } => {
            let state = read_snapshot(&snapshot).await?;
            let lang = lang.unwrap_or(config.default_language);

            let orphans: Vec<OrphanPage> = state
                .nav()
                .orphan_pages(state.pages().iter().map(|p| &p.id))
                .into_iter()
                .filter_map(|id| state.page(&id))
                .map(|page| OrphanPage {
                    id: page.id.clone(),
                    title: resolve(Some(&page.title), lang),
                    slug: page.slug.clone(),
                })
                .collect();

            output(&orphans)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
