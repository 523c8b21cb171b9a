use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use news_monitor::report::{self, ArticleFilter};
use news_monitor::rss_utils::time::format_duration;
use news_monitor::{ArticlePipeline, HttpFeedReader, MissingDatePolicy, MonitorConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Nuclear & tariff news monitor: recent feed entries matching keyword groups
#[derive(Debug, Parser)]
#[command(name = "news-monitor", version)]
struct Cli {
    /// JSON file overriding the built-in sources, keyword groups and fetch settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only show these sources (repeatable)
    #[arg(long = "source")]
    sources: Vec<String>,

    /// Only show these keyword groups (repeatable)
    #[arg(long = "group")]
    groups: Vec<String>,

    /// First calendar date to show, inclusive (UTC)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last calendar date to show, inclusive (UTC)
    #[arg(long)]
    to: Option<NaiveDate>,

    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Keep entries without a usable published date, stamped with the current time
    #[arg(long)]
    assume_now: bool,

    /// Per-feed request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let mut config = match &cli.config {
        Some(path) => MonitorConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => MonitorConfig::default(),
    };
    if cli.assume_now {
        config.missing_date_policy = MissingDatePolicy::AssumeNow;
    }
    if let Some(timeout) = cli.timeout {
        config.fetch.timeout_seconds = timeout;
    }
    config.validate()?;

    let known_groups = config.group_names();
    for group in &cli.groups {
        if !known_groups.contains(group) {
            warn!("Unknown keyword group: {}", group);
        }
    }

    info!(
        "Collecting articles from {} sources (last {})",
        config.sources.len(),
        format_duration(config.lookback())
    );

    let reader = Arc::new(HttpFeedReader::new(config.fetch.clone())?);
    let pipeline = ArticlePipeline::from_config(reader, &config)?;
    let articles = pipeline.run(&config.sources).await;

    if articles.is_empty() {
        println!(
            "No matching articles found in the past {} hours.",
            config.lookback_hours
        );
        return Ok(());
    }

    if let Some((first, last)) = report::date_bounds(&articles) {
        info!("Articles span {} to {}", first, last);
    }
    info!(
        "Sources with hits: {}",
        report::distinct_sources(&articles).join(", ")
    );

    let mut filter = ArticleFilter::new().with_date_range(cli.from, cli.to);
    if !cli.sources.is_empty() {
        filter = filter.with_sources(cli.sources.clone());
    }
    if !cli.groups.is_empty() {
        filter = filter.with_keyword_groups(cli.groups.clone());
    }
    let shown = filter.apply(&articles);

    match cli.format {
        OutputFormat::Json => println!("{}", report::to_json(&shown)?),
        OutputFormat::Table => {
            println!("Article Hits by Source\n");
            println!("{}", report::render_counts(&report::source_counts(&shown)));
            print!("{}", report::render_table(&shown));
        }
    }

    Ok(())
}
