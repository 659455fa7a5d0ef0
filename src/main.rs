use anyhow::{Context, Result};
use clap::Parser;
use glyphmatch::config::{Args, RunConfig};
use glyphmatch::reader::LineReader;
use glyphmatch::stats::RunStats;
use glyphmatch::{load_dictionaries, AnalysisError, Analyzer, ConsoleReporter, Resource};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // JSON logs on stderr keep stdout for the match report
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let config = RunConfig::from_args(&args).await?;
    let run_start = std::time::Instant::now();

    println!("Processing {}...", config.input.display());

    let reader = LineReader::default();
    let (lines, read_stats) = reader
        .read_lines(&config.input, Resource::Input)
        .await
        .context("Nothing to analyze")?;

    let dictionary_loads =
        load_dictionaries(&reader, &config.dictionaries, config.analysis.normalization).await;

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling analysis");
            ctrl_c_token.cancel();
        }
    });

    let analyzer = Analyzer::new(config.analysis.clone())?.with_cancellation(cancel);
    let show_raw = config.show_raw;
    let show_progress = config.show_progress;

    // WHY: brute-force matching is CPU-bound; keep it off the async workers
    let (lines, dictionary_loads, result) = tokio::task::spawn_blocking(move || {
        let mut reporter = ConsoleReporter::new(show_progress);
        if show_raw {
            reporter.print_raw_text(&lines);
        }
        let result = analyzer.analyze(&lines, &dictionary_loads, &mut reporter);
        (lines, dictionary_loads, result)
    })
    .await?;

    let report = match result {
        Ok(report) => report,
        Err(AnalysisError::Cancelled) => {
            eprintln!("Analysis cancelled");
            std::process::exit(130);
        }
        Err(e) => return Err(e.into()),
    };

    let failed = dictionary_loads.iter().filter(|load| load.is_err()).count();
    let elapsed_ms = run_start.elapsed().as_millis() as u64;
    info!(
        lines = lines.len(),
        events = report.events.len(),
        failed_dictionaries = failed,
        elapsed_ms,
        "Run complete"
    );

    if let Some(ref stats_path) = config.stats_out {
        let stats = RunStats::from_report(&read_stats, &config.dictionaries, &report, elapsed_ms);
        stats
            .write(stats_path)
            .await
            .with_context(|| format!("Failed to write stats to {}", stats_path.display()))?;
        info!("Wrote run statistics to {}", stats_path.display());
    }

    println!(
        "\nglyphmatch v{} - {} match event(s), {} distinct characters, {} of {} dictionaries loaded",
        env!("CARGO_PKG_VERSION"),
        report.events.len(),
        report.inventory.len(),
        config.dictionaries.len() - failed,
        config.dictionaries.len()
    );

    Ok(())
}
