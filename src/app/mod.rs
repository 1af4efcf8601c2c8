use crate::adapters::apollo::ApolloClient;
use crate::adapters::sink::ResultSink;
use crate::config::cli::LocalStorage;
use crate::config::file_config::ApollonatorConfig;
use crate::config::CliConfig;
use crate::core::enricher::Enricher;
use crate::domain::model::RunSummary;
use crate::domain::names::read_name_lines;
use crate::utils::error::Result;
use chrono::{Local, TimeDelta};

/// 載入設定與名單，跑完整個查詢流程。
///
/// 輸出檔相對於 `output_base` 寫入（CLI 用目前目錄）。
pub async fn run(cli: &CliConfig, output_base: &str) -> Result<RunSummary> {
    tracing::info!("📁 Loading configuration from: {}", cli.config);
    let config = ApollonatorConfig::from_file(&cli.config)?;
    let mut pool = config.credential_pool();
    tracing::info!(
        "✅ Configuration loaded: organization '{}', {} API key(s)",
        config.organization,
        pool.len()
    );
    tracing::debug!(
        "email filter: {}, title flag (reserved): {}, endpoint: {}",
        config.email,
        config.title,
        config.endpoint()
    );

    let lines = read_name_lines(&cli.names)?;
    log_estimate(lines.len(), cli.sleep);

    let client = ApolloClient::new(config.endpoint(), cli.sleep_delay());
    let mut enricher = Enricher::new(client, config.organization.clone(), config.email);
    if cli.output_requested() {
        let sink = ResultSink::new(
            LocalStorage::new(output_base),
            cli.output.clone(),
            &config.organization,
            cli.format,
        );
        tracing::info!("💾 Results will be saved to {}", sink.file_name());
        enricher = enricher.with_sink(sink);
    }

    let summary = enricher.run(&mut pool, &lines).await?;

    tracing::info!(
        "📊 {} lines, {} lookups, {} records, {} skipped, {} failed, {} without email",
        summary.lines_read,
        summary.lookups_attempted,
        summary.records.len(),
        summary.lines_skipped,
        summary.lookup_failures,
        summary.filtered_out
    );
    Ok(summary)
}

fn log_estimate(lines: usize, sleep_seconds: u64) {
    let total_seconds = lines as u64 * sleep_seconds;
    let eta = i64::try_from(total_seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .map(|delta| (Local::now() + delta).format("%H:%M").to_string());

    match eta {
        Some(eta) => tracing::info!(
            "⏱️ Estimated completion time: {} minutes (around {})",
            total_seconds / 60,
            eta
        ),
        None => tracing::info!("⏱️ Estimated completion time: {} minutes", total_seconds / 60),
    }
}
