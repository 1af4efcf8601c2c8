use apollonator::utils::{logger, validation::Validate};
use apollonator::{app, CliConfig};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("🚀 Starting apollonator v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match app::run(&config, ".").await {
        Ok(summary) => {
            tracing::info!("✅ Finished: {} records", summary.records.len());
            if let Some(path) = &summary.output_path {
                println!("📁 Output saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            // 依錯誤嚴重程度決定退出碼
            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}
