use clap::Parser;
use tmpl_render::utils::error::ErrorSeverity;
use tmpl_render::utils::{logger, validation::Validate};
use tmpl_render::{CliConfig, LocalStorage, RenderEngine, SimplePipeline};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting tmpl-render CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let writes_to_file = config.output.is_some();

    // 創建存儲和管道
    let storage = LocalStorage::new(".".to_string());
    let pipeline = SimplePipeline::new(storage, config);

    // 創建渲染引擎並運行
    let engine = RenderEngine::new(pipeline);

    match engine.run() {
        Ok(destination) => {
            tracing::info!("✅ Render completed successfully!");

            // stdout 已載著渲染結果，只有寫檔模式才印完成訊息
            if writes_to_file {
                println!("✅ Render completed successfully!");
                println!("📁 Output saved to: {}", destination);
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Render failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,      // 警告，但成功
                ErrorSeverity::Medium => 2,   // 可重試錯誤
                ErrorSeverity::High => 1,     // 處理錯誤
                ErrorSeverity::Critical => 3, // 系統錯誤
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
