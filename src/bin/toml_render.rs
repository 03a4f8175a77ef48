use anyhow::Context;
use clap::Parser;
use tmpl_render::config::toml_config::{OutputConfig, TomlConfig};
use tmpl_render::core::ConfigProvider;
use tmpl_render::utils::error::ErrorSeverity;
use tmpl_render::utils::{logger, validation::Validate};
use tmpl_render::{LocalStorage, RenderEngine, SimplePipeline, Template};

#[derive(Parser)]
#[command(name = "toml-render")]
#[command(about = "Template rendering driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "render.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override substitution mode from config
    #[arg(long)]
    permissive: Option<bool>,

    /// Override output path from config
    #[arg(long)]
    output: Option<String>,

    /// Dry run - analyze the template without rendering
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based render tool");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(permissive) = args.permissive {
        let mode = if permissive { "permissive" } else { "strict" };
        config
            .output
            .get_or_insert_with(|| OutputConfig {
                path: None,
                mode: None,
            })
            .mode = Some(mode.to_string());
        tracing::info!("🔧 Substitution mode overridden to: {}", mode);
    }

    if let Some(output) = &args.output {
        config
            .output
            .get_or_insert_with(|| OutputConfig {
                path: None,
                mode: None,
            })
            .path = Some(output.clone());
        tracing::info!("🔧 Output path overridden to: {}", output);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No output will be produced");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let writes_to_file = config.output_file().is_some();

    // 創建存儲和管道
    let storage = LocalStorage::new(".".to_string());
    let pipeline = SimplePipeline::new(storage, config);

    // 創建渲染引擎並運行
    let engine = RenderEngine::new(pipeline);

    match engine.run() {
        Ok(destination) => {
            tracing::info!("✅ Render completed successfully!");

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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    eprintln!("📋 Configuration Summary:");
    eprintln!(
        "  Render: {} v{}",
        config.render.name, config.render.version
    );
    eprintln!("  Template: {}", config.template_path());
    eprintln!("  Params: {}", config.params_path());
    eprintln!("  Placeholder: ${{{}}}", config.placeholder_name());
    eprintln!(
        "  Output: {}",
        config.output_file().unwrap_or("stdout")
    );
    eprintln!(
        "  Mode: {}",
        if config.is_strict() { "strict" } else { "permissive" }
    );

    let extra = config.extra_bindings();
    if !extra.is_empty() {
        eprintln!("  Extra bindings: {}", extra.len());
    }

    if args.dry_run {
        eprintln!("  🔍 DRY RUN MODE ENABLED");
    }

    eprintln!();
}

fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    println!("🔍 Dry Run Analysis:");
    println!();

    // 模板分析
    let template_text = std::fs::read_to_string(config.template_path())
        .with_context(|| format!("cannot read template '{}'", config.template_path()))?;
    let template = Template::new(template_text);
    let placeholders = template.placeholders();

    // 可用的綁定：參數檔佔位符加上設定檔裡的額外綁定
    let mut bound_names = vec![config.placeholder_name().to_string()];
    bound_names.extend(config.extra_bindings().into_iter().map(|b| b.name));

    println!("📄 Template Analysis:");
    println!("  Path: {}", config.template_path());
    println!("  Placeholders referenced: {}", placeholders.len());

    for name in &placeholders {
        if bound_names.iter().any(|b| b == name) {
            println!("  ✅ ${{{}}} - bound", name);
        } else {
            println!("  ⚠️ ${{{}}} - no binding", name);
        }
    }

    // 未被模板使用的綁定在嚴格模式下會失敗
    println!();
    println!("🔗 Binding Analysis:");
    for name in &bound_names {
        if placeholders.iter().any(|p| p == name) {
            println!("  ✅ {} - used by template", name);
        } else {
            println!("  ⚠️ {} - unused", name);
        }
    }

    // 參數檔分析
    println!();
    println!("📦 Parameters:");
    println!("  Path: {}", config.params_path());
    if std::path::Path::new(config.params_path()).exists() {
        println!("  ✅ File exists");
    } else {
        println!("  ⚠️ File not found - render would fail");
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
