use analytics_snippet::utils::{logger, validation::Validate};
use analytics_snippet::{AnalyticsConfig, CliArgs, RenderContext, TrackingSnippetBuilder};
use anyhow::Context;
use clap::Parser;

fn main() {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    if let Err(e) = run(&args) {
        tracing::error!("❌ Snippet rendering failed: {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> anyhow::Result<()> {
    tracing::info!("📁 Loading settings from: {}", args.config);

    // 載入並驗證 TOML 設定
    let config = AnalyticsConfig::from_file(&args.config)
        .with_context(|| format!("failed to load settings file '{}'", args.config))?;
    config.validate()?;
    tracing::info!("✅ Settings loaded and validated: {}", config);

    if args.check {
        println!("✅ {} is valid", args.config);
        return Ok(());
    }

    let mut context = match &args.context {
        Some(path) => RenderContext::from_file(path)
            .with_context(|| format!("failed to load render context '{}'", path))?,
        None => RenderContext::new(),
    };
    if let Some(addr) = &args.remote_addr {
        context.remote_addr = Some(addr.clone());
    }
    if args.verbose {
        tracing::debug!("Render context: {:?}", context);
    }

    let builder = TrackingSnippetBuilder::new(config)?;
    let html = builder.render(&context)?;
    println!("{}", html);

    Ok(())
}
