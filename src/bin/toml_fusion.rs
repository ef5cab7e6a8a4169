use clap::Parser;
use fusion_stabilizer::core::pipeline::ARCHIVE_NAME;
use fusion_stabilizer::core::ConfigProvider;
use fusion_stabilizer::domain::model::{FusionJob, OutputFormat};
use fusion_stabilizer::utils::error::ErrorSeverity;
use fusion_stabilizer::utils::{logger, validation::Validate};
use fusion_stabilizer::{FusionEngine, LocalStorage, StandardPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-fusion")]
#[command(about = "Run a stabilizer fusion job described by a TOML file")]
struct Args {
    /// Path to TOML job file
    #[arg(short, long, default_value = "fusion-job.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override archive setting from config
    #[arg(long)]
    archive: Option<bool>,

    /// Show what would be computed without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load job file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::info!("📁 Loaded job file: {}", args.config);

    if let Some(archive) = args.archive {
        config.output.archive = archive;
        tracing::info!("🔧 Archive overridden to: {}", archive);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = StandardPipeline::new(storage, config);
    let engine = FusionEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(outcome) => {
            println!("✅ Fusion update completed");
            for g in &outcome.report.generators {
                println!("   {}", g);
            }
            println!("📁 Report saved to: {}", outcome.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Fusion update failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Job Summary:");
    match &config.job.version {
        Some(version) => println!("  Job: {} v{}", config.job.name, version),
        None => println!("  Job: {}", config.job.name),
    }
    if let Some(description) = &config.job.description {
        println!("  Description: {}", description);
    }
    println!("  Generators: {}", config.resource.generators.len());
    println!("  Measurements: {}", config.fusion.measurements.len());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output.formats.join(", "));

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) -> Result<(), Box<dyn std::error::Error>> {
    let job = FusionJob::parse(
        config.job_name(),
        config.resource(),
        config.measurements(),
        &config.outcome_entries()?,
    )?;

    println!("🔍 Dry Run Analysis:");
    println!();
    println!("  Qubits: {}", job.num_qubits());

    println!("  Resource generators:");
    for g in &job.resource {
        println!("     {}", g);
    }

    println!("  Fusion measurements (in order):");
    for m in &job.measurements {
        println!("     {} -> outcome {}1", m, job.outcomes.get(m));
    }

    println!();
    println!("💾 Output:");
    if config.archive() {
        println!("  {}/{}", config.output_path(), ARCHIVE_NAME);
    } else {
        for raw in config.output_formats() {
            let format: OutputFormat = raw.parse()?;
            println!("  {}/{}", config.output_path(), format.file_name());
        }
    }

    println!();
    println!("✅ Dry run complete. Use --verbose for more details during an actual run.");

    Ok(())
}
