use clap::Parser;
use fusion_stabilizer::utils::error::ErrorSeverity;
use fusion_stabilizer::utils::{logger, validation::Validate};
use fusion_stabilizer::{CalculatorSession, CliConfig, FusionEngine, LocalStorage, StandardPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if config.interactive {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        CalculatorSession::new(stdin.lock(), stdout.lock()).run()?;
        return Ok(());
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = StandardPipeline::new(storage, config);
    let engine = FusionEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(outcome) => {
            println!("Updated resource stabilizer generators:");
            for g in &outcome.report.generators {
                println!("   {}", g);
            }
            println!("Report saved to: {}", outcome.output_path);
        }
        Err(e) => {
            tracing::error!(
                "Stabilizer update failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());

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
