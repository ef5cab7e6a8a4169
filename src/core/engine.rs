use crate::core::{FusionPipeline, UpdateReport};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: UpdateReport,
    pub output_path: String,
}

pub struct FusionEngine<P: FusionPipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: FusionPipeline> FusionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("Starting stabilizer update");
        self.monitor.log_stats("start");

        let job = self.pipeline.load_job().await?;
        tracing::info!(
            "Loaded job '{}' on {} qubits: {} generators, {} fusion measurements",
            job.name,
            job.num_qubits(),
            job.resource.len(),
            job.measurements.len()
        );
        self.monitor.log_stats("load");

        let report = self.pipeline.apply(job).await?;
        tracing::info!(
            "Applied {} measurements, {} generators remain",
            report.steps.len(),
            report.generators.len()
        );
        self.monitor.log_stats("update");

        let output_path = self.pipeline.write_report(&report).await?;
        tracing::info!("Report saved to: {}", output_path);
        self.monitor.log_final_stats();

        Ok(RunOutcome {
            report,
            output_path,
        })
    }
}
