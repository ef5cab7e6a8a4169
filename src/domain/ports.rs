use crate::domain::model::{FusionJob, UpdateReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Source of a fusion job, independent of whether it came from flags or a file.
pub trait ConfigProvider: Send + Sync {
    fn job_name(&self) -> &str;
    /// Resource generators in display form, e.g. `+XXI`.
    fn resource(&self) -> &[String];
    fn measurements(&self) -> &[String];
    /// `(measurement, outcome)` pairs as given by the user.
    fn outcome_entries(&self) -> Result<Vec<(String, i64)>>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn archive(&self) -> bool;
}

#[async_trait]
pub trait FusionPipeline: Send + Sync {
    async fn load_job(&self) -> Result<FusionJob>;
    async fn apply(&self, job: FusionJob) -> Result<UpdateReport>;
    async fn write_report(&self, report: &UpdateReport) -> Result<String>;
}
