use crate::core::render;
use crate::core::update::update_resource_with_fusions;
use crate::core::{ConfigProvider, FusionJob, FusionPipeline, Storage, UpdateReport};
use crate::domain::model::{MeasurementRecord, OutputFormat};
use crate::utils::error::Result;
use chrono::Utc;
use std::io::Write;
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const ARCHIVE_NAME: &str = "fusion_report.zip";

pub struct StandardPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> StandardPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn formats(&self) -> Result<Vec<OutputFormat>> {
        let mut formats = Vec::new();
        for raw in self.config.output_formats() {
            let format: OutputFormat = raw.parse()?;
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        Ok(formats)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> FusionPipeline for StandardPipeline<S, C> {
    async fn load_job(&self) -> Result<FusionJob> {
        let entries = self.config.outcome_entries()?;
        let job = FusionJob::parse(
            self.config.job_name(),
            self.config.resource(),
            self.config.measurements(),
            &entries,
        )?;

        tracing::debug!(
            "Loaded job '{}': {} generators, {} measurements, {} outcomes",
            job.name,
            job.resource.len(),
            job.measurements.len(),
            job.outcomes.len()
        );

        Ok(job)
    }

    async fn apply(&self, job: FusionJob) -> Result<UpdateReport> {
        let result = update_resource_with_fusions(&job.resource, &job.measurements, &job.outcomes)?;

        let measurements = job
            .measurements
            .iter()
            .map(|m| MeasurementRecord {
                measurement: m.clone(),
                outcome: job.outcomes.get(m),
            })
            .collect();

        Ok(UpdateReport {
            num_qubits: job.num_qubits(),
            job: job.name,
            generated_at: Utc::now(),
            initial: job.resource,
            measurements,
            steps: result.steps,
            generators: result.generators,
        })
    }

    async fn write_report(&self, report: &UpdateReport) -> Result<String> {
        let formats = self.formats()?;
        let base = Path::new(self.config.output_path());

        if self.config.archive() {
            tracing::debug!("Creating archive with {} files", formats.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for format in &formats {
                    zip.start_file(format.file_name(), SimpleFileOptions::default())?;
                    zip.write_all(&render::render(report, *format)?)?;
                }
                zip.finish()?.into_inner()
            };

            tracing::debug!("Writing archive ({} bytes) to storage", zip_data.len());
            self.storage.write_file(ARCHIVE_NAME, &zip_data).await?;
            return Ok(base.join(ARCHIVE_NAME).display().to_string());
        }

        for format in &formats {
            let data = render::render(report, *format)?;
            self.storage.write_file(format.file_name(), &data).await?;
            tracing::debug!("Wrote {} ({} bytes)", format.file_name(), data.len());
        }

        Ok(base.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pauli::Stabilizer;
    use crate::utils::error::FusionError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MemoryStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MemoryStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                FusionError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct StaticConfig {
        resource: Vec<String>,
        measurements: Vec<String>,
        outcomes: Vec<(String, i64)>,
        formats: Vec<String>,
        archive: bool,
    }

    impl ConfigProvider for StaticConfig {
        fn job_name(&self) -> &str {
            "static"
        }

        fn resource(&self) -> &[String] {
            &self.resource
        }

        fn measurements(&self) -> &[String] {
            &self.measurements
        }

        fn outcome_entries(&self) -> Result<Vec<(String, i64)>> {
            Ok(self.outcomes.clone())
        }

        fn output_path(&self) -> &str {
            "./out"
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn archive(&self) -> bool {
            self.archive
        }
    }

    fn ghz_config(formats: &[&str], archive: bool) -> StaticConfig {
        StaticConfig {
            resource: vec!["+XXX".into(), "+ZZI".into(), "+IZZ".into()],
            measurements: vec!["XII".into(), "IZI".into()],
            outcomes: vec![("XII".into(), 1), ("IZI".into(), -1)],
            formats: formats.iter().map(|f| f.to_string()).collect(),
            archive,
        }
    }

    #[tokio::test]
    async fn test_apply_produces_report() {
        let pipeline = StandardPipeline::new(MemoryStorage::default(), ghz_config(&["txt"], false));

        let job = pipeline.load_job().await.unwrap();
        let report = pipeline.apply(job).await.unwrap();

        let expected: Vec<Stabilizer> = ["-IZI", "+XII", "+IZZ"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(report.generators, expected);
        assert_eq!(report.num_qubits, 3);
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.measurements[1].outcome.as_int(), -1);
    }

    #[tokio::test]
    async fn test_write_individual_files() {
        let storage = MemoryStorage::default();
        let pipeline = StandardPipeline::new(storage.clone(), ghz_config(&["txt", "csv", "txt"], false));

        let job = pipeline.load_job().await.unwrap();
        let report = pipeline.apply(job).await.unwrap();
        let path = pipeline.write_report(&report).await.unwrap();

        assert_eq!(path, "./out");
        let txt = storage.read_file("generators.txt").await.unwrap();
        assert_eq!(String::from_utf8(txt).unwrap(), "-IZI\n+XII\n+IZZ\n");
        assert!(storage.read_file("generators.csv").await.is_ok());
        assert!(storage.read_file("report.json").await.is_err());
    }

    #[tokio::test]
    async fn test_write_archive() {
        let storage = MemoryStorage::default();
        let pipeline = StandardPipeline::new(storage.clone(), ghz_config(&["json", "tsv"], true));

        let job = pipeline.load_job().await.unwrap();
        let report = pipeline.apply(job).await.unwrap();
        let path = pipeline.write_report(&report).await.unwrap();

        assert!(path.ends_with(ARCHIVE_NAME));
        let data = storage.read_file(ARCHIVE_NAME).await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert!(names.contains(&"report.json"));
        assert!(names.contains(&"generators.tsv"));
    }

    #[tokio::test]
    async fn test_unknown_format_fails_on_write() {
        let pipeline = StandardPipeline::new(MemoryStorage::default(), ghz_config(&["xml"], false));

        let job = pipeline.load_job().await.unwrap();
        let report = pipeline.apply(job).await.unwrap();
        assert!(pipeline.write_report(&report).await.is_err());
    }
}
