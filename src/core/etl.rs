use crate::core::{IndexReport, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives one full extract → transform → load pass and logs stage
/// progress along the way.
pub struct IndexEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> IndexEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&mut self) -> Result<IndexReport> {
        tracing::info!("Starting index build...");

        tracing::info!("Extracting documents...");
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} documents", raw_data.len());
        self.monitor.log_stats("Extract");

        tracing::info!("Splitting text into chunks...");
        let transformed = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "Split {} documents into {} chunks",
            transformed.documents_in,
            transformed.chunks.len()
        );
        self.monitor.log_stats("Transform");

        tracing::info!("Embedding and upserting into the vector index...");
        let report = self.pipeline.load(transformed).await?;
        tracing::info!(
            "Upserted {} chunks (index created: {})",
            report.chunks_upserted,
            report.index_created
        );
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(report)
    }
}
