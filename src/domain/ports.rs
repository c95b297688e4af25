use crate::domain::model::{IndexReport, SourceDocument, TransformResult, VectorRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Produces raw documents for indexing. The production implementation
/// reads PDFs from a directory.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn load(&self) -> Result<Vec<SourceDocument>>;
}

/// Maps text to fixed-length vectors. Inference is CPU-bound and
/// synchronous; callers batch texts themselves.
pub trait Embedder: Send + Sync {
    fn dimension(&self) -> usize;
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Remote vector index: lifecycle plus batched upserts.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the index if it does not exist. Returns `true` when this
    /// call created it; an existing index is never reconfigured.
    async fn ensure_index(&self, dimension: usize) -> Result<bool>;

    /// Upsert a batch of records, returning the count the service
    /// acknowledged.
    async fn upsert(&self, records: &[VectorRecord]) -> Result<usize>;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn index_name(&self) -> &str;
    fn namespace(&self) -> &str;
    fn chunk_size(&self) -> usize;
    fn chunk_overlap(&self) -> usize;
    fn batch_size(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SourceDocument>>;
    async fn transform(&self, data: Vec<SourceDocument>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<IndexReport>;
}
