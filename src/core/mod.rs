pub mod etl;
pub mod pipeline;
pub mod splitter;

pub use crate::domain::model::{
    ChunkMetadata, DocumentChunk, IndexReport, SourceDocument, TransformResult, VectorRecord,
};
pub use crate::domain::ports::{ConfigProvider, DocumentSource, Embedder, Pipeline, VectorStore};
pub use crate::utils::error::Result;
