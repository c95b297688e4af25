pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::toml_config::TomlConfig;

pub use adapters::embedder::{FastEmbedder, EMBEDDING_DIMENSION};
pub use adapters::pdf_source::PdfDirectorySource;
pub use adapters::pinecone::{PineconeStore, DEFAULT_CONTROLLER_URL};
pub use crate::core::pipeline::{AUTHOR_ATTRIBUTION, AUTHOR_RECORD_ID, AUTHOR_SOURCE};
pub use crate::core::{
    etl::IndexEngine, pipeline::IndexPipeline, splitter::RecursiveCharacterSplitter,
};
pub use domain::model::{
    ChunkMetadata, DocumentChunk, IndexReport, SourceDocument, TransformResult, VectorRecord,
};
pub use domain::ports::{ConfigProvider, DocumentSource, Embedder, Pipeline, VectorStore};
pub use utils::error::{IndexError, Result};
