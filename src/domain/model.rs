use serde::{Deserialize, Serialize};

/// A source document reduced to the fields the index cares about: the
/// extracted text and the path it came from. All other PDF metadata is
/// dropped at extraction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    pub source: String,
    pub text: String,
}

/// One splitter-produced slice of a document, sized for the embedding
/// model's input limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: String,
    pub source: String,
    pub text: String,
}

/// Metadata stored alongside each vector so the serving side can show
/// the retrieved context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkMetadata {
    pub source: String,
    pub text: String,
}

/// A vector ready for upsert into the remote index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: ChunkMetadata,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub chunks: Vec<DocumentChunk>,
    pub documents_in: usize,
}

/// Outcome of the load stage, reported by the engine at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexReport {
    pub index_created: bool,
    pub chunks_upserted: usize,
    pub author_record_added: bool,
}
