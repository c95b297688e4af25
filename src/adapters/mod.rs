// Adapters layer: concrete implementations of the domain ports against
// external systems (filesystem PDFs, the embedding model, Pinecone).

pub mod embedder;
pub mod pdf_source;
pub mod pinecone;
