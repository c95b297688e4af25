use crate::domain::ports::Embedder;
use crate::utils::error::{IndexError, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

/// Output width of all-MiniLM-L6-v2; the index is created with this
/// dimension.
pub const EMBEDDING_DIMENSION: usize = 384;

/// Local sentence-transformer inference via fastembed. The model is
/// downloaded on first use and cached on disk afterwards.
pub struct FastEmbedder {
    model: TextEmbedding,
}

impl FastEmbedder {
    pub fn new() -> Result<Self> {
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(true),
        )
        .map_err(|e| IndexError::EmbeddingError {
            message: e.to_string(),
        })?;

        Ok(Self { model })
    }
}

impl Embedder for FastEmbedder {
    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.model
            .embed(texts.to_vec(), None)
            .map_err(|e| IndexError::EmbeddingError {
                message: e.to_string(),
            })
    }
}
