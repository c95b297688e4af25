use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional file-based configuration. Every field is optional; values
/// present in the file override CLI defaults, and CLI flags passed
/// explicitly still lose to the file (the file is the project's pinned
/// pipeline definition).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: Option<PipelineSection>,
    pub source: Option<SourceSection>,
    pub chunking: Option<ChunkingSection>,
    pub index: Option<IndexSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineSection {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSection {
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkingSection {
    pub chunk_size: Option<usize>,
    pub chunk_overlap: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexSection {
    pub name: Option<String>,
    pub controller_url: Option<String>,
    pub namespace: Option<String>,
    pub batch_size: Option<usize>,
}

impl TomlConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    #[cfg(feature = "cli")]
    pub fn apply_to(&self, config: &mut super::cli::CliConfig) {
        if let Some(source) = &self.source {
            if let Some(data_dir) = &source.data_dir {
                config.data_dir = data_dir.clone();
            }
        }

        if let Some(chunking) = &self.chunking {
            if let Some(chunk_size) = chunking.chunk_size {
                config.chunk_size = chunk_size;
            }
            if let Some(chunk_overlap) = chunking.chunk_overlap {
                config.chunk_overlap = chunk_overlap;
            }
        }

        if let Some(index) = &self.index {
            if let Some(name) = &index.name {
                config.index_name = name.clone();
            }
            if let Some(controller_url) = &index.controller_url {
                config.controller_url = controller_url.clone();
            }
            if let Some(namespace) = &index.namespace {
                config.namespace = namespace.clone();
            }
            if let Some(batch_size) = index.batch_size {
                config.batch_size = batch_size;
            }
        }
    }
}
