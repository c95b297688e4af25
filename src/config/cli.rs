use crate::domain::ports::ConfigProvider;
use crate::utils::error::{IndexError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;

pub const PINECONE_API_KEY_VAR: &str = "PINECONE_API_KEY";

#[derive(Debug, Clone, Parser)]
#[command(name = "medbot-index")]
#[command(about = "Builds the Pinecone retrieval index for the medical chatbot")]
pub struct CliConfig {
    #[arg(long, default_value = "data")]
    pub data_dir: String,

    #[arg(long, default_value = "medical-chatbot")]
    pub index_name: String,

    #[arg(long, default_value = "https://api.pinecone.io")]
    pub controller_url: String,

    #[arg(long, default_value = "")]
    pub namespace: String,

    #[arg(long, default_value = "500")]
    pub chunk_size: usize,

    #[arg(long, default_value = "20")]
    pub chunk_overlap: usize,

    #[arg(long, default_value = "100")]
    pub batch_size: usize,

    #[arg(long, help = "Pinecone API key; falls back to the PINECONE_API_KEY variable")]
    pub api_key: Option<String>,

    #[arg(long, help = "Optional TOML config file overriding the defaults")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU/memory usage per stage")]
    pub monitor: bool,
}

impl CliConfig {
    /// Fill the API key from the environment when it was not passed as a
    /// flag. Call after `dotenvy::dotenv()` so `.env` files are seen.
    pub fn resolve_api_key(&mut self) {
        if self.api_key.is_none() {
            self.api_key = std::env::var(PINECONE_API_KEY_VAR).ok();
        }
    }

    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }
}

impl ConfigProvider for CliConfig {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn index_name(&self) -> &str {
        &self.index_name
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_dir", &self.data_dir)?;
        validation::validate_index_name("index_name", &self.index_name)?;
        validation::validate_url("controller_url", &self.controller_url)?;
        validation::validate_chunking(self.chunk_size, self.chunk_overlap)?;
        validation::validate_positive_number("batch_size", self.batch_size, 1)?;

        match &self.api_key {
            Some(key) => validation::validate_non_empty_string("api_key", key),
            None => Err(IndexError::MissingConfigError {
                field: PINECONE_API_KEY_VAR.to_string(),
            }),
        }
    }
}
