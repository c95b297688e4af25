use crate::domain::model::SourceDocument;
use crate::domain::ports::DocumentSource;
use crate::utils::error::{IndexError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Reads every `*.pdf` file in a directory and extracts its text.
pub struct PdfDirectorySource {
    dir: PathBuf,
}

impl PdfDirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// All PDF paths in the directory, sorted for a deterministic
    /// ingestion order. Extension matching is case-insensitive.
    fn pdf_paths(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_pdf = path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            if is_pdf {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

#[async_trait]
impl DocumentSource for PdfDirectorySource {
    async fn load(&self) -> Result<Vec<SourceDocument>> {
        let paths = self.pdf_paths()?;
        if paths.is_empty() {
            return Err(IndexError::ProcessingError {
                message: format!("No PDF files found under {}", self.dir.display()),
            });
        }

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            tracing::debug!("Extracting text from {}", path.display());
            let raw = pdf_extract::extract_text(&path).map_err(|e| IndexError::PdfError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            documents.push(SourceDocument {
                source: path.display().to_string(),
                text: normalize_text(&raw),
            });
        }

        Ok(documents)
    }
}

fn dehyphenation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\p{L})-\s*\n\s*(\p{L})").expect("valid regex"))
}

fn space_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\x0b\x0c\r]+").expect("valid regex"))
}

fn blank_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("valid regex"))
}

/// Clean up extractor artifacts: re-join words hyphenated across line
/// breaks, collapse runs of spaces, and cap blank-line runs at one so
/// paragraph boundaries survive for the splitter.
fn normalize_text(raw: &str) -> String {
    let text = dehyphenation_re().replace_all(raw, "$1$2");
    let text = space_run_re().replace_all(&text, " ");
    let text = blank_run_re().replace_all(&text, "\n\n");
    text.trim().to_string()
}
