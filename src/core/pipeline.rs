use crate::core::splitter::RecursiveCharacterSplitter;
use crate::core::{
    ChunkMetadata, ConfigProvider, DocumentChunk, DocumentSource, Embedder, IndexReport, Pipeline,
    SourceDocument, TransformResult, VectorRecord, VectorStore,
};
use crate::utils::error::{IndexError, Result};
use uuid::Uuid;

/// Id of the attribution record so reruns overwrite it instead of piling
/// up duplicates.
pub const AUTHOR_RECORD_ID: &str = "author-attribution";

pub const AUTHOR_ATTRIBUTION: &str = "Surya Potnuru is a GenAI developer, Works in Bobble AI. \
having 2yrs+ experience author of this medical chatbot";

pub const AUTHOR_SOURCE: &str = "personal";

/// The one-shot indexing pipeline: PDFs in, vectors out.
///
/// Extract pulls documents from the source, transform splits them into
/// chunks, load ensures the remote index exists and upserts embedded
/// chunks in batches, finishing with the author-attribution record.
pub struct IndexPipeline<S, E, V, C> {
    source: S,
    embedder: E,
    store: V,
    config: C,
}

impl<S, E, V, C> IndexPipeline<S, E, V, C>
where
    S: DocumentSource,
    E: Embedder,
    V: VectorStore,
    C: ConfigProvider,
{
    pub fn new(source: S, embedder: E, store: V, config: C) -> Self {
        Self {
            source,
            embedder,
            store,
            config,
        }
    }

    fn embed_batch(&self, chunks: &[DocumentChunk]) -> Result<Vec<VectorRecord>> {
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed(&texts)?;

        if vectors.len() != chunks.len() {
            return Err(IndexError::ProcessingError {
                message: format!(
                    "Embedder returned {} vectors for {} chunks",
                    vectors.len(),
                    chunks.len()
                ),
            });
        }

        let dimension = self.embedder.dimension();
        let mut records = Vec::with_capacity(chunks.len());
        for (chunk, values) in chunks.iter().zip(vectors) {
            if values.len() != dimension {
                return Err(IndexError::ProcessingError {
                    message: format!(
                        "Embedding dimension {} does not match index dimension {}",
                        values.len(),
                        dimension
                    ),
                });
            }
            records.push(VectorRecord {
                id: chunk.id.clone(),
                values,
                metadata: ChunkMetadata {
                    source: chunk.source.clone(),
                    text: chunk.text.clone(),
                },
            });
        }
        Ok(records)
    }

    fn author_record(&self) -> Result<VectorRecord> {
        let mut vectors = self.embedder.embed(&[AUTHOR_ATTRIBUTION.to_string()])?;
        let values = vectors.pop().ok_or_else(|| IndexError::ProcessingError {
            message: "Embedder returned no vector for the author record".to_string(),
        })?;

        Ok(VectorRecord {
            id: AUTHOR_RECORD_ID.to_string(),
            values,
            metadata: ChunkMetadata {
                source: AUTHOR_SOURCE.to_string(),
                text: AUTHOR_ATTRIBUTION.to_string(),
            },
        })
    }
}

#[async_trait::async_trait]
impl<S, E, V, C> Pipeline for IndexPipeline<S, E, V, C>
where
    S: DocumentSource,
    E: Embedder,
    V: VectorStore,
    C: ConfigProvider,
{
    async fn extract(&self) -> Result<Vec<SourceDocument>> {
        tracing::debug!("Loading documents from: {}", self.config.data_dir());
        self.source.load().await
    }

    async fn transform(&self, data: Vec<SourceDocument>) -> Result<TransformResult> {
        let documents_in = data.len();
        let splitter = RecursiveCharacterSplitter::new(
            self.config.chunk_size(),
            self.config.chunk_overlap(),
        );

        let mut chunks = Vec::new();
        for doc in data {
            let text = doc.text.trim();
            if text.is_empty() {
                tracing::warn!("Skipping document with no extractable text: {}", doc.source);
                continue;
            }

            for piece in splitter.split(text) {
                chunks.push(DocumentChunk {
                    id: Uuid::new_v4().to_string(),
                    source: doc.source.clone(),
                    text: piece,
                });
            }
        }

        if chunks.is_empty() {
            return Err(IndexError::ProcessingError {
                message: "No chunks produced; nothing to index".to_string(),
            });
        }

        Ok(TransformResult {
            chunks,
            documents_in,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<IndexReport> {
        let dimension = self.embedder.dimension();
        let created = self.store.ensure_index(dimension).await?;
        if created {
            tracing::info!(
                "Created index '{}' (dimension {})",
                self.config.index_name(),
                dimension
            );
        } else {
            tracing::info!("Index '{}' already exists", self.config.index_name());
        }

        let batch_size = self.config.batch_size().max(1);
        let mut chunks_upserted = 0;

        for batch in result.chunks.chunks(batch_size) {
            let records = self.embed_batch(batch)?;
            let acknowledged = self.store.upsert(&records).await?;
            tracing::debug!(
                "Upserted batch of {} vectors ({} acknowledged)",
                records.len(),
                acknowledged
            );
            chunks_upserted += records.len();
        }

        let author = self.author_record()?;
        self.store.upsert(std::slice::from_ref(&author)).await?;
        tracing::debug!("Appended author attribution record");

        Ok(IndexReport {
            index_created: created,
            chunks_upserted,
            author_record_added: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct StaticSource {
        docs: Vec<SourceDocument>,
    }

    #[async_trait::async_trait]
    impl DocumentSource for StaticSource {
        async fn load(&self) -> Result<Vec<SourceDocument>> {
            Ok(self.docs.clone())
        }
    }

    struct StubEmbedder {
        dimension: usize,
    }

    impl Embedder for StubEmbedder {
        fn dimension(&self) -> usize {
            self.dimension
        }

        fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| vec![t.len() as f32; self.dimension])
                .collect())
        }
    }

    /// Embedder whose output length never matches its declared dimension.
    struct BrokenEmbedder;

    impl Embedder for BrokenEmbedder {
        fn dimension(&self) -> usize {
            8
        }

        fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![0.0; 3]).collect())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingStore {
        exists: bool,
        ensure_calls: Arc<Mutex<Vec<usize>>>,
        upserts: Arc<Mutex<Vec<Vec<VectorRecord>>>>,
    }

    #[async_trait::async_trait]
    impl VectorStore for RecordingStore {
        async fn ensure_index(&self, dimension: usize) -> Result<bool> {
            self.ensure_calls.lock().unwrap().push(dimension);
            Ok(!self.exists)
        }

        async fn upsert(&self, records: &[VectorRecord]) -> Result<usize> {
            self.upserts.lock().unwrap().push(records.to_vec());
            Ok(records.len())
        }
    }

    struct TestConfig {
        chunk_size: usize,
        chunk_overlap: usize,
        batch_size: usize,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                chunk_size: 500,
                chunk_overlap: 20,
                batch_size: 100,
            }
        }
    }

    impl ConfigProvider for TestConfig {
        fn data_dir(&self) -> &str {
            "data"
        }
        fn index_name(&self) -> &str {
            "medical-chatbot"
        }
        fn namespace(&self) -> &str {
            ""
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

    fn doc(source: &str, text: &str) -> SourceDocument {
        SourceDocument {
            source: source.to_string(),
            text: text.to_string(),
        }
    }

    fn pipeline_with(
        docs: Vec<SourceDocument>,
        store: RecordingStore,
        config: TestConfig,
    ) -> IndexPipeline<StaticSource, StubEmbedder, RecordingStore, TestConfig> {
        IndexPipeline::new(
            StaticSource { docs },
            StubEmbedder { dimension: 8 },
            store,
            config,
        )
    }

    #[tokio::test]
    async fn test_transform_splits_documents_into_chunks() {
        let long_text = "The patient presents with persistent cough. ".repeat(30);
        let docs = vec![doc("data/gale.pdf", &long_text), doc("data/other.pdf", "Short note.")];
        let pipeline = pipeline_with(
            docs,
            RecordingStore::default(),
            TestConfig {
                chunk_size: 200,
                chunk_overlap: 20,
                batch_size: 100,
            },
        );

        let raw = pipeline.extract().await.unwrap();
        let result = pipeline.transform(raw).await.unwrap();

        assert_eq!(result.documents_in, 2);
        assert!(result.chunks.len() > 2);
        assert!(result.chunks.iter().all(|c| !c.text.trim().is_empty()));
        assert!(result.chunks.iter().any(|c| c.source == "data/gale.pdf"));
        assert!(result.chunks.iter().any(|c| c.source == "data/other.pdf"));

        // Every chunk gets a unique id.
        let mut ids: Vec<&str> = result.chunks.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), result.chunks.len());
    }

    #[tokio::test]
    async fn test_transform_drops_empty_documents() {
        let docs = vec![doc("data/empty.pdf", "   \n "), doc("data/real.pdf", "Some content.")];
        let pipeline = pipeline_with(docs, RecordingStore::default(), TestConfig::default());

        let raw = pipeline.extract().await.unwrap();
        let result = pipeline.transform(raw).await.unwrap();

        assert_eq!(result.documents_in, 2);
        assert_eq!(result.chunks.len(), 1);
        assert_eq!(result.chunks[0].source, "data/real.pdf");
    }

    #[tokio::test]
    async fn test_transform_fails_when_nothing_to_index() {
        let pipeline = pipeline_with(
            vec![doc("data/empty.pdf", "")],
            RecordingStore::default(),
            TestConfig::default(),
        );

        let err = pipeline.transform(vec![doc("x.pdf", " ")]).await.unwrap_err();
        assert!(matches!(err, IndexError::ProcessingError { .. }));
    }

    #[tokio::test]
    async fn test_load_upserts_every_chunk_and_appends_author_record() {
        let store = RecordingStore::default();
        let pipeline = pipeline_with(
            vec![],
            store.clone(),
            TestConfig {
                chunk_size: 500,
                chunk_overlap: 20,
                batch_size: 2,
            },
        );

        let chunks: Vec<DocumentChunk> = (0..5)
            .map(|i| DocumentChunk {
                id: format!("chunk-{}", i),
                source: "data/gale.pdf".to_string(),
                text: format!("chunk text {}", i),
            })
            .collect();

        let report = pipeline
            .load(TransformResult {
                chunks: chunks.clone(),
                documents_in: 1,
            })
            .await
            .unwrap();

        assert_eq!(report.chunks_upserted, 5);
        assert!(report.author_record_added);
        assert!(report.index_created);

        // Index created with the embedder's dimension, exactly once.
        assert_eq!(*store.ensure_calls.lock().unwrap(), vec![8]);

        let upserts = store.upserts.lock().unwrap();
        // 5 chunks at batch_size 2 -> 3 batches, plus the author record.
        assert_eq!(upserts.len(), 4);

        let chunk_records: Vec<&VectorRecord> =
            upserts[..3].iter().flatten().collect();
        assert_eq!(chunk_records.len(), 5);
        for (record, chunk) in chunk_records.iter().zip(&chunks) {
            assert_eq!(record.id, chunk.id);
            assert_eq!(record.metadata.text, chunk.text);
            assert_eq!(record.metadata.source, chunk.source);
            assert_eq!(record.values.len(), 8);
        }

        let last = upserts.last().unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].id, AUTHOR_RECORD_ID);
        assert_eq!(last[0].metadata.source, AUTHOR_SOURCE);
        assert_eq!(last[0].metadata.text, AUTHOR_ATTRIBUTION);
    }

    #[tokio::test]
    async fn test_load_does_not_recreate_existing_index() {
        let store = RecordingStore {
            exists: true,
            ..Default::default()
        };
        let pipeline = pipeline_with(vec![], store.clone(), TestConfig::default());

        let report = pipeline
            .load(TransformResult {
                chunks: vec![DocumentChunk {
                    id: "chunk-0".to_string(),
                    source: "data/gale.pdf".to_string(),
                    text: "text".to_string(),
                }],
                documents_in: 1,
            })
            .await
            .unwrap();

        assert!(!report.index_created);
        assert_eq!(report.chunks_upserted, 1);
        assert!(report.author_record_added);
    }

    #[tokio::test]
    async fn test_load_rejects_dimension_mismatch() {
        let store = RecordingStore::default();
        let pipeline = IndexPipeline::new(
            StaticSource { docs: vec![] },
            BrokenEmbedder,
            store.clone(),
            TestConfig::default(),
        );

        let err = pipeline
            .load(TransformResult {
                chunks: vec![DocumentChunk {
                    id: "chunk-0".to_string(),
                    source: "data/gale.pdf".to_string(),
                    text: "text".to_string(),
                }],
                documents_in: 1,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, IndexError::ProcessingError { .. }));
        // Nothing was upserted after the mismatch was detected.
        assert!(store.upserts.lock().unwrap().is_empty());
    }
}
