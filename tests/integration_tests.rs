use async_trait::async_trait;
use httpmock::prelude::*;
use medbot_index::{
    ConfigProvider, DocumentSource, Embedder, IndexEngine, IndexError, IndexPipeline,
    PineconeStore, Result, SourceDocument,
};

struct StaticSource {
    docs: Vec<SourceDocument>,
}

#[async_trait]
impl DocumentSource for StaticSource {
    async fn load(&self) -> Result<Vec<SourceDocument>> {
        Ok(self.docs.clone())
    }
}

struct StubEmbedder;

impl Embedder for StubEmbedder {
    fn dimension(&self) -> usize {
        8
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| vec![t.len() as f32; 8]).collect())
    }
}

struct TestConfig;

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
        500
    }
    fn chunk_overlap(&self) -> usize {
        20
    }
    fn batch_size(&self) -> usize {
        100
    }
}

fn docs() -> Vec<SourceDocument> {
    vec![
        SourceDocument {
            source: "data/gale_encyclopedia.pdf".to_string(),
            text: "Acetaminophen is used to treat mild pain and fever.".to_string(),
        },
        SourceDocument {
            source: "data/clinical_notes.pdf".to_string(),
            text: "Hypertension management starts with lifestyle changes.".to_string(),
        },
    ]
}

fn store_for(server: &MockServer) -> PineconeStore {
    PineconeStore::new(server.base_url(), "test-key", "medical-chatbot", "")
}

#[tokio::test]
async fn test_full_run_creates_index_and_upserts_all_chunks() {
    let server = MockServer::start();

    let describe_mock = server.mock(|when, then| {
        when.method(GET).path("/indexes/medical-chatbot");
        then.status(404);
    });

    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/indexes")
            .header("Api-Key", "test-key")
            .json_body_partial(r#"{"name": "medical-chatbot", "dimension": 8, "metric": "cosine"}"#);
        then.status(201).json_body(serde_json::json!({
            "name": "medical-chatbot",
            "dimension": 8,
            "metric": "cosine",
            "host": server.base_url()
        }));
    });

    let upsert_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/vectors/upsert")
            .header("Api-Key", "test-key");
        then.status(200)
            .json_body(serde_json::json!({"upsertedCount": 2}));
    });

    let pipeline = IndexPipeline::new(
        StaticSource { docs: docs() },
        StubEmbedder,
        store_for(&server),
        TestConfig,
    );
    let mut engine = IndexEngine::new(pipeline);
    let report = engine.run().await.unwrap();

    // Both documents fit into a single chunk each at chunk_size 500.
    assert!(report.index_created);
    assert_eq!(report.chunks_upserted, 2);
    assert!(report.author_record_added);

    describe_mock.assert();
    create_mock.assert();
    // One batched chunk upsert plus the author-attribution upsert.
    assert_eq!(upsert_mock.hits(), 2);
}

#[tokio::test]
async fn test_full_run_does_not_recreate_existing_index() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/indexes/medical-chatbot");
        then.status(200).json_body(serde_json::json!({
            "name": "medical-chatbot",
            "dimension": 8,
            "metric": "cosine",
            "host": server.base_url()
        }));
    });

    let create_mock = server.mock(|when, then| {
        when.method(POST).path("/indexes");
        then.status(201);
    });

    let upsert_mock = server.mock(|when, then| {
        when.method(POST).path("/vectors/upsert");
        then.status(200)
            .json_body(serde_json::json!({"upsertedCount": 2}));
    });

    let pipeline = IndexPipeline::new(
        StaticSource { docs: docs() },
        StubEmbedder,
        store_for(&server),
        TestConfig,
    );
    let mut engine = IndexEngine::new(pipeline);
    let report = engine.run().await.unwrap();

    assert!(!report.index_created);
    assert_eq!(report.chunks_upserted, 2);
    assert_eq!(create_mock.hits(), 0);
    assert_eq!(upsert_mock.hits(), 2);
}

#[tokio::test]
async fn test_full_run_fails_when_upsert_is_rejected() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/indexes/medical-chatbot");
        then.status(200).json_body(serde_json::json!({
            "name": "medical-chatbot",
            "dimension": 8,
            "metric": "cosine",
            "host": server.base_url()
        }));
    });

    server.mock(|when, then| {
        when.method(POST).path("/vectors/upsert");
        then.status(403).body("quota exceeded");
    });

    let pipeline = IndexPipeline::new(
        StaticSource { docs: docs() },
        StubEmbedder,
        store_for(&server),
        TestConfig,
    );
    let mut engine = IndexEngine::new(pipeline);
    let err = engine.run().await.unwrap_err();

    assert!(matches!(err, IndexError::StoreError { status: 403, .. }));
}

#[tokio::test]
async fn test_full_run_fails_with_empty_corpus_before_touching_the_index() {
    let server = MockServer::start();

    let describe_mock = server.mock(|when, then| {
        when.method(GET).path("/indexes/medical-chatbot");
        then.status(404);
    });

    let pipeline = IndexPipeline::new(
        StaticSource { docs: vec![] },
        StubEmbedder,
        store_for(&server),
        TestConfig,
    );
    let mut engine = IndexEngine::new(pipeline);
    let err = engine.run().await.unwrap_err();

    assert!(matches!(err, IndexError::ProcessingError { .. }));
    assert_eq!(describe_mock.hits(), 0);
}
