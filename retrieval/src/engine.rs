//! The retrieval-augmented answer pipeline.

use std::sync::Arc;

use tracing::debug;

use folio_embeddings::{EmbeddingProvider, EphemeralIndex};
use folio_generation::AnswerProvider;
use folio_knowledge::{Chunk, WindowChunker};

use crate::config::RagConfig;
use crate::error::{Result, RetrievalError};

/// A retrieved chunk with its similarity to the question.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk.
    pub chunk: Chunk,

    /// Cosine similarity between the chunk and the question.
    pub score: f32,
}

/// The per-request answer pipeline.
///
/// Holds the knowledge text and the two provider capabilities; every call
/// to [`RagEngine::answer`] re-chunks the text, embeds chunks and question,
/// retrieves the closest chunks from a freshly built index, and asks the
/// answer provider for a grounded reply. The engine itself is immutable
/// and safe to share across concurrent requests.
pub struct RagEngine {
    knowledge: String,
    config: RagConfig,
    chunker: WindowChunker,
    embeddings: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn AnswerProvider>,
}

impl RagEngine {
    /// Create an engine over `knowledge` with the default configuration.
    pub fn new(
        knowledge: impl Into<String>,
        embeddings: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn AnswerProvider>,
    ) -> Self {
        Self::with_config(knowledge, embeddings, generator, RagConfig::default())
    }

    /// Create an engine with a custom pipeline configuration.
    pub fn with_config(
        knowledge: impl Into<String>,
        embeddings: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn AnswerProvider>,
        config: RagConfig,
    ) -> Self {
        Self {
            knowledge: knowledge.into(),
            config,
            chunker: WindowChunker::with_config(config.chunker()),
            embeddings,
            generator,
        }
    }

    /// The pipeline configuration.
    pub fn config(&self) -> RagConfig {
        self.config
    }

    /// Retrieve the chunks most similar to `question`, best first.
    ///
    /// Rebuilds the index from scratch: chunks the knowledge text, embeds
    /// the chunks in one batched provider call and the question in a
    /// second call, then ranks by cosine similarity.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<ScoredChunk>> {
        let question = question.trim();
        if question.is_empty() {
            return Err(RetrievalError::EmptyQuestion);
        }

        let chunks = self.chunker.chunk(&self.knowledge);
        debug!("split knowledge into {} chunks", chunks.len());
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
        let vectors = self.embeddings.embed_batch(&texts).await?;
        let question_vector = self.embeddings.embed(question).await?;

        let index = EphemeralIndex::build(chunks, vectors)?;
        let hits = index.query(&question_vector, self.config.top_k)?;
        debug!(
            "retrieved {} chunks, best score {:?}",
            hits.len(),
            hits.first().map(|hit| hit.score)
        );

        Ok(hits
            .into_iter()
            .map(|hit| ScoredChunk {
                chunk: hit.item.clone(),
                score: hit.score,
            })
            .collect())
    }

    /// Answer `question` from the knowledge text.
    ///
    /// Runs the full pipeline strictly in sequence: retrieve, then
    /// generate. Provider failures propagate; no retries are attempted.
    pub async fn answer(&self, question: &str) -> Result<String> {
        let retrieved = self.retrieve(question).await?;
        let context: Vec<String> = retrieved
            .into_iter()
            .map(|scored| scored.chunk.text)
            .collect();

        let answer = self.generator.generate(question.trim(), &context).await?;
        debug!("generated answer of {} chars", answer.len());
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use folio_embeddings::{Embedding, EmbeddingError};
    use folio_generation::GenerationError;

    /// Deterministic embedding: one dimension per keyword, valued by
    /// occurrence count in the lowercased text.
    struct KeywordEmbeddings;

    const KEYWORDS: [&str; 4] = ["know", "react", "node", "mushtaq"];

    #[async_trait]
    impl EmbeddingProvider for KeywordEmbeddings {
        fn name(&self) -> &str {
            "keyword-stub"
        }

        async fn embed(&self, text: &str) -> folio_embeddings::Result<Embedding> {
            let lower = text.to_lowercase();
            Ok(KEYWORDS
                .iter()
                .map(|keyword| lower.matches(keyword).count() as f32)
                .collect())
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    /// Echoes the number of passages it was grounded in.
    struct EchoGenerator;

    #[async_trait]
    impl AnswerProvider for EchoGenerator {
        fn name(&self) -> &str {
            "echo-stub"
        }

        async fn generate(
            &self,
            question: &str,
            context: &[String],
        ) -> folio_generation::Result<String> {
            Ok(format!(
                "answered {question:?} from {} passages",
                context.len()
            ))
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    struct FailingEmbeddings;

    #[async_trait]
    impl EmbeddingProvider for FailingEmbeddings {
        fn name(&self) -> &str {
            "failing-stub"
        }

        async fn embed(&self, _text: &str) -> folio_embeddings::Result<Embedding> {
            Err(EmbeddingError::ApiRequest("quota exhausted".to_string()))
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    fn engine(knowledge: &str) -> RagEngine {
        RagEngine::with_config(
            knowledge,
            Arc::new(KeywordEmbeddings),
            Arc::new(EchoGenerator),
            RagConfig::default().with_chunking(30, 6).with_top_k(2),
        )
    }

    #[tokio::test]
    async fn retrieves_the_relevant_chunk_first() {
        let engine = engine("Mushtaq is a developer. He knows React and Node.");

        let retrieved = engine.retrieve("What does he know?").await.unwrap();
        assert!(!retrieved.is_empty());
        assert!(retrieved.len() <= 2);
        assert!(
            retrieved[0].chunk.text.contains("React and Node"),
            "top chunk was {:?}",
            retrieved[0].chunk.text
        );
        for pair in retrieved.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn answers_with_a_non_empty_reply() {
        let engine = engine("Mushtaq is a developer. He knows React and Node.");

        let answer = engine.answer("What does he know?").await.unwrap();
        assert!(!answer.is_empty());
        assert!(answer.contains("passages"));
    }

    #[tokio::test]
    async fn empty_question_is_rejected() {
        let engine = engine("Some knowledge.");
        let result = engine.answer("   ").await;
        assert!(matches!(result, Err(RetrievalError::EmptyQuestion)));
    }

    #[tokio::test]
    async fn empty_knowledge_yields_no_context() {
        let engine = engine("");
        let retrieved = engine.retrieve("Anything?").await.unwrap();
        assert!(retrieved.is_empty());

        // Generation still runs, grounded in nothing.
        let answer = engine.answer("Anything?").await.unwrap();
        assert!(answer.contains("0 passages"));
    }

    #[tokio::test]
    async fn provider_failures_propagate() {
        let engine = RagEngine::new(
            "Some knowledge.",
            Arc::new(FailingEmbeddings),
            Arc::new(EchoGenerator),
        );

        let result = engine.answer("Anything?").await;
        assert!(matches!(
            result,
            Err(RetrievalError::Embedding(EmbeddingError::ApiRequest(_)))
        ));
    }

    #[tokio::test]
    async fn generation_failures_propagate() {
        struct FailingGenerator;

        #[async_trait]
        impl AnswerProvider for FailingGenerator {
            fn name(&self) -> &str {
                "failing-generator"
            }

            async fn generate(
                &self,
                _question: &str,
                _context: &[String],
            ) -> folio_generation::Result<String> {
                Err(GenerationError::ApiRequest("model overloaded".to_string()))
            }

            fn is_available(&self) -> bool {
                true
            }
        }

        let engine = RagEngine::new(
            "Some knowledge.",
            Arc::new(KeywordEmbeddings),
            Arc::new(FailingGenerator),
        );

        let result = engine.answer("Anything?").await;
        assert!(matches!(result, Err(RetrievalError::Generation(_))));
    }
}
