/// This crate is a symptom-based medicine recommender using a TF-IDF Vectorizer.
pub mod config;
pub mod dataset;
pub mod error;
pub mod recommend;
pub mod render;
pub mod utils;
pub mod vectorizer;

/// TF-IDF Vectorizer
/// The vector space model fitted over a corpus of documents.
///
/// Internally, it holds:
/// - The text analyzer (tokenizer, stop-words, n-grams)
/// - The capped vocabulary, in lexicographic column order
/// - A smoothed IDF weight per column
/// - A TF-IDF calculation engine
///
/// `TFIDFVectorizer<N, E>` has the following generic parameters:
/// - `N`: Vector parameter type (f32 or f64)
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
///
/// The model is immutable once fitted. Queries are projected with
/// `transform`, terms outside the vocabulary are ignored.
pub use vectorizer::TFIDFVectorizer;

/// Fitted document vectors
/// One L2-normalised sparse TF-IDF vector per corpus document, in corpus order.
pub use vectorizer::CorpusVectors;

/// Corpus statistics
/// Document count, per-term document frequency and corpus-wide term count.
/// Used for vocabulary selection and IDF calculation during fitting.
pub use vectorizer::corpus::CorpusStats;

/// Term Frequency structure
/// A struct for analyzing/managing term occurrence frequency within a document.
/// It manages:
/// - The count of occurrences of each term
/// - The total number of terms in the document
///
/// Used as base data for TF (Term Frequency) calculation.
pub use vectorizer::token::TermFrequency;

/// Text Analyzer
/// Lowercases, tokenizes into runs of two or more letters, digits or `_`,
/// drops English stop-words and forms word n-grams.
pub use vectorizer::analyzer::Analyzer;

/// TF IDF Calculation Engine Trait
/// A trait that defines the behavior of a TF-IDF calculation engine.
///
/// By implementing this trait, you can plug different TF-IDF calculation strategies
/// into `TFIDFVectorizer<E>`.
/// A default implementation, `DefaultTFIDFEngine`, is provided and performs
/// raw-count TF with smoothed IDF and L2 normalisation.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Search Hits
/// Holds `(position, score)` pairs and provides stable sorting by score,
/// truncation and threshold filtering.
/// Scores are dot products (linear kernel), equal to cosine similarity on
/// the normalised vectors.
pub use vectorizer::evaluate::scoring::Hits;

/// Sparse vector
/// Sorted-index sparse vector used for document and query vectors.
pub use utils::math::vector::ZeroSpVec;

/// Medicine record
/// One row of the dataset: name, indication and description.
pub use dataset::{load_records, Record};

/// Recommendation
/// - `Session`: a loaded dataset with its fitted model, owned by the caller
/// - `Match`: one recommended medicine with a 0..=100 score
/// - `build`/`rank`: the indexing and ranking steps behind a session
pub use recommend::{build, rank, Match, RankOptions, Session, VectorSpaceModel};

/// Configuration
pub use config::{Config, RankingConfig, VectorizerConfig};

/// Error type
pub use error::{Error, Result};
