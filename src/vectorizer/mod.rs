pub mod analyzer;
pub mod corpus;
pub mod tfidf;
pub mod token;
pub mod evaluate;

use std::marker::PhantomData;

use indexmap::IndexSet;
use num::Float;
use rayon::prelude::*;

use crate::{
    config::VectorizerConfig,
    utils::math::vector::ZeroSpVec,
    vectorizer::{analyzer::Analyzer, corpus::CorpusStats, tfidf::{DefaultTFIDFEngine, TFIDFEngine}},
};

/// Fitted TF-IDF vector space
///
/// Holds the analyzer, the vocabulary (term -> column, columns in
/// lexicographic term order) and one IDF weight per column.
/// Once fitted the model is immutable: projecting new text never changes it.
///
/// `TFIDFVectorizer<N, E>` has the following generic parameters:
/// - `N`: weight type (f32, f64)
/// - `E`: TF-IDF calculation engine (e.g. `DefaultTFIDFEngine`)
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<N = f64, E = DefaultTFIDFEngine>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N>,
{
    analyzer: Analyzer,
    /// vocabulary, the index of a term is its column
    vocab: IndexSet<Box<str>>,
    /// IDF Vector, dense because every column has a weight
    idf: Vec<N>,
    /// number of documents the model was fitted on
    doc_num: u64,
    _marker: PhantomData<E>,
}

/// Per-document vectors, positionally aligned with the fitted documents
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusVectors<N = f64>
where
    N: Float,
{
    pub vectors: Vec<ZeroSpVec<N>>,
}

impl<N> CorpusVectors<N>
where
    N: Float,
{
    #[inline]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    #[inline]
    pub fn get(&self, pos: usize) -> Option<&ZeroSpVec<N>> {
        self.vectors.get(pos)
    }
}

impl<N, E> TFIDFVectorizer<N, E>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N>,
{
    /// Fit the vector space on `docs`
    pub fn fit<S>(docs: &[S], config: &VectorizerConfig) -> Self
    where
        S: AsRef<str> + Sync,
    {
        Self::fit_transform(docs, config).0
    }

    /// Fit the vector space on `docs` and return the vector of each document.
    ///
    /// An empty `docs`, or documents without a single usable term, fit an
    /// empty vocabulary; every vector is then the zero vector.
    pub fn fit_transform<S>(docs: &[S], config: &VectorizerConfig) -> (Self, CorpusVectors<N>)
    where
        S: AsRef<str> + Sync,
    {
        let analyzer = Analyzer::new(config);

        // 並列でトークン化 (順序は保持される)
        let freqs: Vec<_> = docs
            .par_iter()
            .map(|doc| analyzer.term_frequency(doc.as_ref()))
            .collect();

        let mut corpus = CorpusStats::new();
        for freq in &freqs {
            corpus.add_doc(freq);
        }

        let vocab: IndexSet<Box<str>> = corpus
            .select_vocabulary(config.max_features)
            .into_iter()
            .collect();
        let idf = E::idf_vec(&corpus, &vocab);

        tracing::debug!(
            docs = corpus.get_doc_num(),
            distinct_terms = corpus.vocab_size(),
            vocab = vocab.len(),
            "fitted tf-idf vector space"
        );

        let model = Self {
            analyzer,
            vocab,
            idf,
            doc_num: corpus.get_doc_num(),
            _marker: PhantomData,
        };

        let vectors = freqs
            .par_iter()
            .map(|freq| {
                let mut vec = E::tf_idf_vec(freq, &model.vocab, &model.idf);
                vec.shrink_to_fit();
                vec
            })
            .collect();

        (model, CorpusVectors { vectors })
    }

    /// Project `text` into the fitted space.
    /// Unknown terms are ignored; the model is never refitted.
    pub fn transform(&self, text: &str) -> ZeroSpVec<N> {
        let freq = self.analyzer.term_frequency(text);
        E::tf_idf_vec(&freq, &self.vocab, &self.idf)
    }

    /// Number of columns of the vector space
    #[inline]
    pub fn vocab_len(&self) -> usize {
        self.vocab.len()
    }

    /// Column of `term`, if it is part of the vocabulary
    #[inline]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocab.get_index_of(term)
    }

    /// Vocabulary in column order
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.vocab.iter().map(|t| t.as_ref())
    }

    /// IDF weight of `term`
    pub fn idf(&self, term: &str) -> Option<N> {
        self.term_index(term).and_then(|i| self.idf.get(i).copied())
    }

    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }
}
