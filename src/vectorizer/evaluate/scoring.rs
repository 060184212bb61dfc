use std::fmt::Debug;

use num::Float;
use rayon::prelude::*;

use crate::{
    utils::math::vector::ZeroSpVec,
    vectorizer::{tfidf::TFIDFEngine, CorpusVectors, TFIDFVectorizer},
};

/// Structure to store scoring results
/// Each entry is (corpus position, score)
#[derive(Clone, PartialEq)]
pub struct Hits {
    pub list: Vec<(usize, f64)>,
}

impl Hits {
    pub fn new(list: Vec<(usize, f64)>) -> Self {
        Hits { list }
    }

    /// Sort results by descending score.
    /// The sort is stable: equal scores keep corpus order.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|(_, s)| !s.is_nan());
        self.list.sort_by(|a, b| b.1.total_cmp(&a.1));
        self
    }

    /// Keep the first `n` entries
    pub fn truncate(&mut self, n: usize) -> &mut Self {
        self.list.truncate(n);
        self
    }

    /// Keep entries whose score is at least `min_score`
    pub fn retain_min_score(&mut self, min_score: f64) -> &mut Self {
        self.list.retain(|(_, s)| *s >= min_score);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for (pos, score) in &self.list {
                writeln!(f, "    #{}: {:.6}", pos, score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

impl<N, E> TFIDFVectorizer<N, E>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N>,
{
    /// Score every corpus vector against an already projected query with
    /// the raw dot product (linear kernel). Both sides are unit length, so
    /// this is their cosine similarity.
    /// Hits come back in corpus order, one per vector.
    pub fn similarity(&self, query: &ZeroSpVec<N>, corpus: &CorpusVectors<N>) -> Hits {
        let list = corpus
            .vectors
            .par_iter()
            .enumerate()
            .map(|(pos, doc)| (pos, query.dot(doc).to_f64().unwrap_or(0.0)))
            .collect();
        Hits::new(list)
    }

    /// Project `text` and score it against `corpus`
    pub fn similarity_text(&self, text: &str, corpus: &CorpusVectors<N>) -> Hits {
        let query = self.transform(text);
        self.similarity(&query, corpus)
    }
}
