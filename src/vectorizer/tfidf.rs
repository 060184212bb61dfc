use indexmap::IndexSet;
use num::Float;

use crate::{utils::math::vector::ZeroSpVec, vectorizer::{corpus::CorpusStats, token::TermFrequency}};

/// TF-IDF calculation engine
///
/// Decides how term counts and corpus statistics become weights.
/// `TFIDFVectorizer<N, E>` is generic over the engine so other weighting
/// strategies can be plugged in.
pub trait TFIDFEngine<N>
where
    N: Float,
{
    /// IDF weight per vocabulary column
    /// # Arguments
    /// * `corpus` - corpus statistics of the fitted documents
    /// * `vocab` - fitted vocabulary in column order
    fn idf_vec(corpus: &CorpusStats, vocab: &IndexSet<Box<str>>) -> Vec<N>;

    /// Weighted, projected vector of one document.
    /// Terms outside `vocab` contribute nothing.
    fn tf_idf_vec(freq: &TermFrequency, vocab: &IndexSet<Box<str>>, idf: &[N]) -> ZeroSpVec<N>;
}

/// デフォルトの TF-IDF エンジン
///
/// - tf: raw count of the term in the document
/// - idf: smoothed, `ln((1 + n) / (1 + df)) + 1`
/// - every document vector is scaled to unit L2 norm
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    /// Smoothed inverse document frequency
    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

impl<N> TFIDFEngine<N> for DefaultTFIDFEngine
where
    N: Float,
{
    fn idf_vec(corpus: &CorpusStats, vocab: &IndexSet<Box<str>>) -> Vec<N> {
        let doc_num = corpus.get_doc_num();
        vocab
            .iter()
            .map(|term| {
                let idf = Self::idf_calc(doc_num, corpus.get_doc_freq(term));
                N::from(idf).unwrap_or_else(N::zero)
            })
            .collect()
    }

    fn tf_idf_vec(freq: &TermFrequency, vocab: &IndexSet<Box<str>>, idf: &[N]) -> ZeroSpVec<N> {
        let entries = freq.iter().filter_map(|(term, count)| {
            let col = vocab.get_index_of(term)?;
            let tf = N::from(count).unwrap_or_else(N::zero);
            Some((col, tf))
        });
        let mut vec = ZeroSpVec::from_entries(vocab.len(), entries);
        vec.hadamard_dense(idf);
        vec.l2_normalize();
        vec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> IndexSet<Box<str>> {
        terms.iter().map(|t| Box::<str>::from(*t)).collect()
    }

    #[test]
    fn smoothed_idf() {
        let mut corpus = CorpusStats::new();
        let mut a = TermFrequency::new();
        a.add_terms(&["fever", "pain"]);
        let mut b = TermFrequency::new();
        b.add_terms(&["pain"]);
        corpus.add_doc(&a);
        corpus.add_doc(&b);

        let idf: Vec<f64> = DefaultTFIDFEngine::idf_vec(&corpus, &vocab(&["fever", "pain"]));
        assert!((idf[0] - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
        assert!((idf[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tf_idf_vec_is_unit_length_and_ignores_unknown_terms() {
        let v = vocab(&["fever", "pain"]);
        let idf = vec![2.0f64, 1.0];
        let mut freq = TermFrequency::new();
        freq.add_terms(&["pain", "fever", "unknown", "pain"]);

        let vec = DefaultTFIDFEngine::tf_idf_vec(&freq, &v, &idf);
        // raw weights: fever 1*2, pain 2*1 -> equal after normalisation
        let expected = 1.0 / 2.0f64.sqrt();
        assert!((vec.get(0) - expected).abs() < 1e-12);
        assert!((vec.get(1) - expected).abs() < 1e-12);
        assert!((vec.norm() - 1.0).abs() < 1e-12);

        let mut unknown = TermFrequency::new();
        unknown.add_term("zzqqxx");
        assert_eq!(DefaultTFIDFEngine::tf_idf_vec(&unknown, &v, &idf).nnz(), 0);
    }
}
