use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::vectorizer::token::TermFrequency;

/// Corpus-wide term statistics gathered while fitting.
///
/// It does not store document text; it only keeps:
/// - the number of documents
/// - the number of documents each term appears in (document frequency)
/// - the total occurrences of each term over all documents
#[derive(Debug, Clone, Default)]
pub struct CorpusStats {
    doc_num: u64,
    term_stats: IndexMap<Box<str>, TermStat>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermStat {
    /// documents containing the term
    pub doc_freq: u64,
    /// occurrences over the whole corpus
    pub total_count: u64,
}

impl CorpusStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one document's term counts
    pub fn add_doc(&mut self, freq: &TermFrequency) {
        self.doc_num += 1;
        for (term, count) in freq.iter() {
            let stat = self.term_stats.entry(Box::from(term)).or_default();
            stat.doc_freq += 1;
            stat.total_count += count as u64;
        }
    }

    /// Number of documents added
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Documents containing `term`
    #[inline]
    pub fn get_doc_freq(&self, term: &str) -> u64 {
        self.term_stats.get(term).map_or(0, |s| s.doc_freq)
    }

    /// Occurrences of `term` over the whole corpus
    #[inline]
    pub fn get_total_count(&self, term: &str) -> u64 {
        self.term_stats.get(term).map_or(0, |s| s.total_count)
    }

    /// Number of distinct terms seen
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_stats.len()
    }

    /// Pick the vocabulary of the fitted model.
    ///
    /// When more than `max_features` terms exist, the terms with the highest
    /// corpus-wide count win, ties resolved by lexicographic order.
    /// The result is always returned in lexicographic order, which is the
    /// column order of the vector space.
    pub fn select_vocabulary(&self, max_features: usize) -> Vec<Box<str>> {
        let mut terms: Vec<(&Box<str>, &TermStat)> = self.term_stats.iter().collect();
        if terms.len() > max_features {
            terms.sort_by(|a, b| match b.1.total_count.cmp(&a.1.total_count) {
                Ordering::Equal => a.0.cmp(b.0),
                other => other,
            });
            terms.truncate(max_features);
        }
        let mut vocab: Vec<Box<str>> = terms.into_iter().map(|(t, _)| t.clone()).collect();
        vocab.sort();
        vocab
    }
}
