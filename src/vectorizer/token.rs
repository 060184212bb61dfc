use indexmap::IndexMap;

/// TermFrequency 構造体
/// Counts how often each term (feature) occurs in one document.
///
/// Terms keep their first-seen order, which keeps iteration deterministic.
///
/// # Examples
/// ```
/// use healthassist::TermFrequency;
/// let mut freq = TermFrequency::new();
/// freq.add_terms(&["fever", "pain", "fever"]);
/// assert_eq!(freq.term_count("fever"), 2);
/// assert_eq!(freq.term_sum(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    term_count: IndexMap<String, u32>,
    total_term_count: u64,
}

impl TermFrequency {
    pub fn new() -> Self {
        Self {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Add one occurrence of `term`
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        match self.term_count.get_mut(term) {
            Some(count) => *count += 1,
            None => {
                self.term_count.insert(term.to_string(), 1);
            }
        }
        self.total_term_count += 1;
        self
    }

    /// Add one occurrence of every term in `terms`
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Occurrences of `term`, 0 when absent
    #[inline]
    pub fn term_count(&self, term: &str) -> u32 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Total number of term occurrences
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    /// Iterate `(term, count)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.term_count.iter().map(|(t, &c)| (t.as_str(), c))
    }
}
