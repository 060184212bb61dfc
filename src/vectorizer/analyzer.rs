//! Text analysis: lowercasing, word tokenization, stop-word removal and
//! n-gram expansion.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::VectorizerConfig;
use crate::vectorizer::token::TermFrequency;

/// Maximal runs of two or more letters, digits or `_`.
/// Combining marks are not word characters, so they split a run.
const TOKEN_PATTERN: &str = r"[\p{L}\p{N}_]{2,}";

/// English stop-word list, sorted for binary search
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
}

#[inline]
pub fn is_stop_word(word: &str) -> bool {
    ENGLISH_STOP_WORDS.binary_search(&word).is_ok()
}

/// Turns raw text into the feature stream counted by the vectorizer.
///
/// The same analyzer is used for corpus documents and for queries, so both
/// land in the same feature space.
#[derive(Debug, Clone, PartialEq)]
pub struct Analyzer {
    ngram_range: (usize, usize),
    stop_words: bool,
}

impl Analyzer {
    pub fn new(config: &VectorizerConfig) -> Self {
        Self {
            ngram_range: config.ngram_range,
            stop_words: config.stop_words,
        }
    }

    /// Lowercased word tokens, stop-words removed when enabled
    pub fn words(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        token_regex()
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|w| !(self.stop_words && is_stop_word(w)))
            .map(str::to_string)
            .collect()
    }

    /// Features of `text`: all n-grams in the configured range, built over
    /// the stop-word filtered word stream and joined by a single space.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let words = self.words(text);
        let (min_n, max_n) = self.ngram_range;
        if min_n == 1 && max_n == 1 {
            return words;
        }

        let mut features = Vec::new();
        let upper = max_n.min(words.len());
        for n in min_n..=upper {
            for window in words.windows(n) {
                features.push(window.join(" "));
            }
        }
        features
    }

    /// Count the features of `text`
    pub fn term_frequency(&self, text: &str) -> TermFrequency {
        let mut freq = TermFrequency::new();
        freq.add_terms(&self.analyze(text));
        freq
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&VectorizerConfig::default())
    }
}
