use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    dataset::Record,
    recommend::indexer::VectorSpaceModel,
    vectorizer::CorpusVectors,
};

/// Default minimum raw similarity of a reported match
pub const DEFAULT_MIN_SCORE: f64 = 0.05;

/// One recommended medicine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub name: String,
    pub description: String,
    /// similarity as a percentage, rounded to 2 decimals
    pub score: f64,
}

/// Ranking parameters of a single call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankOptions {
    pub top_n: usize,
    pub min_score: f64,
}

impl RankOptions {
    pub fn new(top_n: usize) -> Self {
        Self {
            top_n,
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }
}

/// Raw 0..=1 similarity to a percentage with 2 decimals.
///
/// The exact binary value of `raw * 100` is rounded, so a product stored just
/// below `x.xx5` rounds down.
pub fn to_percent(raw: f64) -> f64 {
    let pct = raw * 100.0;
    // `{:.2}` of a finite f64 always parses back
    format!("{pct:.2}").parse().unwrap_or(pct)
}

/// Rank `records` against `query`.
///
/// Scores are raw dot products of the TF-IDF vectors. Positions are sorted
/// by descending score with ties in record order, truncated to `top_n` and
/// then filtered by `min_score`. An empty result is a normal outcome.
pub fn rank(
    query: &str,
    model: &VectorSpaceModel,
    records: &[Record],
    vectors: &CorpusVectors,
    options: RankOptions,
) -> Vec<Match> {
    debug_assert_eq!(records.len(), vectors.len());

    let mut hits = model.similarity_text(query, vectors);
    hits.sort_by_score_desc();
    hits.truncate(options.top_n).retain_min_score(options.min_score);
    debug!(query, top_n = options.top_n, matches = hits.len(), "ranked query");

    hits.list
        .into_iter()
        .filter_map(|(pos, raw)| {
            let record = records.get(pos)?;
            Some(Match {
                name: record.drug_name.clone(),
                description: record.description.clone(),
                score: to_percent(raw),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::VectorizerConfig, recommend::indexer::build};

    fn corpus() -> Vec<Record> {
        vec![
            Record::new(
                "ParacetamolX",
                Some("fever pain".into()),
                Some("reduces fever and mild pain".into()),
            ),
            Record::new(
                "AllergyRelief",
                Some("allergy sneezing".into()),
                Some("antihistamine for allergy symptoms".into()),
            ),
        ]
    }

    fn rank_with(records: &[Record], query: &str, options: RankOptions) -> Vec<Match> {
        let (model, vectors) = build(records, &VectorizerConfig::default());
        rank(query, &model, records, &vectors, options)
    }

    #[test]
    fn fever_query_prefers_fever_medicine() {
        let records = corpus();
        let matches = rank_with(&records, "fever and headache", RankOptions::new(2));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "ParacetamolX");
        assert_eq!(matches[0].description, "reduces fever and mild pain");
        assert!(matches[0].score > 0.0 && matches[0].score <= 100.0);
    }

    #[test]
    fn unknown_terms_give_no_matches() {
        let records = corpus();
        assert!(rank_with(&records, "zzqqxx nonsense term", RankOptions::new(5)).is_empty());
    }

    #[test]
    fn null_reason_is_indexed_as_empty() {
        let records = vec![Record::new("Balm", None, Some("pain relief".into()))];
        let matches = rank_with(&records, "pain", RankOptions::new(5));
        assert_eq!(matches.len(), 1);
        assert!(matches[0].score > 0.0);
    }

    #[test]
    fn top_n_limits_results() {
        let records = vec![
            Record::new("A", Some("cough".into()), Some("dry cough syrup".into())),
            Record::new("B", Some("cough".into()), Some("cough lozenge".into())),
        ];
        let matches = rank_with(&records, "cough", RankOptions::new(1));
        assert_eq!(matches.len(), 1);
        let both = rank_with(&records, "cough", RankOptions::new(2));
        assert_eq!(both.len(), 2);
        assert_eq!(matches[0], both[0]);
        assert!(both[0].score >= both[1].score);
    }

    #[test]
    fn equal_scores_keep_record_order() {
        let records = vec![
            Record::new("First", Some("nausea".into()), None),
            Record::new("Second", Some("nausea".into()), None),
            Record::new("Third", Some("nausea".into()), None),
        ];
        let names: Vec<String> = rank_with(&records, "nausea", RankOptions::new(3))
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn threshold_drops_weak_matches_inside_window() {
        let records = vec![
            Record::new("Weak", Some("rash".into()), Some("skin cream".into())),
            Record::new("Other", Some("itch".into()), None),
        ];
        let (model, vectors) = build(&records, &VectorizerConfig::default());
        let matches = rank("rash", &model, &records, &vectors, RankOptions::new(1));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Weak");

        let strict = RankOptions::new(1).with_min_score(0.9);
        assert!(rank("rash", &model, &records, &vectors, strict).is_empty());
    }

    #[test]
    fn single_term_document_scores_hundred() {
        let records = vec![
            Record::new("Low", Some("headache".into()), Some("relief tablet with caffeine and aspirin".into())),
            Record::new("None", Some("acne".into()), None),
            Record::new("High", Some("headache".into()), None),
        ];
        let (model, vectors) = build(&records, &VectorizerConfig::default());
        let matches = rank("headache", &model, &records, &vectors, RankOptions::new(3));
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].name, "High");
        assert_eq!(matches[0].score, 100.0);
        assert_eq!(matches[1].name, "Low");
        assert!(matches[1].score < 100.0);
    }

    #[test]
    fn empty_corpus_returns_nothing() {
        let records: Vec<Record> = Vec::new();
        assert!(rank_with(&records, "fever", RankOptions::new(5)).is_empty());
    }

    #[test]
    fn repeated_builds_rank_identically() {
        let records = corpus();
        let first = rank_with(&records, "allergy fever pain", RankOptions::new(2));
        let second = rank_with(&records, "allergy fever pain", RankOptions::new(2));
        assert_eq!(first, second);
        assert!(first.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(first.iter().all(|m| m.score >= 5.0 && m.score <= 100.0));
    }

    #[test]
    fn record_without_text_fields_is_indexed() {
        let records = vec![
            Record::new("Empty", None, None),
            Record::new("Balm", None, Some("pain relief".into())),
        ];
        assert_eq!(records[1].full_text(), " pain relief");
        let matches = rank_with(&records, "pain", RankOptions::new(5));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Balm");
    }

    #[test]
    fn percent_rounding() {
        assert_eq!(to_percent(0.123456), 12.35);
        assert_eq!(to_percent(1.0000000000000002), 100.0);
        assert_eq!(to_percent(0.0), 0.0);
        // 0.05005 * 100 is stored just below 5.005
        assert_eq!(to_percent(0.05005), 5.0);
        assert_eq!(to_percent(0.2), 20.0);
    }
}
