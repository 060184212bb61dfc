use std::path::Path;

use crate::{
    config::{Config, RankingConfig, VectorizerConfig},
    dataset::{load_records, Record},
    error::{Error, Result},
    recommend::{
        indexer::{build, VectorSpaceModel},
        ranker::{rank, Match, RankOptions},
    },
    vectorizer::CorpusVectors,
};

/// One loaded dataset and its fitted vector space.
///
/// A session is owned by its caller and never shared; loading another
/// dataset means building a new session.
#[derive(Debug, Clone)]
pub struct Session {
    records: Vec<Record>,
    model: VectorSpaceModel,
    vectors: CorpusVectors,
    ranking: RankingConfig,
}

impl Session {
    /// Index `records` with the given configuration
    pub fn from_records(records: Vec<Record>, config: &Config) -> Result<Self> {
        config.validate()?;
        let (model, vectors) = build(&records, &config.vectorizer);
        Ok(Self {
            records,
            model,
            vectors,
            ranking: config.ranking.clone(),
        })
    }

    /// Load a dataset file and index it
    pub fn load<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self> {
        let records = load_records(path)?;
        Self::from_records(records, config)
    }

    /// Recommend up to `top_n` medicines for `query`.
    ///
    /// Blank queries are rejected with [`Error::EmptyQuery`] before ranking;
    /// `top_n` must lie within `1..=max_top_n`. An empty list means no match.
    pub fn recommend(&self, query: &str, top_n: usize) -> Result<Vec<Match>> {
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }
        let top_n = self.ranking.check_top_n(top_n)?;
        let options = RankOptions::new(top_n).with_min_score(self.ranking.min_score);
        Ok(rank(query, &self.model, &self.records, &self.vectors, options))
    }

    /// Recommend with the configured default `top_n`
    pub fn recommend_default(&self, query: &str) -> Result<Vec<Match>> {
        self.recommend(query, self.ranking.default_top_n)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn model(&self) -> &VectorSpaceModel {
        &self.model
    }

    pub fn ranking(&self) -> &RankingConfig {
        &self.ranking
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Session {
    /// A session over an empty dataset
    fn default() -> Self {
        let (model, vectors) = build(&[], &VectorizerConfig::default());
        Self {
            records: Vec::new(),
            model,
            vectors,
            ranking: RankingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let records = vec![
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
        ];
        Session::from_records(records, &Config::default()).unwrap()
    }

    #[test]
    fn blank_query_is_rejected_before_ranking() {
        let s = session();
        assert!(matches!(s.recommend("", 5), Err(Error::EmptyQuery)));
        assert!(matches!(s.recommend(" \n\t", 5), Err(Error::EmptyQuery)));
    }

    #[test]
    fn top_n_is_bounded() {
        let s = session();
        assert!(matches!(s.recommend("fever", 0), Err(Error::InvalidTopN { .. })));
        assert!(matches!(s.recommend("fever", 11), Err(Error::InvalidTopN { .. })));
        assert!(s.recommend("fever", 10).is_ok());
    }

    #[test]
    fn recommend_uses_configured_threshold() {
        let s = session();
        let matches = s.recommend_default("allergy").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "AllergyRelief");

        let mut config = Config::default();
        config.ranking.min_score = 1.0;
        let strict = Session::from_records(s.records().to_vec(), &config).unwrap();
        assert!(strict.recommend_default("allergy").unwrap().is_empty());
    }

    #[test]
    fn sessions_are_independent() {
        let a = session();
        let b = Session::from_records(
            vec![Record::new("CoughAway", Some("cough".into()), None)],
            &Config::default(),
        )
        .unwrap();
        assert!(a.recommend_default("cough").unwrap().is_empty());
        assert_eq!(b.recommend_default("cough").unwrap()[0].name, "CoughAway");
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn empty_session_has_no_matches() {
        let s = Session::default();
        assert!(s.is_empty());
        assert!(s.recommend("fever", 5).unwrap().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = Config::default();
        config.vectorizer.max_features = 0;
        assert!(matches!(
            Session::from_records(Vec::new(), &config),
            Err(Error::InvalidConfig(_))
        ));
    }
}
