use crate::{
    config::VectorizerConfig,
    dataset::Record,
    vectorizer::{CorpusVectors, TFIDFVectorizer},
};

/// Fitted model used by the recommender
pub type VectorSpaceModel = TFIDFVectorizer<f64>;

/// Fit the vector space on the `full_text` of every record.
///
/// Returns the model together with one vector per record, in record order.
/// An empty `records` slice is valid and yields an empty vocabulary.
pub fn build(records: &[Record], config: &VectorizerConfig) -> (VectorSpaceModel, CorpusVectors) {
    let texts: Vec<&str> = records.iter().map(Record::full_text).collect();
    let (model, vectors) = VectorSpaceModel::fit_transform(&texts, config);
    debug_assert_eq!(vectors.len(), records.len());
    (model, vectors)
}
