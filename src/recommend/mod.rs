//! Medicine recommendation: corpus indexing, query ranking and the
//! session object tying them to one loaded dataset.

pub mod indexer;
pub mod ranker;
pub mod session;

pub use indexer::{build, VectorSpaceModel};
pub use ranker::{rank, Match, RankOptions, DEFAULT_MIN_SCORE};
pub use session::Session;
