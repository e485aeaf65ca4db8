//! Pure matching core: field normalization, fixed vocabularies, and the
//! relevance scorer. No I/O anywhere in this tree, so everything is safe to
//! call concurrently from any number of in-flight requests.

pub mod normalize;
pub mod score;
pub mod vocab;
