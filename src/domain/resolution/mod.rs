pub mod error;
pub mod key;
pub mod service;

pub use error::ResolveError;
pub use key::{cache_key, speech_key, translation_key, CacheNamespace};
use serde::{Deserialize, Serialize};
pub use service::{ResolverService, ResolverServiceApi};

/// Translation and speech URL resolved for one source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub translation: String,
    pub speech_url: String,
}
