use crate::domain::resolution::ResolveError;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("batch {batch_index} failed at text {text_index}: {source}")]
    Resolution {
        batch_index: usize,
        text_index: usize,
        #[source]
        source: ResolveError,
    },
}
