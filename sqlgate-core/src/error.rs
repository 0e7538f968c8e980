/// Errors produced by the `sqlgate-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// Statement text was empty after trimming.
    #[error("query text is empty")]
    EmptyText,

    /// Statement text exceeded the per-operation character ceiling.
    #[error("query text is {len} characters, maximum is {max}")]
    TextTooLong { len: usize, max: usize },
}
