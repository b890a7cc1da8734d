/// Why a reverse population call failed, generic over the model's error.
#[derive(Debug, thiserror::Error)]
pub enum PopulateError<E>
where
    E: std::error::Error + 'static,
{
    /// A required option was never supplied. Raised before any query runs.
    #[error("missing required option: {0}")]
    MissingField(&'static str),

    /// The model's bulk find failed; the model's error is carried as-is.
    #[error(transparent)]
    Fetch(E),
}
