use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(String),

    #[error("corrupt key: {0}")]
    CorruptKey(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<heed::Error> for LmdbError {
    fn from(e: heed::Error) -> Self {
        LmdbError::Heed(e.to_string())
    }
}

impl From<LmdbError> for tenure_store::StoreError {
    fn from(e: LmdbError) -> Self {
        match e {
            LmdbError::CorruptKey(msg) => tenure_store::StoreError::Corruption(msg),
            LmdbError::Serialization(msg) => tenure_store::StoreError::Serialization(msg),
            other => tenure_store::StoreError::Backend(other.to_string()),
        }
    }
}
