use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Upload of {key} failed: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Upload rejected: {0}")]
    Rejected(String),
}
