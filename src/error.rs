use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("a carousel needs at least one entry")]
    EmptyCarousel,

    #[error("a repeating timer needs a non-zero period")]
    ZeroInterval,

    #[error("failed to read content file {path:?}")]
    ReadContent {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse content file {path:?}")]
    ParseContent {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
