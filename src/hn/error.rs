use thiserror::Error;

#[derive(Error, Debug)]
pub enum HnError {
    #[error("Error constructing HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Error requesting {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Error decoding {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} does not exist")]
    NotFound(String),

    #[error("Transport failure: {0}")]
    Transport(String),
}

impl HnError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, HnError::NotFound(_))
    }
}
