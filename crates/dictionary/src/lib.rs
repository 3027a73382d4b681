use std::time::Duration;

use dictionary_api::get_definition;

mod dictionary;
mod dictionary_api;

pub use dictionary::{PartOfSpeech, Phonetic, Word, WordDefinition, WordMeaning};

const DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries";

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to reach the dictionary service: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("failed to decode the dictionary response: {0}")]
    Deserialize(#[source] reqwest::Error),
    #[error("failed to build the http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("the dictionary returned no entries")]
    Empty,
    #[error(transparent)]
    NotFound(NotFoundError),
}

#[derive(Debug, thiserror::Error)]
#[error("word not found ({status}): {message}")]
pub struct NotFoundError {
    pub status: u16,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DictionaryConfig {
    /// Entries endpoint without the language segment.
    pub base_url: String,
    pub language: String,
    pub timeout: Duration,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            base_url: DICTIONARY_API_URL.to_owned(),
            language: "en".to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

pub struct Dictionary {
    client: reqwest::Client,
    config: DictionaryConfig,
}

impl Dictionary {
    pub fn new() -> Result<Self, DictionaryError> {
        Self::with_config(DictionaryConfig::default())
    }

    pub fn with_config(config: DictionaryConfig) -> Result<Self, DictionaryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DictionaryError::Client)?;
        Ok(Self { client, config })
    }

    pub async fn get_definition(&self, word: &str) -> Result<Word, DictionaryError> {
        get_definition(&self.client, &self.config, word).await
    }
}
