// https://dictionaryapi.dev/ - free, no key, answers 404 with a json body for unknown words

use serde::Deserialize;

use crate::dictionary::{PartOfSpeech, Phonetic, Word, WordDefinition, WordMeaning};
use crate::{DictionaryConfig, DictionaryError, NotFoundError};

#[derive(Debug, Deserialize)]
pub(crate) struct ApiWord {
    word: String,
    phonetic: Option<String>,
    #[serde(default)]
    phonetics: Vec<ApiPhonetic>,
    origin: Option<String>,
    #[serde(default)]
    meanings: Vec<ApiMeaning>,
}

#[derive(Debug, Deserialize)]
struct ApiPhonetic {
    text: Option<String>,
    audio: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMeaning {
    #[serde(default)]
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<ApiDefinition>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiDefinition {
    #[serde(default)]
    definition: String,
    example: Option<String>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiNotFound {
    message: String,
}

impl From<ApiWord> for Word {
    fn from(value: ApiWord) -> Self {
        Word {
            word: value.word,
            phonetic: value.phonetic,
            phonetics: value
                .phonetics
                .into_iter()
                .map(|phonetic| Phonetic {
                    text: phonetic.text,
                    audio: phonetic.audio,
                })
                .collect(),
            origin: value.origin,
            meanings: value.meanings.into_iter().map(WordMeaning::from).collect(),
        }
    }
}

impl From<ApiMeaning> for WordMeaning {
    fn from(value: ApiMeaning) -> Self {
        WordMeaning {
            part_of_speech: PartOfSpeech::from(&value.part_of_speech[..]),
            definitions: value
                .definitions
                .into_iter()
                .map(|definition| WordDefinition {
                    definition: definition.definition,
                    example: definition.example,
                    synonyms: definition.synonyms,
                    antonyms: definition.antonyms,
                })
                .collect(),
            synonyms: value.synonyms,
            antonyms: value.antonyms,
        }
    }
}

pub(crate) fn entry_url(config: &DictionaryConfig, word: &str) -> String {
    // the word goes in as a raw path segment, the service decides what it makes of punctuation
    format!(
        "{}/{}/{}",
        config.base_url.trim_end_matches('/'),
        config.language,
        word
    )
}

pub(crate) async fn get_definition(
    client: &reqwest::Client,
    config: &DictionaryConfig,
    word: &str,
) -> Result<Word, DictionaryError> {
    let url = entry_url(config, word);
    tracing::debug!(%url, "requesting definition");
    let res = client.get(&url).send().await.map_err(DictionaryError::Fetch)?;
    let status = res.status();
    if !status.is_success() {
        let message = match res.json::<ApiNotFound>().await {
            Ok(body) => body.message,
            Err(_) => status.to_string(),
        };
        return Err(DictionaryError::NotFound(NotFoundError {
            status: status.as_u16(),
            message,
        }));
    }
    let entries = res
        .json::<Vec<ApiWord>>()
        .await
        .map_err(DictionaryError::Deserialize)?;
    entries
        .into_iter()
        .next()
        .map(Word::from)
        .ok_or(DictionaryError::Empty)
}
