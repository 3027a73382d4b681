use dictionary::{DictionaryError, Word};

pub const NOT_FOUND_MESSAGE: &str = "Word not found in the database";
pub const NETWORK_FAILURE_MESSAGE: &str = "An error occurred while fetching data";

/// What a successful lookup shows: the canonical word, the first definition
/// of its first meaning and the first phonetic clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub word: String,
    pub definition: String,
    pub example: String,
    pub audio_uri: Option<String>,
}

impl LookupResult {
    pub fn from_word(word: &Word) -> Self {
        let definition = word.first_definition();
        Self {
            word: word.word.clone(),
            definition: definition
                .map(|definition| definition.definition.clone())
                .unwrap_or_default(),
            example: definition
                .and_then(|definition| definition.example.clone())
                .unwrap_or_default(),
            audio_uri: word.first_audio().map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NetworkFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    pub kind: ErrorKind,
    pub message: String,
}

impl LookupError {
    pub fn not_found() -> Self {
        Self {
            kind: ErrorKind::NotFound,
            message: NOT_FOUND_MESSAGE.to_owned(),
        }
    }

    pub fn network_failure() -> Self {
        Self {
            kind: ErrorKind::NetworkFailure,
            message: NETWORK_FAILURE_MESSAGE.to_owned(),
        }
    }
}

impl From<&DictionaryError> for LookupError {
    fn from(error: &DictionaryError) -> Self {
        match error {
            DictionaryError::NotFound(_) => LookupError::not_found(),
            DictionaryError::Fetch(_)
            | DictionaryError::Client(_)
            | DictionaryError::Deserialize(_)
            | DictionaryError::Empty => LookupError::network_failure(),
        }
    }
}

/// Outcome of the latest lookup. A result and an error can never coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LookupState {
    #[default]
    Empty,
    Loading,
    Success(LookupResult),
    Failed(LookupError),
}

impl LookupState {
    pub fn result(&self) -> Option<&LookupResult> {
        match self {
            LookupState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LookupError> {
        match self {
            LookupState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Snapshot handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub query: String,
    pub state: LookupState,
}

#[cfg(test)]
mod tests {
    use dictionary::{NotFoundError, PartOfSpeech, Phonetic, WordDefinition, WordMeaning};

    use super::*;

    fn word(meanings: Vec<WordMeaning>, phonetics: Vec<Phonetic>) -> Word {
        Word {
            word: "Café".to_owned(),
            phonetic: None,
            phonetics,
            origin: None,
            meanings,
        }
    }

    #[test]
    fn result_takes_first_definition_and_audio() {
        let meaning = WordMeaning {
            part_of_speech: PartOfSpeech::Noun,
            definitions: vec![
                WordDefinition {
                    definition: "a coffee shop".to_owned(),
                    example: None,
                    synonyms: vec![],
                    antonyms: vec![],
                },
                WordDefinition {
                    definition: "ignored".to_owned(),
                    example: Some("ignored".to_owned()),
                    synonyms: vec![],
                    antonyms: vec![],
                },
            ],
            synonyms: vec![],
            antonyms: vec![],
        };
        let phonetics = vec![Phonetic {
            text: None,
            audio: Some("https://x/cafe.mp3".to_owned()),
        }];

        let result = LookupResult::from_word(&word(vec![meaning], phonetics));

        assert_eq!(
            result,
            LookupResult {
                word: "Café".to_owned(),
                definition: "a coffee shop".to_owned(),
                example: String::new(),
                audio_uri: Some("https://x/cafe.mp3".to_owned()),
            }
        );
    }

    #[test]
    fn result_of_bare_entry_is_blank() {
        let result = LookupResult::from_word(&word(vec![], vec![]));
        assert_eq!(result.word, "Café");
        assert!(result.definition.is_empty());
        assert!(result.example.is_empty());
        assert_eq!(result.audio_uri, None);
    }

    #[test]
    fn dictionary_errors_map_to_two_kinds() {
        let not_found = DictionaryError::NotFound(NotFoundError {
            status: 404,
            message: "nope".to_owned(),
        });
        assert_eq!(LookupError::from(&not_found), LookupError::not_found());
        assert_eq!(
            LookupError::from(&DictionaryError::Empty).kind,
            ErrorKind::NetworkFailure
        );
        assert_eq!(LookupError::network_failure().message, NETWORK_FAILURE_MESSAGE);
    }
}
