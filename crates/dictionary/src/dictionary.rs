#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub word: String,
    pub phonetic: Option<String>,
    pub phonetics: Vec<Phonetic>,
    pub origin: Option<String>,
    pub meanings: Vec<WordMeaning>,
}

impl Word {
    /// The first definition of the first meaning, if the entry has any.
    pub fn first_definition(&self) -> Option<&WordDefinition> {
        self.meanings
            .first()
            .and_then(|meaning| meaning.definitions.first())
    }

    /// Audio clip of the first phonetic entry. The service reports missing
    /// clips as empty strings, those count as absent.
    pub fn first_audio(&self) -> Option<&str> {
        self.phonetics
            .first()
            .and_then(|phonetic| phonetic.audio.as_deref())
            .filter(|audio| !audio.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Phonetic {
    pub text: Option<String>,
    pub audio: Option<String>,
}


#[derive(Debug, Clone, PartialEq)]
pub struct WordMeaning {
    pub part_of_speech: PartOfSpeech,
    pub definitions: Vec<WordDefinition>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
}


#[derive(Debug, Clone, PartialEq)]
pub enum PartOfSpeech {
    Noun,
    Pronoun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Conjunction,
    Interjection,
    Exclamation,
    Other(String),
}

impl From<&str> for PartOfSpeech {
    fn from(value: &str) -> Self {
        match value {
            "noun" => PartOfSpeech::Noun,
            "pronoun" => PartOfSpeech::Pronoun,
            "verb" => PartOfSpeech::Verb,
            "adjective" => PartOfSpeech::Adjective,
            "adverb" => PartOfSpeech::Adverb,
            "preposition" => PartOfSpeech::Preposition,
            "conjunction" => PartOfSpeech::Conjunction,
            "interjection" => PartOfSpeech::Interjection,
            "exclamation" => PartOfSpeech::Exclamation,
            other => PartOfSpeech::Other(other.to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordDefinition {
    pub definition: String,
    pub example: Option<String>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
}
