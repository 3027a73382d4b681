use async_trait::async_trait;
use dictionary::{Dictionary, DictionaryError, Word};

/// Where lookups go. The screen only ever talks to the dictionary through this.
#[async_trait]
pub trait DictionaryService: Send + Sync + 'static {
    async fn lookup(&self, word: &str) -> Result<Word, DictionaryError>;
}

#[async_trait]
impl DictionaryService for Dictionary {
    async fn lookup(&self, word: &str) -> Result<Word, DictionaryError> {
        self.get_definition(word).await
    }
}
