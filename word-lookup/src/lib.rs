pub mod controller;
pub mod playback;
pub mod screen;
pub mod service;
pub mod state;

pub use controller::{LookupConfig, LookupController};
pub use playback::{AudioPlayer, CommandPlayer, PlaybackError, PlayerConfig};
pub use service::DictionaryService;
pub use state::{ErrorKind, LookupError, LookupResult, LookupState, Screen};
