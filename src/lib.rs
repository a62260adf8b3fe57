// Library interface for wordy
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod evaluator;
pub mod game_state;
pub mod keys;
pub mod logging;
pub mod model;
pub mod settings;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::WordyError;
pub use evaluator::{EvaluationMode, GuessResult, KeyStates, LetterState, evaluate, letter_positions};
pub use game_state::{GameStatus, SubmitOutcome, WordyController, WordyDisplay};
pub use keys::{KeyAction, KeyBindings, KeySymbol};
pub use model::WordyModel;
pub use settings::Settings;
pub use wordbank::{
    WordList, load_configured_word_list, load_word_list_from_file, load_word_list_from_str,
};
