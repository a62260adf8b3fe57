//! Game state controller.
//!
//! The controller owns the model and a display. Front-ends feed it
//! [`KeyAction`]s one at a time and it pushes every visible change back out
//! through the [`WordyDisplay`] trait, so any rendering technology can sit on
//! top of it.

use crate::error::WordyError;
use crate::evaluator::{KeyStates, LetterState};
use crate::keys::KeyAction;
use crate::model::WordyModel;
use crate::settings::Settings;
use crate::{debug_log, info_log};
use rand::rngs::StdRng;

pub const NOT_FINISHED_MESSAGE: &str = "Word not finished!";
pub const WIN_MESSAGE: &str = "Correct! Nice job. Game over.";

/// Operations the controller needs from a front-end.
pub trait WordyDisplay {
    /// Show `letter` in the given cell, or clear it when `None`.
    fn set_letter(&mut self, letter: Option<char>, guess_index: usize, position: usize);
    fn show_result(&mut self, guess_index: usize, states: &[LetterState]);
    fn set_key_colors(&mut self, key_states: &KeyStates);
    fn display_message(&mut self, message: &str);
    /// Stop accepting input until the next game.
    fn game_over(&mut self);
    /// Clear the board and keyboard for a new game.
    fn reset(&mut self);
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// Result of pressing ENTER.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubmitOutcome {
    NotFinished,
    InvalidWord,
    Incorrect,
    Won,
    Lost,
    /// The game was already over.
    Ignored,
}

pub struct WordyController<D: WordyDisplay> {
    model: WordyModel,
    display: D,
    rng: StdRng,
    word_size: usize,
    num_guesses: usize,
    welcome: String,
    guess_index: usize,
    current_guess: Vec<char>,
    status: GameStatus,
}

impl<D: WordyDisplay> WordyController<D> {
    pub fn new(model: WordyModel, display: D, settings: &Settings, rng: StdRng) -> Self {
        let mut controller = Self {
            word_size: model.word_size(),
            model,
            display,
            rng,
            num_guesses: settings.num_guesses,
            welcome: settings.ui.messages.welcome.clone(),
            guess_index: 0,
            current_guess: Vec::with_capacity(settings.word_size),
            status: GameStatus::InProgress,
        };
        let welcome = controller.welcome.clone();
        controller.display.display_message(&welcome);
        info_log!(
            "New game: {} letters, {} guesses",
            controller.word_size,
            controller.num_guesses
        );
        controller
    }

    /// Dispatch a key. While the game is over only `NewGame` is honoured.
    pub fn handle(&mut self, action: KeyAction) {
        debug_log!("handle() - {:?} in {:?}", action, self.status);
        if self.is_over() && action != KeyAction::NewGame {
            return;
        }
        match action {
            KeyAction::Letter(c) => self.type_letter(c),
            KeyAction::Back => self.delete_last_letter(),
            KeyAction::Submit => {
                self.check_solution();
            }
            KeyAction::Hint => self.show_hint(),
            KeyAction::NewGame => self.new_game(),
        }
    }

    /// Append a letter unless the guess is already full.
    pub fn type_letter(&mut self, letter: char) {
        if self.is_over() || self.current_guess.len() >= self.word_size {
            return;
        }
        let letter = letter.to_ascii_lowercase();
        self.current_guess.push(letter);
        self.display
            .set_letter(Some(letter), self.guess_index, self.current_guess.len() - 1);
    }

    /// Remove the last typed letter, if any.
    pub fn delete_last_letter(&mut self) {
        if self.is_over() {
            return;
        }
        if self.current_guess.pop().is_some() {
            self.display
                .set_letter(None, self.guess_index, self.current_guess.len());
        }
    }

    /// Remove every typed letter of the current guess.
    pub fn clear_current_guess(&mut self) {
        while self.current_guess.pop().is_some() {
            self.display
                .set_letter(None, self.guess_index, self.current_guess.len());
        }
    }

    /// Submit the current guess.
    ///
    /// Incomplete guesses and words missing from the list only produce a
    /// message; the guess index and hidden word are left untouched.
    pub fn check_solution(&mut self) -> SubmitOutcome {
        if self.is_over() {
            return SubmitOutcome::Ignored;
        }
        if self.current_guess.len() < self.word_size {
            self.display.display_message(NOT_FINISHED_MESSAGE);
            return SubmitOutcome::NotFinished;
        }

        let guess: String = self.current_guess.iter().collect();
        let result = match self.model.check_guess(&guess) {
            Ok(result) => result,
            Err(WordyError::NotAWord(word)) => {
                info_log!("check_solution() - rejected '{}'", word);
                self.display
                    .display_message(&format!("{word} is not a valid word."));
                return SubmitOutcome::InvalidWord;
            }
            Err(e) => {
                log::error!("Unexpected error checking guess '{guess}': {e}");
                self.display.display_message(&e.to_string());
                return SubmitOutcome::InvalidWord;
            }
        };

        self.display
            .show_result(self.guess_index, &result.letter_states);
        self.display.set_key_colors(&result.key_states);

        if result.is_correct {
            info_log!("check_solution() - solved on guess {}", self.guess_index + 1);
            self.status = GameStatus::Won;
            self.display.display_message(WIN_MESSAGE);
            self.display.game_over();
            return SubmitOutcome::Won;
        }

        self.current_guess.clear();
        self.guess_index += 1;

        if self.guess_index >= self.num_guesses {
            info_log!("check_solution() - out of guesses");
            self.status = GameStatus::Lost;
            let message = format!(
                "Guesses used up. Word was {}. Game over.",
                self.model.word()
            );
            self.display.display_message(&message);
            self.display.game_over();
            return SubmitOutcome::Lost;
        }
        SubmitOutcome::Incorrect
    }

    pub fn show_hint(&mut self) {
        let message = format!("Answer is: {}", self.model.word());
        self.display.display_message(&message);
    }

    /// Start over with a fresh random word.
    pub fn new_game(&mut self) {
        if let Err(e) = self.model.set_word(None, &mut self.rng) {
            // Random selection only fails on an empty list, which the model rejects up front
            log::error!("Could not choose a new word: {e}");
            return;
        }
        self.guess_index = 0;
        self.current_guess.clear();
        self.status = GameStatus::InProgress;
        self.display.reset();
        let welcome = self.welcome.clone();
        self.display.display_message(&welcome);
        info_log!("new_game() - started");
    }

    pub fn guess_index(&self) -> usize {
        self.guess_index
    }

    pub fn current_guess(&self) -> String {
        self.current_guess.iter().collect()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn num_guesses(&self) -> usize {
        self.num_guesses
    }

    pub fn model(&self) -> &WordyModel {
        &self.model
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::EvaluationMode;
    use crate::wordbank::load_word_list_from_str;
    use rand::SeedableRng;
    use crate::evaluator::LetterState::{Correct, Incorrect, Misplaced};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Letter(Option<char>, usize, usize),
        Result(usize, Vec<LetterState>),
        Keys(KeyStates),
        Message(String),
        GameOver,
        Reset,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn messages(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Message(m) => Some(m.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl WordyDisplay for Recorder {
        fn set_letter(&mut self, letter: Option<char>, guess_index: usize, position: usize) {
            self.calls.push(Call::Letter(letter, guess_index, position));
        }
        fn show_result(&mut self, guess_index: usize, states: &[LetterState]) {
            self.calls.push(Call::Result(guess_index, states.to_vec()));
        }
        fn set_key_colors(&mut self, key_states: &KeyStates) {
            self.calls.push(Call::Keys(key_states.clone()));
        }
        fn display_message(&mut self, message: &str) {
            self.calls.push(Call::Message(message.to_string()));
        }
        fn game_over(&mut self) {
            self.calls.push(Call::GameOver);
        }
        fn reset(&mut self) {
            self.calls.push(Call::Reset);
        }
    }

    const WORDS: &str = "help\nknot\nhack\ncash\npeat\nstop\n";

    fn controller(secret: &str, num_guesses: usize) -> WordyController<Recorder> {
        let settings = Settings {
            word_size: 4,
            num_guesses,
            ..Settings::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        let list = load_word_list_from_str(WORDS, 4).unwrap();
        let model = WordyModel::new(list, Some(secret), EvaluationMode::Standard, &mut rng).unwrap();
        WordyController::new(model, Recorder::default(), &settings, rng)
    }

    fn type_word(c: &mut WordyController<Recorder>, word: &str) {
        for ch in word.chars() {
            c.type_letter(ch);
        }
    }

    #[test]
    fn test_welcome_message_on_start() {
        let c = controller("help", 6);
        assert_eq!(c.display().messages(), vec!["It's Wordy time. Let's GO!!!"]);
        assert_eq!(c.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_typing_is_bounded_by_word_size() {
        let mut c = controller("help", 6);
        type_word(&mut c, "HACKS");
        assert_eq!(c.current_guess(), "hack");
        assert_eq!(c.display().calls[1], Call::Letter(Some('h'), 0, 0));
        assert_eq!(c.display().calls[4], Call::Letter(Some('k'), 0, 3));
        assert_eq!(c.display().calls.len(), 5);
    }

    #[test]
    fn test_backspace() {
        let mut c = controller("help", 6);
        c.delete_last_letter();
        assert_eq!(c.display().calls.len(), 1);

        type_word(&mut c, "ha");
        c.delete_last_letter();
        assert_eq!(c.current_guess(), "h");
        assert_eq!(c.display().calls.last(), Some(&Call::Letter(None, 0, 1)));
    }

    #[test]
    fn test_incomplete_guess_not_submitted() {
        let mut c = controller("help", 6);
        type_word(&mut c, "hel");
        assert_eq!(c.check_solution(), SubmitOutcome::NotFinished);
        assert_eq!(c.guess_index(), 0);
        assert_eq!(c.current_guess(), "hel");
        assert_eq!(c.display().messages().last(), Some(&NOT_FINISHED_MESSAGE));
        assert!(!c.display().calls.iter().any(|call| matches!(call, Call::Result(..))));
    }

    #[test]
    fn test_invalid_word_leaves_state_alone() {
        let mut c = controller("help", 6);
        type_word(&mut c, "fftz");
        assert_eq!(c.check_solution(), SubmitOutcome::InvalidWord);
        assert_eq!(c.guess_index(), 0);
        assert_eq!(c.current_guess(), "fftz");
        assert_eq!(c.model().word(), "help");
        assert_eq!(
            c.display().messages().last(),
            Some(&"fftz is not a valid word.")
        );
    }

    #[test]
    fn test_incorrect_guess_advances() {
        let mut c = controller("help", 6);
        type_word(&mut c, "peat");
        assert_eq!(c.check_solution(), SubmitOutcome::Incorrect);
        assert_eq!(c.guess_index(), 1);
        assert_eq!(c.current_guess(), "");

        let calls = &c.display().calls;
        assert!(calls.contains(&Call::Result(0, vec![Misplaced, Correct, Incorrect, Incorrect])));
        let keys: KeyStates = [('p', Misplaced), ('e', Correct), ('a', Incorrect), ('t', Incorrect)]
            .into_iter()
            .collect();
        assert!(calls.contains(&Call::Keys(keys)));

        type_word(&mut c, "h");
        assert_eq!(c.display().calls.last(), Some(&Call::Letter(Some('h'), 1, 0)));
    }

    #[test]
    fn test_win() {
        let mut c = controller("help", 6);
        type_word(&mut c, "help");
        assert_eq!(c.check_solution(), SubmitOutcome::Won);
        assert_eq!(c.status(), GameStatus::Won);
        assert_eq!(c.display().messages().last(), Some(&WIN_MESSAGE));
        assert_eq!(c.display().calls.last(), Some(&Call::GameOver));
    }

    #[test]
    fn test_loss_after_attempt_limit() {
        let mut c = controller("help", 2);
        type_word(&mut c, "knot");
        assert_eq!(c.check_solution(), SubmitOutcome::Incorrect);
        type_word(&mut c, "hack");
        assert_eq!(c.check_solution(), SubmitOutcome::Lost);
        assert_eq!(c.status(), GameStatus::Lost);
        assert_eq!(
            c.display().messages().last(),
            Some(&"Guesses used up. Word was help. Game over.")
        );
        assert_eq!(c.display().calls.last(), Some(&Call::GameOver));
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut c = controller("help", 6);
        type_word(&mut c, "help");
        c.check_solution();
        let before = c.display().calls.len();

        c.handle(KeyAction::Letter('a'));
        c.handle(KeyAction::Back);
        c.handle(KeyAction::Hint);
        assert_eq!(c.check_solution(), SubmitOutcome::Ignored);
        assert_eq!(c.display().calls.len(), before);
    }

    #[test]
    fn test_hint_shows_answer() {
        let mut c = controller("help", 6);
        c.handle(KeyAction::Hint);
        assert_eq!(c.display().messages().last(), Some(&"Answer is: help"));
    }

    #[test]
    fn test_new_game_resets() {
        let mut c = controller("help", 1);
        type_word(&mut c, "knot");
        assert_eq!(c.check_solution(), SubmitOutcome::Lost);

        c.handle(KeyAction::NewGame);
        assert_eq!(c.status(), GameStatus::InProgress);
        assert_eq!(c.guess_index(), 0);
        assert_eq!(c.current_guess(), "");
        assert!(c.model().word_list().contains(c.model().word()));
        assert!(c.display().calls.contains(&Call::Reset));
    }

    #[test]
    fn test_handle_dispatches_actions() {
        let mut c = controller("help", 6);
        for action in [
            KeyAction::Letter('H'),
            KeyAction::Letter('e'),
            KeyAction::Letter('l'),
            KeyAction::Letter('x'),
            KeyAction::Back,
            KeyAction::Letter('p'),
            KeyAction::Submit,
        ] {
            c.handle(action);
        }
        assert_eq!(c.status(), GameStatus::Won);
    }

    #[test]
    fn test_clear_current_guess() {
        let mut c = controller("help", 6);
        type_word(&mut c, "hac");
        c.clear_current_guess();
        assert_eq!(c.current_guess(), "");
        assert_eq!(c.display().calls.last(), Some(&Call::Letter(None, 0, 0)));
    }
}
