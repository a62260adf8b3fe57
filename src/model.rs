use crate::error::{Result, WordyError};
use crate::evaluator::{EvaluationMode, GuessResult, evaluate};
use crate::wordbank::WordList;
use rand::Rng;

/// Holds the word list and the hidden word for the current round.
#[derive(Debug, Clone)]
pub struct WordyModel {
    word_list: WordList,
    word: String,
    mode: EvaluationMode,
}

impl WordyModel {
    /// Create a model, using `preselected` as the hidden word when given and a
    /// random list word otherwise.
    pub fn new<R: Rng + ?Sized>(
        word_list: WordList,
        preselected: Option<&str>,
        mode: EvaluationMode,
        rng: &mut R,
    ) -> Result<Self> {
        let mut model = Self {
            word: String::new(),
            word_list,
            mode,
        };
        model.set_word(preselected, rng)?;
        Ok(model)
    }

    /// Replace the hidden word. On error the previous word is kept.
    pub fn set_word<R: Rng + ?Sized>(&mut self, preselected: Option<&str>, rng: &mut R) -> Result<()> {
        let word = match preselected {
            None => self.word_list.choose(rng).to_string(),
            Some(word) => {
                let word = word.trim().to_lowercase();
                let actual = word.chars().count();
                if actual != self.word_size() {
                    return Err(WordyError::WrongWordSize {
                        word,
                        expected: self.word_size(),
                        actual,
                    });
                }
                if !self.word_list.contains(&word) {
                    return Err(WordyError::NotAWord(word));
                }
                word
            }
        };
        log::debug!("Hidden word selected ({} letters)", word.len());
        self.word = word;
        Ok(())
    }

    /// Score `guess` against the hidden word.
    ///
    /// Fails with [`WordyError::NotAWord`] when the guess is not in the word
    /// list, in which case nothing is evaluated.
    pub fn check_guess(&self, guess: &str) -> Result<GuessResult> {
        if !self.word_list.contains(guess) {
            return Err(WordyError::NotAWord(guess.to_string()));
        }
        Ok(evaluate(&self.word, guess, self.mode))
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn word_size(&self) -> usize {
        self.word_list.word_size()
    }

    pub fn word_list(&self) -> &WordList {
        &self.word_list
    }

    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }
}
