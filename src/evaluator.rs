use serde::Deserialize;
use std::collections::BTreeMap;

/// Feedback for a single guessed letter.
///
/// Variants are ordered from worst to best so that `max` picks the state a
/// keyboard key should show.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum LetterState {
    Incorrect, // Gray
    Misplaced, // Yellow
    Correct,   // Green
}

/// Per-letter states for the keyboard, keyed by lowercase letter.
pub type KeyStates = BTreeMap<char, LetterState>;

/// How repeated letters are scored.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// Letter counts in the secret are respected and keys show the best state seen.
    #[default]
    Standard,
    /// Plain containment check per position; keys show the last occurrence's state.
    Classic,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GuessResult {
    pub is_correct: bool,
    pub letter_states: Vec<LetterState>,
    pub key_states: KeyStates,
}

/// Score `guess` against `secret`.
///
/// Both words must already be normalized and of equal length; the model
/// checks that before calling in.
pub fn evaluate(secret: &str, guess: &str, mode: EvaluationMode) -> GuessResult {
    let secret_chars: Vec<char> = secret.chars().collect();
    let guess_chars: Vec<char> = guess.chars().collect();
    debug_assert_eq!(secret_chars.len(), guess_chars.len());

    let letter_states = match mode {
        EvaluationMode::Standard => standard_states(&secret_chars, &guess_chars),
        EvaluationMode::Classic => classic_states(&secret_chars, &guess_chars),
    };

    let mut key_states = KeyStates::new();
    for (&letter, &state) in guess_chars.iter().zip(&letter_states) {
        match mode {
            EvaluationMode::Standard => {
                key_states
                    .entry(letter)
                    .and_modify(|best| *best = (*best).max(state))
                    .or_insert(state);
            }
            EvaluationMode::Classic => {
                key_states.insert(letter, state);
            }
        }
    }

    GuessResult {
        is_correct: secret == guess,
        letter_states,
        key_states,
    }
}

fn classic_states(secret: &[char], guess: &[char]) -> Vec<LetterState> {
    guess
        .iter()
        .enumerate()
        .map(|(i, &g)| {
            if secret.get(i) == Some(&g) {
                LetterState::Correct
            } else if secret.contains(&g) {
                LetterState::Misplaced
            } else {
                LetterState::Incorrect
            }
        })
        .collect()
}

fn standard_states(secret: &[char], guess: &[char]) -> Vec<LetterState> {
    let mut states = vec![LetterState::Incorrect; guess.len()];
    // None marks a secret letter already claimed by an earlier match
    let mut remaining: Vec<Option<char>> = secret.iter().copied().map(Some).collect();

    // First pass: exact matches
    for (i, &g) in guess.iter().enumerate() {
        if remaining.get(i) == Some(&Some(g)) {
            states[i] = LetterState::Correct;
            remaining[i] = None;
        }
    }
    // Second pass: misplaced letters, each consuming one unclaimed copy
    for (i, &g) in guess.iter().enumerate() {
        if states[i] == LetterState::Correct {
            continue;
        }
        if let Some(pos) = remaining.iter().position(|&c| c == Some(g)) {
            states[i] = LetterState::Misplaced;
            remaining[pos] = None;
        }
    }
    states
}

/// Map each letter of `word` to the indexes where it occurs, in ascending order.
pub fn letter_positions(word: &str) -> BTreeMap<char, Vec<usize>> {
    let mut positions: BTreeMap<char, Vec<usize>> = BTreeMap::new();
    for (i, c) in word.chars().enumerate() {
        positions.entry(c).or_default().push(i);
    }
    positions
}
