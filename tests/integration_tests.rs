// Integration tests for the wordy library
// These tests verify that the word list, model, controller and front-ends work together

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::io::Cursor;
use wordy::cli::{PlainDisplay, run_plain};
use wordy::*;

#[derive(Default)]
struct RecordingDisplay {
    letters: Vec<(Option<char>, usize, usize)>,
    results: Vec<(usize, Vec<LetterState>)>,
    keys: Vec<KeyStates>,
    messages: Vec<String>,
    game_overs: usize,
}

impl WordyDisplay for RecordingDisplay {
    fn set_letter(&mut self, letter: Option<char>, guess_index: usize, position: usize) {
        self.letters.push((letter, guess_index, position));
    }

    fn show_result(&mut self, guess_index: usize, states: &[LetterState]) {
        self.results.push((guess_index, states.to_vec()));
    }

    fn set_key_colors(&mut self, key_states: &KeyStates) {
        self.keys.push(key_states.clone());
    }

    fn display_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn game_over(&mut self) {
        self.game_overs += 1;
    }

    fn reset(&mut self) {
        self.results.clear();
        self.keys.clear();
    }
}

fn four_letter_settings() -> Settings {
    Settings {
        word_size: 4,
        num_guesses: 6,
        ..Settings::default()
    }
}

fn start(secret: &str, settings: &Settings) -> WordyController<RecordingDisplay> {
    let mut rng = StdRng::seed_from_u64(2024);
    let list = load_configured_word_list(settings).unwrap();
    let model = WordyModel::new(list, Some(secret), settings.evaluation_mode, &mut rng).unwrap();
    WordyController::new(model, RecordingDisplay::default(), settings, rng)
}

fn submit(controller: &mut WordyController<RecordingDisplay>, word: &str) -> SubmitOutcome {
    for c in word.chars() {
        controller.handle(KeyAction::Letter(c));
    }
    controller.check_solution()
}

#[test]
fn test_reference_guesses_against_help() {
    use wordy::LetterState::{Correct as C, Incorrect as I, Misplaced as M};

    let cases = [
        ("help", vec![C, C, C, C]),
        ("knot", vec![I, I, I, I]),
        ("hack", vec![C, I, I, I]),
        ("cash", vec![I, I, I, M]),
        ("peat", vec![M, C, I, I]),
    ];
    for mode in [EvaluationMode::Standard, EvaluationMode::Classic] {
        let settings = Settings {
            evaluation_mode: mode,
            ..four_letter_settings()
        };
        for (guess, expected) in &cases {
            let mut controller = start("help", &settings);
            submit(&mut controller, guess);
            assert_eq!(
                controller.display().results,
                vec![(0, expected.clone())],
                "{guess} in {mode:?}"
            );
        }
    }
}

#[test]
fn test_win_on_exact_guess() {
    let mut controller = start("help", &four_letter_settings());
    assert_eq!(submit(&mut controller, "help"), SubmitOutcome::Won);
    assert_eq!(controller.status(), GameStatus::Won);
    assert_eq!(controller.display().game_overs, 1);
}

#[test]
fn test_non_word_never_mutates_progress() {
    let mut controller = start("help", &four_letter_settings());
    assert_eq!(submit(&mut controller, "peat"), SubmitOutcome::Incorrect);
    let index = controller.guess_index();

    controller.clear_current_guess();
    assert_eq!(submit(&mut controller, "qqqq"), SubmitOutcome::InvalidWord);
    assert_eq!(controller.guess_index(), index);
    assert_eq!(controller.model().word(), "help");
    assert_eq!(controller.display().results.len(), 1);
    assert_eq!(
        controller.display().messages.last().map(String::as_str),
        Some("qqqq is not a valid word.")
    );
}

#[test]
fn test_short_guess_never_evaluated() {
    let mut controller = start("help", &four_letter_settings());
    assert_eq!(submit(&mut controller, "hel"), SubmitOutcome::NotFinished);
    assert!(controller.display().results.is_empty());
    assert!(controller.display().keys.is_empty());
    assert_eq!(controller.guess_index(), 0);
}

#[test]
fn test_guess_length_never_exceeds_word_size() {
    let mut controller = start("help", &four_letter_settings());
    for c in "abcdefgh".chars() {
        controller.handle(KeyAction::Letter(c));
    }
    assert_eq!(controller.current_guess().len(), 4);
    assert!(controller.display().letters.iter().all(|&(_, _, pos)| pos < 4));
}

#[test]
fn test_loss_after_all_attempts() {
    let settings = Settings {
        num_guesses: 3,
        ..four_letter_settings()
    };
    let mut controller = start("help", &settings);
    assert_eq!(submit(&mut controller, "knot"), SubmitOutcome::Incorrect);
    assert_eq!(submit(&mut controller, "hack"), SubmitOutcome::Incorrect);
    assert_eq!(submit(&mut controller, "cash"), SubmitOutcome::Lost);
    assert_eq!(controller.guess_index(), 3);
    assert_eq!(
        controller.display().messages.last().map(String::as_str),
        Some("Guesses used up. Word was help. Game over.")
    );

    // Keyboard is disabled once the game ends
    controller.handle(KeyAction::Letter('h'));
    assert_eq!(controller.current_guess(), "");
}

#[test]
fn test_repeated_letters_by_mode() {
    use wordy::LetterState::{Correct as C, Incorrect as I, Misplaced as M};

    let standard = four_letter_settings();
    let mut controller = start("stop", &standard);
    submit(&mut controller, "sins");
    assert_eq!(controller.display().results[0].1, vec![C, I, I, I]);
    assert_eq!(controller.display().keys[0][&'s'], C);

    let classic = Settings {
        evaluation_mode: EvaluationMode::Classic,
        ..four_letter_settings()
    };
    let mut controller = start("stop", &classic);
    submit(&mut controller, "sins");
    assert_eq!(controller.display().results[0].1, vec![C, I, I, M]);
    assert_eq!(controller.display().keys[0][&'s'], M);
}

#[test]
fn test_settings_file_to_plain_game() {
    let dir = std::env::temp_dir().join("wordy_integration_settings");
    fs::create_dir_all(&dir).unwrap();
    let words_path = dir.join("words.txt");
    let settings_path = dir.join("settings.json");
    fs::write(&words_path, "help\nknot\nhack\ncrane\n").unwrap();
    fs::write(
        &settings_path,
        format!(
            r#"{{"word_size": 4, "num_guesses": 2, "word_list_file": {:?}}}"#,
            words_path.display().to_string()
        ),
    )
    .unwrap();

    let settings = Settings::load(Some(&settings_path)).unwrap();
    settings.validate().unwrap();
    let list = load_configured_word_list(&settings).unwrap();
    assert_eq!(list.len(), 3);

    let mut rng = StdRng::seed_from_u64(3);
    let model = WordyModel::new(list, Some("hack"), settings.evaluation_mode, &mut rng).unwrap();
    let bindings = KeyBindings::from_layout(&settings.ui.keyboard.key_layout).unwrap();
    let display = PlainDisplay::new(Vec::new(), &settings);
    let mut controller = WordyController::new(model, display, &settings, rng);

    run_plain(&mut controller, &bindings, Cursor::new("crane\nhelp\nhack\n")).unwrap();
    assert_eq!(controller.status(), GameStatus::Won);
    assert_eq!(controller.guess_index(), 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_custom_keyboard_layout_limits_input() {
    let mut settings = four_letter_settings();
    settings.ui.keyboard.key_layout = vec![
        "HELPKNOT".chars().map(String::from).collect(),
        vec!["ENTER".to_string(), "BACK".to_string()],
    ];
    let bindings = KeyBindings::from_layout(&settings.ui.keyboard.key_layout).unwrap();
    let mut controller = start("help", &settings);

    for symbol in "hack".chars().map(KeySymbol::Char) {
        if let Some(action) = bindings.resolve(symbol) {
            controller.handle(action);
        }
    }
    assert_eq!(controller.current_guess(), "hk");
}

#[test]
fn test_empty_word_list_is_fatal() {
    let settings = Settings {
        word_size: 9,
        ..Settings::default()
    };
    assert!(matches!(
        load_configured_word_list(&settings),
        Err(WordyError::EmptyWordList { word_size: 9, .. })
    ));
}

#[test]
fn test_malformed_preselected_word_is_fatal() {
    let settings = four_letter_settings();
    let mut rng = StdRng::seed_from_u64(1);
    let list = load_configured_word_list(&settings).unwrap();
    assert!(matches!(
        WordyModel::new(list.clone(), Some("crane"), EvaluationMode::Standard, &mut rng),
        Err(WordyError::WrongWordSize { .. })
    ));
    assert!(matches!(
        WordyModel::new(list, Some("qqqq"), EvaluationMode::Standard, &mut rng),
        Err(WordyError::NotAWord(_))
    ));
}

#[test]
fn test_new_game_after_win_picks_list_word() {
    let settings = four_letter_settings();
    let mut controller = start("help", &settings);
    submit(&mut controller, "help");
    controller.handle(KeyAction::NewGame);
    assert_eq!(controller.status(), GameStatus::InProgress);
    assert!(controller.model().word_list().contains(controller.model().word()));
    assert!(controller.display().results.is_empty());
}
