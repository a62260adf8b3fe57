use crate::evaluator::{KeyStates, LetterState};
use crate::game_state::{WordyController, WordyDisplay};
use crate::keys::{KeyAction, KeyBindings, KeySymbol};
use crate::settings::Settings;
use crate::{debug_log, info_log};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Wordy - guess the hidden word
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list file
    #[arg(short = 'i', long = "input")]
    pub word_list_path: Option<PathBuf>,

    /// Path to a settings.json file
    #[arg(short = 's', long = "settings")]
    pub settings_path: Option<PathBuf>,

    /// Play against this word instead of a random one
    #[arg(short = 'w', long = "word")]
    pub word: Option<String>,

    /// Number of letters per word
    #[arg(long = "word-size")]
    pub word_size: Option<usize>,

    /// Number of guesses allowed
    #[arg(short = 'g', long = "guesses")]
    pub num_guesses: Option<usize>,

    /// Score repeated letters by simple containment
    #[arg(long)]
    pub classic: bool,

    /// Line-based play instead of the terminal UI
    #[arg(long)]
    pub plain: bool,

    /// Append log output to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command line overrides on top of file settings.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(path) = &self.word_list_path {
            settings.word_list_file = Some(path.clone());
        }
        if let Some(size) = self.word_size {
            settings.word_size = size;
        }
        if let Some(guesses) = self.num_guesses {
            settings.num_guesses = guesses;
        }
        if self.classic {
            settings.evaluation_mode = crate::evaluator::EvaluationMode::Classic;
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

enum PlainInput {
    Guess(String),
    Hint,
    NewGame,
    Exit,
}

fn parse_plain_input(line: &str) -> PlainInput {
    let input = line.trim().to_lowercase();
    match input.as_str() {
        "exit" => PlainInput::Exit,
        "new" | "next" => PlainInput::NewGame,
        "hint" => PlainInput::Hint,
        _ => PlainInput::Guess(input),
    }
}

fn cell(letter: char, state: Option<LetterState>) -> String {
    let letter = letter.to_ascii_uppercase();
    match state {
        Some(LetterState::Correct) => format!("[{letter}]"),
        Some(LetterState::Misplaced) => format!("({letter})"),
        Some(LetterState::Incorrect) => " - ".to_string(),
        None => format!(" {letter} "),
    }
}

/// Plain text display writing to any `Write`.
///
/// Correct letters print as `[A]`, misplaced as `(A)`, absent as ` - `.
pub struct PlainDisplay<W: Write> {
    out: W,
    rows: Vec<Vec<Option<char>>>,
    key_layout: Vec<Vec<String>>,
    key_states: KeyStates,
    over: bool,
}

impl<W: Write> PlainDisplay<W> {
    pub fn new(out: W, settings: &Settings) -> Self {
        Self {
            out,
            rows: vec![vec![None; settings.word_size]; settings.num_guesses],
            key_layout: settings.ui.keyboard.key_layout.clone(),
            key_states: KeyStates::new(),
            over: false,
        }
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}") {
            log::warn!("Failed to write output: {e}");
        }
    }

    pub fn prompt(&mut self) {
        let text = if self.over {
            "Type 'new' for a new game or 'exit' to quit."
        } else {
            "Enter your guess ('hint', 'new' or 'exit'):"
        };
        self.emit(text);
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render_keyboard(&mut self) {
        let lines: Vec<String> = self
            .key_layout
            .iter()
            .map(|row| {
                row.iter()
                    .filter_map(|label| {
                        let mut chars = label.chars();
                        match (chars.next(), chars.next()) {
                            (Some(c), None) => {
                                let c = c.to_ascii_lowercase();
                                Some(cell(c, self.key_states.get(&c).copied()))
                            }
                            _ => None,
                        }
                    })
                    .collect::<String>()
            })
            .collect();
        for line in lines {
            self.emit(&line);
        }
    }
}

impl<W: Write> WordyDisplay for PlainDisplay<W> {
    fn set_letter(&mut self, letter: Option<char>, guess_index: usize, position: usize) {
        if let Some(slot) = self
            .rows
            .get_mut(guess_index)
            .and_then(|row| row.get_mut(position))
        {
            *slot = letter;
        }
    }

    fn show_result(&mut self, guess_index: usize, states: &[LetterState]) {
        let Some(row) = self.rows.get(guess_index) else {
            return;
        };
        let line: String = row
            .iter()
            .zip(states)
            .map(|(letter, &state)| cell(letter.unwrap_or(' '), Some(state)))
            .collect();
        self.emit(&format!("{}: {line}", guess_index + 1));
    }

    fn set_key_colors(&mut self, key_states: &KeyStates) {
        for (&letter, &state) in key_states {
            self.key_states
                .entry(letter)
                .and_modify(|best| *best = (*best).max(state))
                .or_insert(state);
        }
        self.render_keyboard();
    }

    fn display_message(&mut self, message: &str) {
        self.emit(message);
    }

    fn game_over(&mut self) {
        self.over = true;
    }

    fn reset(&mut self) {
        for row in &mut self.rows {
            row.fill(None);
        }
        self.key_states.clear();
        self.over = false;
    }
}

/// Line based game loop: each line is typed through the keyboard bindings and
/// submitted. Returns when the reader is exhausted or the player types `exit`.
pub fn run_plain<R: BufRead, W: Write>(
    controller: &mut WordyController<PlainDisplay<W>>,
    bindings: &KeyBindings,
    mut reader: R,
) -> io::Result<()> {
    loop {
        controller.display_mut().prompt();
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            info_log!("run_plain() - input exhausted");
            return Ok(());
        }

        match parse_plain_input(&line) {
            PlainInput::Exit => {
                controller.display_mut().display_message("Exiting.");
                return Ok(());
            }
            PlainInput::NewGame => controller.handle(KeyAction::NewGame),
            PlainInput::Hint => controller.handle(KeyAction::Hint),
            PlainInput::Guess(_) if controller.is_over() => {}
            PlainInput::Guess(guess) => {
                // Each line is a whole attempt, so leftovers from a rejected one go first
                controller.clear_current_guess();
                if guess.chars().count() > controller.model().word_size() {
                    controller
                        .display_mut()
                        .display_message(&format!("{guess} is too long."));
                    continue;
                }
                let mut unknown = None;
                for c in guess.chars() {
                    match bindings.resolve(KeySymbol::Char(c)) {
                        Some(action) => controller.handle(action),
                        None => {
                            unknown = Some(c);
                            break;
                        }
                    }
                }
                if let Some(c) = unknown {
                    debug_log!("run_plain() - '{}' is not bound", c);
                    controller.clear_current_guess();
                    controller
                        .display_mut()
                        .display_message(&format!("'{c}' is not on the keyboard."));
                    continue;
                }
                let submit = bindings
                    .resolve(KeySymbol::Enter)
                    .unwrap_or(KeyAction::Submit);
                controller.handle(submit);
            }
        }
    }
}
