//! TUI (Terminal User Interface) front-end for Wordy
//!
//! # Architecture
//! - `TuiView`: board, keyboard and message state. Implements `WordyDisplay`
//!   so the controller drives it directly, and renders itself with Ratatui.
//! - `run_tui`: owns the terminal and the crossterm event loop, turning key
//!   presses into `KeySymbol`s and dispatching them through the key bindings.
//!
//! Everything runs on one thread; a key press is fully handled before the
//! next frame is drawn.

use crate::evaluator::{KeyStates, LetterState};
use crate::game_state::{WordyController, WordyDisplay};
use crate::keys::{KeyBindings, KeySymbol};
use crate::settings::{Settings, UiSettings};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::str::FromStr;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

/// Colours resolved from the UI settings.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Palette {
    correct: Color,
    misplaced: Color,
    incorrect: Color,
    initial_bg: Color,
    initial_text: Color,
    updated_text: Color,
    key_text: Color,
}

fn parse_color(value: &str, fallback: Color) -> Color {
    Color::from_str(value).unwrap_or_else(|_| {
        log::warn!("Unknown colour '{value}', using {fallback:?}");
        fallback
    })
}

impl Palette {
    fn from_settings(ui: &UiSettings) -> Self {
        Self {
            correct: parse_color(&ui.correct_color, Color::Green),
            misplaced: parse_color(&ui.misplaced_color, Color::Yellow),
            incorrect: parse_color(&ui.incorrect_color, Color::DarkGray),
            initial_bg: parse_color(&ui.guesses.initial_bg_color, Color::Black),
            initial_text: parse_color(&ui.guesses.initial_text_color, Color::White),
            updated_text: parse_color(&ui.guesses.updated_text_color, Color::Black),
            key_text: parse_color(&ui.keyboard.text_color, Color::White),
        }
    }

    fn state_color(&self, state: LetterState) -> Color {
        match state {
            LetterState::Correct => self.correct,
            LetterState::Misplaced => self.misplaced,
            LetterState::Incorrect => self.incorrect,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct GuessRow {
    letters: Vec<Option<char>>,
    states: Vec<Option<LetterState>>,
}

impl GuessRow {
    fn new(word_size: usize) -> Self {
        Self {
            letters: vec![None; word_size],
            states: vec![None; word_size],
        }
    }
}

/// Terminal rendering of the game. Holds only what is on screen.
pub struct TuiView {
    rows: Vec<GuessRow>,
    key_layout: Vec<Vec<String>>,
    key_states: KeyStates,
    message: String,
    over: bool,
    palette: Palette,
    letter_padding: u16,
}

impl TuiView {
    pub fn new(settings: &Settings) -> Self {
        Self {
            rows: vec![GuessRow::new(settings.word_size); settings.num_guesses],
            key_layout: settings.ui.keyboard.key_layout.clone(),
            key_states: KeyStates::new(),
            message: String::new(),
            over: false,
            palette: Palette::from_settings(&settings.ui),
            letter_padding: settings.ui.guesses.letter_padding,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn render(&self, f: &mut Frame) {
        let board_height = u16::try_from(self.rows.len())
            .unwrap_or(u16::MAX)
            .saturating_mul(ROW_SPACING)
            .saturating_sub(1)
            .saturating_add(2);
        let keyboard_height = u16::try_from(self.key_layout.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),               // Title
                Constraint::Length(board_height),    // Guesses
                Constraint::Length(3),               // Message
                Constraint::Length(keyboard_height), // Keyboard
                Constraint::Length(3),               // Instructions
                Constraint::Min(0),
            ])
            .split(f.area());

        let title = Paragraph::new("WORDY")
            .style(HEADER_STYLE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        f.render_widget(self.board(), chunks[1]);

        let message = Paragraph::new(Span::styled(self.message.as_str(), MESSAGE_STYLE))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(message, chunks[2]);

        f.render_widget(self.keyboard(), chunks[3]);

        let instructions = if self.over {
            "Ctrl-N: New Game | ESC: Quit"
        } else {
            "Type letters | ENTER: Submit | BACKSPACE: Delete | Ctrl-H/F1: Hint | ESC: Quit"
        };
        let instructions = Paragraph::new(instructions)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(instructions, chunks[4]);
    }

    fn board(&self) -> Paragraph<'_> {
        let gap = " ".repeat(usize::from(self.letter_padding));
        let mut lines = Vec::with_capacity(self.rows.len() * usize::from(ROW_SPACING));
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            let mut spans = Vec::with_capacity(row.letters.len() * 2);
            for (pos, (letter, state)) in row.letters.iter().zip(&row.states).enumerate() {
                if pos > 0 {
                    spans.push(Span::raw(gap.clone()));
                }
                let style = match state {
                    Some(state) => Style::default()
                        .fg(self.palette.updated_text)
                        .bg(self.palette.state_color(*state)),
                    None => Style::default()
                        .fg(self.palette.initial_text)
                        .bg(self.palette.initial_bg),
                };
                let letter = letter.map_or(' ', |c| c.to_ascii_uppercase());
                spans.push(Span::styled(
                    format!(" {letter} "),
                    style.add_modifier(Modifier::BOLD),
                ));
            }
            lines.push(Line::from(spans));
        }
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("Guesses").borders(Borders::ALL))
    }

    fn keyboard(&self) -> Paragraph<'_> {
        let lines: Vec<Line> = self
            .key_layout
            .iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|label| {
                        let letter = label.chars().next().map(|c| c.to_ascii_lowercase());
                        let color = match letter {
                            Some(c) if label.chars().count() == 1 => self
                                .key_states
                                .get(&c)
                                .map_or(self.palette.key_text, |s| self.palette.state_color(*s)),
                            _ => self.palette.key_text,
                        };
                        Span::styled(
                            format!(" {} ", label.to_ascii_uppercase()),
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("Keyboard").borders(Borders::ALL))
    }
}

impl WordyDisplay for TuiView {
    fn set_letter(&mut self, letter: Option<char>, guess_index: usize, position: usize) {
        if let Some(slot) = self
            .rows
            .get_mut(guess_index)
            .and_then(|row| row.letters.get_mut(position))
        {
            *slot = letter;
        }
    }

    fn show_result(&mut self, guess_index: usize, states: &[LetterState]) {
        if let Some(row) = self.rows.get_mut(guess_index) {
            for (slot, &state) in row.states.iter_mut().zip(states) {
                *slot = Some(state);
            }
        }
    }

    fn set_key_colors(&mut self, key_states: &KeyStates) {
        // A key never loses colour it earned in an earlier guess
        for (&letter, &state) in key_states {
            self.key_states
                .entry(letter)
                .and_modify(|best| *best = (*best).max(state))
                .or_insert(state);
        }
    }

    fn display_message(&mut self, message: &str) {
        self.message = message.to_string();
    }

    fn game_over(&mut self) {
        self.over = true;
    }

    fn reset(&mut self) {
        let word_size = self.rows.first().map_or(0, |row| row.letters.len());
        for row in &mut self.rows {
            *row = GuessRow::new(word_size);
        }
        self.key_states.clear();
        self.message.clear();
        self.over = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiInput {
    Key(KeySymbol),
    Quit,
}

fn map_key_event(key: KeyEvent) -> Option<TuiInput> {
    // Only process Press events, ignore Release and Repeat to avoid double input
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Esc => Some(TuiInput::Quit),
        KeyCode::Char('c' | 'C') if ctrl => Some(TuiInput::Quit),
        KeyCode::Char('h' | 'H') if ctrl => Some(TuiInput::Key(KeySymbol::Hint)),
        KeyCode::Char('n' | 'N') if ctrl => Some(TuiInput::Key(KeySymbol::NewGame)),
        KeyCode::F(1) => Some(TuiInput::Key(KeySymbol::Hint)),
        KeyCode::Char(c) if c.is_ascii_alphabetic() && !ctrl && !alt => {
            Some(TuiInput::Key(KeySymbol::Char(c)))
        }
        KeyCode::Enter => Some(TuiInput::Key(KeySymbol::Enter)),
        KeyCode::Backspace => Some(TuiInput::Key(KeySymbol::Back)),
        _ => None,
    }
}

/// Raw-mode alternate-screen terminal, restored on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn start() -> Result<Self, io::Error> {
        info_log!("TerminalSession::start() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Run the interactive game until the player quits.
pub fn run_tui(
    controller: &mut WordyController<TuiView>,
    bindings: &KeyBindings,
) -> Result<(), io::Error> {
    let mut session = TerminalSession::start()?;
    loop {
        session.terminal.draw(|f| controller.display().render(f))?;

        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match map_key_event(key) {
            Some(TuiInput::Quit) => {
                info_log!("run_tui() - quit requested");
                break;
            }
            Some(TuiInput::Key(symbol)) => match bindings.resolve(symbol) {
                Some(action) => controller.handle(action),
                None => {
                    debug_log!("run_tui() - {:?} is not bound", symbol);
                }
            },
            None => {
                debug_log!("run_tui() - ignoring {:?}", key.code);
            }
        }
    }
    Ok(())
}
