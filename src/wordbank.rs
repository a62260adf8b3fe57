use crate::error::{Result, WordyError};
use crate::settings::Settings;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORD_LIST: &str = include_str!("resources/wordlist.txt");

/// The set of playable words, all of one length, in file order.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
    lookup: HashSet<String>,
    word_size: usize,
}

impl WordList {
    /// Build a list from already-filtered words. Empty lists are rejected.
    pub fn new(words: Vec<String>, word_size: usize, source_name: &str) -> Result<Self> {
        let mut lookup = HashSet::with_capacity(words.len());
        let words: Vec<String> = words
            .into_iter()
            .filter(|w| lookup.insert(w.clone()))
            .collect();
        if words.is_empty() {
            return Err(WordyError::EmptyWordList {
                word_size,
                source_name: source_name.to_string(),
            });
        }
        Ok(Self {
            words,
            lookup,
            word_size,
        })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word_size(&self) -> usize {
        self.word_size
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // The constructor guarantees at least one word
        self.words
            .choose(rng)
            .map_or_else(|| self.words[0].as_str(), String::as_str)
    }
}

fn normalize_line(line: &str, word_size: usize) -> Option<String> {
    let word = line.trim().to_lowercase();
    (word.chars().count() == word_size && word.chars().all(|c| c.is_ascii_alphabetic()))
        .then_some(word)
}

pub fn load_word_list_from_str(data: &str, word_size: usize) -> Result<WordList> {
    let words = data
        .lines()
        .filter_map(|line| normalize_line(line, word_size))
        .collect();
    WordList::new(words, word_size, "embedded word list")
}

pub fn load_word_list_from_file<P: AsRef<Path>>(path: P, word_size: usize) -> Result<WordList> {
    let path = path.as_ref();
    let io_err = |source| WordyError::Io {
        path: path.display().to_string(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize_line(&line.map_err(io_err)?, word_size) {
            words.push(word);
        }
    }
    log::info!("Loaded {} words of length {} from {}", words.len(), word_size, path.display());
    WordList::new(words, word_size, &path.display().to_string())
}

/// Load the file named in `settings`, or the embedded list when none is set.
pub fn load_configured_word_list(settings: &Settings) -> Result<WordList> {
    match &settings.word_list_file {
        Some(path) => load_word_list_from_file(path, settings.word_size),
        None => load_word_list_from_str(EMBEDDED_WORD_LIST, settings.word_size),
    }
}
