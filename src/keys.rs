use crate::error::{Result, WordyError};
use std::collections::HashMap;

pub const ENTER_LABEL: &str = "ENTER";
pub const BACK_LABEL: &str = "BACK";

/// A raw input symbol produced by a front-end.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum KeySymbol {
    Char(char),
    Enter,
    Back,
    Hint,
    NewGame,
}

/// What the controller should do in response to a key.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyAction {
    Letter(char),
    Back,
    Submit,
    Hint,
    NewGame,
}

/// Symbol to action table, built once from the keyboard layout.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeySymbol, KeyAction>,
}

impl KeyBindings {
    /// Bind every key of `layout`. Letter labels are case-insensitive;
    /// anything other than a single ASCII letter, `ENTER` or `BACK` is rejected.
    pub fn from_layout(layout: &[Vec<String>]) -> Result<Self> {
        let mut bindings = HashMap::new();
        for label in layout.iter().flatten() {
            let (symbol, action) = Self::parse_label(label)?;
            bindings.insert(symbol, action);
        }
        bindings.insert(KeySymbol::Hint, KeyAction::Hint);
        bindings.insert(KeySymbol::NewGame, KeyAction::NewGame);
        log::debug!("Built {} key bindings", bindings.len());
        Ok(Self { bindings })
    }

    fn parse_label(label: &str) -> Result<(KeySymbol, KeyAction)> {
        let upper = label.trim().to_ascii_uppercase();
        match upper.as_str() {
            ENTER_LABEL => Ok((KeySymbol::Enter, KeyAction::Submit)),
            BACK_LABEL => Ok((KeySymbol::Back, KeyAction::Back)),
            _ => {
                let mut chars = upper.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => {
                        let c = c.to_ascii_lowercase();
                        Ok((KeySymbol::Char(c), KeyAction::Letter(c)))
                    }
                    _ => Err(WordyError::InvalidKeyLabel(label.to_string())),
                }
            }
        }
    }

    /// Look up the action for `symbol`. Letters match regardless of case.
    pub fn resolve(&self, symbol: KeySymbol) -> Option<KeyAction> {
        let symbol = match symbol {
            KeySymbol::Char(c) => KeySymbol::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.bindings.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
