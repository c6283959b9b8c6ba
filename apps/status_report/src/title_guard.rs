//! Word-count rule for the joke title input.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_WORDS: usize = 10;

/// How a title with no words at all is counted.
///
/// The legacy page script counted an empty field as one word (splitting an
/// empty string still yields one piece). Both choices are kept so the
/// behavior is picked explicitly; with any maximum of at least one word the
/// validity outcome is the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(not(target_arch = "wasm32"), derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum EmptyTitlePolicy {
    #[default]
    CountsAsOne,
    CountsAsZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRule {
    pub max_words: usize,
    #[serde(default)]
    pub empty: EmptyTitlePolicy,
}

impl Default for TitleRule {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
            empty: EmptyTitlePolicy::default(),
        }
    }
}

/// Whitespace as the JavaScript regex class `\s` defines it.
///
/// That is Unicode `White_Space` without U+0085 (NEL), plus U+FEFF (BOM).
fn is_title_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{0085}')
}

impl TitleRule {
    /// Whitespace-delimited words in the trimmed value.
    pub fn count_words(&self, value: &str) -> usize {
        let words = value.split(is_title_space).filter(|word| !word.is_empty());

        match words.count() {
            0 => match self.empty {
                EmptyTitlePolicy::CountsAsOne => 1,
                EmptyTitlePolicy::CountsAsZero => 0,
            },
            n => n,
        }
    }

    /// The custom validity message for `value`; empty when the title is acceptable.
    pub fn validation_message(&self, value: &str) -> String {
        if self.count_words(value) > self.max_words {
            format!("Title cannot be more than {} words", self.max_words)
        } else {
            String::new()
        }
    }
}
