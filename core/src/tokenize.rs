//! Text normalization and tokenization.
//!
//! Turns raw text into the normalized token stream the diff engines consume:
//! NFC-composed, punctuation-stripped, optionally lowercased words. Decimal
//! numbers survive splitting ("1.23" stays one token) and caller-supplied
//! protect patterns shield phrases (identifiers, formulas) from any
//! formatting.

use crate::config::ConfigError;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeConfig {
    /// Lowercase every normalized token.
    pub lowercase: bool,
    /// Regex patterns whose matches are emitted verbatim, unformatted.
    pub protect: Vec<String>,
}

impl Default for TokenizeConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            protect: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct Tokenizer {
    lowercase: bool,
    protect: Option<Regex>,
}

impl Tokenizer {
    pub fn new(config: &TokenizeConfig) -> Result<Self, ConfigError> {
        let protect = if config.protect.is_empty() {
            None
        } else {
            let joined = config.protect.join("|");
            Some(
                Regex::new(&joined).map_err(|e| ConfigError::InvalidProtectPattern {
                    pattern: joined.clone(),
                    reason: e.to_string(),
                })?,
            )
        };
        Ok(Self {
            lowercase: config.lowercase,
            protect,
        })
    }

    /// Tokenizes one block of text into normalized words.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let composed = compose(text);
        let mut tokens = Vec::new();
        for word in composed.split_whitespace() {
            self.split_word(word, &mut tokens);
        }
        tokens
    }

    /// Splits on blank lines and tokenizes each paragraph separately.
    pub fn tokenize_paragraphs(&self, text: &str) -> Vec<Vec<String>> {
        split_paragraphs(text)
            .into_iter()
            .map(|p| self.tokenize(p))
            .filter(|tokens| !tokens.is_empty())
            .collect()
    }

    fn split_word(&self, word: &str, out: &mut Vec<String>) {
        if let Some(protect) = &self.protect {
            // Empty matches would recurse forever; only non-empty spans
            // count as protected.
            if let Some(m) = protect.find(word).filter(|m| !m.as_str().is_empty()) {
                if m.start() > 0 {
                    self.split_word(&word[..m.start()], out);
                }
                out.push(m.as_str().to_string());
                if m.end() < word.len() {
                    self.split_word(&word[m.end()..], out);
                }
                return;
            }
        }

        let chars: Vec<char> = word.chars().collect();
        let mut current = String::new();
        for (i, &ch) in chars.iter().enumerate() {
            if is_word_char(ch) {
                current.push(ch);
                continue;
            }
            // Keep a decimal point between two digits so numbers like
            // "1.23" stay one token.
            if ch == '.'
                && i > 0
                && i + 1 < chars.len()
                && chars[i - 1].is_ascii_digit()
                && chars[i + 1].is_ascii_digit()
            {
                current.push(ch);
                continue;
            }
            self.flush(&mut current, out);
        }
        self.flush(&mut current, out);
    }

    fn flush(&self, current: &mut String, out: &mut Vec<String>) {
        if current.is_empty() {
            return;
        }
        let token = std::mem::take(current);
        out.push(if self.lowercase {
            token.to_lowercase()
        } else {
            token
        });
    }
}

/// NFC-composes decomposed characters so accent variants compare equal.
/// Dotless i/j (which NFC cannot compose with accents) are mapped to their
/// dotted forms first.
fn compose(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{0131}' => 'i',
            '\u{0237}' => 'j',
            other => other,
        })
        .nfc()
        .collect()
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut paragraphs = Vec::new();
    let mut start = 0usize;
    let mut blank_start: Option<usize> = None;
    let mut offset = 0usize;
    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            if blank_start.is_none() {
                blank_start = Some(offset);
            }
        } else if let Some(end) = blank_start.take() {
            paragraphs.push(&text[start..end]);
            start = offset;
        }
        offset += line.len();
    }
    paragraphs.push(&text[start..]);
    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(&TokenizeConfig::default()).expect("default config is valid")
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        let tokens = tokenizer().tokenize("Hello, World!");
        assert_eq!(tokens, vec!["hello", "world"]);
    }

    #[test]
    fn keeps_decimal_numbers_whole() {
        let tokens = tokenizer().tokenize("pi is 3.14159, roughly.");
        assert_eq!(tokens, vec!["pi", "is", "3.14159", "roughly"]);
    }

    #[test]
    fn splits_hyphenated_words() {
        let tokens = tokenizer().tokenize("state-of-the-art");
        assert_eq!(tokens, vec!["state", "of", "the", "art"]);
    }

    #[test]
    fn composes_decomposed_accents() {
        // "a" + combining diaeresis composes to the single-codepoint "ä".
        let tokens = tokenizer().tokenize("a\u{0308}rger");
        assert_eq!(tokens, vec!["\u{00e4}rger"]);
    }

    #[test]
    fn maps_dotless_i() {
        let tokens = tokenizer().tokenize("dotless\u{0131}");
        assert_eq!(tokens, vec!["dotlessi"]);
    }

    #[test]
    fn keep_case_preserves_capitals() {
        let config = TokenizeConfig {
            lowercase: false,
            ..Default::default()
        };
        let tokens = Tokenizer::new(&config)
            .expect("valid config")
            .tokenize("Hello World");
        assert_eq!(tokens, vec!["Hello", "World"]);
    }

    #[test]
    fn protect_pattern_shields_matches_from_formatting() {
        let config = TokenizeConfig {
            lowercase: true,
            protect: vec![r"\[formula\]".to_string()],
        };
        let tokens = Tokenizer::new(&config)
            .expect("valid config")
            .tokenize("See [formula] Here");
        assert_eq!(tokens, vec!["see", "[formula]", "here"]);
    }

    #[test]
    fn protect_pattern_formats_surrounding_fragments() {
        let config = TokenizeConfig {
            lowercase: true,
            protect: vec![r"\$\w+\$".to_string()],
        };
        let tokens = Tokenizer::new(&config)
            .expect("valid config")
            .tokenize("Pre$X$Post");
        assert_eq!(tokens, vec!["pre", "$X$", "post"]);
    }

    #[test]
    fn invalid_protect_pattern_is_rejected() {
        let config = TokenizeConfig {
            lowercase: true,
            protect: vec!["[broken".to_string()],
        };
        let err = Tokenizer::new(&config).expect_err("broken regex should fail");
        assert!(matches!(err, ConfigError::InvalidProtectPattern { .. }));
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let text = "First para here.\n\nSecond one.\n   \nThird.";
        let paragraphs = tokenizer().tokenize_paragraphs(text);
        assert_eq!(
            paragraphs,
            vec![
                vec!["first", "para", "here"],
                vec!["second", "one"],
                vec!["third"],
            ]
        );
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert!(tokenizer().tokenize("").is_empty());
        assert!(tokenizer().tokenize_paragraphs("").is_empty());
    }
}
