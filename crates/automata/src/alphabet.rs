#![forbid(unsafe_code)]

use std::fmt;

use itertools::Itertools;
use omega_utilities::OmegaError;
use rustc_hash::FxHashMap;

use crate::LetterIndex;

/// A finite word over an [Alphabet].
pub type Word = Vec<LetterIndex>;

/// A finite alphabet, maps letter names bijectively to the indices `0..len`.
///
/// Letters are only ever appended, so indices handed out earlier stay valid
/// when an alphabet is extended while reading a second automaton.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alphabet {
    letters: Vec<String>,
    indices: FxHashMap<String, LetterIndex>,
}

impl Alphabet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an alphabet with the given letters, in order.
    pub fn from_letters<S: AsRef<str>>(letters: impl IntoIterator<Item = S>) -> Self {
        let mut alphabet = Self::new();
        for letter in letters {
            alphabet.insert(letter.as_ref());
        }
        alphabet
    }

    /// Returns the index of the given letter, adding it when it is new.
    pub fn insert(&mut self, letter: &str) -> LetterIndex {
        if let Some(index) = self.indices.get(letter) {
            return *index;
        }

        let index = LetterIndex::new(self.letters.len());
        self.letters.push(letter.to_string());
        self.indices.insert(letter.to_string(), index);
        index
    }

    /// Returns the index of the given letter, if it is part of the alphabet.
    pub fn index_of(&self, letter: &str) -> Option<LetterIndex> {
        self.indices.get(letter).copied()
    }

    /// Returns the name of the letter with the given index.
    pub fn letter(&self, index: LetterIndex) -> &str {
        &self.letters[index]
    }

    /// Returns the number of letters.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Iterates over all letter indices.
    pub fn iter(&self) -> impl Iterator<Item = LetterIndex> + use<> {
        (0..self.letters.len()).map(LetterIndex::new)
    }

    /// Returns true iff this alphabet consists of the first letters of `other`, in the same order.
    pub fn is_prefix_of(&self, other: &Alphabet) -> bool {
        self.letters.len() <= other.letters.len() && self.letters.iter().zip(&other.letters).all(|(l, r)| l == r)
    }

    /// Parses a word of whitespace separated letters. When every letter of the
    /// alphabet is a single character the letters may also be written without
    /// separators, e.g. `abba`.
    pub fn parse_word(&self, input: &str) -> Result<Word, OmegaError> {
        let single_characters = self.letters.iter().all(|letter| letter.chars().count() == 1);

        let mut word = Word::new();
        for token in input.split_whitespace() {
            if let Some(index) = self.index_of(token) {
                word.push(index);
            } else if single_characters {
                for character in token.chars() {
                    let mut buffer = [0u8; 4];
                    let index = self
                        .index_of(character.encode_utf8(&mut buffer))
                        .ok_or_else(|| format!("Unknown letter '{character}' in word '{input}'"))?;
                    word.push(index);
                }
            } else {
                return Err(format!("Unknown letter '{token}' in word '{input}'").into());
            }
        }

        Ok(word)
    }

    /// Returns a printable representation of the word, letters are separated by spaces.
    pub fn format_word<'a>(&'a self, word: &'a [LetterIndex]) -> impl fmt::Display + 'a {
        FormattedWord { alphabet: self, word }
    }
}

struct FormattedWord<'a> {
    alphabet: &'a Alphabet,
    word: &'a [LetterIndex],
}

impl fmt::Display for FormattedWord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.word.is_empty() {
            // The empty word.
            return write!(f, "ε");
        }

        write!(
            f,
            "{}",
            self.word.iter().map(|letter| self.alphabet.letter(*letter)).format(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_insert_is_stable() {
        let mut alphabet = Alphabet::from_letters(["a", "b"]);
        let before = alphabet.clone();

        assert_eq!(alphabet.insert("b"), LetterIndex::new(1));
        assert_eq!(alphabet.insert("c"), LetterIndex::new(2));
        assert!(before.is_prefix_of(&alphabet));
        assert!(!alphabet.is_prefix_of(&before));
    }

    #[test]
    fn test_alphabet_parse_word() {
        let alphabet = Alphabet::from_letters(["a", "b"]);

        let word = alphabet.parse_word("abba").unwrap();
        assert_eq!(word.len(), 4);
        assert_eq!(alphabet.format_word(&word).to_string(), "a b b a");
        assert_eq!(alphabet.parse_word("a b").unwrap(), alphabet.parse_word("ab").unwrap());
        assert!(alphabet.parse_word("abc").is_err());
        assert_eq!(alphabet.format_word(&[]).to_string(), "ε");
    }

    #[test]
    fn test_alphabet_parse_long_letters() {
        let alphabet = Alphabet::from_letters(["send", "receive"]);

        let word = alphabet.parse_word("send receive send").unwrap();
        assert_eq!(word, vec![LetterIndex::new(0), LetterIndex::new(1), LetterIndex::new(0)]);
        assert!(alphabet.parse_word("sendreceive").is_err());
    }
}
