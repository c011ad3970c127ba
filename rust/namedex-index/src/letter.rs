//! The bucketing key: a single uppercase ASCII letter.

use std::{fmt, str::FromStr};

use namedex_common::{Result, error::Error};
use serde::{Serialize, Serializer};

/// An uppercase ASCII letter `A`..=`Z`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(u8);

impl Letter {
    /// Number of distinct letters.
    pub const COUNT: usize = 26;

    /// Returns the letter for an uppercase ASCII character.
    pub fn new(c: char) -> Option<Letter> {
        c.is_ascii_uppercase().then_some(Letter(c as u8))
    }

    /// Derives the bucketing key of a record from its first character.
    ///
    /// The character is case-folded to uppercase; anything outside ASCII
    /// `a`..=`z` / `A`..=`Z` has no bucket.
    pub fn from_leading_char(c: char) -> Option<Letter> {
        Letter::new(c.to_ascii_uppercase())
    }

    /// Parses an externally supplied letter, which must be exactly one
    /// character in `A`..=`Z`.
    pub fn parse(s: &str) -> Result<Letter> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Letter::new(c).ok_or_else(Self::invalid),
            _ => Err(Self::invalid()),
        }
    }

    /// Zero-based position in the alphabet.
    #[inline]
    pub fn index(self) -> usize {
        (self.0 - b'A') as usize
    }

    #[inline]
    pub fn as_char(self) -> char {
        self.0 as char
    }

    #[cold]
    fn invalid() -> Error {
        Error::invalid_arg("letter", "must be a single character between A and Z")
    }
}

impl FromStr for Letter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Letter> {
        Letter::parse(s)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl fmt::Debug for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Letter({})", self.as_char())
    }
}

impl Serialize for Letter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::Letter;

    #[test]
    fn test_parse() {
        assert_eq!(Letter::parse("A").unwrap().as_char(), 'A');
        assert_eq!(Letter::parse("Z").unwrap().index(), 25);
        for bad in ["", "a", "1", "AB", "É", " "] {
            let err = Letter::parse(bad).unwrap_err();
            assert!(err.is_validation(), "{bad:?} must be rejected");
        }
        assert_eq!("Q".parse::<Letter>().unwrap().to_string(), "Q");
    }

    #[test]
    fn test_leading_char() {
        assert_eq!(Letter::from_leading_char('a'), Letter::new('A'));
        assert_eq!(Letter::from_leading_char('M'), Letter::new('M'));
        assert_eq!(Letter::from_leading_char('7'), None);
        assert_eq!(Letter::from_leading_char('_'), None);
        assert_eq!(Letter::from_leading_char('é'), None);
    }

    #[test]
    fn test_index() {
        assert_eq!(Letter::new('A').unwrap().index(), 0);
        assert_eq!(Letter::new('z').unwrap().index(), Letter::COUNT - 1);
    }
}
