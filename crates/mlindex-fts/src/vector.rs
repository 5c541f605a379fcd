//! Search vectors.
//!
//! A [`SearchVector`] is the analyzed form of an index text: each lexeme
//! with the 1-based positions where it occurred. It is what gets persisted in
//! an [`IndexRecord`](crate::record::IndexRecord) and is otherwise opaque to the
//! index computation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lexeme → positions map, ordered by lexeme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchVector {
    lexemes: BTreeMap<String, Vec<u32>>,
}

impl SearchVector {
    /// Create an empty vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `lexeme` at `position`.
    pub fn push(&mut self, lexeme: impl Into<String>, position: u32) {
        self.lexemes.entry(lexeme.into()).or_default().push(position);
    }

    /// Positions of `lexeme`, if present.
    pub fn positions(&self, lexeme: &str) -> Option<&[u32]> {
        self.lexemes.get(lexeme).map(Vec::as_slice)
    }

    /// Whether `lexeme` occurs in the vector.
    pub fn contains(&self, lexeme: &str) -> bool {
        self.lexemes.contains_key(lexeme)
    }

    /// Distinct lexemes, sorted.
    pub fn lexemes(&self) -> impl Iterator<Item = &str> {
        self.lexemes.keys().map(String::as_str)
    }

    /// Number of distinct lexemes.
    pub fn len(&self) -> usize {
        self.lexemes.len()
    }

    /// Whether the vector holds no lexeme.
    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for SearchVector {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        let mut vector = Self::new();
        for (lexeme, position) in iter {
            vector.push(lexeme, position);
        }
        vector
    }
}

/// `'lexeme':1,4 'other':2`
impl fmt::Display for SearchVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (lexeme, positions)) in self.lexemes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "'{lexeme}'")?;
            for (j, position) in positions.iter().enumerate() {
                let sep = if j == 0 { ':' } else { ',' };
                write!(f, "{sep}{position}")?;
            }
        }
        Ok(())
    }
}
