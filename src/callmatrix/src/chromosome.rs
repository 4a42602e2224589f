use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
};

use crate::error::CallMatrixError;

/// A parsed chromosome identity, carrying both the original text (for
/// display/output) and a canonical ordering key.
///
/// Grammar (case-insensitive): `^(chromosome|chr)?\s*(\S+)$`. The captured
/// token is parsed as a positive integer if possible; otherwise it is
/// uppercased and matched against `{X, Y, M}`. `numeric < X < Y < M`.
///
/// Two `ChrName`s are equal iff their canonical key matches — `"chr1"` and
/// `"chromosome1"` denote the same chromosome for ordering and grouping
/// purposes, even though their original text differs.
#[derive(Debug, Clone)]
pub struct ChrName {
    raw: String,
    key: ChrKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ChrKey {
    Numeric(u64),
    X,
    Y,
    M,
}

impl ChrName {
    /// Parse a chromosome name per the grammar above.
    ///
    /// # Errors
    /// Returns [`CallMatrixError::InvalidChromosome`] if `s` does not match
    /// the grammar, or the captured token is neither a positive integer nor
    /// one of `X`/`Y`/`M`.
    pub fn parse(s: &str) -> Result<Self, CallMatrixError> {
        let invalid = || CallMatrixError::InvalidChromosome(s.to_string());

        if s.is_empty() {
            return Err(invalid());
        }

        let lower = s.to_ascii_lowercase();
        let rest = if lower.starts_with("chromosome") {
            &s[10..]
        } else if lower.starts_with("chr") {
            &s[3..]
        } else {
            s
        };
        let token = rest.trim_start();

        if token.is_empty() || token.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        if let Ok(n) = token.parse::<u64>() {
            if n > 0 {
                return Ok(Self { raw: s.to_string(), key: ChrKey::Numeric(n) });
            }
            return Err(invalid());
        }

        let key = match token.to_ascii_uppercase().as_str() {
            "X" => ChrKey::X,
            "Y" => ChrKey::Y,
            "M" => ChrKey::M,
            _ => return Err(invalid()),
        };
        Ok(Self { raw: s.to_string(), key })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Display for ChrName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for ChrName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
impl Eq for ChrName {}

impl Ord for ChrName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}
impl PartialOrd for ChrName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
