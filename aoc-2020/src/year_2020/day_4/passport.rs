//! Passport records and batch parsing

use itertools::Itertools;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The passport fields the scanners know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BirthYear,
    IssueYear,
    ExpirationYear,
    Height,
    HairColor,
    EyeColor,
    PassportId,
    CountryId,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::BirthYear,
        Field::IssueYear,
        Field::ExpirationYear,
        Field::Height,
        Field::HairColor,
        Field::EyeColor,
        Field::PassportId,
        Field::CountryId,
    ];

    /// Fields a passport must carry; `cid` is optional
    pub const REQUIRED: [Field; 7] = [
        Field::BirthYear,
        Field::IssueYear,
        Field::ExpirationYear,
        Field::Height,
        Field::HairColor,
        Field::EyeColor,
        Field::PassportId,
    ];

    /// Three-letter key used in the batch file
    pub const fn key(self) -> &'static str {
        match self {
            Field::BirthYear => "byr",
            Field::IssueYear => "iyr",
            Field::ExpirationYear => "eyr",
            Field::Height => "hgt",
            Field::HairColor => "hcl",
            Field::EyeColor => "ecl",
            Field::PassportId => "pid",
            Field::CountryId => "cid",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.key() == key)
    }

    pub const fn is_required(self) -> bool {
        !matches!(self, Field::CountryId)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Errors raised while reading a batch file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassportError {
    /// A token without the `:` between key and value
    #[error("token `{token}` is not a `key:value` pair")]
    MissingSeparator { token: String },

    /// Wraps an error with the 1-based position of the passport in the batch
    #[error("passport {record}: {source}")]
    InRecord {
        record: usize,
        source: Box<PassportError>,
    },
}

impl PassportError {
    fn in_record(self, record: usize) -> Self {
        PassportError::InRecord {
            record,
            source: Box::new(self),
        }
    }
}

/// One passport: `key:value` pairs in the order their keys first appeared.
///
/// Keys are not restricted to the known [`Field`]s. A repeated key keeps its
/// first position but takes the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Passport {
    fields: Vec<(String, String)>,
}

impl Passport {
    /// Value stored under an arbitrary key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a known field
    pub fn field(&self, field: Field) -> Option<&str> {
        self.get(field.key())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn insert(&mut self, key: &str, value: &str) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.fields.push((key.to_string(), value.to_string())),
        }
    }
}

impl FromStr for Passport {
    type Err = PassportError;

    /// Parse one block of whitespace-separated `key:value` tokens.
    fn from_str(block: &str) -> Result<Self, Self::Err> {
        let mut passport = Passport::default();
        for token in block.split_whitespace() {
            let (key, value) =
                token
                    .split_once(':')
                    .ok_or_else(|| PassportError::MissingSeparator {
                        token: token.to_string(),
                    })?;
            passport.insert(key, value);
        }
        Ok(passport)
    }
}

/// Parse a batch file: one passport per blank-line separated block.
///
/// Blank lines may contain whitespace, and runs of them (including leading and
/// trailing ones) never produce empty passports. Any malformed token fails the
/// whole batch.
pub fn parse_batch(input: &str) -> Result<Vec<Passport>, PassportError> {
    let blocks = input.lines().chunk_by(|line| line.trim().is_empty());

    blocks
        .into_iter()
        .filter(|(blank, _)| !blank)
        .map(|(_, mut lines)| lines.join("\n"))
        .enumerate()
        .map(|(idx, block)| {
            block
                .parse::<Passport>()
                .map_err(|e| e.in_record(idx + 1))
        })
        .collect()
}
