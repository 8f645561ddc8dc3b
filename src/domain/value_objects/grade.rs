//! Grade value object
//!
//! High-school grade of a roster entry. Each grade maps to a class label
//! that prefixes the default mailing-list names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Grade {
    Nine,
    Ten,
    Eleven,
    Twelve,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Nine, Grade::Ten, Grade::Eleven, Grade::Twelve];

    pub fn number(self) -> u8 {
        match self {
            Grade::Nine => 9,
            Grade::Ten => 10,
            Grade::Eleven => 11,
            Grade::Twelve => 12,
        }
    }

    /// Class label used in list names (`freshmen-b-students@...`)
    pub fn class_label(self) -> &'static str {
        match self {
            Grade::Nine => "freshmen",
            Grade::Ten => "sophomore",
            Grade::Eleven => "junior",
            Grade::Twelve => "senior",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl TryFrom<u8> for Grade {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            9 => Ok(Grade::Nine),
            10 => Ok(Grade::Ten),
            11 => Ok(Grade::Eleven),
            12 => Ok(Grade::Twelve),
            other => Err(format!("grade must be 9-12, got {}", other)),
        }
    }
}

impl From<Grade> for u8 {
    fn from(value: Grade) -> Self {
        value.number()
    }
}

impl FromStr for Grade {
    type Err = String;

    /// Accepts `9`, `09`, `9th`, ` 12TH ` and the like.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let digits = lower.strip_suffix("th").unwrap_or(&lower).trim();
        let n: u8 = digits
            .parse()
            .map_err(|_| format!("'{}' is not a grade", s.trim()))?;
        Grade::try_from(n)
    }
}
