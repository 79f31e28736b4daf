//! Page numeral styles
//!
//! Converts page numbers between integers and the three numbering styles a
//! bmk file can use: decimal (`Arabic`), uppercase Roman numerals (`Roman`,
//! 1 to 3999) and bijective base-26 letters (`Letters`: A..Z, AA, AB, ...).
//!
//! `parse` is the exact inverse of `format`: only canonical spellings are
//! accepted, so `parse(format(n, style), style) == n` for every valid `n`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ROMAN_MAX: u32 = 3999;

const ROMAN_PAIRS: &[(&str, u32)] = &[
    ("M", 1000),
    ("CM", 900),
    ("D", 500),
    ("CD", 400),
    ("C", 100),
    ("XC", 90),
    ("L", 50),
    ("XL", 40),
    ("X", 10),
    ("IX", 9),
    ("V", 5),
    ("IV", 4),
    ("I", 1),
];

/// Numbering style of page tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberStyle {
    #[default]
    Arabic,
    Roman,
    Letters,
}

impl NumberStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberStyle::Arabic => "Arabic",
            NumberStyle::Roman => "Roman",
            NumberStyle::Letters => "Letters",
        }
    }

    /// Name pdftk uses for this style in `PageLabelNumStyle` records.
    pub fn pdftk_name(&self) -> &'static str {
        match self {
            NumberStyle::Arabic => "DecimalArabicNumerals",
            NumberStyle::Roman => "UppercaseRomanNumerals",
            NumberStyle::Letters => "UppercaseLetters",
        }
    }

    /// Map a pdftk `PageLabelNumStyle` value. Unknown styles (including
    /// `NoNumber`) fall back to Arabic.
    pub fn from_pdftk_name(name: &str) -> Self {
        match name {
            "UppercaseRomanNumerals" | "LowercaseRomanNumerals" => NumberStyle::Roman,
            "UppercaseLetters" | "LowercaseLetters" => NumberStyle::Letters,
            _ => NumberStyle::Arabic,
        }
    }
}

impl fmt::Display for NumberStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumberStyle {
    type Err = NumeralError;

    /// Accepts the bmk names case-insensitively, plus the pdftk style names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "arabic" | "decimalarabicnumerals" => Ok(NumberStyle::Arabic),
            "roman" | "uppercaseromannumerals" | "lowercaseromannumerals" => {
                Ok(NumberStyle::Roman)
            }
            "letters" | "uppercaseletters" | "lowercaseletters" => Ok(NumberStyle::Letters),
            _ => Err(NumeralError::InvalidInput(format!(
                "unknown numbering style '{trimmed}' (expected Arabic, Roman or Letters)"
            ))),
        }
    }
}

/// Error raised by numeral conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumeralError {
    InvalidInput(String),
}

impl fmt::Display for NumeralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumeralError::InvalidInput(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for NumeralError {}

/// Render `n` in the given style.
pub fn format(n: u32, style: NumberStyle) -> Result<String, NumeralError> {
    if n < 1 {
        return Err(NumeralError::InvalidInput(format!(
            "page number must be at least 1, got {n}"
        )));
    }
    match style {
        NumberStyle::Arabic => Ok(n.to_string()),
        NumberStyle::Roman => to_roman(n),
        NumberStyle::Letters => Ok(to_letters(n)),
    }
}

/// Parse a token written in the given style back to an integer.
pub fn parse(s: &str, style: NumberStyle) -> Result<u32, NumeralError> {
    let token = s.trim();
    if token.is_empty() {
        return Err(NumeralError::InvalidInput("empty page number".to_string()));
    }
    match style {
        NumberStyle::Arabic => from_arabic(token),
        NumberStyle::Roman => from_roman(token),
        NumberStyle::Letters => from_letters(token),
    }
}

fn to_roman(n: u32) -> Result<String, NumeralError> {
    if n > ROMAN_MAX {
        return Err(NumeralError::InvalidInput(format!(
            "{n} has no Roman numeral (valid range is 1 to {ROMAN_MAX})"
        )));
    }
    let mut roman = String::new();
    let mut remain = n;
    for (digits, unit) in ROMAN_PAIRS {
        while remain >= *unit {
            roman.push_str(digits);
            remain -= unit;
        }
    }
    Ok(roman)
}

fn roman_digit(c: char) -> Option<u32> {
    match c {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

fn from_roman(token: &str) -> Result<u32, NumeralError> {
    let upper = token.to_ascii_uppercase();
    let invalid = || NumeralError::InvalidInput(format!("invalid Roman numeral '{token}'"));

    let values = upper
        .chars()
        .map(roman_digit)
        .collect::<Option<Vec<u32>>>()
        .ok_or_else(invalid)?;

    let mut total: i64 = 0;
    for (i, value) in values.iter().enumerate() {
        match values.get(i + 1) {
            Some(next) if next > value => total -= i64::from(*value),
            _ => total += i64::from(*value),
        }
    }

    // Only the canonical spelling round-trips; this rejects IIII, IM, VX and friends.
    let total = u32::try_from(total).map_err(|_| invalid())?;
    match to_roman(total) {
        Ok(canonical) if total >= 1 && canonical == upper => Ok(total),
        _ => Err(invalid()),
    }
}

fn to_letters(n: u32) -> String {
    let mut letters = Vec::new();
    let mut remain = n;
    while remain > 0 {
        remain -= 1;
        letters.push((b'A' + (remain % 26) as u8) as char);
        remain /= 26;
    }
    letters.iter().rev().collect()
}

fn from_letters(token: &str) -> Result<u32, NumeralError> {
    let mut total: u32 = 0;
    for c in token.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(NumeralError::InvalidInput(format!(
                "invalid letters numeral '{token}'"
            )));
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
        total = total
            .checked_mul(26)
            .and_then(|t| t.checked_add(digit))
            .ok_or_else(|| {
                NumeralError::InvalidInput(format!("letters numeral '{token}' is too large"))
            })?;
    }
    Ok(total)
}

fn from_arabic(token: &str) -> Result<u32, NumeralError> {
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NumeralError::InvalidInput(format!(
            "invalid decimal page number '{token}'"
        )));
    }
    let value: u32 = token
        .parse()
        .map_err(|_| NumeralError::InvalidInput(format!("page number '{token}' is too large")))?;
    if value == 0 {
        return Err(NumeralError::InvalidInput(
            "page number must be at least 1, got 0".to_string(),
        ));
    }
    Ok(value)
}
