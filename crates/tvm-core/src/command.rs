//! Command parsing.
//!
//! A command line is split on runs of spaces and tabs. No other byte,
//! carriage return included, separates tokens.

use crate::error::{TvmError, TvmResult};
use crate::state::Variable;

/// A parsed command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `set VAR VALUE`
    Set(Variable, f64),
    /// `compute VAR`
    Compute(Variable),
    /// `clear`
    Clear,
    /// A line with no tokens.
    Empty,
}

impl Command {
    /// Parses one command line (without its trailing newline).
    ///
    /// For `set`, the value is parsed before the variable name is resolved,
    /// so a bad number wins over a bad name.
    pub fn parse(line: &str) -> TvmResult<Self> {
        let tokens: Vec<&str> = line.split(is_separator).filter(|t| !t.is_empty()).collect();

        match tokens.as_slice() {
            [] => Ok(Self::Empty),
            ["clear"] => Ok(Self::Clear),
            ["compute", name] => Ok(Self::Compute(name.parse()?)),
            ["set", name, value] => {
                let value = parse_number(value)?;
                Ok(Self::Set(name.parse()?, value))
            }
            _ => Err(TvmError::InvalidCommand),
        }
    }
}

fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Parses a complete floating-point literal.
///
/// Leading C whitespace (`\v`, `\f`, `\r`, `\n`) is skipped; anything left
/// over after the number makes the literal invalid. Besides decimal
/// literals this accepts `inf`, `infinity` and `nan` in any case,
/// `nan(chars)`, and hexadecimal literals such as `0x1.8p3`.
pub fn parse_number(token: &str) -> TvmResult<f64> {
    let literal = token.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    literal
        .parse::<f64>()
        .ok()
        .or_else(|| parse_hex_float(literal))
        .or_else(|| parse_nan_payload(literal))
        .ok_or(TvmError::InvalidCommand)
}

fn split_sign(literal: &str) -> (bool, &str) {
    if let Some(rest) = literal.strip_prefix('-') {
        (true, rest)
    } else {
        (false, literal.strip_prefix('+').unwrap_or(literal))
    }
}

/// `[+-]nan(n-char-sequence)`; the payload is ignored.
fn parse_nan_payload(literal: &str) -> Option<f64> {
    let (negative, rest) = split_sign(literal);
    let prefix = rest.get(..4)?;
    if !prefix.eq_ignore_ascii_case("nan(") {
        return None;
    }
    let payload = rest[4..].strip_suffix(')')?;
    if !payload.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some(if negative { -f64::NAN } else { f64::NAN })
}

/// `[+-]0x<hex digits>[.<hex digits>][p[+-]<decimal exponent>]`.
#[allow(clippy::cast_precision_loss)]
fn parse_hex_float(literal: &str) -> Option<f64> {
    let (negative, rest) = split_sign(literal);
    let rest = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X"))?;

    let (digits, exponent) = match rest.find(['p', 'P']) {
        Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
        None => (rest, None),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    // Sixty bits of mantissa leave room for a sticky bit below the 53 that
    // survive the conversion, so the result rounds like strtod.
    let mut mantissa: u64 = 0;
    let mut scale: i32 = 0;
    let mut sticky = false;
    for (index, c) in int_part.chars().chain(frac_part.chars()).enumerate() {
        let digit = u64::from(c.to_digit(16)?);
        let fractional = index >= int_part.len();
        if mantissa >> 56 == 0 {
            mantissa = (mantissa << 4) | digit;
            if fractional {
                scale = scale.saturating_sub(4);
            }
        } else {
            sticky |= digit != 0;
            if !fractional {
                scale = scale.saturating_add(4);
            }
        }
    }

    if let Some(exponent) = exponent {
        scale = scale.saturating_add(parse_binary_exponent(exponent)?);
    }

    let magnitude = if mantissa == 0 {
        0.0
    } else {
        scale_by_power_of_two((mantissa | u64::from(sticky)) as f64, scale)
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_binary_exponent(exponent: &str) -> Option<i32> {
    let (negative, digits) = split_sign(exponent);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = digits
        .bytes()
        .fold(0i32, |acc, b| acc.saturating_mul(10).saturating_add(i32::from(b - b'0')));
    Some(if negative { -value } else { value })
}

fn scale_by_power_of_two(mut value: f64, mut exponent: i32) -> f64 {
    let step = 2f64.powi(1000);
    while exponent > 1000 && value.is_finite() {
        value *= step;
        exponent -= 1000;
    }
    while exponent < -1000 && value != 0.0 {
        value /= step;
        exponent += 1000;
    }
    value * 2f64.powi(exponent)
}
