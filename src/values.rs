//! Cell value parsers shared by the row decoder.
//!
//! Spreadsheet cells arrive as text. These helpers accept the usual mess
//! (alternate boolean spellings, whole numbers stored as floats, full-width
//! commas) and reject everything else with a [`ValueError`].

use crate::error::ValueError;

const TRUE_WORDS: &[&str] = &["true", "yes", "y", "1", "是", "开启", "启用"];
const FALSE_WORDS: &[&str] = &["false", "no", "n", "0", "否", "关闭", "禁用"];

/// Full-width comma, common when the author types with a CJK input method
const FULLWIDTH_COMMA: char = '\u{FF0C}';

/// Parse an enablement flag. Blank cells are `false`.
pub fn parse_bool(raw: &str) -> Result<bool, ValueError> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(false);
    }

    let lower = s.to_lowercase();
    if TRUE_WORDS.contains(&lower.as_str()) {
        return Ok(true);
    }
    if FALSE_WORDS.contains(&lower.as_str()) {
        return Ok(false);
    }

    lower
        .parse::<bool>()
        .map_err(|_| ValueError::InvalidBoolean(s.to_string()))
}

/// Zero and sign handling for required integers.
///
/// The two flags are independent: with neither set, zero is rejected even
/// though negative values pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntRules {
    /// Reject anything `<= 0`
    pub must_be_positive: bool,
    /// Accept zero when `must_be_positive` is off
    pub allow_zero: bool,
}

impl IntRules {
    /// Any non-zero value
    pub const DEFAULT: IntRules = IntRules {
        must_be_positive: false,
        allow_zero: false,
    };

    pub const POSITIVE: IntRules = IntRules {
        must_be_positive: true,
        allow_zero: false,
    };

    pub const ALLOW_ZERO: IntRules = IntRules {
        must_be_positive: false,
        allow_zero: true,
    };

    fn check(self, value: i64) -> Result<(), ValueError> {
        if self.must_be_positive && value <= 0 {
            return Err(ValueError::NotPositive {
                position: None,
                value,
            });
        }
        if !self.allow_zero && !self.must_be_positive && value == 0 {
            return Err(ValueError::ZeroNotAllowed);
        }
        Ok(())
    }
}

/// Parse a required 32-bit integer cell.
pub fn parse_i32(raw: &str, rules: IntRules) -> Result<i32, ValueError> {
    let value = try_parse_i32(raw).ok_or_else(|| ValueError::InvalidInteger(raw.to_string()))?;
    rules.check(i64::from(value))?;
    Ok(value)
}

/// Parse a required 64-bit integer cell.
pub fn parse_i64(raw: &str, rules: IntRules) -> Result<i64, ValueError> {
    let value = try_parse_i64(raw).ok_or_else(|| ValueError::InvalidInteger(raw.to_string()))?;
    rules.check(value)?;
    Ok(value)
}

fn try_parse_i32(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<i32>() {
        return Some(v);
    }
    let truncated = parse_whole_float(s)?;
    if truncated < f64::from(i32::MIN) || truncated > f64::from(i32::MAX) {
        return None;
    }
    Some(truncated as i32)
}

fn try_parse_i64(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    let truncated = parse_whole_float(s)?;
    // i64::MAX is not representable as f64; 2^63 is the first value out of range
    if truncated < -9_223_372_036_854_775_808.0 || truncated >= 9_223_372_036_854_775_808.0 {
        return None;
    }
    Some(truncated as i64)
}

/// Float fallback for cells that store whole numbers as `12.0`.
/// Truncates toward zero; rejects NaN and infinities.
fn parse_whole_float(s: &str) -> Option<f64> {
    let d = s.parse::<f64>().ok()?;
    if !d.is_finite() {
        return None;
    }
    Some(d.trunc())
}

/// Split a list cell on `,` or `，`, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.replace(FULLWIDTH_COMMA, ",")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a list cell of item ids.
pub fn parse_i32_list(raw: &str) -> Result<Vec<i32>, ValueError> {
    split_list(raw)
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            try_parse_i32(&part).ok_or(ValueError::InvalidListElement {
                position: i + 1,
                raw: part,
            })
        })
        .collect()
}

/// Parse a list cell of amounts. Zero is accepted unless `must_be_positive`.
pub fn parse_i64_list(raw: &str, must_be_positive: bool) -> Result<Vec<i64>, ValueError> {
    let parts = split_list(raw);
    let mut result = Vec::with_capacity(parts.len());

    for (i, part) in parts.into_iter().enumerate() {
        let position = i + 1;
        let value = match try_parse_i64(&part) {
            Some(v) => v,
            None => return Err(ValueError::InvalidListElement { position, raw: part }),
        };
        if must_be_positive && value <= 0 {
            return Err(ValueError::NotPositive {
                position: Some(position),
                value,
            });
        }
        result.push(value);
    }

    Ok(result)
}
