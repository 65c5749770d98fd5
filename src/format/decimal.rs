use std::fmt;

use super::FormatError;

/// Parsed form of a decimal pattern such as `"#,##0.00"` or `"0%"`.
///
/// Supported syntax: a literal prefix, an integer part made of `#`, `0` and
/// `,`, an optional `.` followed by required (`0`) then optional (`#`)
/// fraction digits, and a literal suffix. `%` in the prefix or suffix scales
/// the value by 100, `‰` by 1000. Text between single quotes is copied
/// verbatim; `''` stands for a literal quote.
#[derive(Debug, Clone)]
pub struct DecimalPattern {
    source: String,
    prefix: String,
    suffix: String,
    min_int: usize,
    min_frac: usize,
    max_frac: usize,
    grouping: Option<usize>,
    multiplier: u32,
}

impl PartialEq for DecimalPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for DecimalPattern {}

impl fmt::Display for DecimalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_numeric(c: char) -> bool {
    matches!(c, '#' | '0' | ',' | '.')
}

impl DecimalPattern {
    pub fn parse(pattern: &str) -> Result<Self, FormatError> {
        let invalid = |reason| FormatError::InvalidDecimalPattern {
            pattern: pattern.to_string(),
            reason,
        };

        // Negative subpatterns are not supported; only the positive half counts.
        let positive = pattern.split(';').next().unwrap_or_default();

        let mut chars = positive.chars().peekable();
        let mut prefix = String::new();
        let mut body = String::new();
        let mut suffix = String::new();
        let mut multiplier = 1;

        while let Some(c) = chars.next_if(|c| !is_numeric(*c)) {
            literal(c, &mut chars, &mut prefix, &mut multiplier).map_err(invalid)?;
        }
        while let Some(c) = chars.next_if(|c| is_numeric(*c)) {
            body.push(c);
        }
        while let Some(c) = chars.next() {
            if is_numeric(c) {
                return Err(invalid("digits after suffix"));
            }
            literal(c, &mut chars, &mut suffix, &mut multiplier).map_err(invalid)?;
        }

        if body.is_empty() {
            return Err(invalid("no digit placeholders"));
        }

        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body.as_str(), ""),
        };
        if frac_part.contains(['.', ',']) {
            return Err(invalid("misplaced separator in fraction"));
        }
        let min_frac = frac_part.chars().take_while(|c| *c == '0').count();
        if frac_part[min_frac..].contains('0') {
            return Err(invalid("'0' after '#' in fraction"));
        }
        let max_frac = frac_part.len();

        let int_digits: String = int_part.chars().filter(|c| *c != ',').collect();
        let first_zero = int_digits.find('0').unwrap_or(int_digits.len());
        if int_digits[first_zero..].contains('#') {
            return Err(invalid("'#' after '0' in integer part"));
        }
        let min_int = int_digits.len() - first_zero;

        let grouping = match int_part.rfind(',') {
            Some(pos) => {
                let size = int_part.len() - pos - 1;
                if size == 0 {
                    return Err(invalid("grouping separator at end of integer part"));
                }
                Some(size)
            }
            None => None,
        };

        Ok(Self {
            source: pattern.to_string(),
            prefix,
            suffix,
            min_int,
            min_frac,
            max_frac,
            grouping,
            multiplier,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        let scaled = value * f64::from(self.multiplier);
        let negative = scaled.is_sign_negative() && scaled != 0.0;

        let digits = if scaled.is_infinite() {
            "∞".to_string()
        } else {
            self.digits(scaled.abs())
        };

        let mut out = String::with_capacity(digits.len() + self.prefix.len() + self.suffix.len() + 1);
        // A value that rounds to zero loses its sign.
        if negative && digits.chars().any(|c| (c.is_ascii_digit() && c != '0') || c == '∞') {
            out.push('-');
        }
        out.push_str(&self.prefix);
        out.push_str(&digits);
        out.push_str(&self.suffix);
        out
    }

    fn digits(&self, abs: f64) -> String {
        let rounded = format!("{:.*}", self.max_frac, abs);
        let (int_raw, frac_raw) = match rounded.split_once('.') {
            Some((i, f)) => (i, f),
            None => (rounded.as_str(), ""),
        };

        let mut int_digits = int_raw.trim_start_matches('0').to_string();
        while int_digits.len() < self.min_int {
            int_digits.insert(0, '0');
        }

        let mut frac = frac_raw.to_string();
        while frac.len() > self.min_frac && frac.ends_with('0') {
            frac.pop();
        }

        let mut out = match self.grouping {
            Some(size) => group(&int_digits, size),
            None => int_digits,
        };
        if !frac.is_empty() {
            out.push('.');
            out.push_str(&frac);
        }
        if out.is_empty() {
            // "#.##" applied to zero
            out.push('0');
        }
        out
    }
}

fn literal(
    c: char,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    buf: &mut String,
    multiplier: &mut u32,
) -> Result<(), &'static str> {
    match c {
        '\'' => {
            if chars.next_if_eq(&'\'').is_some() {
                buf.push('\'');
                return Ok(());
            }
            loop {
                match chars.next() {
                    Some('\'') if chars.next_if_eq(&'\'').is_some() => buf.push('\''),
                    Some('\'') => return Ok(()),
                    Some(quoted) => buf.push(quoted),
                    None => return Err("unterminated quote"),
                }
            }
        }
        '%' => {
            *multiplier = 100;
            buf.push(c);
        }
        '‰' => {
            *multiplier = 1000;
            buf.push(c);
        }
        _ => buf.push(c),
    }
    Ok(())
}

fn group(digits: &str, size: usize) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / size);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % size == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
