//! Resource quantity parsing.
//!
//! CPU quantities are normalised to millicores:
//! - `"<n>m"` is `n` millicores (`"250m"` -> 250)
//! - a bare integer or decimal is whole cores (`"1"` -> 1000, `"0.5"` -> 500)
//!
//! Memory quantities are normalised to mebibytes:
//! - `Mi` as-is, `Gi` x1024, `Ti` x1024², `Ki` rounded up to the next whole Mi
//!
//! Formatting always emits the canonical suffix (`m`, `Mi`), so
//! `parse_cpu(&format_millicpu(n)) == Ok(n)` and likewise for memory.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("Invalid CPU quantity '{0}'. Expected millicores like \"500m\" or cores like \"1\"")]
    InvalidCpu(String),

    #[error("Invalid memory quantity '{0}'. Expected a Ki/Mi/Gi/Ti suffixed value like \"512Mi\"")]
    InvalidMemory(String),
}

fn cpu_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:(?P<millis>\d+)m|(?P<whole>\d+)(?:\.(?P<frac>\d{1,3}))?)$")
            .expect("static CPU pattern is valid")
    })
}

fn memory_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<value>\d+)(?P<unit>Ki|Mi|Gi|Ti)$").expect("static memory pattern is valid")
    })
}

pub fn parse_cpu(quantity: &str) -> Result<u64, QuantityError> {
    let trimmed = quantity.trim();
    let invalid = || QuantityError::InvalidCpu(quantity.to_string());
    let caps = cpu_pattern().captures(trimmed).ok_or_else(invalid)?;

    if let Some(millis) = caps.name("millis") {
        return millis.as_str().parse().map_err(|_| invalid());
    }

    let whole: u64 = caps
        .name("whole")
        .ok_or_else(invalid)?
        .as_str()
        .parse()
        .map_err(|_| invalid())?;
    let frac = match caps.name("frac") {
        Some(digits) => {
            let padded = format!("{:0<3}", digits.as_str());
            padded.parse::<u64>().map_err(|_| invalid())?
        }
        None => 0,
    };

    whole
        .checked_mul(1000)
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(invalid)
}

pub fn parse_memory(quantity: &str) -> Result<u64, QuantityError> {
    let trimmed = quantity.trim();
    let invalid = || QuantityError::InvalidMemory(quantity.to_string());
    let caps = memory_pattern().captures(trimmed).ok_or_else(invalid)?;

    let value: u64 = caps["value"].parse().map_err(|_| invalid())?;
    let mebibytes = match &caps["unit"] {
        "Ki" => value.checked_add(1023).map(|v| v / 1024),
        "Mi" => Some(value),
        "Gi" => value.checked_mul(1024),
        "Ti" => value.checked_mul(1024 * 1024),
        _ => None,
    };
    mebibytes.ok_or_else(invalid)
}

pub fn format_millicpu(millis: u64) -> String {
    format!("{}m", millis)
}

pub fn format_mebibytes(mebibytes: u64) -> String {
    format!("{}Mi", mebibytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        millis = { "250m", 250 },
        zero_millis = { "0m", 0 },
        whole_core = { "1", 1000 },
        two_cores = { "2", 2000 },
        half_core = { "0.5", 500 },
        fractional = { "1.25", 1250 },
        padded = { " 500m ", 500 },
    )]
    fn test_parse_cpu(input: &str, expected: u64) {
        assert_eq!(parse_cpu(input).unwrap(), expected);
    }

    #[parameterized(
        empty = { "" },
        unit_only = { "m" },
        negative = { "-1" },
        too_precise = { "0.0001" },
        wrong_suffix = { "500Mi" },
    )]
    fn test_parse_cpu_invalid(input: &str) {
        assert!(matches!(parse_cpu(input), Err(QuantityError::InvalidCpu(_))));
    }

    #[parameterized(
        mebibytes = { "512Mi", 512 },
        gibibytes = { "1Gi", 1024 },
        tebibytes = { "1Ti", 1_048_576 },
        kibibytes_round_up = { "1536Ki", 2 },
        kibibytes_exact = { "2048Ki", 2 },
    )]
    fn test_parse_memory(input: &str, expected: u64) {
        assert_eq!(parse_memory(input).unwrap(), expected);
    }

    #[parameterized(
        no_suffix = { "512" },
        decimal_suffix = { "512M" },
        empty = { "" },
    )]
    fn test_parse_memory_invalid(input: &str) {
        assert!(matches!(
            parse_memory(input),
            Err(QuantityError::InvalidMemory(_))
        ));
    }

    #[test]
    fn test_round_trip() {
        for millis in [0, 1, 100, 250, 1000, 3500] {
            assert_eq!(parse_cpu(&format_millicpu(millis)).unwrap(), millis);
        }
        for mebibytes in [0, 128, 512, 2048] {
            assert_eq!(parse_memory(&format_mebibytes(mebibytes)).unwrap(), mebibytes);
        }
    }
}
