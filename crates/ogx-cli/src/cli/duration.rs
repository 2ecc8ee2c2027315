//! `--timeout` value parsing: Go-style durations such as `10s`, `1.5s`, `1m30s`.

use std::time::Duration;

/// Parses a duration made of `<number><unit>` terms (`ns`, `us`/`µs`, `ms`,
/// `s`, `m`, `h`). A bare number is taken as seconds. Zero and negative
/// values are rejected since the request must stay bounded.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let s = raw.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }
    if let Ok(secs) = s.parse::<f64>() {
        return positive(secs, raw);
    }

    let invalid = || format!("invalid duration {:?}", raw);
    let mut total = 0.0f64;
    let mut rest = s;
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| format!("missing unit in duration {:?}", raw))?;
        if num_end == 0 {
            return Err(invalid());
        }
        let value: f64 = rest[..num_end].parse().map_err(|_| invalid())?;

        let after = &rest[num_end..];
        let unit_end = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let scale = match &after[..unit_end] {
            "ns" => 1e-9,
            "us" | "µs" => 1e-6,
            "ms" => 1e-3,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            unit => return Err(format!("unknown unit {:?} in duration {:?}", unit, raw)),
        };
        total += value * scale;
        rest = &after[unit_end..];
    }
    positive(total, raw)
}

fn positive(secs: f64, raw: &str) -> Result<Duration, String> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("timeout must be greater than zero, got {:?}", raw));
    }
    Duration::try_from_secs_f64(secs).map_err(|_| format!("timeout {:?} is too large", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_units() {
        assert_eq!(parse_duration("10s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
    }

    #[test]
    fn compound_and_fractional() {
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn bare_number_is_seconds() {
        assert_eq!(parse_duration("7").unwrap(), Duration::from_secs(7));
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", "abc", "10x", "s", "-5s", "1.2.3s"] {
            assert!(parse_duration(raw).is_err(), "{:?} should be rejected", raw);
        }
    }

    #[test]
    fn rejects_zero() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("0").is_err());
    }

    #[test]
    fn rejects_out_of_range() {
        for raw in ["1e20", "99999999999999999999h", "1e300"] {
            let err = parse_duration(raw).unwrap_err();
            assert!(err.contains("too large"), "{:?}: {}", raw, err);
        }
    }
}
