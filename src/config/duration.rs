//! Duration parsing utilities.

use anyhow::Context;
use std::time::Duration;

/// Parse a duration string like "100ms", "1s", "5m", "1h30m" or "300".
///
/// Supports:
/// - Plain numbers (interpreted as seconds): "300"
/// - Unit suffixes: "ns", "us", "µs", "ms", "s", "m", "h"
/// - Concatenated segments: "1m30s"
///
/// Values are whole numbers; fractional segments such as "1.5s" are rejected.
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    // No suffix - treat as seconds
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total = Duration::ZERO;
    let mut rest = s;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits == 0 {
            anyhow::bail!("Invalid duration value: {s}");
        }
        let (num_str, tail) = rest.split_at(digits);
        let value: u64 = num_str
            .parse()
            .with_context(|| format!("Invalid duration value: {s}"))?;

        let unit_len = tail.find(|c: char| c.is_ascii_digit()).unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);
        let nanos_per_unit: u64 = match unit {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 3_600 * 1_000_000_000,
            other => anyhow::bail!("Unknown duration unit '{other}' in: {s}"),
        };

        let nanos = value
            .checked_mul(nanos_per_unit)
            .with_context(|| format!("Duration out of range: {s}"))?;
        total = total
            .checked_add(Duration::from_nanos(nanos))
            .with_context(|| format!("Duration out of range: {s}"))?;
        rest = next;
    }

    Ok(total)
}
