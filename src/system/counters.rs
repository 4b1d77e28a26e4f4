use color_eyre::eyre::{Result, eyre};
use serde::Serialize;

pub const VOLUNTARY_PREFIX: &str = "voluntary_ctxt_switches:";
pub const NONVOLUNTARY_PREFIX: &str = "nonvoluntary_ctxt_switches:";

/// Voluntary and involuntary context-switch counts for one task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CounterPair {
    pub voluntary: u64,
    pub nonvoluntary: u64,
}

impl CounterPair {
    pub fn new(voluntary: u64, nonvoluntary: u64) -> Self {
        CounterPair {
            voluntary,
            nonvoluntary,
        }
    }

    pub fn saturating_add(self, other: CounterPair) -> CounterPair {
        CounterPair {
            voluntary: self.voluntary.saturating_add(other.voluntary),
            nonvoluntary: self.nonvoluntary.saturating_add(other.nonvoluntary),
        }
    }
}

/// Scan status lines for the two context-switch keys.
///
/// Unrelated lines are skipped and a key seen twice keeps its last value.
/// A line carrying one of the keys must be followed by a decimal count,
/// otherwise the whole scan fails.
pub fn scan_status_lines<I, S>(lines: I) -> Result<CounterPair>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counters = CounterPair::default();
    for line in lines {
        let line = line.as_ref();
        if let Some(rest) = line.strip_prefix(VOLUNTARY_PREFIX) {
            counters.voluntary = parse_count(rest, line)?;
        } else if let Some(rest) = line.strip_prefix(NONVOLUNTARY_PREFIX) {
            counters.nonvoluntary = parse_count(rest, line)?;
        }
    }
    Ok(counters)
}

fn parse_count(rest: &str, line: &str) -> Result<u64> {
    let token = rest
        .split_whitespace()
        .next()
        .ok_or_else(|| eyre!("missing counter value in status line {line:?}"))?;
    token
        .parse::<u64>()
        .map_err(|e| eyre!("malformed counter value {token:?} in status line {line:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_both_counters_among_unrelated_lines() {
        let lines = [
            "Name:\tbash",
            "State:\tS (sleeping)",
            "voluntary_ctxt_switches:\t42",
            "Threads:\t1",
            "nonvoluntary_ctxt_switches:\t7",
        ];
        assert_eq!(scan_status_lines(lines).unwrap(), CounterPair::new(42, 7));
    }

    #[test]
    fn order_of_keys_does_not_matter() {
        let lines = ["nonvoluntary_ctxt_switches: 7", "voluntary_ctxt_switches: 42"];
        assert_eq!(scan_status_lines(lines).unwrap(), CounterPair::new(42, 7));
    }

    #[test]
    fn missing_key_defaults_to_zero() {
        let only_vol = ["voluntary_ctxt_switches:\t9"];
        assert_eq!(scan_status_lines(only_vol).unwrap(), CounterPair::new(9, 0));

        let only_nonvol = ["nonvoluntary_ctxt_switches:\t4"];
        assert_eq!(
            scan_status_lines(only_nonvol).unwrap(),
            CounterPair::new(0, 4)
        );

        let empty: [&str; 0] = [];
        assert_eq!(scan_status_lines(empty).unwrap(), CounterPair::default());
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let lines = ["voluntary_ctxt_switches: 1", "voluntary_ctxt_switches: 2"];
        assert_eq!(scan_status_lines(lines).unwrap().voluntary, 2);
    }

    #[test]
    fn only_first_token_is_parsed() {
        let lines = ["voluntary_ctxt_switches:\t15 trailing junk"];
        assert_eq!(scan_status_lines(lines).unwrap().voluntary, 15);
    }

    #[test]
    fn prefix_must_start_the_line() {
        let lines = [" voluntary_ctxt_switches: 3", "x_nonvoluntary_ctxt_switches: 5"];
        assert_eq!(scan_status_lines(lines).unwrap(), CounterPair::default());
    }

    #[test]
    fn malformed_value_is_an_error() {
        let lines = ["voluntary_ctxt_switches:\tlots"];
        let err = scan_status_lines(lines).unwrap_err();
        assert!(err.to_string().contains("lots"));

        let negative = ["nonvoluntary_ctxt_switches: -1"];
        assert!(scan_status_lines(negative).is_err());
    }

    #[test]
    fn missing_value_is_an_error() {
        let lines = ["nonvoluntary_ctxt_switches:"];
        assert!(scan_status_lines(lines).is_err());
    }

    #[test]
    fn malformed_unrelated_line_is_ignored() {
        let lines = ["Threads:\tmany", "voluntary_ctxt_switches: 1"];
        assert_eq!(scan_status_lines(lines).unwrap().voluntary, 1);
    }

    #[test]
    fn saturating_add_sums_fields() {
        let total = CounterPair::new(1, 2).saturating_add(CounterPair::new(u64::MAX, 3));
        assert_eq!(total, CounterPair::new(u64::MAX, 5));
    }
}
