//! Cumulative CPU tick counters and aggregate-row parsing.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TelemetryError};

/// Label of the whole-system counter row in the source.
const AGGREGATE_LABEL: &str = "cpu";

/// Cumulative CPU time counters, in ticks since boot.
///
/// Field order matches the aggregate `cpu` row of `/proc/stat`. `total` is
/// always recomputed as the sum of the eight counters; it is never read from
/// the source. The counters only grow within a run; wraparound of the source
/// itself is not special-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuTimes {
    /// Time running normal-priority user code
    pub user: u64,
    /// Time running niced user code
    pub nice: u64,
    /// Time running kernel code
    pub system: u64,
    /// Time idle
    pub idle: u64,
    /// Time idle while waiting for I/O
    pub iowait: u64,
    /// Time servicing hardware interrupts
    pub irq: u64,
    /// Time servicing software interrupts
    pub softirq: u64,
    /// Time stolen by the hypervisor
    pub steal: u64,
    /// Sum of the eight counters above
    pub total: u64,
}

impl CpuTimes {
    fn from_fields(fields: [u64; 8]) -> Self {
        let [user, nice, system, idle, iowait, irq, softirq, steal] = fields;
        Self {
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
            total: user + nice + system + idle + iowait + irq + softirq + steal,
        }
    }
}

/// Whether `line` is the whole-system counter row.
///
/// The label must match exactly; a prefix test would also accept the
/// per-CPU rows (`cpu0`, `cpu1`, ...).
pub(crate) fn is_aggregate_line(line: &str) -> bool {
    line.split_whitespace().next() == Some(AGGREGATE_LABEL)
}

/// Parse the whole-system counter row into a [`CpuTimes`].
///
/// Expects the `cpu` label followed by at least eight unsigned integers in
/// fixed order: user, nice, system, idle, iowait, irq, softirq, steal.
/// Trailing fields (guest time on newer kernels) are ignored.
pub fn parse_aggregate_line(line: &str) -> Result<CpuTimes> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some(AGGREGATE_LABEL) {
        return Err(TelemetryError::ParseError(format!(
            "expected {AGGREGATE_LABEL:?} label: {line:?}"
        )));
    }

    let mut fields = [0u64; 8];
    for (index, field) in fields.iter_mut().enumerate() {
        let token = tokens.next().ok_or_else(|| {
            TelemetryError::ParseError(format!(
                "expected 8 counter fields, found {index}: {line:?}"
            ))
        })?;
        *field = token.parse().map_err(|_| {
            TelemetryError::ParseError(format!("invalid counter value {token:?}"))
        })?;
    }

    Ok(CpuTimes::from_fields(fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aggregate_row() {
        let times = parse_aggregate_line("cpu  100 0 50 850 0 0 0 0").unwrap();
        assert_eq!(times.user, 100);
        assert_eq!(times.system, 50);
        assert_eq!(times.idle, 850);
        assert_eq!(times.total, 1000);
    }

    #[test]
    fn total_is_recomputed_from_fields() {
        let times = parse_aggregate_line("cpu 1 2 3 4 5 6 7 8").unwrap();
        assert_eq!(times.total, 1 + 2 + 3 + 4 + 5 + 6 + 7 + 8);
    }

    #[test]
    fn ignores_trailing_guest_fields() {
        let times = parse_aggregate_line("cpu  10 20 30 40 50 60 70 80 90 100").unwrap();
        assert_eq!(times.steal, 80);
        assert_eq!(times.total, 360);
    }

    #[test]
    fn rejects_per_cpu_rows() {
        assert!(!is_aggregate_line("cpu0 100 0 50 850 0 0 0 0"));
        assert!(is_aggregate_line("cpu  100 0 50 850 0 0 0 0"));
        assert!(parse_aggregate_line("cpu0 100 0 50 850 0 0 0 0").is_err());
    }

    #[test]
    fn rejects_short_rows() {
        let err = parse_aggregate_line("cpu  100 0 50").unwrap_err();
        assert!(err.to_string().contains("8 counter fields"));
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert!(parse_aggregate_line("cpu  100 0 50 850 0 0 x 0").is_err());
    }
}
