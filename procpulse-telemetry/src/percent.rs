//! Normalization of interval deltas into percentage shares.

use serde::{Deserialize, Serialize};

use crate::delta::CpuDelta;

/// Percentage of the interval spent in each CPU state.
///
/// Each field is in `0..=100`. `total` is the sum of the eight shares and may
/// drift from 100 by a few points because each field rounds independently;
/// the drift is accepted, not corrected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuPercents {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    /// Sum of the eight shares, usually close to 100
    pub total: u64,
}

/// Convert an interval delta into integer percentage shares.
///
/// Each share is `(100 * field + total / 2) / total` in unsigned integer
/// arithmetic: round half away from zero on non-negative values, with no
/// floating point, so output is exactly reproducible.
///
/// # Panics
///
/// Panics if `delta.total` is zero. Callers must guarantee at least one tick
/// elapsed in the interval; a one-second interval on a running system always
/// does.
pub fn normalize(delta: &CpuDelta) -> CpuPercents {
    let total = delta.total;
    let share = |field: u64| (100 * field + total / 2) / total;

    let user = share(delta.user);
    let nice = share(delta.nice);
    let system = share(delta.system);
    let idle = share(delta.idle);
    let iowait = share(delta.iowait);
    let irq = share(delta.irq);
    let softirq = share(delta.softirq);
    let steal = share(delta.steal);

    CpuPercents {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(p: &CpuPercents) -> u64 {
        p.user + p.nice + p.system + p.idle + p.iowait + p.irq + p.softirq + p.steal
    }

    #[test]
    fn exact_half_of_total_rounds_to_fifty() {
        let d = CpuDelta {
            user: 50,
            idle: 50,
            total: 100,
            ..Default::default()
        };

        let p = normalize(&d);
        assert_eq!(p.user, 50);
        assert_eq!(p.idle, 50);
        assert_eq!(p.total, 100);
    }

    #[test]
    fn thirds_round_to_nearest() {
        // (100 * 1 + 1) / 3 == 33, (100 * 2 + 1) / 3 == 67
        let d = CpuDelta {
            user: 1,
            idle: 2,
            total: 3,
            ..Default::default()
        };

        let p = normalize(&d);
        assert_eq!(p.user, 33);
        assert_eq!(p.idle, 67);
        assert_eq!(p.total, 100);
    }

    #[test]
    fn shares_are_bounded_and_sum_near_hundred() {
        // Seven equal shares round down independently; the sum may drift a
        // few points below 100.
        let d = CpuDelta {
            user: 1,
            nice: 1,
            system: 1,
            idle: 1,
            iowait: 1,
            irq: 1,
            softirq: 1,
            steal: 0,
            total: 7,
        };

        let p = normalize(&d);
        for share in [p.user, p.nice, p.system, p.idle, p.iowait, p.irq, p.softirq, p.steal] {
            assert!(share <= 100);
        }
        assert!(sum(&p).abs_diff(100) <= 3);
        assert_eq!(p.total, sum(&p));
    }

    #[test]
    fn normalize_is_pure() {
        let d = CpuDelta {
            user: 10,
            system: 5,
            idle: 80,
            total: 95,
            ..Default::default()
        };

        assert_eq!(normalize(&d), normalize(&d));
    }
}
