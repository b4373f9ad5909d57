//! Per-interval deltas between two cumulative samples.

use serde::{Deserialize, Serialize};

use crate::cpu::CpuTimes;

/// Ticks accrued in each CPU state during one sampling interval.
///
/// Same shape as [`CpuTimes`], different meaning: each field is the growth of
/// the corresponding counter between two samples, and `total` is the sum of
/// the eight per-state deltas (not a subtraction of cumulative totals).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuDelta {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    /// Total ticks elapsed in the interval
    pub total: u64,
}

/// Compute the per-interval delta between two cumulative samples.
///
/// `previous` must have been taken before `current`; no ordering check is
/// performed. An all-zero `previous` (the first cycle) reproduces the
/// cumulative sample, which shows up once as a since-boot line. If a counter
/// regressed between the two samples the subtraction wraps and the delta is
/// garbage for that interval.
pub fn delta(current: &CpuTimes, previous: &CpuTimes) -> CpuDelta {
    let user = current.user.wrapping_sub(previous.user);
    let nice = current.nice.wrapping_sub(previous.nice);
    let system = current.system.wrapping_sub(previous.system);
    let idle = current.idle.wrapping_sub(previous.idle);
    let iowait = current.iowait.wrapping_sub(previous.iowait);
    let irq = current.irq.wrapping_sub(previous.irq);
    let softirq = current.softirq.wrapping_sub(previous.softirq);
    let steal = current.steal.wrapping_sub(previous.steal);

    CpuDelta {
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
