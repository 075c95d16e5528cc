//! Clamped arithmetic over HP and Nen pools.
//!
//! Every result satisfies `0 <= current <= max`. Costs are checked before
//! anything is deducted; a cost that cannot be paid leaves the pool as it
//! was.

use hs_core::{PoolKind, ResourcePool};
use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Fraction of each pool's maximum restored by a rest, in percent.
pub const REST_PERCENT: i32 = 20;

/// `clamp(current + delta, 0, max)`, without overflow.
pub fn apply(current: i32, max: i32, delta: i32) -> i32 {
    let max = max.max(0);
    current.saturating_add(delta).clamp(0, max)
}

/// Adjust a pool by a signed delta.
pub fn adjust(pool: ResourcePool, delta: i32) -> ResourcePool {
    ResourcePool {
        current: apply(pool.current, pool.max, delta),
        max: pool.max.max(0),
    }
}

/// The amount a rest restores to a pool with this maximum.
pub fn rest_delta(max: i32) -> i32 {
    max.max(0) / (100 / REST_PERCENT)
}

/// Both pools after a rest, with what each recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestOutcome {
    /// HP after the rest.
    pub hp: ResourcePool,
    /// Nen after the rest.
    pub nen: ResourcePool,
    /// HP gained; the step size before clamping.
    pub hp_delta: i32,
    /// Nen gained; the step size before clamping.
    pub nen_delta: i32,
}

/// Restore a fifth of each pool's maximum, clamped.
pub fn rest(hp: ResourcePool, nen: ResourcePool) -> RestOutcome {
    let hp_delta = rest_delta(hp.max);
    let nen_delta = rest_delta(nen.max);
    RestOutcome {
        hp: adjust(hp, hp_delta),
        nen: adjust(nen, nen_delta),
        hp_delta,
        nen_delta,
    }
}

/// Whether `pool` can pay `cost`. Nen may be spent down to zero; an HP
/// cost must leave at least one point.
pub fn can_afford(pool: ResourcePool, cost: u32, kind: PoolKind) -> bool {
    if cost == 0 {
        return true;
    }
    let current = i64::from(pool.current);
    let cost = i64::from(cost);
    match kind {
        PoolKind::Nen => current >= cost,
        PoolKind::Hp => current > cost,
    }
}

/// Deduct `cost` from `pool`, or fail with the pool untouched.
pub fn spend(pool: ResourcePool, cost: u32, kind: PoolKind) -> MechResult<ResourcePool> {
    if !can_afford(pool, cost, kind) {
        return Err(MechError::InsufficientResource {
            kind,
            cost,
            current: pool.current,
        });
    }
    let delta = i32::try_from(cost).unwrap_or(i32::MAX);
    Ok(adjust(pool, -delta))
}
