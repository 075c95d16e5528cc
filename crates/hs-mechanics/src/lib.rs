//! Game mechanics for Hunter Sheet.
//!
//! Provides dice rolling over an injectable random source, the clamped
//! resource ledger for HP and Nen, and the geometry behind the affinity
//! hexagon and the attribute radar chart.

pub mod dice;
pub mod error;
pub mod ledger;
pub mod projection;

pub use dice::{
    CheckOutcome, DiceNotation, FixedRandom, RandomSource, RollOutcome, SeededRandom,
    ThreadRandom, attribute_check, roll, roll_die,
};
pub use error::{MechError, MechResult};
pub use ledger::RestOutcome;
pub use projection::{Point, svg_points};
