//! Dice notation, rolling, and attribute checks.
//!
//! Notation is the plain `<count>d<sides>` form ("2d6", "1D20"). Anything
//! else rolls as the zero outcome: no dice, total 0. Malformed notation is
//! never an error.

pub mod source;

pub use source::{FixedRandom, RandomSource, SeededRandom, ThreadRandom};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest dice count accepted. Bigger counts are a resource limit, not
/// valid notation, and roll as the zero outcome.
pub const MAX_DICE_COUNT: u32 = 1000;

/// A parsed `<count>d<sides>` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceNotation {
    /// Number of dice.
    pub count: u32,
    /// Sides per die.
    pub sides: u32,
}

impl DiceNotation {
    /// Parse notation like "2d6". Case and surrounding whitespace are
    /// ignored; both numbers must be positive.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let (count, sides) = s.split_once('d')?;
        let count = count.parse::<u32>().ok()?;
        let sides = sides.parse::<u32>().ok()?;
        if count == 0 || sides == 0 || count > MAX_DICE_COUNT {
            return None;
        }
        Some(Self { count, sides })
    }
}

impl fmt::Display for DiceNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// The result of rolling a notation string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// The notation as given by the caller.
    pub notation: String,
    /// One value per die, in roll order.
    pub rolls: Vec<u32>,
    /// Sum of all rolls.
    pub total: u64,
}

impl RollOutcome {
    fn zero(notation: &str) -> Self {
        Self {
            notation: notation.to_string(),
            rolls: Vec::new(),
            total: 0,
        }
    }

    /// True for the zero outcome of malformed notation.
    pub fn is_zero(&self) -> bool {
        self.rolls.is_empty()
    }

    /// The breakdown shown in the activity log, e.g. `[2d6]: 3+5`.
    pub fn detail(&self) -> String {
        if self.rolls.is_empty() {
            return format!("[{}]: 0", self.notation);
        }
        let parts: Vec<String> = self.rolls.iter().map(u32::to_string).collect();
        format!("[{}]: {}", self.notation, parts.join("+"))
    }
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.rolls.iter().map(u32::to_string).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total)
    }
}

/// Roll a notation string. Malformed notation yields the zero outcome.
pub fn roll(notation: &str, rng: &mut dyn RandomSource) -> RollOutcome {
    let Some(parsed) = DiceNotation::parse(notation) else {
        tracing::debug!(notation, "malformed dice notation");
        return RollOutcome::zero(notation);
    };
    let rolls: Vec<u32> = (0..parsed.count)
        .map(|_| rng.draw(1, parsed.sides))
        .collect();
    let total = rolls.iter().map(|&v| u64::from(v)).sum();
    tracing::debug!(notation, ?rolls, total, "rolled");
    RollOutcome {
        notation: notation.to_string(),
        rolls,
        total,
    }
}

/// Roll a single die with the given number of sides.
pub fn roll_die(sides: u32, rng: &mut dyn RandomSource) -> RollOutcome {
    roll(&format!("1d{sides}"), rng)
}

/// A d20 check with an attribute modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// The natural d20 roll.
    pub roll: u32,
    /// The attribute value added to the roll.
    pub modifier: i32,
    /// Roll plus modifier.
    pub total: i64,
}

impl CheckOutcome {
    /// The breakdown shown in the activity log, e.g. `1d20 + 3`.
    pub fn detail(&self) -> String {
        if self.modifier < 0 {
            format!("1d20 - {}", self.modifier.unsigned_abs())
        } else {
            format!("1d20 + {}", self.modifier)
        }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} = {}", self.roll, self.detail(), self.total)
    }
}

/// Roll `1d20 + modifier`.
pub fn attribute_check(modifier: i32, rng: &mut dyn RandomSource) -> CheckOutcome {
    let roll = rng.draw(1, 20);
    CheckOutcome {
        roll,
        modifier,
        total: i64::from(roll) + i64::from(modifier),
    }
}
