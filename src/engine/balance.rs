//! Volume balance between the vocal and the accompaniment track.
//!
//! This is a "duck one side" control rather than a crossfade: at the centre
//! both tracks play at full gain, moving left ducks the vocals and moving right
//! ducks the accompaniment. Neither side is ever boosted above 100.

/// Centre position of the balance scale.
pub const BALANCE_CENTER: u8 = 50;
/// Upper bound of the balance scale.
pub const BALANCE_MAX: u8 = 100;

/// A balance value in `0..=100`.
///
/// Construction clamps out-of-range input to 100, so every balance that
/// enters the engine (UI events as well as the persisted record) goes through
/// the same boundary rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Balance(u8);

impl Balance {
    pub fn new(value: u8) -> Self {
        Self(value.min(BALANCE_MAX))
    }

    /// Clamp a wider integer (e.g. read from disk) onto the balance scale.
    pub fn from_i64(value: i64) -> Self {
        Self(value.clamp(0, BALANCE_MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Shift the balance by `delta`, saturating at both ends.
    pub fn nudged(self, delta: i16) -> Self {
        Self::from_i64(self.0 as i64 + delta as i64)
    }

    pub fn gains(self) -> Gains {
        resolve(self)
    }
}

impl Default for Balance {
    fn default() -> Self {
        Self(BALANCE_CENTER)
    }
}

/// Per-track gains on the backend's `0..=100` volume scale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Gains {
    pub vocal: u8,
    pub accompaniment: u8,
}

/// Resolve a balance into the two track gains.
pub fn resolve(balance: Balance) -> Gains {
    let b = balance.value() as f64;
    let center = BALANCE_CENTER as f64;
    if balance.value() <= BALANCE_CENTER {
        Gains {
            vocal: (b / center * 100.0).round() as u8,
            accompaniment: 100,
        }
    } else {
        Gains {
            vocal: 100,
            accompaniment: ((BALANCE_MAX as f64 - b) / center * 100.0).round() as u8,
        }
    }
}
