use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// Whether a cell is alive in the next generation, given whether it is alive now and how many
    /// of its neighbors are.
    pub fn next_state(&self, alive: bool, live_neighbors: u8) -> bool {
        let mask = 1u16 << live_neighbors.min(8);

        if alive {
            self.survivals() & mask == mask
        } else {
            self.births() & mask == mask
        }
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({self})")
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |mask: u16| -> String {
            (0..=8u8)
                .filter(|&n| mask & (1 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Rule \"{0}\" is missing the '/' between births and survivals")]
    MissingSlash(String),

    #[error("Births must start with b or B")]
    MissingBirth,

    #[error("Survivals must start with s or S")]
    MissingSurvival,

    #[error("Expected a neighbor count between 0 and 8, got '{0}'")]
    InvalidCount(char),
}

/// Parse rules that look like b3/s23
impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(rule: &str) -> Result<Self, Self::Err> {
        let rule = rule.trim();

        let Some((b, s)) = rule.split_once('/') else {
            return Err(RuleError::MissingSlash(rule.to_string()));
        };

        let b = b.strip_prefix(['b', 'B']).ok_or(RuleError::MissingBirth)?;
        let s = s.strip_prefix(['s', 'S']).ok_or(RuleError::MissingSurvival)?;

        Ok(RuleSet::new(digits_to_mask(b)?, digits_to_mask(s)?))
    }
}

/// Convert the human readable birth/survival digits to a packed bit representation
fn digits_to_mask(digits: &str) -> Result<u16, RuleError> {
    let mut n = 0;

    for c in digits.chars() {
        match c.to_digit(10) {
            Some(d) if d <= 8 => n |= 1 << d,
            _ => return Err(RuleError::InvalidCount(c)),
        }
    }

    Ok(n)
}
