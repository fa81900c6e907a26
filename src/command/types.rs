//! Command data model
//!
//! Typed parameters accepted by the builders and typed results produced by
//! the decoders.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;

use crate::error::{PopError, Result};

// =============================================================================
// Direction / Order
// =============================================================================

/// Which end of a sorted set to pop from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Lowest scores first
    Min,

    /// Highest scores first
    Max,
}

impl Direction {
    /// Keyword used by BZMPOP
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Min => "MIN",
            Direction::Max => "MAX",
        }
    }
}

/// Generic sort order used by range-style APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    Ascending,
    Descending,
}

impl From<Order> for Direction {
    fn from(order: Order) -> Self {
        match order {
            Order::Ascending => Direction::Min,
            Order::Descending => Direction::Max,
        }
    }
}

impl From<Direction> for Order {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Min => Order::Ascending,
            Direction::Max => Order::Descending,
        }
    }
}

// =============================================================================
// Timeout
// =============================================================================

/// Server-side blocking timeout, in seconds
///
/// Zero means "block indefinitely" on the server. Integer and fractional
/// inputs normalize to the same value, so `Timeout::from(2u64)` and
/// `Timeout::from(2.0)` serialize identically as `2`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Timeout(f64);

impl Timeout {
    /// Block until an element is available
    pub const INFINITE: Timeout = Timeout(0.0);

    pub fn from_secs(secs: u64) -> Self {
        Timeout(secs as f64)
    }

    pub fn from_secs_f64(secs: f64) -> Self {
        // -0.0 would otherwise render as "-0"
        if secs == 0.0 {
            Timeout(0.0)
        } else {
            Timeout(secs)
        }
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0
    }

    /// Reject negative, NaN and infinite timeouts
    pub fn validate(self) -> Result<Self> {
        if !self.0.is_finite() || self.0 < 0.0 {
            return Err(PopError::InvalidArgument(format!(
                "timeout must be a finite, non-negative number of seconds, got {}",
                self.0
            )));
        }
        Ok(self)
    }
}

/// Plain decimal: f64's `Display` never uses exponent notation and is not
/// locale dependent.
impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Timeout {
    fn from(secs: u64) -> Self {
        Timeout::from_secs(secs)
    }
}

impl From<u32> for Timeout {
    fn from(secs: u32) -> Self {
        Timeout::from_secs(secs as u64)
    }
}

impl From<f64> for Timeout {
    fn from(secs: f64) -> Self {
        Timeout::from_secs_f64(secs)
    }
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Self {
        Timeout::from_secs_f64(duration.as_secs_f64())
    }
}

// =============================================================================
// Identification attributes
// =============================================================================

/// Attribute set by `CLIENT SETINFO`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LibAttribute {
    /// `LIB-NAME`
    Name,

    /// `LIB-VER`
    Version,
}

impl LibAttribute {
    pub fn keyword(self) -> &'static str {
        match self {
            LibAttribute::Name => "LIB-NAME",
            LibAttribute::Version => "LIB-VER",
        }
    }
}

// =============================================================================
// Pop results
// =============================================================================

/// A member together with its score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntry {
    pub member: Bytes,
    pub score: f64,
}

impl ScoredEntry {
    pub fn new(member: impl Into<Bytes>, score: f64) -> Self {
        Self {
            member: member.into(),
            score,
        }
    }
}

/// One entry popped by BZPOPMIN / BZPOPMAX
#[derive(Debug, Clone, PartialEq)]
pub struct PopResult {
    /// Sorted set the entry was taken from
    pub key: Bytes,
    pub entry: ScoredEntry,
}

/// Entries popped by BZMPOP, in the order the server returned them
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPopResult {
    /// Sorted set the entries were taken from
    pub key: Bytes,
    pub entries: Vec<ScoredEntry>,
}

impl BatchPopResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
