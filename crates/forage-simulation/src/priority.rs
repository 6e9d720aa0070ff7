use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Execution priority of a scheduled unit. Lower values run first.
///
/// Named levels mark the usual phases of an interval, but any value in
/// `FIRST..=LAST` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Priority(i32);

impl Priority {
    /// Runs before everything else.
    pub const FIRST: Self = Self(0);
    /// Agent movement.
    pub const MOVE: Self = Self(100);
    /// Resource consumption.
    pub const CONSUME: Self = Self(200);
    /// Resource regrowth.
    pub const GROW: Self = Self(300);
    /// Trajectory recording.
    pub const RECORD: Self = Self(400);
    /// Drawing and reporting.
    pub const VISUALIZE: Self = Self(900);
    /// Runs after everything else.
    pub const LAST: Self = Self(1000);

    /// A priority at an arbitrary value between [`Self::FIRST`] and [`Self::LAST`].
    pub fn new(value: i32) -> SimResult<Self> {
        if (Self::FIRST.0..=Self::LAST.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SimError::InvalidPriority(value))
        }
    }

    /// The numeric value.
    pub fn value(self) -> i32 {
        self.0
    }

    fn name(self) -> Option<&'static str> {
        match self {
            Self::FIRST => Some("first"),
            Self::MOVE => Some("move"),
            Self::CONSUME => Some("consume"),
            Self::GROW => Some("grow"),
            Self::RECORD => Some("record"),
            Self::VISUALIZE => Some("visualize"),
            Self::LAST => Some("last"),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}", self.0),
        }
    }
}
