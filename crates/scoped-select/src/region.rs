//! Character-offset regions.
//!
//! All positions in this crate are **character offsets** (not byte offsets) into a buffer,
//! consistent with how hosts usually address text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open range of character offsets, `begin <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Region {
    begin: usize,
    end: usize,
}

impl Region {
    /// Create a region from two offsets in either order.
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { begin: a, end: b }
        } else {
            Self { begin: b, end: a }
        }
    }

    /// Create an empty region (a caret) at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self {
            begin: pos,
            end: pos,
        }
    }

    /// Inclusive start offset.
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Returns `true` if `begin == end`.
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Returns `true` if `other` lies entirely within `self` (boundaries included).
    pub fn contains(&self, other: Region) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    /// Returns `true` if `pos` lies within `[begin, end]`.
    pub fn contains_point(&self, pos: usize) -> bool {
        self.begin <= pos && pos <= self.end
    }

    /// Returns `true` if the two regions share at least one character.
    pub fn intersects(&self, other: Region) -> bool {
        self.begin < other.end && other.begin < self.end
    }

    /// The overlapping part of two regions, or an empty region when they are disjoint.
    pub fn intersection(&self, other: Region) -> Region {
        let begin = self.begin.max(other.begin);
        let end = self.end.min(other.end);
        if begin < end {
            Region { begin, end }
        } else {
            Region::caret(begin)
        }
    }

    /// The smallest region covering both regions.
    pub fn cover(&self, other: Region) -> Region {
        Region {
            begin: self.begin.min(other.begin),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)
    }
}

impl From<std::ops::Range<usize>> for Region {
    fn from(range: std::ops::Range<usize>) -> Self {
        Region::new(range.start, range.end)
    }
}
