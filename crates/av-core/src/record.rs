//! Sort elements and ordering.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, StepRng};

// ── Order ─────────────────────────────────────────────────────────────────────

/// Requested output direction of a sort.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Order {
    #[default]
    Ascent,
    Descent,
}

impl Order {
    /// `true` if `a` must be placed strictly before `b`.
    #[inline(always)]
    pub fn precedes(self, a: u32, b: u32) -> bool {
        match self {
            Order::Ascent  => a < b,
            Order::Descent => a > b,
        }
    }

    /// `true` if `a` may be placed before `b` (equal values are in order).
    #[inline(always)]
    pub fn in_order(self, a: u32, b: u32) -> bool {
        !self.precedes(b, a)
    }

    #[inline]
    pub fn reversed(self) -> Order {
        match self {
            Order::Ascent  => Order::Descent,
            Order::Descent => Order::Ascent,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Order::Ascent  => "ascent",
            Order::Descent => "descent",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Order {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ascent" | "asc"   => Ok(Order::Ascent),
            "descent" | "desc" => Ok(Order::Descent),
            other => Err(CoreError::InvalidInput(format!("unknown order `{other}`"))),
        }
    }
}

// ── Record ────────────────────────────────────────────────────────────────────

/// One sortable element.
///
/// `ratio` is `value / N` for a dataset of `N` elements and exists only for
/// renderers (bar heights).  Algorithm scratch state (radix digits, library
/// sort tombstones) lives in vectors owned by the algorithm, never here.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub value: u32,
    pub ratio: f32,
}

impl Record {
    /// A record scaled against a dataset of `scale` elements.
    pub fn new(value: u32, scale: usize) -> Self {
        let ratio = if scale == 0 { 0.0 } else { value as f32 / scale as f32 };
        Self { value, ratio }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

// ── Dataset constructors ──────────────────────────────────────────────────────

/// Helpers for building and inspecting datasets (`Vec<Record>` / `&[Record]`).
pub struct Dataset;

impl Dataset {
    /// Records for `values`, scaled against `values.len()`.
    pub fn from_values(values: &[u32]) -> Vec<Record> {
        let n = values.len();
        values.iter().map(|&v| Record::new(v, n)).collect()
    }

    /// The values `1..=n` in ascending order.
    pub fn sequence(n: usize) -> Vec<Record> {
        (1..=n as u32).map(|v| Record::new(v, n)).collect()
    }

    /// The values `1..=n` in a random order drawn from `rng`.
    pub fn shuffled(n: usize, rng: &mut StepRng) -> Vec<Record> {
        let mut data = Self::sequence(n);
        rng.shuffle(&mut data);
        data
    }

    pub fn values(data: &[Record]) -> Vec<u32> {
        data.iter().map(|r| r.value).collect()
    }
}
