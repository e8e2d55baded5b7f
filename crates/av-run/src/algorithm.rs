//! One catalogue over every algorithm family.

use std::fmt;
use std::str::FromStr;

use av_maze::{MazeAlgorithm, SolveAlgorithm};
use av_sort::SortAlgorithm;

use crate::RunError;

/// Any algorithm the library can run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    Sort(SortAlgorithm),
    Generate(MazeAlgorithm),
    Solve(SolveAlgorithm),
}

impl Algorithm {
    /// Every algorithm: sorts, then generators, then solvers.
    pub fn all() -> impl Iterator<Item = Algorithm> {
        SortAlgorithm::ALL
            .iter()
            .copied()
            .map(Algorithm::Sort)
            .chain(MazeAlgorithm::ALL.into_iter().map(Algorithm::Generate))
            .chain(SolveAlgorithm::ALL.into_iter().map(Algorithm::Solve))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Sort(a)     => a.name(),
            Algorithm::Generate(a) => a.name(),
            Algorithm::Solve(a)    => a.name(),
        }
    }

    /// Family prefix used by the qualified `family:name` form.
    pub const fn family(self) -> &'static str {
        match self {
            Algorithm::Sort(_)     => "sort",
            Algorithm::Generate(_) => "generate",
            Algorithm::Solve(_)    => "solve",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family(), self.name())
    }
}

impl From<SortAlgorithm> for Algorithm {
    fn from(a: SortAlgorithm) -> Self {
        Algorithm::Sort(a)
    }
}

impl From<MazeAlgorithm> for Algorithm {
    fn from(a: MazeAlgorithm) -> Self {
        Algorithm::Generate(a)
    }
}

impl From<SolveAlgorithm> for Algorithm {
    fn from(a: SolveAlgorithm) -> Self {
        Algorithm::Solve(a)
    }
}

/// Accepts `family:name` (e.g. `solve:backtracker`) or a bare name that
/// belongs to exactly one family (e.g. `heap`, `wilson`).
impl FromStr for Algorithm {
    type Err = RunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || RunError::UnknownAlgorithm(s.to_owned());
        if let Some((family, name)) = s.split_once(':') {
            return match family.trim().to_ascii_lowercase().as_str() {
                "sort"     => name.parse().map(Algorithm::Sort).map_err(|_| unknown()),
                "generate" => name.parse().map(Algorithm::Generate).map_err(|_| unknown()),
                "solve"    => name.parse().map(Algorithm::Solve).map_err(|_| unknown()),
                _ => Err(unknown()),
            };
        }

        let candidates: Vec<Algorithm> = [
            s.parse().ok().map(Algorithm::Sort),
            s.parse().ok().map(Algorithm::Generate),
            s.parse().ok().map(Algorithm::Solve),
        ]
        .into_iter()
        .flatten()
        .collect();
        match candidates.as_slice() {
            [] => Err(unknown()),
            [only] => Ok(*only),
            _ => Err(RunError::Ambiguous { name: s.trim().to_owned() }),
        }
    }
}
