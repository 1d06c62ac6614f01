//! Index selection over an ordered file list, with per-directory counters.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::LibraryError;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// `offset mod total`, never touches the counters
    Fixed,
    /// Walks forward one file per call, starting at `offset`
    Increment,
    /// Walks backward one file per call, starting at `offset`
    Decrement,
    /// Uniform draw; reproducible when a seed is given
    Random,
}

impl SelectionMode {
    pub const NAMES: [&'static str; 4] = ["fixed", "increment", "decrement", "random"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Fixed => "fixed",
            SelectionMode::Increment => "increment",
            SelectionMode::Decrement => "decrement",
            SelectionMode::Random => "random",
        }
    }

    /// Modes whose result differs between calls with identical inputs.
    pub fn is_stateful(&self) -> bool {
        !matches!(self, SelectionMode::Fixed)
    }
}

impl FromStr for SelectionMode {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(SelectionMode::Fixed),
            "increment" => Ok(SelectionMode::Increment),
            "decrement" => Ok(SelectionMode::Decrement),
            "random" => Ok(SelectionMode::Random),
            other => Err(LibraryError::invalid_argument(format!(
                "unknown selection mode '{}'",
                other
            ))),
        }
    }
}

/// Outcome of one selection: `index < total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub total: usize,
}

/// Last-used counter per directory key, shared by every call made through one owner.
///
/// Counters are created on the first increment/decrement call for a key and live as long
/// as the state object. The raw counter is re-wrapped against whatever `total` the next
/// call passes, so adding or removing files between calls can make the walk jump or
/// repeat an entry.
#[derive(Debug, Default)]
pub struct SelectorState {
    counters: Mutex<HashMap<String, i64>>,
}

impl SelectorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(
        &self,
        directory: &str,
        mode: SelectionMode,
        offset: i64,
        total: usize,
        seed: Option<u64>,
    ) -> Result<Selection, LibraryError> {
        if total == 0 {
            return Err(LibraryError::empty_collection(format!(
                "cannot select from an empty list ({})",
                directory
            )));
        }
        let modulus = total as i64;

        let index: i64 = match mode {
            SelectionMode::Fixed => offset.rem_euclid(modulus),
            SelectionMode::Increment => self.advance(directory, offset, 1, modulus)?,
            SelectionMode::Decrement => self.advance(directory, offset, -1, modulus)?,
            SelectionMode::Random => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                rng.gen_range(0..modulus)
            }
        };
        let index = index as usize;

        debug!(
            "select: {} mode={} offset={} -> {}/{}",
            directory,
            mode.as_str(),
            offset,
            index,
            total
        );
        Ok(Selection { index, total })
    }

    fn advance(
        &self,
        directory: &str,
        offset: i64,
        step: i64,
        modulus: i64,
    ) -> Result<i64, LibraryError> {
        let mut counters = self
            .counters
            .lock()
            .map_err(|_| LibraryError::runtime("selector state lock poisoned"))?;
        let counter = counters
            .entry(directory.to_string())
            .and_modify(|c| *c = (*c + step).rem_euclid(modulus))
            .or_insert(offset);
        Ok(counter.rem_euclid(modulus))
    }

    /// Raw stored counter for `directory`, if one was created.
    pub fn counter(&self, directory: &str) -> Option<i64> {
        self.counters.lock().ok()?.get(directory).copied()
    }

    pub fn reset(&self, directory: &str) {
        if let Ok(mut counters) = self.counters.lock() {
            counters.remove(directory);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: &SelectorState, mode: SelectionMode, n: usize) -> Vec<usize> {
        (0..n)
            .map(|_| state.select("dir", mode, 2, 5, None).unwrap().index)
            .collect()
    }

    #[test]
    fn increment_walks_forward_and_wraps() {
        let state = SelectorState::new();
        assert_eq!(run(&state, SelectionMode::Increment, 6), vec![2, 3, 4, 0, 1, 2]);
    }

    #[test]
    fn decrement_walks_backward_and_wraps() {
        let state = SelectorState::new();
        assert_eq!(run(&state, SelectionMode::Decrement, 5), vec![2, 1, 0, 4, 3]);
    }

    #[test]
    fn fixed_mode_leaves_counters_alone() {
        let state = SelectorState::new();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(state.select("dir", SelectionMode::Increment, 2, 5, None).unwrap().index);
            let fixed = state.select("dir", SelectionMode::Fixed, 7, 5, None).unwrap();
            assert_eq!(fixed.index, 2);
        }
        assert_eq!(seen, vec![2, 3, 4, 0]);
    }

    #[test]
    fn counters_are_per_directory() {
        let state = SelectorState::new();
        state.select("a", SelectionMode::Increment, 0, 3, None).unwrap();
        state.select("a", SelectionMode::Increment, 0, 3, None).unwrap();
        let b = state.select("b", SelectionMode::Increment, 0, 3, None).unwrap();
        assert_eq!(b.index, 0);
        assert_eq!(state.counter("a"), Some(1));
        assert_eq!(state.counter("c"), None);
    }

    #[test]
    fn offset_beyond_total_wraps_on_first_call() {
        let state = SelectorState::new();
        let first = state.select("dir", SelectionMode::Increment, 12, 5, None).unwrap();
        assert_eq!(first.index, 2);
        let second = state.select("dir", SelectionMode::Increment, 12, 5, None).unwrap();
        assert_eq!(second.index, 3);
    }

    #[test]
    fn shrinking_total_rewraps_the_counter() {
        let state = SelectorState::new();
        state.select("dir", SelectionMode::Increment, 4, 5, None).unwrap();
        let after = state.select("dir", SelectionMode::Increment, 4, 3, None).unwrap();
        assert_eq!(after.index, 2);
        assert!(after.index < after.total);
    }

    #[test]
    fn random_with_seed_is_reproducible() {
        let a = SelectorState::new();
        let b = SelectorState::new();
        for seed in [0_u64, 1, 42, 9999] {
            let x = a.select("dir", SelectionMode::Random, 0, 17, Some(seed)).unwrap();
            let y = b.select("dir", SelectionMode::Random, 0, 17, Some(seed)).unwrap();
            assert_eq!(x, y);
            assert!(x.index < 17);
        }
        assert_eq!(a.counter("dir"), None);
    }

    #[test]
    fn empty_total_fails() {
        let state = SelectorState::new();
        for mode in [
            SelectionMode::Fixed,
            SelectionMode::Increment,
            SelectionMode::Decrement,
            SelectionMode::Random,
        ] {
            assert!(matches!(
                state.select("dir", mode, 0, 0, None),
                Err(LibraryError::EmptyCollection(_))
            ));
        }
        assert_eq!(state.counter("dir"), None);
    }

    #[test]
    fn reset_restarts_the_walk() {
        let state = SelectorState::new();
        run(&state, SelectionMode::Increment, 3);
        state.reset("dir");
        assert_eq!(run(&state, SelectionMode::Increment, 2), vec![2, 3]);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        use std::sync::Arc;
        use std::thread;

        const THREADS: usize = 8;
        const CALLS: usize = 50;
        let (offset, total) = (3_i64, 7_usize);
        let state = Arc::new(SelectorState::new());

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let state = Arc::clone(&state);
                thread::spawn(move || {
                    (0..CALLS)
                        .map(|_| {
                            state
                                .select("shared", SelectionMode::Increment, offset, total, None)
                                .unwrap()
                                .index
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let mut seen: Vec<usize> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        let calls = (THREADS * CALLS) as i64;
        let expected_last = (offset + calls - 1).rem_euclid(total as i64);
        assert_eq!(state.counter("shared"), Some(expected_last));

        let mut expected: Vec<usize> = (0..calls)
            .map(|k| (offset + k).rem_euclid(total as i64) as usize)
            .collect();
        seen.sort_unstable();
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }

    #[test]
    fn mode_parsing() {
        for name in SelectionMode::NAMES {
            assert_eq!(name.parse::<SelectionMode>().unwrap().as_str(), name);
        }
        assert!("sideways".parse::<SelectionMode>().is_err());
    }
}
