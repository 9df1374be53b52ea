//! Reorders results arriving from parallel workers.
//!
//! Results are released in year/day/part order as soon as every earlier
//! expected result has been seen; later ones wait in a sorted buffer.

use crate::executor::{SolverResult, WorkItem};
use std::collections::{BTreeMap, VecDeque};

/// Position of a result in the output order
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Every key the work items will produce, in output order
pub fn expected_keys(work_items: &[WorkItem]) -> Vec<ResultKey> {
    work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |part| ResultKey {
                year: w.year,
                day: w.day,
                part,
            })
        })
        .collect()
}

pub struct ResultAggregator {
    expected: VecDeque<ResultKey>,
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(mut expected_keys: Vec<ResultKey>) -> Self {
        expected_keys.sort_unstable();
        expected_keys.dedup();
        Self {
            expected: expected_keys.into(),
            pending: BTreeMap::new(),
        }
    }

    /// Buffer `result` and return every result that is now next in line
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(next) = self.expected.front()
            && let Some(result) = self.pending.remove(next)
        {
            self.expected.pop_front();
            ready.push(result);
        }
        ready
    }

    /// Remaining buffered results, in order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        std::mem::take(&mut self.pending).into_values().collect()
    }

    /// Keys that never arrived
    pub fn missing(&self) -> impl Iterator<Item = &ResultKey> {
        self.expected
            .iter()
            .filter(|key| !self.pending.contains_key(key))
    }

    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}
