use std::collections::BTreeMap;

use serde::Serialize;

use super::counters::CounterPair;

/// Context-switch counters for one process and the threads listed for it at
/// read time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub pid: u32,
    pub process: CounterPair,
    pub threads: BTreeMap<String, CounterPair>,
}

impl Snapshot {
    pub fn thread_totals(&self) -> CounterPair {
        self.threads
            .values()
            .fold(CounterPair::default(), |acc, c| acc.saturating_add(*c))
    }
}
