pub mod counters;
pub mod lookup;
pub mod reader;
pub mod snapshot;
pub mod source;
