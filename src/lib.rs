pub mod config;
pub mod format;
pub mod logging;
pub mod system;

pub use system::counters::CounterPair;
pub use system::reader::Reader;
pub use system::snapshot::Snapshot;

/// Query the host process filesystem for `pid`.
pub fn query(pid: u32) -> color_eyre::Result<Snapshot> {
    Reader::default().query(pid)
}
