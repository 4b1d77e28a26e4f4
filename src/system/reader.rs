use std::io;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

use super::counters::{CounterPair, scan_status_lines};
use super::snapshot::Snapshot;
use super::source::{ProcFs, StatusSource, status_key, task_key, thread_status_key};

/// Builds context-switch snapshots from a [`StatusSource`].
pub struct Reader<S> {
    source: S,
}

impl Default for Reader<ProcFs> {
    fn default() -> Self {
        Self::new(ProcFs::default())
    }
}

impl<S: StatusSource> Reader<S> {
    pub fn new(source: S) -> Self {
        Reader { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Read the process counters, then every thread listed for it.
    ///
    /// Missing or unreadable resources turn into zeroed counters; only a
    /// malformed counter value fails the query.
    pub fn query(&self, pid: u32) -> Result<Snapshot> {
        let _span = tracing::debug_span!("reader.query", pid).entered();

        let mut snapshot = self.query_process(pid)?;
        for tid in self.enumerate_threads(pid) {
            let counters = self
                .read_counters(&thread_status_key(pid, &tid))
                .wrap_err_with(|| format!("failed to read counters for thread {tid} of {pid}"))?;
            snapshot.threads.insert(tid, counters);
        }

        tracing::debug!(pid, threads = snapshot.threads.len(), "query complete");
        Ok(snapshot)
    }

    /// Process-level counters only; thread status files are never opened.
    pub fn query_process(&self, pid: u32) -> Result<Snapshot> {
        let process = self.read_counters(&status_key(pid))?;
        Ok(Snapshot {
            pid,
            process,
            ..Snapshot::default()
        })
    }

    pub fn read_counters(&self, key: &Path) -> Result<CounterPair> {
        let _span = tracing::debug_span!("reader.read_counters", key = %key.display()).entered();

        let lines = match self.source.read_lines(key) {
            Ok(lines) => lines,
            Err(err) => {
                log_recovered(key, &err);
                return Ok(CounterPair::default());
            }
        };
        scan_status_lines(&lines).wrap_err_with(|| format!("bad status resource {}", key.display()))
    }

    pub fn enumerate_threads(&self, pid: u32) -> Vec<String> {
        let key = task_key(pid);
        match self.source.list_children(&key) {
            Ok(tids) => tids,
            Err(err) => {
                log_recovered(&key, &err);
                Vec::new()
            }
        }
    }
}

fn log_recovered(key: &Path, err: &io::Error) {
    if err.kind() == io::ErrorKind::NotFound {
        tracing::debug!(key = %key.display(), "resource not found, treating as empty");
    } else {
        tracing::warn!(key = %key.display(), error = %err, "resource unreadable, treating as empty");
    }
}
