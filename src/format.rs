use std::fmt::Write;

use color_eyre::eyre::Result;

use crate::config::DisplayConfig;
use crate::system::counters::CounterPair;
use crate::system::snapshot::Snapshot;

fn write_pair(out: &mut String, indent: &str, counters: CounterPair) {
    let _ = writeln!(out, "{indent}Voluntary: {}", counters.voluntary);
    let _ = writeln!(out, "{indent}Nonvoluntary: {}", counters.nonvoluntary);
}

pub fn render_text(snapshot: &Snapshot, display: &DisplayConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Process {} Context Switches:", snapshot.pid);
    write_pair(&mut out, "  ", snapshot.process);

    if !display.show_threads {
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Thread Context Switches:");
    for (tid, counters) in &snapshot.threads {
        let _ = writeln!(out, "  Thread {tid}:");
        write_pair(&mut out, "    ", *counters);
    }
    if display.show_totals && !snapshot.threads.is_empty() {
        let count = snapshot.threads.len();
        let noun = if count == 1 { "thread" } else { "threads" };
        let _ = writeln!(out, "  Total ({count} {noun}):");
        write_pair(&mut out, "    ", snapshot.thread_totals());
    }
    out
}

pub fn render_json(snapshots: &[Snapshot]) -> Result<String> {
    let json = match snapshots {
        [single] => serde_json::to_string_pretty(single)?,
        many => serde_json::to_string_pretty(many)?,
    };
    Ok(json)
}
