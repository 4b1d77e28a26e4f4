use ctxsw::Reader;
use ctxsw::config::DisplayConfig;
use ctxsw::format::render_text;
use ctxsw::system::source::MemorySource;
use insta::{assert_debug_snapshot, assert_snapshot};

fn fabricated_pid_100() -> MemorySource {
    MemorySource::new()
        .with_file(
            "100/status",
            "Name:\tbash\nvoluntary_ctxt_switches:\t12\nnonvoluntary_ctxt_switches:\t3\n",
        )
        .with_dir("100/task", ["101", "100"])
        .with_file(
            "100/task/100/status",
            "voluntary_ctxt_switches:\t5\nnonvoluntary_ctxt_switches:\t1\n",
        )
}

#[test]
fn snapshot_of_fabricated_process() {
    let snapshot = Reader::new(fabricated_pid_100())
        .query(100)
        .expect("query failed");

    assert_debug_snapshot!("fabricated_snapshot", snapshot);
}

#[test]
fn text_report_of_fabricated_process() {
    let snapshot = Reader::new(fabricated_pid_100())
        .query(100)
        .expect("query failed");
    let rendered = render_text(&snapshot, &DisplayConfig::default());

    assert_snapshot!("fabricated_text_report", rendered);
}
