// ffprog-core/tests/monitor_tests.rs

mod common;

use common::{ScriptedWatcher, Step, alive, vstats_line};
use ffprog_core::{MonitorOutcome, NullProgressCallback, ProcessId, ProgressSample, monitor_progress};
use std::io::{Cursor, Write};
use std::time::Duration;
use tempfile::NamedTempFile;

fn pid() -> ProcessId {
    ProcessId::new(4242).unwrap()
}

fn stats_file_with_header() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", vstats_line(0)).unwrap();
    file
}

#[test]
fn test_last_line_at_total_completes_after_one_callback() {
    let mut log = Cursor::new(b"x\n0 0 0 0 0 100\n".to_vec());
    let watcher = ScriptedWatcher::new(vec![Step::Alive(None), Step::Alive(None)]);
    let mut samples: Vec<ProgressSample> = Vec::new();
    let mut on_progress = |s: &ProgressSample| samples.push(*s);

    let report = monitor_progress(&mut log, pid(), 100, &watcher, &mut on_progress, Duration::ZERO);

    assert_eq!(report.outcome, MonitorOutcome::Completed);
    assert_eq!(report.callbacks, 1);
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].percent, 100.0);
    assert_eq!(samples[0].frames_done, 100);
    assert_eq!(samples[0].total_frames, 100);
    assert!(samples[0].elapsed_secs >= 0.0);
    assert_eq!(watcher.exists_calls.get(), 1);
}

#[test]
fn test_process_not_found_on_first_check() {
    let mut log = Cursor::new(b"x\n0 0 0 0 0 50\n".to_vec());
    let watcher = ScriptedWatcher::new(vec![Step::Gone]);
    let mut calls = 0;
    let mut on_progress = |_: &ProgressSample| calls += 1;

    let report = monitor_progress(&mut log, pid(), 100, &watcher, &mut on_progress, Duration::ZERO);

    assert_eq!(report.outcome, MonitorOutcome::ProcessExited);
    assert_eq!(report.callbacks, 0);
    assert_eq!(calls, 0);
    assert_eq!(watcher.defunct_calls.get(), 0);
}

#[test]
fn test_defunct_process_stops_without_callback() {
    let mut log = Cursor::new(b"x\n0 0 0 0 0 50\n".to_vec());
    let watcher = ScriptedWatcher::new(vec![Step::Alive(None), Step::Defunct]);
    let mut samples: Vec<ProgressSample> = Vec::new();
    let mut on_progress = |s: &ProgressSample| samples.push(*s);

    let report = monitor_progress(&mut log, pid(), 100, &watcher, &mut on_progress, Duration::ZERO);

    assert_eq!(report.outcome, MonitorOutcome::ProcessDefunct);
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].frames_done, 50);
    assert_eq!(report.last_sample.frames_done, 50);
}

#[test]
fn test_exits_when_process_gone_regardless_of_progress() {
    let mut log = Cursor::new(b"x\n0 0 0 0 0 1\n".to_vec());
    let watcher = ScriptedWatcher::new(vec![Step::Alive(None), Step::Alive(None), Step::Gone]);
    let mut on_progress = NullProgressCallback;

    let report = monitor_progress(&mut log, pid(), 1_000_000, &watcher, &mut on_progress, Duration::ZERO);

    assert_eq!(report.outcome, MonitorOutcome::ProcessExited);
    assert_eq!(report.callbacks, 2);
    assert_eq!(report.last_sample.frames_done, 1);
}

#[test]
fn test_not_ready_log_skips_callback() {
    let mut file = NamedTempFile::new().unwrap();
    let watcher = ScriptedWatcher::new(vec![
        Step::Alive(None),
        alive(&vstats_line(10)),
        alive(&vstats_line(20)),
    ]);
    watcher.set_stats_path(file.path());
    let mut frames: Vec<u64> = Vec::new();
    let mut on_progress = |s: &ProgressSample| frames.push(s.frames_done);

    let report = monitor_progress(file.as_file_mut(), pid(), 100, &watcher, &mut on_progress, Duration::ZERO);

    // Empty log, then a single line: both not ready
    assert_eq!(frames, vec![20]);
    assert_eq!(report.outcome, MonitorOutcome::ProcessExited);
}

#[test]
fn test_frames_never_decrease_across_glitches() {
    let mut file = stats_file_with_header();
    let watcher = ScriptedWatcher::new(vec![
        alive(&vstats_line(10)),
        alive(&vstats_line(5)),
        alive("frame= garbage"),
        alive(&vstats_line(30)),
        alive(""),
        alive(&vstats_line(20)),
    ]);
    watcher.set_stats_path(file.path());
    let mut samples: Vec<ProgressSample> = Vec::new();
    let mut on_progress = |s: &ProgressSample| samples.push(*s);

    let report = monitor_progress(file.as_file_mut(), pid(), 100, &watcher, &mut on_progress, Duration::ZERO);

    let frames: Vec<u64> = samples.iter().map(|s| s.frames_done).collect();
    assert_eq!(frames, vec![10, 10, 10, 30, 30, 30]);
    assert!(samples.windows(2).all(|w| w[0].frames_done <= w[1].frames_done));
    assert!(samples.windows(2).all(|w| w[0].elapsed_secs <= w[1].elapsed_secs));
    assert!((samples[3].percent - 30.0).abs() < 1e-9);
    assert_eq!(report.outcome, MonitorOutcome::ProcessExited);
}

#[test]
fn test_callback_every_poll_even_without_progress() {
    let mut file = stats_file_with_header();
    let watcher = ScriptedWatcher::new(vec![
        alive(&vstats_line(7)),
        Step::Alive(None),
        Step::Alive(None),
    ]);
    watcher.set_stats_path(file.path());
    let mut samples: Vec<ProgressSample> = Vec::new();
    let mut on_progress = |s: &ProgressSample| samples.push(*s);

    monitor_progress(file.as_file_mut(), pid(), 100, &watcher, &mut on_progress, Duration::from_millis(5));

    assert_eq!(samples.len(), 3);
    assert!(samples.iter().all(|s| s.frames_done == 7));
    assert!(samples[2].elapsed_secs > samples[0].elapsed_secs);
}

#[test]
fn test_completes_when_counter_reaches_total() {
    let mut file = stats_file_with_header();
    let watcher = ScriptedWatcher::new(vec![
        alive(&vstats_line(100)),
        alive(&vstats_line(250)),
        // Never reached
        alive(&vstats_line(260)),
    ]);
    watcher.set_stats_path(file.path());
    let mut samples: Vec<ProgressSample> = Vec::new();
    let mut on_progress = |s: &ProgressSample| samples.push(*s);

    let report = monitor_progress(file.as_file_mut(), pid(), 250, &watcher, &mut on_progress, Duration::ZERO);

    assert_eq!(report.outcome, MonitorOutcome::Completed);
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].percent, 40.0);
    assert_eq!(samples[1].percent, 100.0);
    assert_eq!(watcher.exists_calls.get(), 2);
}
