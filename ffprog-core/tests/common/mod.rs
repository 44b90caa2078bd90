// ffprog-core/tests/common/mod.rs

// --- Mocking Infrastructure (for testing) ---

#![allow(dead_code)]

use ffprog_core::external::{FfprobeExecutor, ProbeOutput, ProcessId, ProcessWatcher, parse_probe_output};
use ffprog_core::{CoreError, CoreResult};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Mock implementation of FfprobeExecutor returning canned JSON.
pub struct MockFfprobeExecutor {
    json: Option<String>,
    pub calls: Cell<usize>,
}

impl MockFfprobeExecutor {
    pub fn with_json(json: &str) -> Self {
        Self {
            json: Some(json.to_string()),
            calls: Cell::new(0),
        }
    }

    /// Behaves like an ffprobe binary that cannot be started.
    pub fn failing() -> Self {
        Self {
            json: None,
            calls: Cell::new(0),
        }
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<ProbeOutput> {
        self.calls.set(self.calls.get() + 1);
        match &self.json {
            Some(json) => parse_probe_output(json),
            None => Err(CoreError::ProbeExecution(format!(
                "mock ffprobe failure for {}",
                input_path.display()
            ))),
        }
    }
}

/// One poll as seen by the watcher.
#[derive(Debug, Clone)]
pub enum Step {
    /// Process is running; optionally append a line to the stats log first
    Alive(Option<String>),
    /// Process no longer exists
    Gone,
    /// Process exited but was not reaped
    Defunct,
}

pub fn alive(line: &str) -> Step {
    Step::Alive(Some(line.to_string()))
}

pub fn vstats_line(frame: u64) -> String {
    format!("out= 0 st= 0 frame= {frame} q= 28.0 f_size= 1200 s_size= 64kB time= 1.000 br= 512.0kbits/s avg_br= 512.0kbits/s type= P")
}

/// Mock implementation of ProcessWatcher that plays back a script, writing
/// to the stats log the way ffmpeg would between polls. An exhausted script
/// reports the process as gone.
#[derive(Clone, Default)]
pub struct ScriptedWatcher {
    steps: Rc<RefCell<VecDeque<Step>>>,
    current: Rc<RefCell<Option<Step>>>,
    stats_path: Rc<RefCell<Option<PathBuf>>>,
    pub exists_calls: Rc<Cell<usize>>,
    pub defunct_calls: Rc<Cell<usize>>,
}

impl ScriptedWatcher {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Rc::new(RefCell::new(steps.into())),
            ..Default::default()
        }
    }

    /// Stats log that `Step::Alive` lines are appended to.
    pub fn set_stats_path(&self, path: &Path) {
        *self.stats_path.borrow_mut() = Some(path.to_path_buf());
    }

    /// Shared handle so a launcher closure can register the stats path.
    pub fn stats_path_slot(&self) -> Rc<RefCell<Option<PathBuf>>> {
        Rc::clone(&self.stats_path)
    }

    fn append(&self, line: &str) {
        let path = self.stats_path.borrow().clone().expect("stats path not registered");
        let mut file = OpenOptions::new().append(true).open(path).unwrap();
        writeln!(file, "{line}").unwrap();
    }
}

impl ProcessWatcher for ScriptedWatcher {
    fn exists(&self, _pid: ProcessId) -> bool {
        self.exists_calls.set(self.exists_calls.get() + 1);
        let step = self.steps.borrow_mut().pop_front().unwrap_or(Step::Gone);
        if let Step::Alive(Some(line)) = &step {
            self.append(line);
        }
        let exists = !matches!(step, Step::Gone);
        *self.current.borrow_mut() = Some(step);
        exists
    }

    fn is_defunct(&self, _pid: ProcessId) -> bool {
        self.defunct_calls.set(self.defunct_calls.get() + 1);
        matches!(*self.current.borrow(), Some(Step::Defunct))
    }
}

pub const PROBE_25FPS_10S: &str =
    r#"{"streams":[{"avg_frame_rate":"25/1"}],"format":{"duration":"10"}}"#;
