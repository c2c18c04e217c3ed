#![allow(dead_code)]

use async_trait::async_trait;
use script_runner_core::interfaces::{LineCallback, StartCallback};
use script_runner_core::{
    BufferedOutput, Config, EditorHost, Error, Orchestrator, ProcessHandle, Result, ScriptEngine,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// How a fake script process behaves once started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Prints its lines and exits.
    Finish,
    /// Keeps running until a kill is requested.
    UntilKilled,
    /// Exits (drops its kill signal) but the engine only returns once
    /// [`FakeEngine::release`] is called.
    ExitThenWait,
    /// Starts, then the engine itself panics.
    Panic,
}

/// Scripted engine that records what it was asked to do.
pub struct FakeEngine {
    mode: RunMode,
    lines: Vec<String>,
    compile_delay: Duration,
    fail_compile: bool,
    fail_debug: bool,
    panic_debug: bool,
    active_compiles: AtomicUsize,
    max_compiles: AtomicUsize,
    exited: AtomicBool,
    release: Notify,
    log: Mutex<Vec<String>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            mode: RunMode::Finish,
            lines: Vec::new(),
            compile_delay: Duration::from_millis(0),
            fail_compile: false,
            fail_debug: false,
            panic_debug: false,
            active_compiles: AtomicUsize::new(0),
            max_compiles: AtomicUsize::new(0),
            exited: AtomicBool::new(false),
            release: Notify::new(),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_lines(mut self, lines: &[&str]) -> Self {
        self.lines = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_compile_delay(mut self, delay: Duration) -> Self {
        self.compile_delay = delay;
        self
    }

    pub fn failing_compile(mut self) -> Self {
        self.fail_compile = true;
        self
    }

    pub fn failing_debug(mut self) -> Self {
        self.fail_debug = true;
        self
    }

    pub fn panicking_debug(mut self) -> Self {
        self.panic_debug = true;
        self
    }

    pub fn max_concurrent_compiles(&self) -> usize {
        self.max_compiles.load(Ordering::SeqCst)
    }

    pub fn has_exited(&self) -> bool {
        self.exited.load(Ordering::SeqCst)
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, entry: impl Into<String>) {
        self.log.lock().unwrap().push(entry.into());
    }
}

#[async_trait]
impl ScriptEngine for FakeEngine {
    async fn compile(&self, script: &Path) -> Result<()> {
        let active = self.active_compiles.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_compiles.fetch_max(active, Ordering::SeqCst);
        self.record(format!("compile {}", file_name(script)));

        tokio::time::sleep(self.compile_delay).await;

        self.active_compiles.fetch_sub(1, Ordering::SeqCst);
        if self.fail_compile {
            Err(Error::Compile("error CS1002: ; expected".to_string()))
        } else {
            Ok(())
        }
    }

    async fn execute(
        &self,
        script: &Path,
        on_start: StartCallback,
        on_line: Option<LineCallback>,
    ) -> Result<()> {
        self.compile(script)
            .await
            .map_err(|e| Error::Runtime(e.to_string()))?;

        let (handle, mut kill) = ProcessHandle::new(Some(42));
        self.record("start");
        on_start(handle);

        if let Some(on_line) = &on_line {
            for line in &self.lines {
                on_line(line.clone());
            }
        }

        match self.mode {
            RunMode::Finish => {}
            RunMode::UntilKilled => {
                tokio::select! {
                    _ = kill.requested() => self.record("killed"),
                    _ = tokio::time::sleep(Duration::from_secs(10)) => self.record("timed out"),
                }
            }
            RunMode::Panic => panic!("engine crashed"),
            RunMode::ExitThenWait => {
                drop(kill);
                self.exited.store(true, Ordering::SeqCst);
                self.release.notified().await;
            }
        }

        self.record("exit");
        Ok(())
    }

    fn execute_detached(&self, script: &Path) -> Result<()> {
        self.record(format!("detached {}", file_name(script)));
        Ok(())
    }

    async fn debug(&self, script: &Path) -> Result<()> {
        self.record(format!("debug {}", file_name(script)));
        if self.panic_debug {
            panic!("debugger crashed");
        }
        if self.fail_debug {
            Err(Error::Debug("debugger not found".to_string()))
        } else {
            Ok(())
        }
    }

    fn open_external_project(&self, script: &Path) -> Result<()> {
        self.record(format!("open {}", file_name(script)));
        Ok(())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Editor that remembers what it was asked to show.
#[derive(Default)]
pub struct FakeEditor {
    current: Mutex<Option<PathBuf>>,
    messages: Mutex<Vec<String>>,
    saves: AtomicUsize,
}

impl FakeEditor {
    pub fn showing(path: Option<PathBuf>) -> Self {
        Self {
            current: Mutex::new(path),
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl EditorHost for FakeEditor {
    fn open_file(&self, path: &Path) -> Result<()> {
        *self.current.lock().unwrap() = Some(path.to_path_buf());
        Ok(())
    }

    fn save_current_file(&self) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn current_file_path(&self) -> Option<PathBuf> {
        self.current.lock().unwrap().clone()
    }

    fn focus_editor(&self) {}

    fn show_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub struct Session {
    pub orchestrator: Orchestrator,
    pub engine: Arc<FakeEngine>,
    pub editor: Arc<FakeEditor>,
    pub output: Arc<BufferedOutput>,
}

pub fn session(engine: FakeEngine, editor: FakeEditor) -> Session {
    session_with_config(Config::default(), engine, editor)
}

pub fn session_with_config(config: Config, engine: FakeEngine, editor: FakeEditor) -> Session {
    let engine = Arc::new(engine);
    let editor = Arc::new(editor);
    let output = Arc::new(BufferedOutput::new());
    let orchestrator = Orchestrator::new(config, engine.clone(), editor.clone(), output.clone());
    Session {
        orchestrator,
        engine,
        editor,
        output,
    }
}

/// Poll `condition` until it holds, failing the test after two seconds.
pub async fn wait_for(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached in time"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
