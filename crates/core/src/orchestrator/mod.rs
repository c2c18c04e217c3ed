//! The session orchestrator
//!
//! [`Orchestrator`] owns one [`SessionState`] and exposes the operations a
//! front end issues against it: load, build, run, debug, stop and friends.
//! Long operations are dispatched to tokio tasks and return a
//! [`TaskHandle`]; the calling context never waits on the engine.
//!
//! Builds are serialized by the session's [`BuildGuard`]. Run and Debug are
//! only rejected while a process is running. That check is advisory: two
//! runs requested before the first process starts can both proceed.

mod build;
mod run;
mod task;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::{Error, Result},
    interfaces::{EditorHost, OutputSink, ProcessHandle, ScriptEngine},
    project::{NewScript, ProjectModel},
    session::{BuildGuard, SessionEvent, SessionEvents, SessionState},
    types::{Controls, OutputChannel, Project, ProjectItem, SessionStatus},
};

pub use task::TaskHandle;

/// Name used when an engine call fails by panicking.
const ENGINE: &str = "Script engine";

/// Result of [`Orchestrator::stop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// No process was being tracked.
    NotRunning,
    /// Termination was requested from the engine.
    Requested,
    /// The process could not be terminated, usually because it had already
    /// exited. The message was written to the build channel.
    Failed(String),
}

#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    config: Config,
    model: ProjectModel,
    engine: Arc<dyn ScriptEngine>,
    editor: Arc<dyn EditorHost>,
    output: Arc<dyn OutputSink>,
    state: Mutex<SessionState>,
    build_guard: BuildGuard,
    events: SessionEvents,
}

impl Orchestrator {
    pub fn new(
        config: Config,
        engine: Arc<dyn ScriptEngine>,
        editor: Arc<dyn EditorHost>,
        output: Arc<dyn OutputSink>,
    ) -> Self {
        let model = ProjectModel::from_config(&config);
        Self {
            inner: Arc::new(Inner {
                config,
                model,
                engine,
                editor,
                output,
                state: Mutex::new(SessionState::new()),
                build_guard: BuildGuard::new(),
                events: SessionEvents::default(),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> SessionStatus {
        self.state().status()
    }

    pub fn controls(&self) -> Controls {
        Controls::for_status(self.status())
    }

    pub fn current_script(&self) -> Option<PathBuf> {
        self.state().current_script().map(Path::to_path_buf)
    }

    pub fn project(&self) -> Option<Project> {
        self.state().project().cloned()
    }

    pub fn running_process(&self) -> Option<ProcessHandle> {
        self.state().running_process().cloned()
    }

    pub fn is_building(&self) -> bool {
        self.inner.build_guard.is_held()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    fn publish_status(&self) {
        let status = self.status();
        self.inner.events.publish(SessionEvent::StatusChanged(status));
    }

    /// Resolve `path` and make it the session's script.
    ///
    /// On failure the previous project stays loaded and the user is told why.
    pub fn load(&self, path: &Path) -> Result<Project> {
        if self.status().is_running() {
            return Err(Error::ScriptRunning);
        }

        let project = match self.inner.model.resolve(path) {
            Ok(project) => project,
            Err(e) => {
                warn!("Failed to load {}: {e}", path.display());
                self.inner.editor.show_message(&e.to_string());
                return Err(e);
            }
        };

        self.state().load(project.clone())?;
        info!("Loaded script {}", project.primary_script().display());

        self.inner
            .events
            .publish(SessionEvent::ProjectLoaded(project.clone()));
        self.publish_status();
        Ok(project)
    }

    /// Load whatever file the editor is showing, saving it first if it has
    /// never been written to disk.
    pub fn load_from_editor(&self) -> Result<Project> {
        let editor = &self.inner.editor;

        let mut path = editor.current_file_path();
        if !path.as_deref().is_some_and(Path::is_file) {
            editor.save_current_file()?;
            path = editor.current_file_path();
        }

        match path {
            Some(path) if path.is_file() => self.load(&path),
            _ => Err(Error::NoScriptLoaded),
        }
    }

    pub fn reload(&self) -> Result<Project> {
        let script = self.current_script().ok_or(Error::NoScriptLoaded)?;
        self.load(&script)
    }

    pub fn unload(&self) -> Result<()> {
        let unloaded = self.state().unload()?;
        if let Some(script) = unloaded {
            info!("Unloaded script {}", script.display());
        }
        self.inner.events.publish(SessionEvent::ProjectUnloaded);
        self.publish_status();
        Ok(())
    }

    /// The loaded script, loading the editor's file once if nothing is loaded.
    fn ensure_script(&self) -> Result<PathBuf> {
        if let Some(script) = self.current_script() {
            return Ok(script);
        }

        debug!("No script loaded, trying the editor's current file");
        if let Err(e) = self.load_from_editor() {
            debug!("Loading from editor failed: {e}");
        }

        self.current_script().ok_or_else(|| {
            let err = Error::NoScriptLoaded;
            self.inner.editor.show_message(&err.to_string());
            err
        })
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.status().is_running() {
            Err(Error::ScriptRunning)
        } else {
            Ok(())
        }
    }

    fn open_and_save(&self, script: &Path) -> Result<()> {
        let editor = &self.inner.editor;
        editor.open_file(script)?;
        editor.focus_editor();
        editor.save_current_file()
    }

    fn report(&self, channel: OutputChannel, error: &Error) {
        let output = &self.inner.output;
        output.show_channel(channel);
        output.write_line(channel, &error.to_string());
        output.reset_caret(channel);
    }

    /// Force-terminate the running script, if any.
    ///
    /// Never fails: the process may exit between the check and the kill, in
    /// which case the failure is logged and written to the build channel.
    /// The run task clears the session once the engine returns.
    pub fn stop(&self) -> StopOutcome {
        let Some(handle) = self.running_process() else {
            debug!("Stop requested with no running script");
            return StopOutcome::NotRunning;
        };

        match handle.kill() {
            Ok(()) => {
                info!("Requested termination of script process {:?}", handle.pid());
                StopOutcome::Requested
            }
            Err(e) => {
                warn!("{e}");
                self.inner.output.write_line(OutputChannel::Build, "");
                self.inner
                    .output
                    .write_line(OutputChannel::Build, &e.to_string());
                StopOutcome::Failed(e.to_string())
            }
        }
    }

    /// Ask the engine to open an IDE project for the loaded script.
    pub fn open_external(&self) -> Result<()> {
        let Some(script) = self.current_script() else {
            let err = Error::NoScriptLoaded;
            self.inner.editor.show_message(&err.to_string());
            return Err(err);
        };
        self.ensure_idle()?;

        let result = self
            .inner
            .editor
            .save_current_file()
            .and_then(|()| self.inner.engine.open_external_project(&script));
        if let Err(e) = &result {
            self.inner.editor.show_message(&e.to_string());
        }
        result
    }

    /// Open a project item in the editor. Assemblies are not editable and
    /// are skipped (`Ok(false)`).
    pub fn open_item(&self, item: &ProjectItem) -> Result<bool> {
        if item.is_assembly {
            return Ok(false);
        }
        self.open_and_save(&item.path)?;
        Ok(true)
    }

    /// The project item for `path`, compared case-insensitively.
    pub fn locate(&self, path: &Path) -> Option<ProjectItem> {
        self.state().project()?.find_item(path)
    }

    /// The project item for the editor's current file.
    pub fn sync_with_editor(&self) -> Option<ProjectItem> {
        let path = self.inner.editor.current_file_path()?;
        self.locate(&path)
    }

    /// Create a script from a template, open it and load it.
    pub fn new_script(&self, name: &str, classless: Option<bool>) -> Result<Project> {
        self.ensure_idle()?;

        let config = &self.inner.config;
        let path = NewScript::new(config.scripts_dir(), config.script_extension.clone())
            .classless(classless.unwrap_or(config.classless_by_default))
            .create(name)?;

        self.inner.editor.open_file(&path)?;
        self.inner.editor.focus_editor();
        self.load(&path)
    }
}
