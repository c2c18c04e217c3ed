use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    error::{Error, Result},
    interfaces::ProcessHandle,
    types::{Project, SessionStatus},
};

/// The in-memory record of one session: the loaded script, its resolved
/// project and the process currently executing it.
#[derive(Debug, Default)]
pub struct SessionState {
    project: Option<Project>,
    running_process: Option<ProcessHandle>,
    building: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        if self.project.is_none() {
            SessionStatus::Empty
        } else if self.running_process.is_some() {
            SessionStatus::Running
        } else if self.building {
            SessionStatus::Building
        } else {
            SessionStatus::Loaded
        }
    }

    pub fn current_script(&self) -> Option<&Path> {
        self.project.as_ref().map(Project::primary_script)
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn running_process(&self) -> Option<&ProcessHandle> {
        self.running_process.as_ref()
    }

    /// Replace the loaded project. Rejected while a process is live.
    pub fn load(&mut self, project: Project) -> Result<()> {
        if self.running_process.is_some() {
            return Err(Error::ScriptRunning);
        }
        self.project = Some(project);
        Ok(())
    }

    /// Forget the loaded project. Rejected while a process is live.
    pub fn unload(&mut self) -> Result<Option<PathBuf>> {
        if self.running_process.is_some() {
            return Err(Error::ScriptRunning);
        }
        Ok(self
            .project
            .take()
            .map(|project| project.primary_script().to_path_buf()))
    }

    pub fn set_building(&mut self, building: bool) {
        self.building = building;
    }

    /// Record the process started by a run. Any previous handle is replaced.
    pub fn attach_process(&mut self, handle: ProcessHandle) {
        if self.running_process.is_some() {
            tracing::warn!("Replacing a tracked script process that was still registered");
        }
        self.running_process = Some(handle);
    }

    pub fn clear_process(&mut self) -> Option<ProcessHandle> {
        self.running_process.take()
    }
}

/// Serializes builds within one session.
///
/// Waiting callers queue rather than fail. The guard is not reentrant: a
/// task holding the permit must not acquire it again.
#[derive(Debug, Clone, Default)]
pub struct BuildGuard {
    lock: Arc<Mutex<()>>,
}

/// Proof that the holder is the only build in progress.
pub type BuildPermit = OwnedMutexGuard<()>;

impl BuildGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self) -> BuildPermit {
        self.lock.clone().lock_owned().await
    }

    pub fn is_held(&self) -> bool {
        self.lock.try_lock().is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectModel;
    use std::fs;
    use tempfile::TempDir;

    fn project(dir: &TempDir) -> Project {
        let path = dir.path().join("hello.cs");
        fs::write(&path, "").unwrap();
        ProjectModel::default().resolve(&path).unwrap()
    }

    #[test]
    fn test_status_transitions() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = SessionState::new();
        assert_eq!(state.status(), SessionStatus::Empty);
        assert!(state.current_script().is_none());

        state.load(project(&temp_dir)).unwrap();
        assert_eq!(state.status(), SessionStatus::Loaded);

        state.set_building(true);
        assert_eq!(state.status(), SessionStatus::Building);
        state.set_building(false);

        let (handle, _signal) = ProcessHandle::new(Some(1));
        state.attach_process(handle);
        assert_eq!(state.status(), SessionStatus::Running);

        assert!(state.clear_process().is_some());
        assert_eq!(state.status(), SessionStatus::Loaded);
    }

    #[test]
    fn test_unload_rejected_while_running() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = SessionState::new();
        state.load(project(&temp_dir)).unwrap();

        let (handle, _signal) = ProcessHandle::new(None);
        state.attach_process(handle);

        assert!(matches!(state.unload(), Err(Error::ScriptRunning)));
        assert!(matches!(state.load(project(&temp_dir)), Err(Error::ScriptRunning)));

        state.clear_process();
        let unloaded = state.unload().unwrap().unwrap();
        assert!(unloaded.ends_with("hello.cs"));
        assert_eq!(state.status(), SessionStatus::Empty);
    }

    #[tokio::test]
    async fn test_build_guard_is_exclusive() {
        let guard = BuildGuard::new();
        assert!(!guard.is_held());

        let permit = guard.acquire().await;
        assert!(guard.is_held());

        let waiter = guard.clone();
        let queued = tokio::spawn(async move {
            let _permit = waiter.acquire().await;
        });
        tokio::task::yield_now().await;
        assert!(!queued.is_finished());

        drop(permit);
        queued.await.unwrap();
        assert!(!guard.is_held());
    }
}
