use serde::Serialize;
use std::fmt;

/// Lifecycle state of a session.
///
/// ```text
/// Empty --load--> Loaded --build--> Building --done--> Loaded
///                 Loaded --run----> Running  --exit/stop--> Loaded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Empty,
    Loaded,
    Building,
    Running,
}

impl SessionStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, SessionStatus::Running)
    }

    pub fn has_script(&self) -> bool {
        !matches!(self, SessionStatus::Empty)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionStatus::Empty => "empty",
            SessionStatus::Loaded => "loaded",
            SessionStatus::Building => "building",
            SessionStatus::Running => "running",
        };
        f.write_str(name)
    }
}

/// Which commands a front end should offer, derived only from the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub new_script: bool,
    pub load: bool,
    pub reload: bool,
    pub build: bool,
    pub run: bool,
    pub stop: bool,
    pub debug: bool,
    pub open_external: bool,
    pub sync: bool,
}

impl Controls {
    pub fn for_status(status: SessionStatus) -> Self {
        let loaded = status.has_script();
        let idle = !status.is_running();

        Self {
            new_script: idle,
            load: idle,
            reload: loaded && idle,
            build: loaded && idle,
            run: loaded && idle,
            stop: status.is_running(),
            debug: loaded && idle,
            open_external: loaded && idle,
            sync: loaded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session_only_offers_new_and_load() {
        let controls = Controls::for_status(SessionStatus::Empty);
        assert!(controls.new_script);
        assert!(controls.load);
        assert!(!controls.run);
        assert!(!controls.build);
        assert!(!controls.stop);
        assert!(!controls.sync);
    }

    #[test]
    fn test_running_session_only_offers_stop_and_sync() {
        let controls = Controls::for_status(SessionStatus::Running);
        assert!(controls.stop);
        assert!(controls.sync);
        assert!(!controls.run);
        assert!(!controls.build);
        assert!(!controls.debug);
        assert!(!controls.load);
        assert!(!controls.new_script);
        assert!(!controls.open_external);
    }

    #[test]
    fn test_building_session_stays_interactive() {
        assert_eq!(
            Controls::for_status(SessionStatus::Building),
            Controls::for_status(SessionStatus::Loaded)
        );
    }
}
