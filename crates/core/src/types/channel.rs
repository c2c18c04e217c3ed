use serde::Serialize;
use std::fmt;

/// Named output channel of the output panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputChannel {
    Build,
    Run,
    Console,
    Debug,
}

impl OutputChannel {
    pub const ALL: [OutputChannel; 4] = [
        OutputChannel::Build,
        OutputChannel::Run,
        OutputChannel::Console,
        OutputChannel::Debug,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputChannel::Build => "build",
            OutputChannel::Run => "run",
            OutputChannel::Console => "console",
            OutputChannel::Debug => "debug",
        }
    }
}

impl fmt::Display for OutputChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
