use std::path::{Path, PathBuf};

use super::{
    ENGINE, Orchestrator, TaskHandle,
    task::{Deferred, catch_panic},
};
use crate::{
    error::Result,
    types::{OutputChannel, project::script_name},
};

const CHANNEL: OutputChannel = OutputChannel::Build;

impl Orchestrator {
    /// Compile the loaded script in the background.
    ///
    /// A build requested while another is in progress waits for it instead
    /// of failing; it starts once the first has written its final marker.
    pub fn build(&self) -> Result<TaskHandle> {
        let script = self.ensure_script()?;
        self.ensure_idle()?;

        let this = self.clone();
        Ok(TaskHandle::spawn("build", async move {
            this.build_script(script).await
        }))
    }

    async fn build_script(&self, script: PathBuf) -> Result<()> {
        let _permit = self.inner.build_guard.acquire().await;
        self.set_building(true);
        let _building = {
            let this = self.clone();
            Deferred::new(move || this.set_building(false))
        };

        let output = &self.inner.output;
        output.show_channel(CHANNEL);
        output.clear(CHANNEL);
        output.write_line(
            CHANNEL,
            &format!("------ Build started: Script: {} ------", script_name(&script)),
        );

        let result = self.compile(&script).await;

        match &result {
            Ok(()) => {
                output.write_line(CHANNEL, "");
                output.write_line(CHANNEL, "========== Build: succeeded ==========");
            }
            Err(e) => {
                tracing::debug!("Build of {} failed: {e}", script.display());
                output.show_channel(CHANNEL);
                output.write_line(CHANNEL, "");
                output.write_line(CHANNEL, &e.to_string());
                output.write_line(CHANNEL, "========== Build: Failed ==========");
            }
        }
        output.reset_caret(CHANNEL);

        result
    }

    async fn compile(&self, script: &Path) -> Result<()> {
        self.open_and_save(script)?;
        let engine = self.inner.engine.clone();
        let script = script.to_path_buf();
        catch_panic(ENGINE, async move { engine.compile(&script).await }).await
    }

    fn set_building(&self, building: bool) {
        self.state().set_building(building);
        self.publish_status();
    }
}
