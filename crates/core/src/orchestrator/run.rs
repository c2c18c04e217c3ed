use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::{
    ENGINE, Orchestrator, TaskHandle,
    task::{Deferred, catch_panic},
};
use crate::{
    error::Result,
    interfaces::{LineCallback, ProcessHandle, StartCallback},
    types::{OutputChannel, project::script_name},
};

impl Orchestrator {
    /// Save and run the loaded script.
    ///
    /// With `as_external` the engine launches a detached process and nothing
    /// is tracked (`Ok(None)`). Otherwise the run happens in a background
    /// task whose process is tracked until it exits or is stopped.
    pub fn run(&self, as_external: bool) -> Result<Option<TaskHandle>> {
        let script = self.ensure_script()?;
        self.ensure_idle()?;

        if let Err(e) = self.open_and_save(&script) {
            self.report(OutputChannel::Build, &e);
            return Err(e);
        }

        if as_external {
            return match self.inner.engine.execute_detached(&script) {
                Ok(()) => {
                    info!("Launched {} externally", script.display());
                    Ok(None)
                }
                Err(e) => {
                    self.report(OutputChannel::Build, &e);
                    Err(e)
                }
            };
        }

        let output = &self.inner.output;
        for channel in [
            OutputChannel::Console,
            OutputChannel::Build,
            OutputChannel::Debug,
            OutputChannel::Run,
        ] {
            output.clear(channel);
        }
        output.show_channel(OutputChannel::Run);
        output.write_line(
            OutputChannel::Run,
            &format!("------ Run started: Script: {} ------", script_name(&script)),
        );

        let this = self.clone();
        Ok(Some(TaskHandle::spawn("run", async move {
            this.run_script(script).await
        })))
    }

    async fn run_script(&self, script: PathBuf) -> Result<()> {
        // Clears the tracked process even if the engine panics.
        let cleanup = {
            let this = self.clone();
            Deferred::new(move || this.finish_run())
        };

        let on_start: StartCallback = {
            let this = self.clone();
            Box::new(move |handle: ProcessHandle| this.attach_process(handle))
        };

        let on_line: Option<LineCallback> = self.inner.config.intercept_console.then(|| {
            let output = self.inner.output.clone();
            Arc::new(move |line: String| {
                if output.is_empty(OutputChannel::Console) {
                    output.show_channel(OutputChannel::Console);
                }
                output.write_line(OutputChannel::Console, &line);
            }) as LineCallback
        });

        let result = {
            let engine = self.inner.engine.clone();
            let script = script.clone();
            catch_panic(ENGINE, async move {
                engine.execute(&script, on_start, on_line).await
            })
            .await
        };
        drop(cleanup);

        match &result {
            Ok(()) => self
                .inner
                .output
                .write_line(OutputChannel::Run, "========== Run: finished =========="),
            Err(e) => {
                debug!("Run of {} failed: {e}", script.display());
                self.report(OutputChannel::Build, e);
            }
        }

        result
    }

    fn attach_process(&self, handle: ProcessHandle) {
        info!("Script process started: {:?}", handle.pid());
        self.state().attach_process(handle);
        self.publish_status();
    }

    fn finish_run(&self) {
        if let Some(handle) = self.state().clear_process() {
            debug!("Script process {:?} released", handle.pid());
        }
        self.publish_status();
    }

    /// Run the loaded script under the debugger in the background.
    ///
    /// Failures are shown as a blocking notification rather than written to
    /// an output channel.
    pub fn debug(&self) -> Result<TaskHandle> {
        let script = self.ensure_script()?;
        self.ensure_idle()?;
        self.inner.editor.save_current_file()?;

        let this = self.clone();
        Ok(TaskHandle::spawn("debug", async move {
            let engine = this.inner.engine.clone();
            let result = catch_panic(ENGINE, async move { engine.debug(&script).await }).await;
            if let Err(e) = &result {
                this.inner.editor.show_message(&e.to_string());
            }
            result
        }))
    }
}
