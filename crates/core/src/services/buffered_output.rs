use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::interfaces::OutputSink;
use crate::types::OutputChannel;

/// In-memory [`OutputSink`].
///
/// Keeps the current content of every channel plus a transcript of every
/// line ever written, which survives `clear`.
#[derive(Debug, Default)]
pub struct BufferedOutput {
    inner: Mutex<Buffers>,
}

#[derive(Debug, Default)]
struct Buffers {
    channels: HashMap<OutputChannel, Vec<String>>,
    transcript: Vec<(OutputChannel, String)>,
    visible: Option<OutputChannel>,
    caret_resets: usize,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    fn buffers(&self) -> MutexGuard<'_, Buffers> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn lines(&self, channel: OutputChannel) -> Vec<String> {
        self.buffers()
            .channels
            .get(&channel)
            .cloned()
            .unwrap_or_default()
    }

    pub fn transcript(&self) -> Vec<(OutputChannel, String)> {
        self.buffers().transcript.clone()
    }

    /// Channel most recently brought to the front.
    pub fn visible(&self) -> Option<OutputChannel> {
        self.buffers().visible
    }

    pub fn caret_resets(&self) -> usize {
        self.buffers().caret_resets
    }
}

impl OutputSink for BufferedOutput {
    fn write_line(&self, channel: OutputChannel, line: &str) {
        let mut buffers = self.buffers();
        buffers
            .channels
            .entry(channel)
            .or_default()
            .push(line.to_string());
        buffers.transcript.push((channel, line.to_string()));
    }

    fn clear(&self, channel: OutputChannel) {
        self.buffers().channels.remove(&channel);
    }

    fn is_empty(&self, channel: OutputChannel) -> bool {
        self.buffers()
            .channels
            .get(&channel)
            .is_none_or(|lines| lines.is_empty())
    }

    fn show_channel(&self, channel: OutputChannel) {
        self.buffers().visible = Some(channel);
    }

    fn reset_caret(&self, _channel: OutputChannel) {
        self.buffers().caret_resets += 1;
    }
}
