//! Output panel interface

use crate::types::OutputChannel;

/// Receives textual progress on the named output channels.
///
/// Implementations are shared with background tasks and must tolerate calls
/// from any thread.
pub trait OutputSink: Send + Sync {
    fn write_line(&self, channel: OutputChannel, line: &str);

    fn clear(&self, channel: OutputChannel);

    fn is_empty(&self, channel: OutputChannel) -> bool;

    /// Bring `channel` to the front of the output panel
    fn show_channel(&self, channel: OutputChannel);

    /// Scroll `channel` back to its first line
    fn reset_caret(&self, channel: OutputChannel);
}
