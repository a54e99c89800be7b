use std::time::Duration;

use crate::{SelectedFile, SessionToken};

/// How long the "copied" flag stays raised after a copy.
pub const CLIPBOARD_RESET_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Post the document to the Analysis Service, tagged with the session it belongs to.
    SubmitAnalysis {
        token: SessionToken,
        file: SelectedFile,
    },
    /// The session behind `token` was superseded while its request was in flight.
    AbandonAnalysis { token: SessionToken },
    CopyToClipboard { text: String },
    /// (Re)start the timer that lowers the copied flag. Replaces any pending timer.
    ScheduleClipboardReset { generation: u64, delay: Duration },
}
