//! JobFinder core: pure analysis-session state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, CLIPBOARD_RESET_DELAY};
pub use msg::Msg;
pub use state::{
    AnalysisReport, AppState, FailureClass, JobMatch, Phase, SelectedFile, Session, SessionToken,
    GENERIC_FAILURE_MESSAGE,
};
pub use update::update;
pub use view_model::{
    match_label, match_percent, AppViewModel, JobCardView, SIZE_HINT_BYTES,
};
