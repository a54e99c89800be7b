use crate::{AppState, Effect, Msg, CLIPBOARD_RESET_DELAY};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(file) => match state.select_file(file) {
            // The superseded response is also dropped by token on arrival;
            // abandoning only saves the transport work.
            Some(token) => vec![Effect::AbandonAnalysis { token }],
            None => Vec::new(),
        },
        Msg::AnalyzeClicked => match state.begin_submission() {
            Some((token, file)) => vec![Effect::SubmitAnalysis { token, file }],
            None => Vec::new(),
        },
        Msg::AnalysisFinished { token, result } => {
            state.finish_submission(token, result);
            Vec::new()
        }
        Msg::CopyCoverLetterClicked => match state.begin_copy() {
            Some((text, generation)) => vec![
                Effect::CopyToClipboard { text },
                Effect::ScheduleClipboardReset {
                    generation,
                    delay: CLIPBOARD_RESET_DELAY,
                },
            ],
            None => Vec::new(),
        },
        Msg::ClipboardResetElapsed { generation } => {
            state.expire_clipboard(generation);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
