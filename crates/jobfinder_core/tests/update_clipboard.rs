use jobfinder_core::{
    update, AnalysisReport, AppState, Effect, Msg, Phase, SelectedFile, CLIPBOARD_RESET_DELAY,
};
use pretty_assertions::assert_eq;

fn succeeded(letter: &str) -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::FileSelected(SelectedFile::new("cv.pdf", b"%PDF".to_vec())),
    );
    let (state, _) = update(state, Msg::AnalyzeClicked);
    let token = state.session().token();
    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            token,
            result: Ok(AnalysisReport {
                matched_jobs: Vec::new(),
                cover_letter: letter.to_string(),
            }),
        },
    );
    state
}

#[test]
fn copy_emits_clipboard_write_and_timer() {
    let state = succeeded("Dear team");

    let (state, effects) = update(state, Msg::CopyCoverLetterClicked);

    assert_eq!(
        effects,
        vec![
            Effect::CopyToClipboard {
                text: "Dear team".to_string()
            },
            Effect::ScheduleClipboardReset {
                generation: 1,
                delay: CLIPBOARD_RESET_DELAY,
            },
        ]
    );
    assert!(state.clipboard_copied());
    assert_eq!(state.view().copy_label, "Copied!");
}

#[test]
fn copy_outside_succeeded_does_nothing() {
    let (state, _) = update(
        AppState::new(),
        Msg::FileSelected(SelectedFile::new("cv.pdf", b"%PDF".to_vec())),
    );
    let (next, effects) = update(state.clone(), Msg::CopyCoverLetterClicked);

    assert_eq!(next, state);
    assert!(effects.is_empty());
    assert!(!next.clipboard_copied());
}

#[test]
fn empty_letter_still_copies() {
    let state = succeeded("");
    let (state, effects) = update(state, Msg::CopyCoverLetterClicked);

    assert_eq!(
        effects.first(),
        Some(&Effect::CopyToClipboard {
            text: String::new()
        })
    );
    assert!(state.clipboard_copied());
}

#[test]
fn second_copy_restarts_timer_without_flicker() {
    let state = succeeded("Dear team");
    let (state, _) = update(state, Msg::CopyCoverLetterClicked);
    let (state, effects) = update(state, Msg::CopyCoverLetterClicked);
    assert!(state.clipboard_copied());
    assert!(effects.contains(&Effect::ScheduleClipboardReset {
        generation: 2,
        delay: CLIPBOARD_RESET_DELAY,
    }));

    // The first timer fires late; the flag must stay raised.
    let (state, _) = update(state, Msg::ClipboardResetElapsed { generation: 1 });
    assert!(state.clipboard_copied());

    let (state, _) = update(state, Msg::ClipboardResetElapsed { generation: 2 });
    assert!(!state.clipboard_copied());
    assert_eq!(state.view().copy_label, "Copy Text");
}

#[test]
fn copied_flag_is_independent_of_phase() {
    let state = succeeded("Dear team");
    let (state, _) = update(state, Msg::CopyCoverLetterClicked);
    let (state, _) = update(
        state,
        Msg::FileSelected(SelectedFile::new("next.pdf", b"%PDF".to_vec())),
    );

    assert_eq!(state.phase(), Phase::FileSelected);
    assert!(state.view().clipboard_copied);

    let (state, _) = update(state, Msg::ClipboardResetElapsed { generation: 1 });
    assert!(!state.view().clipboard_copied);
}
