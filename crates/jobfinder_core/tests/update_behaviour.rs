use std::sync::Once;

use jobfinder_core::{
    update, AnalysisReport, AppState, Effect, FailureClass, JobMatch, Msg, Phase, SelectedFile,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(jobfinder_logging::initialize_for_tests);
}

fn resume(name: &str) -> SelectedFile {
    SelectedFile::new(name, b"%PDF-1.7 resume".to_vec())
}

fn select(state: AppState, name: &str) -> (AppState, Vec<Effect>) {
    update(state, Msg::FileSelected(resume(name)))
}

fn job(id: i64, similarity: f64) -> JobMatch {
    JobMatch {
        id,
        title: format!("Job {id}"),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        description: "Build things".to_string(),
        similarity_score: similarity,
    }
}

#[test]
fn initial_state_is_idle_and_empty() {
    init_logging();
    let state = AppState::new();
    let view = state.view();

    assert_eq!(view.phase, Phase::Idle);
    assert!(!view.can_submit);
    assert!(!view.is_busy);
    assert!(!view.has_results);
    assert_eq!(view.upload_title, "Drop your resume here");
    assert_eq!(view.upload_hint, "Support PDF files only (Max 5MB)");
    assert_eq!(view.error_message, None);
}

#[test]
fn any_selection_sequence_ends_in_clean_file_selected() {
    init_logging();
    let mut state = AppState::new();
    for name in ["a.pdf", "b.pdf", "c.pdf"] {
        let (next, effects) = select(state, name);
        assert!(effects.is_empty());
        state = next;
    }

    let session = state.session();
    assert_eq!(session.phase(), Phase::FileSelected);
    assert!(session.matched_jobs().is_empty());
    assert_eq!(session.cover_letter_text(), "");
    assert_eq!(session.error_message(), "");
    assert_eq!(session.selected_file().unwrap().name, "c.pdf");

    let view = state.view();
    assert!(view.can_submit);
    assert_eq!(view.upload_title, "c.pdf");
    assert_eq!(view.upload_hint, "Ready to analyze");
}

#[test]
fn each_selection_mints_a_new_session_token() {
    init_logging();
    let (state, _) = select(AppState::new(), "a.pdf");
    let first = state.session().token();
    let (state, _) = select(state, "a.pdf");
    assert_ne!(state.session().token(), first);
}

#[test]
fn analyze_moves_to_submitting_and_emits_one_request() {
    init_logging();
    let (state, _) = select(AppState::new(), "cv.pdf");
    let token = state.session().token();

    let (mut state, effects) = update(state, Msg::AnalyzeClicked);

    assert_eq!(state.phase(), Phase::Submitting);
    assert_eq!(
        effects,
        vec![Effect::SubmitAnalysis {
            token,
            file: resume("cv.pdf"),
        }]
    );
    let view = state.view();
    assert!(view.is_busy);
    assert!(!view.can_submit);
    assert_eq!(view.analyze_label, "Analyzing Resume...");
    assert!(state.consume_dirty());
}

#[test]
fn analyze_outside_file_selected_is_noop() {
    init_logging();
    // Idle
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::AnalyzeClicked);
    assert_eq!(next, state);
    assert!(effects.is_empty());

    // Submitting: no second request
    let (state, _) = select(AppState::new(), "cv.pdf");
    let (mut state, _) = update(state, Msg::AnalyzeClicked);
    state.consume_dirty();
    let (next, effects) = update(state.clone(), Msg::AnalyzeClicked);
    assert_eq!(next, state);
    assert!(effects.is_empty());

    // Succeeded
    let token = next.session().token();
    let (mut done, _) = update(
        next,
        Msg::AnalysisFinished {
            token,
            result: Ok(AnalysisReport::default()),
        },
    );
    done.consume_dirty();
    let (after, effects) = update(done.clone(), Msg::AnalyzeClicked);
    assert_eq!(after, done);
    assert!(effects.is_empty());

    // Failed
    let (state, _) = select(AppState::new(), "cv.pdf");
    let (state, _) = update(state, Msg::AnalyzeClicked);
    let token = state.session().token();
    let (mut failed, _) = update(
        state,
        Msg::AnalysisFinished {
            token,
            result: Err(FailureClass::Service),
        },
    );
    failed.consume_dirty();
    let (after, effects) = update(failed.clone(), Msg::AnalyzeClicked);
    assert_eq!(after, failed);
    assert!(effects.is_empty());
}

#[test]
fn reselecting_after_success_clears_previous_results() {
    init_logging();
    let (state, _) = select(AppState::new(), "first.pdf");
    let (state, _) = update(state, Msg::AnalyzeClicked);
    let token = state.session().token();
    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            token,
            result: Ok(AnalysisReport {
                matched_jobs: vec![job(1, 0.9)],
                cover_letter: "Dear hiring manager".to_string(),
            }),
        },
    );
    assert!(state.view().has_results);

    let (state, effects) = select(state, "second.pdf");

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, Phase::FileSelected);
    assert!(view.jobs.is_empty());
    assert_eq!(view.cover_letter, "");
    assert_eq!(view.error_message, None);
    assert!(!view.has_results);
}

#[test]
fn reselecting_after_failure_clears_error() {
    init_logging();
    let (state, _) = select(AppState::new(), "cv.pdf");
    let (state, _) = update(state, Msg::AnalyzeClicked);
    let token = state.session().token();
    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            token,
            result: Err(FailureClass::Transport),
        },
    );
    assert!(state.view().error_message.is_some());

    let (state, _) = select(state, "cv.pdf");
    assert_eq!(state.view().error_message, None);
    assert!(state.view().can_submit);
}

#[test]
fn selecting_while_submitting_abandons_previous_request() {
    init_logging();
    let (state, _) = select(AppState::new(), "a.pdf");
    let (state, _) = update(state, Msg::AnalyzeClicked);
    let in_flight = state.session().token();

    let (state, effects) = select(state, "b.pdf");

    assert_eq!(effects, vec![Effect::AbandonAnalysis { token: in_flight }]);
    assert_eq!(state.phase(), Phase::FileSelected);
    assert!(state.view().can_submit);
}

#[test]
fn advisory_flags_do_not_block_submission() {
    init_logging();
    let big = SelectedFile::new("notes.docx", vec![0u8; 6 * 1024 * 1024]);
    let (state, _) = update(AppState::new(), Msg::FileSelected(big));

    let view = state.view();
    assert!(view.not_pdf);
    assert!(view.over_size_hint);
    assert!(view.can_submit);

    let (state, effects) = update(state, Msg::AnalyzeClicked);
    assert_eq!(state.phase(), Phase::Submitting);
    assert_eq!(effects.len(), 1);
}

#[test]
fn pdf_extension_check_ignores_case() {
    init_logging();
    let (state, _) = select(AppState::new(), "CV.PDF");
    assert!(!state.view().not_pdf);
    assert!(!state.view().over_size_hint);
}
