#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a (possibly new) document.
    FileSelected(crate::SelectedFile),
    /// User clicked Analyze.
    AnalyzeClicked,
    /// The Analysis Service request tagged with `token` finished.
    AnalysisFinished {
        token: crate::SessionToken,
        result: Result<crate::AnalysisReport, crate::FailureClass>,
    },
    /// User clicked Copy on the cover letter.
    CopyCoverLetterClicked,
    /// The clipboard reset timer for `generation` fired.
    ClipboardResetElapsed { generation: u64 },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
