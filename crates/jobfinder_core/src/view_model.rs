use crate::{AppState, Phase};

/// Advertised upload cap. Shown to the user, never enforced here.
pub const SIZE_HINT_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub upload_title: String,
    pub upload_hint: String,
    /// The chosen file does not look like a PDF.
    pub not_pdf: bool,
    /// The chosen file is above [`SIZE_HINT_BYTES`].
    pub over_size_hint: bool,
    pub analyze_label: String,
    pub can_submit: bool,
    pub is_busy: bool,
    pub has_results: bool,
    pub jobs: Vec<JobCardView>,
    pub cover_letter: String,
    pub error_message: Option<String>,
    pub clipboard_copied: bool,
    pub copy_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCardView {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub match_label: String,
}

/// Similarity as a whole percentage, rounded half away from zero.
pub fn match_percent(similarity: f64) -> u8 {
    if !similarity.is_finite() {
        return 0;
    }
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn match_label(similarity: f64) -> String {
    format!("{}% Match", match_percent(similarity))
}

pub(crate) fn project(state: &AppState) -> AppViewModel {
    let session = state.session();
    let phase = session.phase();
    let file = session.selected_file();

    let jobs: Vec<JobCardView> = session
        .matched_jobs()
        .iter()
        .map(|job| JobCardView {
            id: job.id,
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            description: job.description.clone(),
            match_label: match_label(job.similarity_score),
        })
        .collect();

    let error_message = match session.error_message() {
        "" => None,
        message => Some(message.to_string()),
    };

    AppViewModel {
        phase,
        file_name: file.map(|f| f.name.clone()),
        file_size: file.map(|f| f.size()),
        upload_title: file
            .map(|f| f.name.clone())
            .unwrap_or_else(|| "Drop your resume here".to_string()),
        upload_hint: if file.is_some() {
            "Ready to analyze".to_string()
        } else {
            "Support PDF files only (Max 5MB)".to_string()
        },
        not_pdf: file.is_some_and(|f| !f.name.to_ascii_lowercase().ends_with(".pdf")),
        over_size_hint: file.is_some_and(|f| f.size() > SIZE_HINT_BYTES),
        analyze_label: if phase == Phase::Submitting {
            "Analyzing Resume...".to_string()
        } else {
            "Analyze Resume".to_string()
        },
        can_submit: phase == Phase::FileSelected,
        is_busy: phase == Phase::Submitting,
        has_results: phase == Phase::Succeeded && !jobs.is_empty(),
        jobs,
        cover_letter: session.cover_letter_text().to_string(),
        error_message,
        clipboard_copied: state.clipboard_copied(),
        copy_label: if state.clipboard_copied() {
            "Copied!".to_string()
        } else {
            "Copy Text".to_string()
        },
    }
}
