use std::fmt::Write as _;

use jobfinder_core::{AppViewModel, JobCardView, Phase};

/// Descriptions are clamped to this many characters per card.
const DESCRIPTION_CHARS: usize = 160;

/// Full text projection of the view model.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== JobFinder ==");
    match (&view.file_name, view.file_size) {
        (Some(_), Some(size)) => {
            let _ = writeln!(out, "Resume: {} ({})", view.upload_title, format_size(size));
        }
        _ => {
            let _ = writeln!(out, "Resume: {}", view.upload_title);
        }
    }
    let _ = writeln!(out, "        {}", view.upload_hint);
    if view.not_pdf {
        let _ = writeln!(out, "  note: only PDF files are supported by the service");
    }
    if view.over_size_hint {
        let _ = writeln!(out, "  note: file is larger than 5MB and may be rejected");
    }

    let button_state = if view.can_submit { "" } else { " (disabled)" };
    let _ = writeln!(out, "[{}]{}", view.analyze_label, button_state);

    if let Some(error) = &view.error_message {
        let _ = writeln!(out, "! {error}");
    }

    if view.has_results {
        let _ = writeln!(out);
        let _ = writeln!(out, "Top Matches For You");
        for (idx, job) in view.jobs.iter().enumerate() {
            render_job(&mut out, idx + 1, job);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "AI Cover Letter [{}]", view.copy_label);
        let _ = writeln!(out, "{}", view.cover_letter);
    } else if view.phase == Phase::Succeeded {
        let _ = writeln!(out);
        let _ = writeln!(out, "No matching jobs found.");
    }

    out
}

/// One-line summary, printed for changes that don't need a full redraw.
pub fn status_line(view: &AppViewModel) -> String {
    let phase = match view.phase {
        Phase::Idle => "idle",
        Phase::FileSelected => "ready",
        Phase::Submitting => "analyzing",
        Phase::Succeeded => "done",
        Phase::Failed => "failed",
    };
    let mut line = format!("[{phase}] {}", view.upload_title);
    if view.has_results {
        let _ = write!(line, " | {} matches | {}", view.jobs.len(), view.copy_label);
    }
    line
}

fn render_job(out: &mut String, rank: usize, job: &JobCardView) {
    let _ = writeln!(out, "{rank:>2}. {}  [{}]", job.title, job.match_label);
    let _ = writeln!(out, "    {} | {}", job.company, job.location);
    let _ = writeln!(out, "    {}", clamp_description(&job.description));
}

fn clamp_description(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= DESCRIPTION_CHARS {
        return flat;
    }
    let mut out: String = flat.chars().take(DESCRIPTION_CHARS).collect();
    out.push_str("...");
    out
}

fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f < KB {
        format!("{bytes} B")
    } else if bytes_f < KB * KB {
        format!("{:.1} KB", bytes_f / KB)
    } else {
        format!("{:.1} MB", bytes_f / (KB * KB))
    }
}
