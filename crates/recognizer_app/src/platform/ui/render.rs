use chrono::{DateTime, Local, NaiveDateTime, Utc};
use recognizer_core::{
    action_display_name, AppViewModel, ConfidenceBand, ConfidenceView, DetailsView,
    FeedbackDraft, FeedbackFormView, HistoryEntryView, MediaInfo, ResultFeedbackView,
    ResultRowView, KNOWN_ACTIONS,
};

use super::constants::{BAR_WIDTH, RULE};

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    render_files(view, &mut lines);
    if !view.results.is_empty() {
        lines.push(String::new());
        lines.push("Results".to_string());
        for (index, row) in view.results.iter().enumerate() {
            render_result(index + 1, row, &mut lines);
        }
    }
    if view.history_visible {
        lines.push(String::new());
        render_history(&view.history, &mut lines);
    }
    if let Some(preview) = &view.preview {
        lines.push(String::new());
        lines.push(format!("Preview: {} ({})", preview.name, mime_label(&preview.mime_type)));
        match &preview.url {
            Some(url) => lines.push(format!("  {url}")),
            None => lines.push("  (no playable location)".to_string()),
        }
        lines.push("  close-preview to close".to_string());
    }
    if let Some(details) = &view.details {
        lines.push(String::new());
        render_details(details, &mut lines);
    }
    if let Some(form) = &view.feedback {
        lines.push(String::new());
        render_feedback_form(form, &mut lines);
    }
    if let Some(error) = &view.error {
        lines.push(String::new());
        lines.push(format!("Error: {error}  (dismiss to clear)"));
    }
    lines.push(RULE.to_string());
    lines
}

fn render_files(view: &AppViewModel, lines: &mut Vec<String>) {
    if view.files.is_empty() {
        lines.push("No files picked. Use: pick <path>...".to_string());
        return;
    }
    lines.push(format!(
        "Files ({} of {} selected){}",
        view.selected_count,
        view.files.len(),
        if view.all_selected { ", all selected" } else { "" }
    ));
    for (index, file) in view.files.iter().enumerate() {
        lines.push(format!(
            "  [{}] {}. {} ({})",
            if file.selected { "x" } else { " " },
            index + 1,
            file.name,
            format_megabytes(file.byte_size)
        ));
    }
    if view.uploading {
        lines.push("Uploading...".to_string());
    }
}

fn render_result(position: usize, row: &ResultRowView, lines: &mut Vec<String>) {
    lines.push(format!(
        "  {position}. File: {}",
        row.filename.as_deref().unwrap_or("(unnamed)")
    ));
    if let Some(action) = &row.action {
        lines.push(format!("     Detected Action: {action}"));
    }
    if let Some(confidence) = &row.confidence {
        lines.push(format!("     Confidence: {}", confidence_bar(confidence)));
    }
    if let Some(error) = &row.error {
        lines.push(format!("     Error: {error}"));
    }
    if let Some(normalization) = &row.normalization {
        if let Some(info) = &normalization.original_info {
            lines.push(format!("     Original: {}", media_summary(info)));
        }
        if let Some(info) = &normalization.normalized_info {
            lines.push(format!("     Normalized: {}", media_summary(info)));
        }
    }
    match &row.feedback {
        ResultFeedbackView::Available => {
            lines.push(format!("     Provide Feedback: rfeedback {position}"));
        }
        ResultFeedbackView::Editing { draft, pending } => {
            lines.push(format!("     Feedback: {}", draft_summary(draft)));
            if *pending {
                lines.push("     Submitting...".to_string());
            } else {
                lines.push(format!(
                    "     rlabel {position} <action|n>, rcomment {position} <text>, rsubmit {position}, rcancel {position}"
                ));
                lines.push(format!("     {}", action_choices()));
            }
        }
        ResultFeedbackView::Submitted => {
            lines.push("     Thank you for your feedback!".to_string());
        }
        ResultFeedbackView::Unavailable => {}
    }
}

fn render_history(history: &[HistoryEntryView], lines: &mut Vec<String>) {
    lines.push("History (refresh to reload, open <n> for details)".to_string());
    if history.is_empty() {
        lines.push("  No videos processed yet.".to_string());
        return;
    }
    for (index, entry) in history.iter().enumerate() {
        let uploaded = entry
            .upload_time
            .as_deref()
            .map(format_upload_time)
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "  {}. {} [{}] {}",
            index + 1,
            entry.filename,
            entry.status,
            uploaded
        ));
        if let Some(action) = &entry.action {
            lines.push(format!("     Detected Action: {action}"));
        }
        if let Some(corrected) = &entry.corrected_action {
            lines.push(format!("     Corrected Action: {corrected}"));
        }
        if entry.submitted_this_session {
            lines.push("     Thank you for your feedback!".to_string());
        }
    }
}

fn render_details(details: &DetailsView, lines: &mut Vec<String>) {
    let record = &details.record;
    lines.push(format!("Details: {}", record.filename));
    lines.push(format!("  Status: {}", record.status));
    if let Some(time) = &record.upload_time {
        lines.push(format!("  Uploaded: {}", format_upload_time(time)));
    }
    if let Some(action) = &record.action {
        lines.push(format!("  Detected Action: {action}"));
    }
    if let Some(confidence) = &details.confidence {
        lines.push(format!("  Confidence: {}", confidence_bar(confidence)));
    }
    if let Some(error) = &record.error {
        lines.push(format!("  Error: {error}"));
    }
    if let Some(info) = &record.original_info {
        lines.push(format!("  Original: {}", media_summary(info)));
    }
    if let Some(info) = &record.normalized_info {
        lines.push(format!("  Normalized: {}", media_summary(info)));
    }
    if record.has_feedback {
        if let Some(corrected) = &record.feedback_action {
            lines.push(format!("  Corrected Action: {corrected}"));
        }
        if let Some(comment) = record.feedback_comment.as_deref().filter(|c| !c.is_empty()) {
            lines.push(format!("  Comment: {comment}"));
        }
    }
    if details.can_provide_feedback {
        lines.push("  Provide Feedback: feedback".to_string());
    } else if details.feedback_submitted {
        lines.push("  Thank you for your feedback!".to_string());
    }
    lines.push("  close to close".to_string());
}

fn render_feedback_form(form: &FeedbackFormView, lines: &mut Vec<String>) {
    lines.push(format!("Feedback for {}", form.filename));
    if let Some(action) = &form.current_action {
        lines.push(format!("  Detected Action: {action}"));
    }
    lines.push(format!("  {}", draft_summary(&form.draft)));
    if form.pending {
        lines.push("  Submitting...".to_string());
    } else {
        lines.push(format!("  {}", action_choices()));
        lines.push("  label <action|n>, comment <text>, submit, cancel".to_string());
    }
}

fn draft_summary(draft: &FeedbackDraft) -> String {
    let label = if draft.label.is_empty() {
        "(none)"
    } else {
        draft.label.as_str()
    };
    if draft.comment.is_empty() {
        format!("correct action: {label}")
    } else {
        format!("correct action: {label}, comment: {}", draft.comment)
    }
}

fn action_choices() -> String {
    let choices: Vec<String> = KNOWN_ACTIONS
        .iter()
        .enumerate()
        .map(|(index, action)| format!("{}={}", index + 1, action_display_name(action)))
        .collect();
    format!("Actions: {}", choices.join(", "))
}

fn confidence_bar(confidence: &ConfidenceView) -> String {
    let filled = ((confidence.score * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    let band = match confidence.band {
        ConfidenceBand::High => "high",
        ConfidenceBand::Medium => "medium",
        ConfidenceBand::Low => "low",
    };
    format!(
        "[{}{}] {:.1}% ({band})",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        confidence.percent
    )
}

fn media_summary(info: &MediaInfo) -> String {
    let mut parts = Vec::new();
    if let Some(format) = &info.format {
        parts.push(format.clone());
    }
    if let Some((width, height)) = info.size {
        parts.push(format!("{width}x{height}"));
    }
    if let Some(fps) = info.fps {
        parts.push(format!("{fps:.1} fps"));
    }
    if let Some(duration) = info.duration {
        parts.push(format!("{duration:.2} s"));
    }
    if let Some(codec) = &info.codec {
        parts.push(codec.clone());
    }
    if parts.is_empty() {
        "unknown".to_string()
    } else {
        parts.join(", ")
    }
}

fn mime_label(mime_type: &str) -> &str {
    if mime_type.is_empty() {
        "unknown type"
    } else {
        mime_type
    }
}

fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

/// Local time for timestamps the server sends with or without an offset.
fn format_upload_time(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return time.with_timezone(&Local).format(DISPLAY).to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)
            .with_timezone(&Local)
            .format(DISPLAY)
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use recognizer_core::{
        update, AppState, FeedbackTarget, HistoryRecord, Msg, RecognitionResult, ResultId,
    };

    use super::{format_megabytes, format_upload_time, render};

    fn rendered(state: &AppState) -> String {
        render(&state.view()).join("\n")
    }

    fn with_results(results: Vec<RecognitionResult>) -> AppState {
        let (state, _) = update(AppState::default(), Msg::UploadFinished(Ok(results)));
        state
    }

    #[test]
    fn result_shows_action_and_high_confidence() {
        let state = with_results(vec![RecognitionResult {
            filename: Some("a.mp4".to_string()),
            video_id: Some("v1".to_string()),
            action: Some("clap".to_string()),
            confidence: Some(0.82),
            ..RecognitionResult::default()
        }]);
        let text = rendered(&state);
        assert!(text.contains("File: a.mp4"));
        assert!(text.contains("Detected Action: clap"));
        assert!(text.contains("82.0% (high)"), "{text}");
        assert!(text.contains("Provide Feedback: rfeedback 1"));
    }

    #[test]
    fn failed_result_shows_error_without_feedback() {
        let state = with_results(vec![RecognitionResult {
            filename: Some("b.mp4".to_string()),
            message: Some("Error processing video".to_string()),
            error: Some("cannot decode".to_string()),
            ..RecognitionResult::default()
        }]);
        let text = rendered(&state);
        assert!(text.contains("Error: cannot decode"));
        assert!(!text.contains("Provide Feedback"));
    }

    #[test]
    fn submitted_row_thanks_the_user() {
        let state = with_results(vec![RecognitionResult {
            filename: Some("a.mp4".to_string()),
            video_id: Some("v1".to_string()),
            action: Some("clap".to_string()),
            confidence: Some(0.3),
            ..RecognitionResult::default()
        }]);
        let (state, _) = update(
            state,
            Msg::FeedbackFinished {
                target: FeedbackTarget::Result(ResultId(1)),
                result: Ok(()),
            },
        );
        let text = rendered(&state);
        assert!(text.contains("30.0% (low)"));
        assert!(text.contains("Thank you for your feedback!"));
    }

    #[test]
    fn empty_history_says_so() {
        let (state, _) = update(AppState::default(), Msg::HistoryToggled);
        assert!(rendered(&state).contains("No videos processed yet."));
    }

    #[test]
    fn history_shows_corrected_action() {
        let mut record = HistoryRecord::new("v2", "jump.mp4");
        record.status = "completed".to_string();
        record.action = Some("climb".to_string());
        record.has_feedback = true;
        record.feedback_action = Some("cartwheel".to_string());
        let (state, _) = update(AppState::default(), Msg::HistoryToggled);
        let (state, _) = update(state, Msg::HistoryLoaded(vec![record]));

        let text = rendered(&state);
        assert!(text.contains("1. jump.mp4 [completed]"));
        assert!(text.contains("Corrected Action: cartwheel"));
    }

    #[test]
    fn details_with_feedback_offer_no_feedback_action() {
        let mut record = HistoryRecord::new("v1", "a.mp4");
        record.has_feedback = true;
        let (state, _) = update(AppState::default(), Msg::DetailLoaded(record));
        let text = rendered(&state);
        assert!(text.contains("Details: a.mp4"));
        assert!(!text.contains("Provide Feedback"));

        let (state, _) = update(AppState::default(), Msg::DetailLoaded(HistoryRecord::new("v3", "c.mp4")));
        assert!(rendered(&state).contains("Provide Feedback: feedback"));
    }

    #[test]
    fn error_line_is_rendered() {
        let (state, _) = update(AppState::default(), Msg::UploadClicked);
        assert!(rendered(&state).contains("Error: Please select at least one video to upload!"));
    }

    #[test]
    fn sizes_and_times_format() {
        assert_eq!(format_megabytes(1_572_864), "1.50 MB");
        assert_eq!(format_upload_time("yesterday"), "yesterday");
        assert!(format_upload_time("2024-05-01T12:00:00").starts_with("2024-05-0"));
        assert!(format_upload_time("2024-05-01T12:00:00.123+00:00").starts_with("2024-05-0"));
    }
}
