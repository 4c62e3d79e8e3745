use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::feedback::ResultRow;
use crate::model::{HistoryRecord, PickedFile, RecognitionResult, ResultId};
use crate::modal::ModalController;
use crate::object_url::ObjectUrlCache;
use crate::selection::SelectionStore;

/// Complete client state. Only `update` mutates it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppState {
    pub(crate) selection: SelectionStore,
    pub(crate) preview_urls: ObjectUrlCache,
    pub(crate) modals: ModalController,
    pub(crate) results: Vec<ResultRow>,
    next_result_id: u64,
    /// Names of the files in the most recent upload, in upload order.
    last_upload: Vec<String>,
    pub(crate) history: Vec<HistoryRecord>,
    pub(crate) show_history: bool,
    /// Videos that received feedback from this session.
    pub(crate) submitted_videos: BTreeSet<String>,
    pub(crate) uploads_in_flight: usize,
    pub(crate) error: Option<String>,
    #[serde(skip)]
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn preview_urls(&self) -> &ObjectUrlCache {
        &self.preview_urls
    }

    pub fn modals(&self) -> &ModalController {
        &self.modals
    }

    pub fn results(&self) -> &[ResultRow] {
        &self.results
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_history_visible(&self) -> bool {
        self.show_history
    }

    pub fn feedback_submitted_for(&self, video_id: &str) -> bool {
        self.submitted_videos.contains(video_id)
    }

    /// Returns whether a re-render is due, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.mark_dirty();
    }

    pub(crate) fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Replaces the batch and returns the revoked preview URLs.
    pub(crate) fn pick_files(&mut self, files: Vec<PickedFile>) -> Vec<url::Url> {
        let batch = self.selection.set_batch(files);
        let revoked = self.preview_urls.regenerate(batch);
        self.modals.close_preview();
        for row in &mut self.results {
            row.reset_feedback();
        }
        self.mark_dirty();
        revoked
    }

    pub(crate) fn begin_upload(&mut self, names: Vec<String>) {
        self.last_upload = names;
        self.uploads_in_flight += 1;
        self.mark_dirty();
    }

    pub(crate) fn finish_upload(&mut self) {
        self.uploads_in_flight = self.uploads_in_flight.saturating_sub(1);
        self.mark_dirty();
    }

    pub(crate) fn replace_results(&mut self, results: Vec<RecognitionResult>) {
        let uploaded = std::mem::take(&mut self.last_upload);
        self.results = results
            .into_iter()
            .enumerate()
            .map(|(index, result)| {
                self.next_result_id += 1;
                ResultRow {
                    id: ResultId(self.next_result_id),
                    uploaded_name: uploaded.get(index).cloned(),
                    result,
                    draft: None,
                    pending: false,
                    submitted: false,
                }
            })
            .collect();
        self.mark_dirty();
    }

    pub(crate) fn result_row_mut(&mut self, id: ResultId) -> Option<&mut ResultRow> {
        self.results.iter_mut().find(|row| row.id == id)
    }
}
