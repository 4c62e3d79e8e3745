use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{CandidateFile, FileId, PickedFile};

/// Working set of candidate files and the subset currently marked selected.
///
/// Invariant: every selected id belongs to the current batch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionStore {
    batch: Vec<CandidateFile>,
    selected: BTreeSet<FileId>,
    next_file_id: u64,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the batch, assigning fresh ids, and clears the selection.
    pub fn set_batch(&mut self, files: Vec<PickedFile>) -> &[CandidateFile] {
        self.selected.clear();
        self.batch = files
            .into_iter()
            .map(|file| {
                self.next_file_id += 1;
                CandidateFile {
                    id: FileId(self.next_file_id),
                    name: file.name,
                    byte_size: file.byte_size,
                    mime_type: file.mime_type,
                    path: file.path,
                }
            })
            .collect();
        &self.batch
    }

    /// Flips membership of `id`. Returns false when `id` is not in the batch.
    pub fn toggle(&mut self, id: FileId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        true
    }

    /// Selects every file unless all are already selected, in which case clears.
    pub fn toggle_all(&mut self) {
        if self.all_selected() {
            self.selected.clear();
        } else {
            self.selected = self.batch.iter().map(|file| file.id).collect();
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// True when the batch is non-empty and every file is selected.
    pub fn all_selected(&self) -> bool {
        !self.batch.is_empty() && self.selected.len() == self.batch.len()
    }

    pub fn contains(&self, id: FileId) -> bool {
        self.batch.iter().any(|file| file.id == id)
    }

    pub fn is_selected(&self, id: FileId) -> bool {
        self.selected.contains(&id)
    }

    pub fn batch(&self) -> &[CandidateFile] {
        &self.batch
    }

    pub fn file(&self, id: FileId) -> Option<&CandidateFile> {
        self.batch.iter().find(|file| file.id == id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn selected_ids(&self) -> &BTreeSet<FileId> {
        &self.selected
    }

    /// Selected files in batch order, which is also upload order.
    pub fn selected_files(&self) -> Vec<&CandidateFile> {
        self.batch
            .iter()
            .filter(|file| self.selected.contains(&file.id))
            .collect()
    }
}
