use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier of a picked file, unique for the lifetime of an `AppState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileId(pub u64);

/// Stable identifier of a received recognition result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResultId(pub u64);

/// A file as reported by the host when the user picks it, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedFile {
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
    pub path: PathBuf,
}

/// A locally chosen, not-yet-uploaded video file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFile {
    pub id: FileId,
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
    pub path: PathBuf,
}

/// Video properties reported by the server before and after normalization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub fps: Option<f64>,
    /// `[width, height]` on the wire.
    #[serde(default)]
    pub size: Option<(u32, u32)>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub codec: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Normalization {
    #[serde(default)]
    pub original_info: Option<MediaInfo>,
    #[serde(default)]
    pub normalized_info: Option<MediaInfo>,
}

/// Server-returned action classification for one uploaded file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecognitionResult {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub action_details: Option<Value>,
    #[serde(default)]
    pub normalization: Option<Normalization>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Server-persisted record of a previously processed video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub upload_time: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub action_details: Option<Value>,
    #[serde(default)]
    pub has_feedback: bool,
    #[serde(default)]
    pub feedback_action: Option<String>,
    #[serde(default)]
    pub feedback_comment: Option<String>,
    #[serde(default)]
    pub original_info: Option<MediaInfo>,
    #[serde(default)]
    pub normalized_info: Option<MediaInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

impl HistoryRecord {
    /// Minimal record, mostly useful for tests and placeholders.
    pub fn new(id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            status: String::new(),
            upload_time: None,
            action: None,
            confidence: None,
            action_details: None,
            has_feedback: false,
            feedback_action: None,
            feedback_comment: None,
            original_info: None,
            normalized_info: None,
            error: None,
        }
    }
}

/// User-asserted correction sent to `POST /feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub video_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub correct_action: String,
    pub comment: String,
}

/// Corrective labels offered by the action selector.
pub const KNOWN_ACTIONS: [&str; 6] = ["brush_hair", "cartwheel", "catch", "chew", "clap", "climb"];

#[cfg(test)]
mod tests {
    use super::{FeedbackSubmission, HistoryRecord, RecognitionResult};

    #[test]
    fn history_record_reads_mongo_style_id_and_defaults() {
        let json = r#"{"_id":"v1","filename":"a.mp4","status":"completed","upload_time":"2024-05-01T10:00:00"}"#;
        let record: HistoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "v1");
        assert!(!record.has_feedback);
        assert_eq!(record.upload_time.as_deref(), Some("2024-05-01T10:00:00"));
    }

    #[test]
    fn not_found_reply_is_not_a_history_record() {
        let json = r#"{"message":"Video not found"}"#;
        assert!(serde_json::from_str::<HistoryRecord>(json).is_err());
    }

    #[test]
    fn recognition_result_reads_normalization_sizes() {
        let json = r#"{
            "filename": "a.mp4",
            "action": "clap",
            "confidence": 0.82,
            "normalization": {
                "original_info": {"format": "MP4", "fps": 29.97, "size": [1920, 1080], "duration": 3.5},
                "normalized_info": {"format": "AVI", "fps": 30, "size": [426, 240], "codec": "XVID"}
            }
        }"#;
        let result: RecognitionResult = serde_json::from_str(json).unwrap();
        let normalization = result.normalization.unwrap();
        assert_eq!(normalization.original_info.unwrap().size, Some((1920, 1080)));
        assert_eq!(normalization.normalized_info.unwrap().codec.as_deref(), Some("XVID"));
    }

    #[test]
    fn feedback_omits_missing_filename() {
        let submission = FeedbackSubmission {
            video_id: "v1".to_string(),
            filename: None,
            correct_action: "climb".to_string(),
            comment: String::new(),
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"video_id": "v1", "correct_action": "climb", "comment": ""})
        );
    }
}
