//! Recognizer client: HTTP calls against the action-recognition service and
//! the background handle that runs them.
mod api;
mod handle;
mod settings;
mod types;

pub use api::{RecognizerApi, ReqwestRecognizer};
pub use handle::{ChannelEventSink, ClientHandle, EventSink};
pub use settings::{ClientSettings, Deployment};
pub use types::{ApiError, ClientEvent, FailureKind};
