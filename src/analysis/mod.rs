//! Food image analysis module
//!
//! Upload client for the classify endpoint and interpretation of its replies.

pub mod client;
pub mod interpreter;

pub use client::{
    is_image_path, ClassifyReply, Classifier, ClientError, HttpClassifier, ImageUpload,
    CLASSIFY_MODE,
};
pub use interpreter::{failure_message, interpret, Field, REQUEST_FAILED_MESSAGE};
