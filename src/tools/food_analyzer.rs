//! Food Analyzer Tools
//!
//! Drives one upload-then-interpret cycle at a time. The request state is
//! checked and switched to `Loading` under the same lock, so a second
//! analysis cannot start while one is in flight no matter how it is
//! triggered.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::analysis::{interpret, is_image_path, Classifier, ImageUpload};
use crate::models::AnalysisViewModel;

/// Message shown when analysis is triggered with no image chosen
pub const NO_IMAGE_MESSAGE: &str = "이미지를 먼저 선택해 주세요.";

/// Analyzer error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyzeError {
    #[error("이미지를 먼저 선택해 주세요.")]
    NoImageSelected,

    #[error("An analysis is already in progress")]
    Busy,

    #[error("Not an image file: {0}")]
    NotAnImage(String),

    #[error("{0}")]
    Failed(String),
}

/// Where the current (or last) analysis request stands
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Done { result: AnalysisViewModel },
    Error { message: String },
}

impl RequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Loading => "loading",
            RequestState::Done { .. } => "done",
            RequestState::Error { .. } => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }
}

#[derive(Debug, Default)]
struct AnalyzerState {
    selected: Option<PathBuf>,
    request: RequestState,
}

/// Response for get_food_analysis
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisStatus {
    pub selected_image: Option<String>,
    #[serde(flatten)]
    pub request: RequestState,
}

struct Inner {
    classifier: Arc<dyn Classifier>,
    state: Mutex<AnalyzerState>,
}

/// Food photo analysis session
#[derive(Clone)]
pub struct FoodAnalyzer {
    inner: Arc<Inner>,
}

impl FoodAnalyzer {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            inner: Arc::new(Inner {
                classifier,
                state: Mutex::new(AnalyzerState::default()),
            }),
        }
    }

    /// Choose the image to analyze. Clears a previous result or error,
    /// but never interrupts a request in flight.
    pub async fn select_image(&self, path: PathBuf) -> Result<(), AnalyzeError> {
        if !is_image_path(&path) {
            return Err(AnalyzeError::NotAnImage(path.display().to_string()));
        }

        let mut state = self.inner.state.lock().await;
        tracing::info!(path = %path.display(), "image selected");
        state.selected = Some(path);
        if !state.request.is_loading() {
            state.request = RequestState::Idle;
        }
        Ok(())
    }

    pub async fn selected_image(&self) -> Option<PathBuf> {
        self.inner.state.lock().await.selected.clone()
    }

    pub async fn request_state(&self) -> RequestState {
        self.inner.state.lock().await.request.clone()
    }

    pub async fn status(&self) -> AnalysisStatus {
        let state = self.inner.state.lock().await;
        AnalysisStatus {
            selected_image: state.selected.as_ref().map(|p| p.display().to_string()),
            request: state.request.clone(),
        }
    }

    /// Upload the selected image and interpret the reply.
    ///
    /// The request runs on its own task and always settles the state, even
    /// if the caller stops waiting for it.
    pub async fn analyze(&self) -> Result<AnalysisViewModel, AnalyzeError> {
        let path = {
            let mut state = self.inner.state.lock().await;
            if state.request.is_loading() {
                tracing::warn!("analysis requested while another is in flight");
                return Err(AnalyzeError::Busy);
            }
            let Some(path) = state.selected.clone() else {
                state.request = RequestState::Error {
                    message: NO_IMAGE_MESSAGE.to_string(),
                };
                return Err(AnalyzeError::NoImageSelected);
            };
            state.request = RequestState::Loading;
            path
        };

        tracing::info!(path = %path.display(), "analysis started");

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let outcome = inner.run(path).await;
            inner.settle(outcome).await
        });

        match task.await {
            Ok(result) => result,
            Err(e) => self.inner.settle(Err(format!("Analysis task failed: {}", e))).await,
        }
    }
}

impl Inner {
    async fn run(&self, path: PathBuf) -> Result<AnalysisViewModel, String> {
        let upload = ImageUpload::from_path(&path).await.map_err(|e| e.to_string())?;
        let reply = self
            .classifier
            .classify(upload)
            .await
            .map_err(|e| e.to_string())?;
        let response = reply.into_outcome()?;
        Ok(interpret(&response))
    }

    async fn settle(
        &self,
        outcome: Result<AnalysisViewModel, String>,
    ) -> Result<AnalysisViewModel, AnalyzeError> {
        let mut state = self.state.lock().await;
        match outcome {
            Ok(result) => {
                tracing::info!(label = %result.label_display, calories = %result.calories_display, "analysis done");
                state.request = RequestState::Done {
                    result: result.clone(),
                };
                Ok(result)
            }
            Err(message) => {
                tracing::warn!(error = %message, "analysis failed");
                state.request = RequestState::Error {
                    message: message.clone(),
                };
                Err(AnalyzeError::Failed(message))
            }
        }
    }
}
