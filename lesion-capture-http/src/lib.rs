//! # lesion-capture-http
//!
//! HTTP backend for lesion-capture-core's collaborator traits.
//!
//! Provides:
//! - `HttpInferenceClient` — multipart `POST /predict` against the DermaSense
//!   inference service
//! - `HttpRecommendationClient` — JSON `POST /recommendations` against the
//!   text-recommendation service
//! - `ServiceConfig` — base URLs and timeout from `DERMASENSE_*` environment
//!   variables
//!
//! ## Usage
//! ```ignore
//! use lesion_capture_http::{HttpInferenceClient, HttpRecommendationClient, ServiceConfig};
//! use lesion_capture_core::ScreeningController;
//!
//! let config = ServiceConfig::from_env()?;
//! let inference = HttpInferenceClient::new(&config)?;
//! let recommendation = HttpRecommendationClient::new(&config)?;
//! let controller = ScreeningController::new(Arc::new(inference), Arc::new(recommendation));
//! ```

pub mod config;
pub mod inference_client;
pub mod recommendation_client;

pub use config::{ConfigError, ServiceConfig};
pub use inference_client::HttpInferenceClient;
pub use recommendation_client::HttpRecommendationClient;
