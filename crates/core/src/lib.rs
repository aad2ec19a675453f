//! Core traits and types for the pharma assistant
//!
//! This crate provides foundational types used across all other crates:
//! - Core traits for pluggable backends (generation, translation, speech)
//! - Locale definitions
//! - Result payload types
//! - Document upload validation
//! - History entry types
//! - Error types

pub mod document;
pub mod error;
pub mod history;
pub mod language;
pub mod request;
pub mod results;
pub mod traits;

pub use document::{DocumentUpload, ImageFormat, MAX_DOCUMENT_BYTES};
pub use error::{Error, Result};
pub use history::{HistoryItem, QueryKind, QueryText};
pub use language::Language;
pub use request::{GenerateRequest, InlineData, ResponseFormat};
pub use results::{DocumentAnalysis, InteractionReport, MedicationInfo, SpeechPayload};

pub use traits::{GenerativeModel, SpeechRecognizer, SpeechSynthesizer, Translator};
