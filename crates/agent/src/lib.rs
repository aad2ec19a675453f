//! Request orchestration
//!
//! The three feature orchestrators and the shared state they coordinate
//! through:
//! - `MedicationLookup` - medication info, narration, read-aloud
//! - `InteractionChecker` - medication list and interaction report
//! - `DocumentAnalyzer` - document image analysis
//! - `HistoryStore` - bounded log of past queries with pluggable persistence
//! - `AssistContext` - active locale, history, notification channel

pub mod context;
pub mod documents;
pub mod events;
pub mod history;
pub mod interactions;
pub mod medication;
pub mod submission;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{AssistContext, LocaleState};
pub use documents::DocumentAnalyzer;
pub use events::{Notification, NotificationLevel};
pub use history::{HistoryBackend, HistoryStore, InMemoryBackend, JsonFileBackend};
pub use interactions::InteractionChecker;
pub use medication::{MedicationLookup, PlaybackState};
pub use submission::SubmitGate;
