//! Port traits for pluggable backends
//!
//! Every external collaborator sits behind one of these traits so the
//! orchestrators stay independently testable with mock implementations.

pub mod model;
pub mod speech;
pub mod translate;

pub use model::GenerativeModel;
pub use speech::{SpeechRecognizer, SpeechSynthesizer};
pub use translate::Translator;
