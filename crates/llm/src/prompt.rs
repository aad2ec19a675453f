//! Prompt templates
//!
//! Every feature is a prompt handed to the hosted model. The templates here
//! are the entire "business logic" of the lookup features; keep them in one
//! place so wording changes do not leak into the adapters.

use pharma_assist_core::{GenerateRequest, Language};

const PHARMACIST_ROLE: &str = "You are a knowledgeable and careful pharmacist assistant. \
Base answers on widely accepted pharmaceutical references. \
Always include a short reminder that this is general information, not medical advice, \
and that a doctor or pharmacist should be consulted.";

/// Medication information lookup
///
/// Asks for a JSON object matching [`crate::queries::MEDICATION_INFO_SCHEMA`].
pub fn medication_info(name: &str) -> GenerateRequest {
    let prompt = format!(
        "Provide information about the medication \"{name}\". \
Respond with a single JSON object with exactly these keys: \
\"uses\" (what the medication is used for), \
\"sideEffects\" (common side effects), \
\"dosageGuidelines\" (general dosage guidelines). \
Each value is a short plain-text paragraph."
    );
    GenerateRequest::new(prompt)
        .with_system_instruction(PHARMACIST_ROLE)
        .expecting_json()
        .with_temperature(0.2)
}

/// Multi-drug interaction check
pub fn interaction_check(names: &[String]) -> GenerateRequest {
    let prompt = format!(
        "Check for known interactions between the following medications: {}. \
Describe each clinically relevant interaction, its severity, and what the \
patient should watch for. If no significant interactions are known, say so.",
        names.join(", ")
    );
    GenerateRequest::new(prompt)
        .with_system_instruction(PHARMACIST_ROLE)
        .with_temperature(0.2)
}

/// Document image analysis; the image is attached by the adapter
pub fn document_analysis() -> GenerateRequest {
    GenerateRequest::new(
        "Analyze this medical document image (for example a prescription or \
medication label). Summarize what it contains: medication names, dosages, \
instructions, and anything a patient should pay attention to.",
    )
    .with_system_instruction(PHARMACIST_ROLE)
    .with_temperature(0.2)
}

/// Translation of one free-text output field
pub fn translation(text: &str, target: Language) -> GenerateRequest {
    let prompt = format!(
        "Translate the following text into {}. \
Return only the translated text with no preamble or commentary.\n\n{text}",
        target.name()
    );
    GenerateRequest::new(prompt).with_temperature(0.1)
}
