//! AI query adapters
//!
//! One adapter per feature. Each checks its local preconditions, makes
//! exactly one provider call, and normalizes any failure into a generic
//! user-facing message. The original failure is only ever logged.

use std::sync::Arc;

use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde_json::json;

use pharma_assist_core::{
    DocumentAnalysis, DocumentUpload, Error, GenerativeModel, InteractionReport, MedicationInfo,
    Result,
};

use crate::prompt;

/// Schema the structured medication-info reply must satisfy
pub static MEDICATION_INFO_SCHEMA: Lazy<serde_json::Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "uses": { "type": "string", "minLength": 1 },
            "sideEffects": { "type": "string", "minLength": 1 },
            "dosageGuidelines": { "type": "string", "minLength": 1 }
        },
        "required": ["uses", "sideEffects", "dosageGuidelines"]
    })
});

static MEDICATION_INFO_VALIDATOR: Lazy<JSONSchema> =
    Lazy::new(|| JSONSchema::compile(&MEDICATION_INFO_SCHEMA).expect("static schema compiles"));

/// The three AI query adapters over one generative model
#[derive(Clone)]
pub struct MedicationQueries {
    model: Arc<dyn GenerativeModel>,
}

impl MedicationQueries {
    /// Create the adapters over a model backend
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Look up uses, side effects, and dosage guidelines for one medication
    pub async fn medication_info(&self, name: &str) -> Result<MedicationInfo> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("Medication name cannot be empty."));
        }

        let reply = match self.model.generate(prompt::medication_info(name)).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(medication = name, error = %e, "Medication info lookup failed");
                return Err(Error::provider_failure("fetching medication information"));
            }
        };

        parse_medication_info(&reply).map_err(|detail| {
            tracing::error!(medication = name, %detail, "Malformed medication info reply");
            Error::provider_failure("fetching medication information")
        })
    }

    /// Check for interactions between two or more medications
    pub async fn check_interactions(&self, names: &[String]) -> Result<InteractionReport> {
        if names.len() < 2 {
            return Err(Error::validation(
                "At least two medications are required to check interactions.",
            ));
        }
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(Error::validation("Medication names cannot be empty."));
        }

        match self.model.generate(prompt::interaction_check(names)).await {
            Ok(report) => Ok(InteractionReport { report }),
            Err(e) => {
                tracing::error!(count = names.len(), error = %e, "Interaction check failed");
                Err(Error::provider_failure("checking medication interactions"))
            }
        }
    }

    /// Analyze an uploaded document image
    pub async fn analyze_document(&self, upload: &DocumentUpload) -> Result<DocumentAnalysis> {
        // Size/type enforcement happens here, before the provider is touched.
        let inline = upload.to_inline_data()?;

        let request = prompt::document_analysis().with_inline_data(inline);
        match self.model.generate(request).await {
            Ok(analysis) => Ok(DocumentAnalysis { analysis }),
            Err(e) => {
                tracing::error!(filename = %upload.filename, error = %e, "Document analysis failed");
                Err(Error::provider_failure("analyzing the document"))
            }
        }
    }
}

/// Parse and schema-check the structured medication-info reply
fn parse_medication_info(reply: &str) -> std::result::Result<MedicationInfo, String> {
    let body = strip_code_fences(reply);
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| format!("not valid JSON: {e}"))?;

    if let Err(errors) = MEDICATION_INFO_VALIDATOR.validate(&value) {
        let detail = errors
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(format!("schema violation: {detail}"));
    }

    serde_json::from_value(value).map_err(|e| format!("deserialization failed: {e}"))
}

/// Models occasionally wrap JSON replies in markdown fences; tolerate that.
fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}
