//! Result payload types
//!
//! Free-text payloads returned by the query adapters. All of them are
//! transient per-orchestrator state: each new request fully replaces the
//! previous result, never merges with it.

use serde::{Deserialize, Serialize};

/// Medication lookup result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationInfo {
    /// What the medication is used for
    pub uses: String,
    /// Common side effects
    pub side_effects: String,
    /// General dosage guidelines
    pub dosage_guidelines: String,
}

impl MedicationInfo {
    /// Compose the labelled summary narrated by the read-aloud feature
    pub fn summary(&self) -> String {
        format!(
            "Uses: {}. Side Effects: {}. Dosage Guidelines: {}.",
            self.uses, self.side_effects, self.dosage_guidelines
        )
    }
}

/// Multi-drug interaction report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionReport {
    pub report: String,
}

/// Document image analysis result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub analysis: String,
}

/// Synthesized narration, ready for playback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechPayload {
    /// `data:audio/wav;base64,...`
    pub audio_data_uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_labels_sections() {
        let info = MedicationInfo {
            uses: "pain relief".to_string(),
            side_effects: "nausea".to_string(),
            dosage_guidelines: "one tablet daily".to_string(),
        };
        let summary = info.summary();
        assert!(summary.contains("Uses: pain relief"));
        assert!(summary.contains("Side Effects: nausea"));
        assert!(summary.contains("Dosage Guidelines: one tablet daily"));
    }

    #[test]
    fn test_medication_info_serde_field_names() {
        let info = MedicationInfo {
            uses: "u".to_string(),
            side_effects: "s".to_string(),
            dosage_guidelines: "d".to_string(),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("sideEffects").is_some());
        assert!(json.get("dosageGuidelines").is_some());
    }
}
