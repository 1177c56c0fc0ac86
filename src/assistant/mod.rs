//! Scans assistant conversations for emergency keywords and place names and
//! logs matches to the append-only assistant event log.
//!
//! The language model and speech layers live outside this crate; only the
//! finished `(user message, reply)` pair arrives here.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::{
    dispatch::{EmergencyType, MemorySink, ServerTimestamp},
    error::SinkError,
};

pub const RECORD_SOURCE: &str = "AI Voice Assistant";
pub const UNSPECIFIED_LOCATION: &str = "Not specified";

/// Checked in order; the first type with any matching keyword wins.
const KEYWORDS: [(EmergencyType, &[&str]); 3] = [
    (
        EmergencyType::Medical,
        &[
            "medical",
            "injury",
            "injured",
            "bleeding",
            "unconscious",
            "heart attack",
            "seizure",
            "allergic",
        ],
    ),
    (
        EmergencyType::Fire,
        &["fire", "smoke", "burning", "flames", "explosion", "gas leak"],
    ),
    (
        EmergencyType::Patrol,
        &[
            "suspicious",
            "intruder",
            "surveillance",
            "patrol",
            "security",
            "break-in",
            "trespassing",
        ],
    ),
];

const LOCATION_PATTERNS: [&str; 3] = [
    r"\bat\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
    r"\bin\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
    r"\bnear\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
];

fn location_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        LOCATION_PATTERNS
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect()
    })
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantEmergencyRecord {
    #[serde(rename = "type")]
    pub emergency_type: EmergencyType,
    pub location: String,
    pub user_message: String,
    pub ai_response: String,
    pub timestamp: ServerTimestamp,
    pub source: &'static str,
}

/// Substring match over the lower-cased exchange, so "fireworks" counts as
/// fire.
pub fn classify_emergency(text: &str) -> Option<EmergencyType> {
    let lowered = text.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|word| lowered.contains(word)))
        .map(|(kind, _)| *kind)
}

/// Case-sensitive: the place name must be capitalised.
pub fn detect_location(user_message: &str) -> Option<String> {
    location_patterns().iter().find_map(|pattern| {
        pattern
            .captures(user_message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

pub fn scan_exchange(user_message: &str, ai_response: &str) -> Option<AssistantEmergencyRecord> {
    let emergency_type = classify_emergency(&format!("{user_message} {ai_response}"));
    let location = detect_location(user_message);
    if emergency_type.is_none() && location.is_none() {
        return None;
    }

    Some(AssistantEmergencyRecord {
        emergency_type: emergency_type.unwrap_or(EmergencyType::Unknown),
        location: location.unwrap_or_else(|| UNSPECIFIED_LOCATION.to_string()),
        user_message: user_message.to_string(),
        ai_response: ai_response.to_string(),
        timestamp: ServerTimestamp,
        source: RECORD_SOURCE,
    })
}

/// Append-only store for assistant records.
pub trait EmergencyLogSink {
    fn push(&mut self, path: &str, record: &AssistantEmergencyRecord) -> Result<(), SinkError>;
}

impl EmergencyLogSink for MemorySink {
    fn push(&mut self, path: &str, record: &AssistantEmergencyRecord) -> Result<(), SinkError> {
        let json = serde_json::to_string(record).map_err(|e| SinkError::new(e.to_string()))?;
        self.append(path, json)
    }
}

pub struct AssistantLogger<K> {
    path: &'static str,
    sink: K,
}

impl<K: EmergencyLogSink> AssistantLogger<K> {
    pub fn new(path: &'static str, sink: K) -> Self {
        Self { path, sink }
    }

    /// Never fails the conversation: push errors are logged and dropped.
    pub fn observe_exchange(
        &mut self,
        user_message: &str,
        ai_response: &str,
    ) -> Option<AssistantEmergencyRecord> {
        let record = scan_exchange(user_message, ai_response)?;
        match self.sink.push(self.path, &record) {
            Ok(()) => log::info!(
                "assistant: logged type={} location={:?}",
                record.emergency_type.label(),
                record.location
            ),
            Err(err) => log::warn!("assistant: log push failed path={} err={}", self.path, err),
        }
        Some(record)
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn location_patterns_all_compile() {
        assert_eq!(location_patterns().len(), LOCATION_PATTERNS.len());
    }

    #[test]
    fn first_matching_type_wins() {
        assert_eq!(
            classify_emergency("Smoke everywhere and someone is bleeding"),
            Some(EmergencyType::Medical)
        );
        assert_eq!(
            classify_emergency("there is a GAS LEAK in the kitchen"),
            Some(EmergencyType::Fire)
        );
        assert_eq!(
            classify_emergency("an intruder broke the window"),
            Some(EmergencyType::Patrol)
        );
        assert_eq!(classify_emergency("what time is it"), None);
    }

    #[test]
    fn location_follows_preposition_priority() {
        assert_eq!(
            detect_location("I am near Central Park but stuck at Union Station"),
            Some("Union Station".to_string())
        );
        assert_eq!(
            detect_location("trapped in Building Seven"),
            Some("Building Seven".to_string())
        );
        assert_eq!(detect_location("somewhere at the mall"), None);
    }

    #[test]
    fn preposition_inside_a_word_does_not_match() {
        assert_eq!(detect_location("that Harbor looks bad"), None);
    }

    #[test]
    fn record_defaults_missing_fields() {
        let record = scan_exchange("help me at Pier Nine", "Stay calm.").expect("location found");
        assert_eq!(record.emergency_type, EmergencyType::Unknown);
        assert_eq!(record.location, "Pier Nine");

        let record = scan_exchange("my friend is unconscious", "Check breathing.")
            .expect("keyword found");
        assert_eq!(record.location, UNSPECIFIED_LOCATION);

        assert!(scan_exchange("hello", "Hi, how can I help?").is_none());
    }

    #[test]
    fn logger_pushes_camel_case_record() {
        let mut logger = AssistantLogger::new("emergency_events", MemorySink::new());
        let record = logger.observe_exchange("fire in Oak Street", "Leave the building now.");
        assert!(record.is_some());

        let pushed = logger.sink().log("emergency_events");
        assert_eq!(pushed.len(), 1);
        let value: Value = serde_json::from_str(&pushed[0]).expect("valid json");
        assert_eq!(
            value,
            json!({
                "type": "fire",
                "location": "Oak Street",
                "userMessage": "fire in Oak Street",
                "aiResponse": "Leave the building now.",
                "timestamp": { ".sv": "timestamp" },
                "source": "AI Voice Assistant",
            })
        );
    }

    #[test]
    fn push_failure_is_swallowed() {
        let mut logger = AssistantLogger::new("emergency_events", MemorySink::new());
        logger.sink_mut().fail_with("offline");
        let record = logger.observe_exchange("someone is injured", "Apply pressure.");
        assert_eq!(record.map(|r| r.emergency_type), Some(EmergencyType::Medical));
        assert!(logger.sink().log("emergency_events").is_empty());
    }
}
