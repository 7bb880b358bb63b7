//! Calculation events emitted to a sink.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const EVENT_PERFORMED: &str = "calculation_performed";
pub const EVENT_FAILED: &str = "calculation_failed";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    Subnet,
    Cost,
    Scenario,
}

/// One calculation, as seen by analytics.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationEvent {
    pub event: String,
    pub calculation_type: CalculationType,
    /// Inputs of the calculation, plus `errorField` on failure.
    pub parameters: serde_json::Value,
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
}

impl CalculationEvent {
    pub fn performed(
        calculation_type: CalculationType,
        parameters: serde_json::Value,
        session_id: &str,
    ) -> CalculationEvent {
        CalculationEvent {
            event: EVENT_PERFORMED.to_string(),
            calculation_type,
            parameters,
            timestamp: Utc::now(),
            session_id: session_id.to_string(),
        }
    }

    pub fn failed(
        calculation_type: CalculationType,
        mut parameters: serde_json::Value,
        error_field: &str,
        session_id: &str,
    ) -> CalculationEvent {
        if let Some(map) = parameters.as_object_mut() {
            map.insert("errorField".to_string(), error_field.into());
        }
        CalculationEvent {
            event: EVENT_FAILED.to_string(),
            calculation_type,
            parameters,
            timestamp: Utc::now(),
            session_id: session_id.to_string(),
        }
    }
}

/// Session id of the form `<unix millis>-<pid>`.
pub fn new_session_id() -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), std::process::id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failed_event_carries_field() {
        let event = CalculationEvent::failed(
            CalculationType::Subnet,
            json!({"ipAddress": "10.0.0.256"}),
            "ipAddress",
            "s1",
        );
        assert_eq!(event.event, EVENT_FAILED);
        assert_eq!(event.parameters["errorField"], "ipAddress");
        assert_eq!(event.parameters["ipAddress"], "10.0.0.256");
    }

    #[test]
    fn test_event_json_shape() {
        let event = CalculationEvent::performed(CalculationType::Cost, json!({}), "s1");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "calculation_performed");
        assert_eq!(value["calculationType"], "cost");
        assert_eq!(value["sessionId"], "s1");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_session_id_format() {
        let id = new_session_id();
        let (millis, pid) = id.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(pid, std::process::id().to_string());
    }
}
