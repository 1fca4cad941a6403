//! Classification of a frame's JSON payload into events.
//!
//! Field checks follow the service's loose typing: `stage` falls back to an empty
//! string, and `result`/`error` only count when present and truthy (not null, false,
//! zero or an empty string).

use serde_json::{Map, Value};

use crate::models::AnalysisResult;
use crate::sse::events::AnalysisEvent;

/// Classify a parsed payload. Errors name the field that could not be interpreted.
pub(crate) fn classify_payload(payload: &Value) -> Result<Vec<AnalysisEvent>, String> {
    let Some(fields) = payload.as_object() else {
        // Valid JSON but not a key/value document: nothing to classify
        return Ok(Vec::new());
    };

    let mut events = Vec::with_capacity(1);

    if let Some(value) = progress_value(fields) {
        let stage = fields
            .get("stage")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        events.push(AnalysisEvent::Progress { value, stage });
    }

    if let Some(result) = fields.get("result").filter(|v| is_truthy(v)) {
        if !result.is_object() {
            return Err("invalid result payload: expected an object".to_string());
        }
        let result: AnalysisResult = serde_json::from_value(result.clone())
            .map_err(|e| format!("invalid result payload: {}", e))?;
        events.push(AnalysisEvent::Result(result));
    }

    if let Some(error) = fields.get("error").filter(|v| is_truthy(v)) {
        let message = match error {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        events.push(AnalysisEvent::Error(message));
    }

    Ok(events)
}

/// Numeric `progress` field, rounded to an integer. Non-numeric values are ignored.
fn progress_value(fields: &Map<String, Value>) -> Option<i64> {
    let Value::Number(number) = fields.get("progress")? else {
        return None;
    };
    number
        .as_i64()
        .or_else(|| number.as_f64().map(|f| f.round() as i64))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_progress_with_stage() {
        let events = classify_payload(&json!({"progress": 30, "stage": "Generating queries"})).unwrap();
        assert_eq!(
            events,
            vec![AnalysisEvent::Progress {
                value: 30,
                stage: "Generating queries".to_string()
            }]
        );
    }

    #[test]
    fn test_progress_without_stage_defaults_empty() {
        let events = classify_payload(&json!({"progress": 5})).unwrap();
        assert_eq!(
            events,
            vec![AnalysisEvent::Progress {
                value: 5,
                stage: String::new()
            }]
        );
    }

    #[test]
    fn test_fractional_progress_is_rounded() {
        let events = classify_payload(&json!({"progress": 49.6})).unwrap();
        assert!(matches!(events[0], AnalysisEvent::Progress { value: 50, .. }));
    }

    #[test]
    fn test_non_numeric_progress_is_ignored() {
        let events = classify_payload(&json!({"progress": "ten"})).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_out_of_range_progress_passes_through() {
        let events = classify_payload(&json!({"progress": 140})).unwrap();
        assert!(matches!(events[0], AnalysisEvent::Progress { value: 140, .. }));
        let events = classify_payload(&json!({"progress": -3})).unwrap();
        assert!(matches!(events[0], AnalysisEvent::Progress { value: -3, .. }));
    }

    #[test]
    fn test_all_fields_fire_in_order() {
        let events = classify_payload(&json!({
            "error": "late failure",
            "result": {"summary": "s", "investment_score": 70, "sources": ["https://a"]},
            "progress": 100,
            "stage": "Done"
        }))
        .unwrap();
        let names: Vec<&str> = events.iter().map(|e| e.event_type_name()).collect();
        assert_eq!(names, vec!["progress", "result", "error"]);
    }

    #[test]
    fn test_falsy_error_and_result_are_ignored() {
        assert!(classify_payload(&json!({"error": ""})).unwrap().is_empty());
        assert!(classify_payload(&json!({"error": null})).unwrap().is_empty());
        assert!(classify_payload(&json!({"result": null})).unwrap().is_empty());
        assert!(classify_payload(&json!({"result": false})).unwrap().is_empty());
    }

    #[test]
    fn test_non_string_error_is_rendered_as_json() {
        let events = classify_payload(&json!({"error": {"code": 42}})).unwrap();
        assert_eq!(events, vec![AnalysisEvent::Error(r#"{"code":42}"#.to_string())]);
    }

    #[test]
    fn test_result_of_wrong_shape_is_rejected() {
        let err = classify_payload(&json!({"result": "done"})).unwrap_err();
        assert!(err.contains("invalid result payload"));
        let err = classify_payload(&json!({"result": ["s", 70, []]})).unwrap_err();
        assert!(err.contains("invalid result payload"));
    }

    #[test]
    fn test_result_with_null_summary_still_completes() {
        let events = classify_payload(&json!({"progress": 100, "result": {"summary": null}})).unwrap();
        assert_eq!(
            events,
            vec![
                AnalysisEvent::Progress {
                    value: 100,
                    stage: String::new()
                },
                AnalysisEvent::Result(AnalysisResult::default()),
            ]
        );
    }

    #[test]
    fn test_non_object_payload_yields_nothing() {
        assert!(classify_payload(&json!(5)).unwrap().is_empty());
        assert!(classify_payload(&json!(["progress", 10])).unwrap().is_empty());
    }
}
