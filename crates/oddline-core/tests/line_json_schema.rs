use jsonschema::JSONSchema;
use oddline_core::{AnomalyType, Line, WordLine};
use schemars::schema_for;
use serde_json::json;

#[test]
fn word_line_schema_accepts_generated_shape() {
    let schema = serde_json::to_value(schema_for!(WordLine)).expect("serialize schema");
    let compiled = JSONSchema::compile(&schema).expect("compile schema");

    let line = WordLine {
        items: vec!["pan".to_string(), "desk".to_string()],
        odd_index: 1,
        rhyme: "an".to_string(),
    };
    let instance = serde_json::to_value(&line).expect("serialize line");
    assert!(compiled.is_valid(&instance));

    assert!(!compiled.is_valid(&json!({"items": ["pan"], "rhyme": "an"})));
}

#[test]
fn sequence_line_schema_restricts_anomaly_type() {
    let schema = serde_json::to_value(schema_for!(Line<i64>)).expect("serialize schema");
    let compiled = JSONSchema::compile(&schema).expect("compile schema");

    let line = Line {
        items: vec![2_i64, 1, 3],
        error_index: 0,
        anomaly: Some(AnomalyType::Order),
    };
    let instance = serde_json::to_value(&line).expect("serialize line");
    assert!(compiled.is_valid(&instance));

    let bogus = json!({"items": [1, 2, 3], "errorIndex": 0, "type": "sideways"});
    assert!(!compiled.is_valid(&bogus));
}
