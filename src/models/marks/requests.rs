//! 批量录入成绩请求
//!
//! 每条录入项单独解析，解析失败只影响该项本身，
//! 所以 `entries` 以原始 JSON 接收。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct SubmitMarksRequest {
    /// 每项形如 `MarkEntry`，数字字段也接受数字字符串
    pub entries: Vec<Value>,
}

// 解析后的录入项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct MarkEntry {
    pub assessment_id: i64,
    pub student_id: i64,
    /// 可选，提供时必须与路径中的开课一致
    pub offering_id: Option<i64>,
    pub score: f64,
}

// 录入项被拒绝的原因
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct EntryRejection {
    pub field: String,
    pub message: String,
}

impl EntryRejection {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl MarkEntry {
    pub fn parse(value: &Value) -> Result<Self, EntryRejection> {
        let obj = value
            .as_object()
            .ok_or_else(|| EntryRejection::new("entry", "entry must be an object"))?;

        let assessment_id = required_id(obj.get("assessment_id"), "assessment_id")?;
        let student_id = required_id(obj.get("student_id"), "student_id")?;
        let offering_id = match obj.get("offering_id") {
            None | Some(Value::Null) => None,
            Some(v) => Some(parse_id(v, "offering_id")?),
        };
        let score = match obj.get("score") {
            None | Some(Value::Null) => {
                return Err(EntryRejection::new("score", "score is required"));
            }
            Some(v) => parse_score(v)?,
        };

        Ok(Self {
            assessment_id,
            student_id,
            offering_id,
            score,
        })
    }
}

fn required_id(value: Option<&Value>, field: &str) -> Result<i64, EntryRejection> {
    match value {
        None | Some(Value::Null) => Err(EntryRejection::new(field, format!("{field} is required"))),
        Some(v) => parse_id(v, field),
    }
}

fn parse_id(value: &Value, field: &str) -> Result<i64, EntryRejection> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(EntryRejection::new(
            field,
            format!("{field} must be a positive integer"),
        )),
    }
}

fn parse_score(value: &Value) -> Result<f64, EntryRejection> {
    let score = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match score {
        Some(s) if s.is_finite() => Ok(s),
        _ => Err(EntryRejection::new("score", "score must be a finite number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numbers_and_numeric_strings() {
        let entry = MarkEntry::parse(&json!({
            "assessment_id": "3",
            "student_id": 7,
            "score": " 18.5 "
        }))
        .unwrap();
        assert_eq!(
            entry,
            MarkEntry {
                assessment_id: 3,
                student_id: 7,
                offering_id: None,
                score: 18.5
            }
        );
    }

    #[test]
    fn missing_field_is_reported() {
        let err = MarkEntry::parse(&json!({ "assessment_id": 1, "score": 10 })).unwrap_err();
        assert_eq!(err.field, "student_id");
        assert_eq!(err.message, "student_id is required");

        let err = MarkEntry::parse(&json!({ "assessment_id": 1, "student_id": 2 })).unwrap_err();
        assert_eq!(err.field, "score");
    }

    #[test]
    fn non_numeric_score_is_rejected() {
        for bad in [json!("abc"), json!(true), json!([1]), json!("NaN"), json!("inf")] {
            let err = MarkEntry::parse(&json!({
                "assessment_id": 1,
                "student_id": 2,
                "score": bad
            }))
            .unwrap_err();
            assert_eq!(err.field, "score");
        }
    }

    #[test]
    fn ids_must_be_positive_integers() {
        for bad in [json!(0), json!(-4), json!(1.5), json!("x")] {
            let err = MarkEntry::parse(&json!({
                "assessment_id": bad,
                "student_id": 2,
                "score": 1
            }))
            .unwrap_err();
            assert_eq!(err.field, "assessment_id");
        }
    }

    #[test]
    fn offering_id_is_optional_but_checked() {
        let entry = MarkEntry::parse(&json!({
            "assessment_id": 1,
            "student_id": 2,
            "offering_id": null,
            "score": 1
        }))
        .unwrap();
        assert_eq!(entry.offering_id, None);

        let err = MarkEntry::parse(&json!({
            "assessment_id": 1,
            "student_id": 2,
            "offering_id": "abc",
            "score": 1
        }))
        .unwrap_err();
        assert_eq!(err.field, "offering_id");
    }

    #[test]
    fn non_object_entry_is_rejected() {
        let err = MarkEntry::parse(&json!(42)).unwrap_err();
        assert_eq!(err.field, "entry");
    }

    #[test]
    fn negative_score_parses_and_is_left_to_validation() {
        let entry = MarkEntry::parse(&json!({
            "assessment_id": 1,
            "student_id": 2,
            "score": -5
        }))
        .unwrap();
        assert_eq!(entry.score, -5.0);
    }
}
