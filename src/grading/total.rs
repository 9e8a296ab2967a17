//! 总分计算

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use ts_rs::TS;

use super::validate::validate_score;
use crate::errors::{GradelyError, Result};

/// 总分上限
pub const MAX_TOTAL: f64 = 100.0;

/// 考核项得分表：考核项名称 → 得分，缺省视为 0
pub type ScoreBreakdown = BTreeMap<String, f64>;

/// 考核项定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct AssessmentDefinition {
    pub id: i64,
    pub name: String,
    pub weight: f64,
    pub max_score: f64,
}

impl AssessmentDefinition {
    pub fn new(id: i64, name: impl Into<String>, weight: f64, max_score: f64) -> Self {
        Self {
            id,
            name: name.into(),
            weight,
            max_score,
        }
    }
}

/// 单条成绩记录，(assessment_id, student_id) 唯一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct ScoreRecord {
    pub assessment_id: i64,
    pub student_id: i64,
    pub offering_id: i64,
    pub grader_id: i64,
    pub score: f64,
}

/// 求和并截断到 100
///
/// 不做校验，负分等非法输入应在调用前被拒绝。
pub fn compute_total<I>(scores: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    scores.into_iter().sum::<f64>().min(MAX_TOTAL)
}

/// 按考核项名称校验后计算总分
pub fn compute_total_checked(
    breakdown: &ScoreBreakdown,
    assessments: &[AssessmentDefinition],
) -> Result<f64> {
    let by_name: HashMap<&str, &AssessmentDefinition> =
        assessments.iter().map(|a| (a.name.as_str(), a)).collect();

    for (kind, &score) in breakdown {
        let assessment = by_name.get(kind.as_str()).ok_or_else(|| {
            GradelyError::unknown_assessment_type(format!(
                "assessment '{kind}' has no configured maximum"
            ))
        })?;
        validate_score(score, assessment.max_score).map_err(|e| {
            GradelyError::invalid_score(format!("{kind}: {}", e.message()))
        })?;
    }

    Ok(compute_total(breakdown.values().copied()))
}

/// 计算某门开课中每个学生的总分
///
/// 只统计属于 `assessments` 的成绩记录，其他考核项的记录被忽略。
pub fn student_totals<'a, I>(assessments: &[AssessmentDefinition], records: I) -> BTreeMap<i64, f64>
where
    I: IntoIterator<Item = &'a ScoreRecord>,
{
    let mut sums: BTreeMap<i64, f64> = BTreeMap::new();
    for record in records {
        if assessments.iter().any(|a| a.id == record.assessment_id) {
            *sums.entry(record.student_id).or_insert(0.0) += record.score;
        }
    }

    sums.into_iter()
        .map(|(student_id, sum)| (student_id, sum.min(MAX_TOTAL)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_categories() -> Vec<AssessmentDefinition> {
        vec![
            AssessmentDefinition::new(1, "assignment", 10.0, 10.0),
            AssessmentDefinition::new(2, "quiz", 15.0, 15.0),
            AssessmentDefinition::new(3, "project", 25.0, 25.0),
            AssessmentDefinition::new(4, "midsem", 20.0, 20.0),
            AssessmentDefinition::new(5, "finalExam", 30.0, 30.0),
        ]
    }

    fn breakdown(entries: &[(&str, f64)]) -> ScoreBreakdown {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn record(assessment_id: i64, student_id: i64, score: f64) -> ScoreRecord {
        ScoreRecord {
            assessment_id,
            student_id,
            offering_id: 1,
            grader_id: 99,
            score,
        }
    }

    #[test]
    fn test_all_zero_input_is_zero() {
        assert_eq!(compute_total([0.0, 0.0, 0.0]), 0.0);
        assert_eq!(compute_total(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_exact_sum_below_cap() {
        assert_eq!(compute_total([8.0, 13.0, 20.0, 17.0, 25.0]), 83.0);
        assert_eq!(compute_total([10.0, 15.0, 25.0, 20.0, 30.0]), 100.0);
    }

    #[test]
    fn test_sum_is_capped_at_100() {
        assert_eq!(compute_total([60.0, 50.0]), 100.0);
        assert_eq!(compute_total([100.0, 100.0, 100.0]), 100.0);
    }

    #[test]
    fn test_total_is_monotonic() {
        let mut scores = [5.0, 10.0, 20.0, 15.0, 20.0];
        let mut previous = compute_total(scores);
        for step in 0..40 {
            scores[step % 5] += 1.5;
            let current = compute_total(scores);
            assert!(current >= previous);
            assert!(current <= MAX_TOTAL);
            previous = current;
        }
    }

    #[test]
    fn test_checked_missing_kinds_default_to_zero() {
        let total =
            compute_total_checked(&breakdown(&[("quiz", 12.0), ("midsem", 18.0)]), &five_categories())
                .unwrap();
        assert_eq!(total, 30.0);
    }

    #[test]
    fn test_checked_unknown_kind_is_reported() {
        let err = compute_total_checked(&breakdown(&[("labwork", 5.0)]), &five_categories())
            .unwrap_err();
        assert!(matches!(err, GradelyError::UnknownAssessmentType(_)));
        assert!(err.message().contains("labwork"));
    }

    #[test]
    fn test_checked_rejects_score_above_maximum() {
        let err = compute_total_checked(&breakdown(&[("assignment", 11.0)]), &five_categories())
            .unwrap_err();
        assert!(matches!(err, GradelyError::InvalidScore(_)));
        assert!(err.message().starts_with("assignment:"));
    }

    #[test]
    fn test_checked_rejects_negative_score() {
        let err = compute_total_checked(&breakdown(&[("quiz", -1.0)]), &five_categories())
            .unwrap_err();
        assert!(matches!(err, GradelyError::InvalidScore(_)));
    }

    #[test]
    fn test_variable_assessment_list() {
        let assessments = vec![
            AssessmentDefinition::new(10, "Quiz 1", 0.0, 5.0),
            AssessmentDefinition::new(11, "Quiz 2", 0.0, 5.0),
            AssessmentDefinition::new(12, "Final", 0.0, 90.0),
        ];
        let total = compute_total_checked(
            &breakdown(&[("Quiz 1", 4.5), ("Quiz 2", 3.0), ("Final", 71.0)]),
            &assessments,
        )
        .unwrap();
        assert_eq!(total, 78.5);
    }

    #[test]
    fn test_student_totals_groups_by_student() {
        let records = vec![
            record(1, 100, 8.0),
            record(2, 100, 13.0),
            record(3, 100, 20.0),
            record(1, 200, 10.0),
            record(5, 200, 30.0),
        ];
        let totals = student_totals(&five_categories(), &records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&100], 41.0);
        assert_eq!(totals[&200], 40.0);
    }

    #[test]
    fn test_student_totals_ignores_foreign_assessments() {
        let records = vec![record(1, 100, 8.0), record(42, 100, 50.0)];
        let totals = student_totals(&five_categories(), &records);
        assert_eq!(totals[&100], 8.0);
    }

    #[test]
    fn test_student_totals_are_capped() {
        let assessments = vec![
            AssessmentDefinition::new(1, "a", 0.0, 80.0),
            AssessmentDefinition::new(2, "b", 0.0, 80.0),
        ];
        let records = vec![record(1, 7, 70.0), record(2, 7, 70.0)];
        assert_eq!(student_totals(&assessments, &records)[&7], 100.0);
    }
}
