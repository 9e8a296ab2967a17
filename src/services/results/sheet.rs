//! 成绩单
//!
//! 把名单、考核项、成绩与评分等级合成为每个学生的总评和班级统计。
//! 只统计名单内的学生，没有任何成绩的学生总分为 0。

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::Result;
use crate::grading::{
    AssessmentDefinition, ClassStatistics, GradingScale, aggregate, has_passed, student_totals,
};
use crate::models::marks::entities::Mark;
use crate::models::offerings::entities::{Assessment, RosterStudent};
use crate::models::results::responses::{AssessmentScore, StudentResult};
use crate::storage::Storage;

pub(crate) struct ResultSheet {
    pub assessments: Vec<Assessment>,
    pub results: Vec<StudentResult>,
    pub statistics: ClassStatistics,
    pub is_default_scale: bool,
}

/// 读取已配置的评分等级，未配置时使用默认表
pub(crate) async fn load_scale(storage: &Arc<dyn Storage>) -> Result<(GradingScale, bool)> {
    let bands = storage.list_grade_bands().await?;
    let is_default = bands.is_empty();
    Ok((GradingScale::resolve(bands)?, is_default))
}

pub(crate) async fn load_sheet(storage: &Arc<dyn Storage>, offering_id: i64) -> Result<ResultSheet> {
    let (scale, is_default_scale) = load_scale(storage).await?;
    let roster = storage.list_offering_students(offering_id).await?;
    let assessments = storage.list_assessments_by_offering(offering_id).await?;
    let marks = storage.list_marks_by_offering(offering_id).await?;

    let (results, statistics) = build_results(&roster, &assessments, &marks, &scale);
    Ok(ResultSheet {
        assessments,
        results,
        statistics,
        is_default_scale,
    })
}

pub(crate) fn build_results(
    roster: &[RosterStudent],
    assessments: &[Assessment],
    marks: &[Mark],
    scale: &GradingScale,
) -> (Vec<StudentResult>, ClassStatistics) {
    let definitions: Vec<AssessmentDefinition> = assessments.iter().map(Into::into).collect();
    let totals = student_totals(&definitions, marks.iter().map(|m| &m.record));

    let scores: HashMap<(i64, i64), f64> = marks
        .iter()
        .map(|m| ((m.record.student_id, m.record.assessment_id), m.record.score))
        .collect();

    let results: Vec<StudentResult> = roster
        .iter()
        .map(|student| {
            let total = totals.get(&student.student_id).copied().unwrap_or(0.0);
            let band = scale.classify(total);
            StudentResult {
                student_id: student.student_id,
                username: student.username.clone(),
                display_name: student.display_name.clone(),
                scores: assessments
                    .iter()
                    .map(|a| AssessmentScore {
                        assessment_id: a.id,
                        name: a.name.clone(),
                        max_score: a.max_score,
                        score: scores.get(&(student.student_id, a.id)).copied(),
                    })
                    .collect(),
                total,
                grade: band.label.clone(),
                grade_point: band.grade_point,
                passed: has_passed(total),
            }
        })
        .collect();

    let class_totals: Vec<f64> = results.iter().map(|r| r.total).collect();
    let statistics = aggregate(&class_totals, scale);
    (results, statistics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::ScoreRecord;

    fn student(id: i64, name: &str) -> RosterStudent {
        RosterStudent {
            student_id: id,
            username: name.to_string(),
            display_name: None,
            email: format!("{name}@example.edu"),
            enrolled_at: chrono::Utc::now(),
        }
    }

    fn assessment(id: i64, name: &str, max: f64) -> Assessment {
        Assessment {
            id,
            offering_id: 1,
            name: name.to_string(),
            weight: max,
            max_score: max,
            position: id as i32,
        }
    }

    fn mark(assessment_id: i64, student_id: i64, score: f64) -> Mark {
        Mark {
            id: assessment_id * 100 + student_id,
            record: ScoreRecord {
                assessment_id,
                student_id,
                offering_id: 1,
                grader_id: 99,
                score,
            },
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn builds_rows_and_statistics() {
        let roster = [student(1, "alice"), student(2, "bob"), student(3, "chi")];
        let assessments = [assessment(10, "CA", 40.0), assessment(11, "Exam", 60.0)];
        let marks = [
            mark(10, 1, 30.0),
            mark(11, 1, 45.0),
            mark(10, 2, 20.0),
            mark(11, 2, 39.0),
            // 名单外学生的成绩不计入
            mark(10, 42, 40.0),
        ];

        let (results, stats) =
            build_results(&roster, &assessments, &marks, &GradingScale::default_scale());

        assert_eq!(results.len(), 3);
        let alice = &results[0];
        assert_eq!(alice.total, 75.0);
        assert_eq!(alice.grade, "C+");
        assert_eq!(alice.grade_point, 2.3);
        assert!(alice.passed);

        let bob = &results[1];
        assert_eq!(bob.total, 59.0);
        assert_eq!(bob.grade, "F");
        assert!(!bob.passed);

        // 没有成绩的学生总分 0，考核项得分为空
        let chi = &results[2];
        assert_eq!(chi.total, 0.0);
        assert_eq!(chi.grade, "F");
        assert!(chi.scores.iter().all(|s| s.score.is_none()));

        assert_eq!(stats.student_count, 3);
        assert_eq!(stats.passed_count, 1);
        assert_eq!(stats.failed_count, 2);
        assert_eq!(stats.highest, 75.0);
        assert_eq!(stats.lowest, 0.0);
        assert_eq!(stats.average, 44.67);
        assert_eq!(stats.pass_rate, 33.33);
    }

    #[test]
    fn empty_roster_yields_zeroed_statistics() {
        let (results, stats) = build_results(
            &[],
            &[assessment(10, "CA", 40.0)],
            &[],
            &GradingScale::default_scale(),
        );
        assert!(results.is_empty());
        assert_eq!(stats.student_count, 0);
        assert_eq!(stats.distribution.len(), 12);
        assert!(stats.distribution.iter().all(|b| b.count == 0));
    }
}
