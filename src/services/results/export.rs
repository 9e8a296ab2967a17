//! 成绩单 CSV 导出

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ResultService;
use super::sheet::load_sheet;
use crate::errors::{GradelyError, Result};
use crate::models::offerings::entities::Assessment;
use crate::models::results::responses::StudentResult;
use crate::services::offerings::load_accessible_offering;
use crate::services::{current_user, error_response};

pub async fn export_results(
    service: &ResultService,
    request: &HttpRequest,
    offering_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let offering = match load_accessible_offering(&storage, &user, offering_id).await {
        Ok(offering) => offering,
        Err(resp) => return Ok(resp),
    };

    let sheet = match load_sheet(&storage, offering_id).await {
        Ok(sheet) => sheet,
        Err(e) => return Ok(error_response("Failed to compute results", &e)),
    };

    let data = match write_results_csv(&sheet.assessments, &sheet.results) {
        Ok(data) => data,
        Err(e) => return Ok(error_response("Failed to write CSV", &e)),
    };

    info!(
        "User {} exported {} results of offering {}",
        user.id,
        sheet.results.len(),
        offering_id
    );

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!(
                "attachment; filename=\"{}_results.csv\"",
                file_stem(&offering.course_code)
            ),
        ))
        .body(data))
}

// 文件名只保留字母数字、'-' 和 '_'
fn file_stem(course_code: &str) -> String {
    let stem: String = course_code
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if stem.is_empty() {
        "offering".to_string()
    } else {
        stem
    }
}

pub(crate) fn write_results_csv(
    assessments: &[Assessment],
    results: &[StudentResult],
) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec![
        "student_id".to_string(),
        "username".to_string(),
        "display_name".to_string(),
    ];
    header.extend(
        assessments
            .iter()
            .map(|a| format!("{} (/{})", a.name, a.max_score)),
    );
    header.extend(["total", "grade", "grade_point", "passed"].map(String::from));
    wtr.write_record(&header)?;

    for result in results {
        let mut row = vec![
            result.student_id.to_string(),
            result.username.clone(),
            result.display_name.clone().unwrap_or_default(),
        ];
        row.extend(
            result
                .scores
                .iter()
                .map(|s| s.score.map(|v| v.to_string()).unwrap_or_default()),
        );
        row.push(result.total.to_string());
        row.push(result.grade.clone());
        row.push(result.grade_point.to_string());
        row.push(if result.passed { "yes" } else { "no" }.to_string());
        wtr.write_record(&row)?;
    }

    wtr.into_inner()
        .map_err(|e| GradelyError::serialization(format!("CSV 生成失败: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::results::responses::AssessmentScore;

    #[test]
    fn csv_has_one_column_per_assessment() {
        let assessments = vec![Assessment {
            id: 1,
            offering_id: 1,
            name: "Exam".to_string(),
            weight: 60.0,
            max_score: 60.0,
            position: 0,
        }];
        let results = vec![
            StudentResult {
                student_id: 5,
                username: "alice".to_string(),
                display_name: Some("Alice, A.".to_string()),
                scores: vec![AssessmentScore {
                    assessment_id: 1,
                    name: "Exam".to_string(),
                    max_score: 60.0,
                    score: Some(52.5),
                }],
                total: 52.5,
                grade: "F".to_string(),
                grade_point: 0.0,
                passed: false,
            },
            StudentResult {
                student_id: 6,
                username: "bob".to_string(),
                display_name: None,
                scores: vec![AssessmentScore {
                    assessment_id: 1,
                    name: "Exam".to_string(),
                    max_score: 60.0,
                    score: None,
                }],
                total: 0.0,
                grade: "F".to_string(),
                grade_point: 0.0,
                passed: false,
            },
        ];

        let data = write_results_csv(&assessments, &results).unwrap();
        let text = String::from_utf8(data).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "student_id,username,display_name,Exam (/60),total,grade,grade_point,passed"
        );
        assert_eq!(lines[1], "5,alice,\"Alice, A.\",52.5,52.5,F,0,no");
        assert_eq!(lines[2], "6,bob,,,0,F,0,no");
    }

    #[test]
    fn file_stem_is_sanitised() {
        assert_eq!(file_stem("CSC 301/A"), "CSC301A");
        assert_eq!(file_stem("///"), "offering");
    }
}
