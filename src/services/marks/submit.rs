//! 批量录入成绩
//!
//! 每条录入项独立解析、校验、写入，互不影响；
//! 响应按请求顺序列出每项结果。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error, info};

use super::MarkService;
use crate::errors::Result;
use crate::grading::{ScoreRecord, validate_score};
use crate::models::marks::{
    requests::{EntryRejection, MarkEntry, SubmitMarksRequest},
    responses::{MarkEntryResult, MarkEntryStatus, SubmitMarksResponse},
};
use crate::models::offerings::entities::Assessment;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::offerings::load_accessible_offering;
use crate::services::{current_user, error_response};
use crate::storage::Storage;

pub async fn submit_marks(
    service: &MarkService,
    request: &HttpRequest,
    offering_id: i64,
    body: SubmitMarksRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let limit = service.get_config().server.limits.max_batch_entries;
    if body.entries.len() > limit {
        return Ok(HttpResponse::PayloadTooLarge().json(ApiResponse::error_empty(
            ErrorCode::MarkBatchTooLarge,
            format!(
                "Batch contains {} entries, at most {limit} are allowed",
                body.entries.len()
            ),
        )));
    }

    if let Err(resp) = load_accessible_offering(&storage, &user, offering_id).await {
        return Ok(resp);
    }

    let results = match apply_entries(&storage, offering_id, user.id, &body.entries).await {
        Ok(results) => results,
        Err(e) => return Ok(error_response("Failed to submit marks", &e)),
    };

    let accepted_count = results
        .iter()
        .filter(|r| r.status == MarkEntryStatus::Accepted)
        .count();
    let rejected_count = results.len() - accepted_count;

    info!(
        "User {} submitted {} marks to offering {}: {} accepted, {} rejected",
        user.id,
        results.len(),
        offering_id,
        accepted_count,
        rejected_count
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmitMarksResponse {
            offering_id,
            accepted_count,
            rejected_count,
            results,
        },
        "Marks processed",
    )))
}

/// 逐项处理录入，返回每项结果
///
/// 只有加载考核项或名单失败时整体返回错误，单项写入失败记为该项被拒绝。
pub(crate) async fn apply_entries(
    storage: &Arc<dyn Storage>,
    offering_id: i64,
    grader_id: i64,
    entries: &[Value],
) -> Result<Vec<MarkEntryResult>> {
    let assessments: HashMap<i64, Assessment> = storage
        .list_assessments_by_offering(offering_id)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();
    let roster: HashSet<i64> = storage
        .list_offering_students(offering_id)
        .await?
        .into_iter()
        .map(|s| s.student_id)
        .collect();

    let mut results = Vec::with_capacity(entries.len());
    for (index, raw) in entries.iter().enumerate() {
        let record = match check_entry(raw, offering_id, grader_id, &assessments, &roster) {
            Ok(record) => record,
            Err(rejection) => {
                debug!("Entry {} rejected: {} {}", index, rejection.field, rejection.message);
                results.push(MarkEntryResult::rejected(index, rejection));
                continue;
            }
        };

        match storage.upsert_mark(record).await {
            Ok(mark) => results.push(MarkEntryResult::accepted(index, mark)),
            Err(e) => {
                error!("Failed to save entry {} of offering {}: {}", index, offering_id, e);
                results.push(MarkEntryResult::rejected(
                    index,
                    EntryRejection::new("entry", "failed to save mark"),
                ));
            }
        }
    }

    Ok(results)
}

fn check_entry(
    raw: &Value,
    offering_id: i64,
    grader_id: i64,
    assessments: &HashMap<i64, Assessment>,
    roster: &HashSet<i64>,
) -> std::result::Result<ScoreRecord, EntryRejection> {
    let entry = MarkEntry::parse(raw)?;

    if let Some(entry_offering) = entry.offering_id
        && entry_offering != offering_id
    {
        return Err(EntryRejection::new(
            "offering_id",
            format!("offering_id {entry_offering} does not match offering {offering_id}"),
        ));
    }

    let assessment = assessments.get(&entry.assessment_id).ok_or_else(|| {
        EntryRejection::new(
            "assessment_id",
            format!(
                "assessment {} is not defined for offering {offering_id}",
                entry.assessment_id
            ),
        )
    })?;

    if !roster.contains(&entry.student_id) {
        return Err(EntryRejection::new(
            "student_id",
            format!(
                "student {} is not enrolled in offering {offering_id}",
                entry.student_id
            ),
        ));
    }

    validate_score(entry.score, assessment.max_score)
        .map_err(|e| EntryRejection::new("score", e.message()))?;

    Ok(ScoreRecord {
        assessment_id: entry.assessment_id,
        student_id: entry.student_id,
        offering_id,
        grader_id,
        score: entry.score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::test_support::{fixture, insert_assessment, setup};
    use serde_json::json;

    #[tokio::test]
    async fn mixed_batch_is_partially_applied() {
        let db = setup().await;
        let f = fixture(&db).await;
        let unknown_assessment = f.exam_id + 100;
        let storage: Arc<dyn Storage> = Arc::new(db);

        let entries = vec![
            json!({ "assessment_id": f.ca_id, "student_id": f.students[0], "score": "35" }),
            json!({ "assessment_id": f.exam_id, "student_id": f.students[0], "score": 61 }),
            json!({ "assessment_id": f.exam_id, "student_id": f.students[1], "score": -1 }),
            json!({ "assessment_id": unknown_assessment, "student_id": f.students[1], "score": 5 }),
            json!({ "assessment_id": f.ca_id, "student_id": f.lecturer_id, "score": 5 }),
            json!({ "assessment_id": f.ca_id, "student_id": f.students[1], "offering_id": f.offering_id + 1, "score": 5 }),
            json!({ "assessment_id": f.ca_id, "student_id": f.students[1], "score": "abc" }),
            json!({ "assessment_id": f.ca_id, "student_id": f.students[1], "offering_id": f.offering_id, "score": 40 }),
        ];

        let results = apply_entries(&storage, f.offering_id, f.lecturer_id, &entries)
            .await
            .unwrap();
        assert_eq!(results.len(), entries.len());

        let status: Vec<_> = results.iter().map(|r| r.status).collect();
        use MarkEntryStatus::{Accepted as A, Rejected as R};
        assert_eq!(status, [A, R, R, R, R, R, R, A]);

        let fields: Vec<_> = results.iter().map(|r| r.field.as_deref()).collect();
        assert_eq!(
            fields,
            [
                None,
                Some("score"),
                Some("score"),
                Some("assessment_id"),
                Some("student_id"),
                Some("offering_id"),
                Some("score"),
                None
            ]
        );
        assert_eq!(
            results[1].message.as_deref(),
            Some("score 61 exceeds maximum 60")
        );
        assert!(results.iter().enumerate().all(|(i, r)| r.index == i));

        let marks = storage.list_marks_by_offering(f.offering_id).await.unwrap();
        assert_eq!(marks.len(), 2);
        assert!(marks.iter().all(|m| m.record.grader_id == f.lecturer_id));
    }

    #[tokio::test]
    async fn resubmission_overwrites() {
        let db = setup().await;
        let f = fixture(&db).await;
        let storage: Arc<dyn Storage> = Arc::new(db);

        for score in [50, 55] {
            let entries = vec![json!({
                "assessment_id": f.exam_id,
                "student_id": f.students[0],
                "score": score
            })];
            let results = apply_entries(&storage, f.offering_id, f.lecturer_id, &entries)
                .await
                .unwrap();
            assert_eq!(results[0].status, MarkEntryStatus::Accepted);
        }

        let mark = storage
            .get_mark(f.exam_id, f.students[0])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(mark.record.score, 55.0);
        assert_eq!(
            storage.list_marks_by_offering(f.offering_id).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn assessment_of_another_offering_is_rejected() {
        let db = setup().await;
        let f = fixture(&db).await;
        // 考核项属于 fixture 开课，却按另一门开课提交
        let foreign = insert_assessment(&db, f.offering_id, "Quiz", 10.0, 3).await;
        let storage: Arc<dyn Storage> = Arc::new(db);

        let entries = vec![json!({
            "assessment_id": foreign,
            "student_id": f.students[0],
            "score": 10
        })];
        let results = apply_entries(&storage, f.offering_id + 1, f.lecturer_id, &entries)
            .await
            .unwrap();
        assert_eq!(results[0].status, MarkEntryStatus::Rejected);
        assert_eq!(results[0].field.as_deref(), Some("assessment_id"));
    }
}
