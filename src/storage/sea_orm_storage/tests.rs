use super::SeaOrmStorage;
use super::test_support::{Fixture, create_user, fixture, insert_issue, setup};
use crate::entity::{grading_bands, marks};
use crate::grading::{GradingScale, ScoreRecord};
use crate::models::issues::{entities::IssueStatus, requests::IssueListQuery};
use crate::models::offerings::requests::OfferingListQuery;
use crate::models::users::entities::UserRole;
use crate::storage::Storage;
use sea_orm::{ActiveModelTrait, Set};

fn record(f: &Fixture, assessment_id: i64, student_id: i64, score: f64) -> ScoreRecord {
    ScoreRecord {
        assessment_id,
        student_id,
        offering_id: f.offering_id,
        grader_id: f.lecturer_id,
        score,
    }
}

#[tokio::test]
async fn upsert_overwrites_existing_mark() {
    let storage = setup().await;
    let f = fixture(&storage).await;

    let first = storage
        .upsert_mark(record(&f, f.exam_id, f.students[0], 70.0))
        .await
        .unwrap();
    assert_eq!(first.record.score, 70.0);

    let second = storage
        .upsert_mark(record(&f, f.exam_id, f.students[0], 85.0))
        .await
        .unwrap();
    assert_eq!(second.record.score, 85.0);
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);

    let marks = storage.list_marks_by_offering(f.offering_id).await.unwrap();
    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0].record.score, 85.0);
}

#[tokio::test]
async fn upsert_records_latest_grader() {
    let storage = setup().await;
    let f = fixture(&storage).await;
    let other_grader = create_user(&storage, "assistant", UserRole::Lecturer).await;

    storage
        .upsert_mark(record(&f, f.ca_id, f.students[1], 30.0))
        .await
        .unwrap();
    let mut update = record(&f, f.ca_id, f.students[1], 32.5);
    update.grader_id = other_grader;
    storage.upsert_mark(update).await.unwrap();

    let mark = storage
        .get_mark(f.ca_id, f.students[1])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mark.record.grader_id, other_grader);
    assert_eq!(mark.record.score, 32.5);
}

#[tokio::test]
async fn unique_index_rejects_duplicate_insert() {
    let storage = setup().await;
    let f = fixture(&storage).await;

    let row = || marks::ActiveModel {
        assessment_id: Set(f.ca_id),
        student_id: Set(f.students[0]),
        offering_id: Set(f.offering_id),
        grader_id: Set(f.lecturer_id),
        score: Set(10.0),
        created_at: Set(0),
        updated_at: Set(0),
        ..Default::default()
    };

    row().insert(&storage.db).await.unwrap();
    assert!(row().insert(&storage.db).await.is_err());
}

#[tokio::test]
async fn marks_read_back_by_offering() {
    let storage = setup().await;
    let f = fixture(&storage).await;

    for (assessment, student, score) in [
        (f.ca_id, f.students[0], 35.0),
        (f.exam_id, f.students[0], 50.0),
        (f.ca_id, f.students[1], 20.0),
    ] {
        storage
            .upsert_mark(record(&f, assessment, student, score))
            .await
            .unwrap();
    }

    let marks = storage.list_marks_by_offering(f.offering_id).await.unwrap();
    assert_eq!(marks.len(), 3);
    assert!(marks.iter().all(|m| m.record.offering_id == f.offering_id));
    assert!(
        storage
            .list_marks_by_offering(f.offering_id + 1)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(storage.get_mark(f.exam_id, f.students[1]).await.unwrap().is_none());
}

#[tokio::test]
async fn roster_and_assessments_are_ordered() {
    let storage = setup().await;
    let f = fixture(&storage).await;

    let roster = storage.list_offering_students(f.offering_id).await.unwrap();
    let names: Vec<_> = roster.iter().map(|s| s.username.as_str()).collect();
    assert_eq!(names, ["alice", "bob"]);

    assert!(
        storage
            .is_student_enrolled(f.offering_id, f.students[1])
            .await
            .unwrap()
    );
    assert!(
        !storage
            .is_student_enrolled(f.offering_id, f.lecturer_id)
            .await
            .unwrap()
    );

    let assessments = storage
        .list_assessments_by_offering(f.offering_id)
        .await
        .unwrap();
    let names: Vec<_> = assessments.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["CA", "Exam"]);
}

#[tokio::test]
async fn offerings_filter_by_lecturer() {
    let storage = setup().await;
    let f = fixture(&storage).await;

    let mine = storage
        .list_offerings_with_pagination(OfferingListQuery {
            lecturer_id: Some(f.lecturer_id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(mine.pagination.total, 1);
    assert_eq!(mine.items[0].course_code, "CSC301");

    let none = storage
        .list_offerings_with_pagination(OfferingListQuery {
            lecturer_id: Some(f.students[0]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(none.items.is_empty());

    let searched = storage
        .list_offerings_with_pagination(OfferingListQuery {
            search: Some("compil".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(searched.items.len(), 1);
}

#[tokio::test]
async fn empty_band_table_resolves_to_default_scale() {
    let storage = setup().await;

    let bands = storage.list_grade_bands().await.unwrap();
    assert!(bands.is_empty());
    let scale = GradingScale::resolve(bands).unwrap();
    assert_eq!(scale, GradingScale::default_scale());

    for (position, (label, min, max, gp)) in
        [("Pass", 50.0, 100.0, 1.0), ("Fail", 0.0, 49.0, 0.0)]
            .into_iter()
            .enumerate()
    {
        grading_bands::ActiveModel {
            label: Set(label.to_string()),
            min_score: Set(min),
            max_score: Set(max),
            grade_point: Set(gp),
            position: Set(position as i32),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap();
    }

    let bands = storage.list_grade_bands().await.unwrap();
    assert_eq!(bands[0].label, "Pass");
    let scale = GradingScale::resolve(bands).unwrap();
    assert_eq!(scale.classify_label(49.5), "Fail");
    assert_eq!(scale.classify_label(72.0), "Pass");
}

#[tokio::test]
async fn resolve_issue_only_once() {
    let storage = setup().await;
    let f = fixture(&storage).await;

    let issue_id = insert_issue(&storage, &f, f.students[0]).await;

    let open = storage
        .list_issues_with_pagination(
            f.offering_id,
            IssueListQuery {
                status: Some(IssueStatus::Open),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(open.items.len(), 1);
    assert_eq!(open.items[0].student_name.as_deref(), Some("alice"));

    let resolved = storage
        .resolve_issue(issue_id, f.lecturer_id, "Remarked, +4")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.status, IssueStatus::Resolved);
    assert_eq!(resolved.resolved_by, Some(f.lecturer_id));
    assert_eq!(resolved.response.as_deref(), Some("Remarked, +4"));
    assert!(resolved.resolved_at.is_some());

    assert!(
        storage
            .resolve_issue(issue_id, f.lecturer_id, "again")
            .await
            .unwrap()
            .is_none()
    );

    let open = storage
        .list_issues_with_pagination(
            f.offering_id,
            IssueListQuery {
                status: Some(IssueStatus::Open),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(open.pagination.total, 0);
}

#[tokio::test]
async fn users_lookup_and_count() {
    let storage = setup().await;
    assert_eq!(storage.count_users().await.unwrap(), 0);

    let id = create_user(&storage, "carol", UserRole::Lecturer).await;
    assert_eq!(storage.count_users().await.unwrap(), 1);

    let by_name = storage
        .get_user_by_username_or_email("carol")
        .await
        .unwrap()
        .unwrap();
    let by_email = storage
        .get_user_by_username_or_email("carol@example.edu")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id, id);
    assert_eq!(by_email.id, id);
    assert_eq!(by_name.role, UserRole::Lecturer);

    assert!(storage.update_last_login(id).await.unwrap());
    let user = storage.get_user_by_id(id).await.unwrap().unwrap();
    assert!(user.last_login.is_some());
}

#[test]
fn database_url_is_inferred() {
    assert_eq!(
        SeaOrmStorage::build_database_url("gradely.db").unwrap(),
        "sqlite://gradely.db?mode=rwc"
    );
    assert_eq!(
        SeaOrmStorage::build_database_url(":memory:").unwrap(),
        "sqlite::memory:"
    );
    assert!(SeaOrmStorage::build_database_url("postgres://localhost/gradely").is_ok());
    assert!(SeaOrmStorage::build_database_url("ftp://nowhere").is_err());
}
