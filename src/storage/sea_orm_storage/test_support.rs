//! 测试用的内存 SQLite 存储与基础数据

use super::SeaOrmStorage;
use crate::config::DatabaseConfig;
use crate::entity::{assessments, enrollments, issues, offerings};
use crate::models::issues::entities::IssueStatus;
use crate::models::users::{
    entities::{UserRole, UserStatus},
    requests::CreateUserRequest,
};
use crate::storage::Storage;
use sea_orm::{ActiveModelTrait, Set};

pub(crate) async fn setup() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::connect(&config).await.unwrap()
}

pub(crate) async fn create_user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> i64 {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.edu"),
            password: "hash".to_string(),
            role,
            status: UserStatus::Active,
            display_name: None,
        })
        .await
        .unwrap()
        .id
}

/// 一门开课：一位教师，两名学生，两个考核项（CA 40 分，Exam 60 分）
pub(crate) struct Fixture {
    pub lecturer_id: i64,
    pub offering_id: i64,
    pub students: [i64; 2],
    pub ca_id: i64,
    pub exam_id: i64,
}

pub(crate) async fn fixture(storage: &SeaOrmStorage) -> Fixture {
    let lecturer_id = create_user(storage, "lecturer", UserRole::Lecturer).await;
    let s1 = create_user(storage, "alice", UserRole::Student).await;
    let s2 = create_user(storage, "bob", UserRole::Student).await;

    let offering = offerings::ActiveModel {
        course_code: Set("CSC301".to_string()),
        course_title: Set("Compilers".to_string()),
        session: Set("2025/2026".to_string()),
        semester: Set("first".to_string()),
        lecturer_id: Set(lecturer_id),
        created_at: Set(0),
        updated_at: Set(0),
        ..Default::default()
    }
    .insert(&storage.db)
    .await
    .unwrap();

    for student_id in [s1, s2] {
        enrollments::ActiveModel {
            offering_id: Set(offering.id),
            student_id: Set(student_id),
            enrolled_at: Set(0),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap();
    }

    // position 倒序插入，验证读取时按 position 排序
    let exam = insert_assessment(storage, offering.id, "Exam", 60.0, 2).await;
    let ca = insert_assessment(storage, offering.id, "CA", 40.0, 1).await;

    Fixture {
        lecturer_id,
        offering_id: offering.id,
        students: [s1, s2],
        ca_id: ca,
        exam_id: exam,
    }
}

pub(crate) async fn insert_assessment(
    storage: &SeaOrmStorage,
    offering_id: i64,
    name: &str,
    max_score: f64,
    position: i32,
) -> i64 {
    assessments::ActiveModel {
        offering_id: Set(offering_id),
        name: Set(name.to_string()),
        weight: Set(max_score),
        max_score: Set(max_score),
        position: Set(position),
        ..Default::default()
    }
    .insert(&storage.db)
    .await
    .unwrap()
    .id
}

pub(crate) async fn insert_issue(storage: &SeaOrmStorage, f: &Fixture, student_id: i64) -> i64 {
    issues::ActiveModel {
        offering_id: Set(f.offering_id),
        student_id: Set(student_id),
        assessment_id: Set(Some(f.exam_id)),
        title: Set("Exam script not counted".to_string()),
        description: Set("Question 4 was not marked".to_string()),
        status: Set(IssueStatus::Open.to_string()),
        created_at: Set(0),
        ..Default::default()
    }
    .insert(&storage.db)
    .await
    .unwrap()
    .id
}
