//! 成绩存储操作
//!
//! 写入走单条 `INSERT ... ON CONFLICT (assessment_id, student_id) DO UPDATE`，
//! 由唯一索引保证同一学生同一考核项只有一条记录，并发写入时后写者覆盖。

use super::SeaOrmStorage;
use crate::entity::marks::{ActiveModel, Column, Entity as Marks};
use crate::errors::{GradelyError, Result};
use crate::models::marks::entities::{Mark, UpsertMark};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 写入或覆盖成绩，已有记录保留 id 与 created_at
    pub async fn upsert_mark_impl(&self, mark: UpsertMark) -> Result<Mark> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assessment_id: Set(mark.assessment_id),
            student_id: Set(mark.student_id),
            offering_id: Set(mark.offering_id),
            grader_id: Set(mark.grader_id),
            score: Set(mark.score),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Marks::insert(model)
            .on_conflict(
                OnConflict::columns([Column::AssessmentId, Column::StudentId])
                    .update_columns([Column::Score, Column::GraderId, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| GradelyError::database_operation(format!("保存成绩失败: {e}")))?;

        self.get_mark_impl(mark.assessment_id, mark.student_id)
            .await?
            .ok_or_else(|| {
                GradelyError::database_operation(format!(
                    "成绩保存后读取失败: assessment {} student {}",
                    mark.assessment_id, mark.student_id
                ))
            })
    }

    /// 按 (assessment_id, student_id) 获取成绩
    pub async fn get_mark_impl(&self, assessment_id: i64, student_id: i64) -> Result<Option<Mark>> {
        let result = Marks::find()
            .filter(
                Condition::all()
                    .add(Column::AssessmentId.eq(assessment_id))
                    .add(Column::StudentId.eq(student_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| GradelyError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_mark()))
    }

    /// 列出开课的全部成绩
    pub async fn list_marks_by_offering_impl(&self, offering_id: i64) -> Result<Vec<Mark>> {
        let marks = Marks::find()
            .filter(Column::OfferingId.eq(offering_id))
            .order_by_asc(Column::StudentId)
            .order_by_asc(Column::AssessmentId)
            .all(&self.db)
            .await
            .map_err(|e| GradelyError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(marks.into_iter().map(|m| m.into_mark()).collect())
    }
}
