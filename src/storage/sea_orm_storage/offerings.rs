//! 开课、选课名单与考核项存储操作

use super::SeaOrmStorage;
use crate::entity::assessments::{Column as AssessmentColumn, Entity as Assessments};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::offerings::{Column, Entity as Offerings};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{GradelyError, Result};
use crate::models::{
    PaginationInfo, page_bounds,
    offerings::{
        entities::{Assessment, Offering, RosterStudent},
        requests::OfferingListQuery,
        responses::OfferingListResponse,
    },
};
use crate::utils::escape_like_pattern;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

impl SeaOrmStorage {
    /// 分页列出开课
    pub async fn list_offerings_with_pagination_impl(
        &self,
        query: OfferingListQuery,
    ) -> Result<OfferingListResponse> {
        let (page, size) = page_bounds(query.page, query.size);

        let mut select = Offerings::find();

        // 授课教师筛选
        if let Some(lecturer_id) = query.lecturer_id {
            select = select.filter(Column::LecturerId.eq(lecturer_id));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::CourseCode.contains(&escaped))
                    .add(Column::CourseTitle.contains(&escaped)),
            );
        }

        select = select
            .order_by_desc(Column::Session)
            .order_by_asc(Column::CourseCode);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| GradelyError::database_operation(format!("查询开课总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GradelyError::database_operation(format!("查询开课页数失败: {e}")))?;

        let offerings = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GradelyError::database_operation(format!("查询开课列表失败: {e}")))?;

        Ok(OfferingListResponse {
            items: offerings.into_iter().map(|m| m.into_offering()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 通过 ID 获取开课
    pub async fn get_offering_by_id_impl(&self, offering_id: i64) -> Result<Option<Offering>> {
        let result = Offerings::find_by_id(offering_id)
            .one(&self.db)
            .await
            .map_err(|e| GradelyError::database_operation(format!("查询开课失败: {e}")))?;

        Ok(result.map(|m| m.into_offering()))
    }

    /// 列出选课学生，按用户名排序
    pub async fn list_offering_students_impl(
        &self,
        offering_id: i64,
    ) -> Result<Vec<RosterStudent>> {
        let rows = Enrollments::find()
            .find_also_related(Users)
            .filter(EnrollmentColumn::OfferingId.eq(offering_id))
            .order_by_asc(UserColumn::Username)
            .all(&self.db)
            .await
            .map_err(|e| GradelyError::database_operation(format!("查询选课名单失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, user)| {
                let user = user?;
                Some(RosterStudent {
                    student_id: enrollment.student_id,
                    username: user.username,
                    display_name: user.display_name,
                    email: user.email,
                    enrolled_at: DateTime::<Utc>::from_timestamp(enrollment.enrolled_at, 0)
                        .unwrap_or_default(),
                })
            })
            .collect())
    }

    /// 学生是否在选课名单中
    pub async fn is_student_enrolled_impl(&self, offering_id: i64, student_id: i64) -> Result<bool> {
        let count = Enrollments::find()
            .filter(
                Condition::all()
                    .add(EnrollmentColumn::OfferingId.eq(offering_id))
                    .add(EnrollmentColumn::StudentId.eq(student_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| GradelyError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(count > 0)
    }

    /// 列出开课的考核项
    pub async fn list_assessments_by_offering_impl(
        &self,
        offering_id: i64,
    ) -> Result<Vec<Assessment>> {
        let assessments = Assessments::find()
            .filter(AssessmentColumn::OfferingId.eq(offering_id))
            .order_by_asc(AssessmentColumn::Position)
            .order_by_asc(AssessmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| GradelyError::database_operation(format!("查询考核项失败: {e}")))?;

        Ok(assessments
            .into_iter()
            .map(|m| m.into_assessment())
            .collect())
    }
}
