use super::SeaOrmStorage;
use crate::entity::grading_bands::{Column, Entity as GradingBands};
use crate::errors::{GradelyError, Result};
use crate::grading::GradeBand;
use sea_orm::{EntityTrait, QueryOrder};

impl SeaOrmStorage {
    /// 按 position 列出已配置的评分等级
    pub async fn list_grade_bands_impl(&self) -> Result<Vec<GradeBand>> {
        let bands = GradingBands::find()
            .order_by_asc(Column::Position)
            .all(&self.db)
            .await
            .map_err(|e| GradelyError::database_operation(format!("查询评分等级失败: {e}")))?;

        Ok(bands.into_iter().map(|m| m.into_band()).collect())
    }
}
