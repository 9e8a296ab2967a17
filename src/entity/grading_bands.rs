//! 评分等级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grading_bands")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub label: String,
    pub min_score: f64,
    pub max_score: f64,
    pub grade_point: f64,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_band(self) -> crate::grading::GradeBand {
        crate::grading::GradeBand::new(self.label, self.min_score, self.max_score, self.grade_point)
    }
}
