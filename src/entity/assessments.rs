//! 考核项实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub offering_id: i64,
    pub name: String,
    pub weight: f64,
    pub max_score: f64,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::offerings::Entity",
        from = "Column::OfferingId",
        to = "super::offerings::Column::Id"
    )]
    Offering,
    #[sea_orm(has_many = "super::marks::Entity")]
    Marks,
}

impl Related<super::offerings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offering.def()
    }
}

impl Related<super::marks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Marks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assessment(self) -> crate::models::offerings::entities::Assessment {
        crate::models::offerings::entities::Assessment {
            id: self.id,
            offering_id: self.offering_id,
            name: self.name,
            weight: self.weight,
            max_score: self.max_score,
            position: self.position,
        }
    }
}
