use super::entities::{Assessment, Offering, RosterStudent};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/offering.ts")]
pub struct OfferingListResponse {
    pub items: Vec<Offering>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/offering.ts")]
pub struct OfferingDetailResponse {
    pub offering: Offering,
    pub assessments: Vec<Assessment>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/offering.ts")]
pub struct RosterResponse {
    pub offering_id: i64,
    pub items: Vec<RosterStudent>,
}
