pub mod export;
pub mod scale;
pub mod sheet;
pub mod statistics;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct ResultService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::storage_from_request(&self.storage, request)
    }

    pub async fn get_results(
        &self,
        request: &HttpRequest,
        offering_id: i64,
    ) -> ActixResult<HttpResponse> {
        summary::get_results(self, request, offering_id).await
    }

    pub async fn get_statistics(
        &self,
        request: &HttpRequest,
        offering_id: i64,
    ) -> ActixResult<HttpResponse> {
        statistics::get_statistics(self, request, offering_id).await
    }

    pub async fn export_results(
        &self,
        request: &HttpRequest,
        offering_id: i64,
    ) -> ActixResult<HttpResponse> {
        export::export_results(self, request, offering_id).await
    }

    pub async fn get_grading_scale(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        scale::get_grading_scale(self, request).await
    }
}
