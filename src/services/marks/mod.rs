pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::marks::requests::SubmitMarksRequest;
use crate::storage::Storage;

pub struct MarkService {
    storage: Option<Arc<dyn Storage>>,
}

impl MarkService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::storage_from_request(&self.storage, request)
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub async fn list_marks(
        &self,
        request: &HttpRequest,
        offering_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_marks(self, request, offering_id).await
    }

    pub async fn submit_marks(
        &self,
        request: &HttpRequest,
        offering_id: i64,
        body: SubmitMarksRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_marks(self, request, offering_id, body).await
    }
}
