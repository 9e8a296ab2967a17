pub mod access;
pub mod detail;
pub mod list;
pub mod roster;

pub(crate) use access::load_accessible_offering;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::offerings::requests::OfferingQueryParams;
use crate::storage::Storage;

pub struct OfferingService {
    storage: Option<Arc<dyn Storage>>,
}

impl OfferingService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::storage_from_request(&self.storage, request)
    }

    pub async fn list_offerings(
        &self,
        request: &HttpRequest,
        query: OfferingQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_offerings(self, request, query).await
    }

    pub async fn get_offering(
        &self,
        request: &HttpRequest,
        offering_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_offering(self, request, offering_id).await
    }

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        offering_id: i64,
    ) -> ActixResult<HttpResponse> {
        roster::list_students(self, request, offering_id).await
    }
}
