pub mod list;
pub mod resolve;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::issues::requests::{IssueQueryParams, ResolveIssueRequest};
use crate::storage::Storage;

pub struct IssueService {
    storage: Option<Arc<dyn Storage>>,
}

impl IssueService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::storage_from_request(&self.storage, request)
    }

    pub async fn list_issues(
        &self,
        request: &HttpRequest,
        offering_id: i64,
        query: IssueQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_issues(self, request, offering_id, query).await
    }

    pub async fn resolve_issue(
        &self,
        request: &HttpRequest,
        issue_id: i64,
        body: ResolveIssueRequest,
    ) -> ActixResult<HttpResponse> {
        resolve::resolve_issue(self, request, issue_id, body).await
    }
}
