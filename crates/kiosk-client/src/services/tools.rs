//! Tool catalog operations.

use std::sync::Arc;

use uuid::Uuid;

use kiosk_core::ApiError;
use kiosk_core::domain::Tool;
use kiosk_shared::{Envelope, Paginated};

use super::{into_page, require_data};
use crate::config::paths;
use crate::executor::Executor;
use crate::request::ApiRequest;

/// Filters for the tool listing. Absent values are not sent.
#[derive(Debug, Clone, Default)]
pub struct ToolFilter {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub category: Option<String>,
}

pub struct ToolsService {
    executor: Arc<Executor>,
}

impl ToolsService {
    pub fn new(executor: Arc<Executor>) -> Self {
        Self { executor }
    }

    /// GET /api/tools
    pub async fn list(&self, filter: &ToolFilter) -> Result<Paginated<Tool>, ApiError> {
        let request = ApiRequest::get(paths::TOOLS)
            .context("tools.list")
            .maybe_query("page", filter.page)
            .maybe_query("limit", filter.limit)
            .maybe_query("search", filter.search.clone())
            .maybe_query("category", filter.category.clone());
        let envelope: Envelope<Vec<Tool>> = self.executor.execute(request).await?;
        Ok(into_page(envelope))
    }

    /// GET /api/tools/{id}
    pub async fn get(&self, id: Uuid) -> Result<Tool, ApiError> {
        let request =
            ApiRequest::get(format!("{}/{id}", paths::TOOLS)).context("tools.get");
        let envelope: Envelope<Tool> = self.executor.execute(request).await?;
        require_data(envelope)
    }
}
