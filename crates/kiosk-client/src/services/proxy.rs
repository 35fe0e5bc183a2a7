//! Proxy package operations.

use std::sync::Arc;

use uuid::Uuid;

use kiosk_core::ApiError;
use kiosk_core::domain::{OrderReceipt, ProxyPlan};
use kiosk_shared::dto::CreateProxyOrderRequest;
use kiosk_shared::{Envelope, Paginated};

use super::{into_page, require_data, PageQuery};
use crate::config::paths;
use crate::executor::Executor;
use crate::request::ApiRequest;

pub struct ProxyService {
    executor: Arc<Executor>,
}

impl ProxyService {
    pub fn new(executor: Arc<Executor>) -> Self {
        Self { executor }
    }

    /// GET /api/proxy/plans
    pub async fn plans(&self, page: PageQuery) -> Result<Paginated<ProxyPlan>, ApiError> {
        let request = ApiRequest::get(format!("{}/plans", paths::PROXY))
            .context("proxy.plans")
            .maybe_query("page", page.page)
            .maybe_query("limit", page.limit);
        let envelope: Envelope<Vec<ProxyPlan>> = self.executor.execute(request).await?;
        Ok(into_page(envelope))
    }

    /// GET /api/proxy/plans/{id}
    pub async fn get_plan(&self, id: Uuid) -> Result<ProxyPlan, ApiError> {
        let request =
            ApiRequest::get(format!("{}/plans/{id}", paths::PROXY)).context("proxy.get_plan");
        let envelope: Envelope<ProxyPlan> = self.executor.execute(request).await?;
        require_data(envelope)
    }

    /// POST /api/proxy/orders
    pub async fn order(&self, request: &CreateProxyOrderRequest) -> Result<OrderReceipt, ApiError> {
        let api_request = ApiRequest::post(format!("{}/orders", paths::PROXY))
            .context("proxy.order")
            .json(request)?;
        let envelope: Envelope<OrderReceipt> = self.executor.execute(api_request).await?;
        require_data(envelope)
    }
}
