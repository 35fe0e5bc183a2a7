//! Purchase operations.

use std::sync::Arc;

use uuid::Uuid;

use kiosk_core::ApiError;
use kiosk_core::domain::{Order, OrderReceipt};
use kiosk_shared::dto::CreateOrderRequest;
use kiosk_shared::{Envelope, Paginated};

use super::{into_page, outcome, require_data, PageQuery};
use crate::config::paths;
use crate::executor::Executor;
use crate::request::ApiRequest;

pub struct OrdersService {
    executor: Arc<Executor>,
}

impl OrdersService {
    pub fn new(executor: Arc<Executor>) -> Self {
        Self { executor }
    }

    /// POST /api/orders
    ///
    /// Provisioning responses do not reliably carry the envelope, so they
    /// bypass envelope enforcement and go through the dual-shape
    /// normalization step instead.
    pub async fn create(&self, request: &CreateOrderRequest) -> Result<OrderReceipt, ApiError> {
        let api_request = ApiRequest::post(paths::ORDERS)
            .context("orders.create")
            .json(request)?;
        let raw = self.executor.execute_value(api_request).await?;
        outcome::normalize(&raw).into_result()
    }

    /// GET /api/orders
    pub async fn list(&self, page: PageQuery) -> Result<Paginated<Order>, ApiError> {
        let request = ApiRequest::get(paths::ORDERS)
            .context("orders.list")
            .maybe_query("page", page.page)
            .maybe_query("limit", page.limit);
        let envelope: Envelope<Vec<Order>> = self.executor.execute(request).await?;
        Ok(into_page(envelope))
    }

    /// GET /api/orders/{id}
    pub async fn get(&self, id: Uuid) -> Result<Order, ApiError> {
        let request = ApiRequest::get(format!("{}/{id}", paths::ORDERS)).context("orders.get");
        let envelope: Envelope<Order> = self.executor.execute(request).await?;
        require_data(envelope)
    }

    /// POST /api/orders/{id}/cancel
    pub async fn cancel(&self, id: Uuid) -> Result<(), ApiError> {
        let request =
            ApiRequest::post(format!("{}/{id}/cancel", paths::ORDERS)).context("orders.cancel");
        self.executor.execute::<serde_json::Value>(request).await?;
        Ok(())
    }
}
