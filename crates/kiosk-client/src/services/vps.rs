//! VPS plan and provisioning operations.

use std::sync::Arc;

use uuid::Uuid;

use kiosk_core::ApiError;
use kiosk_core::domain::{OrderReceipt, VpsPlan};
use kiosk_shared::dto::CreateVpsRequest;
use kiosk_shared::{Envelope, Paginated};

use super::{into_page, outcome, require_data, PageQuery};
use crate::config::paths;
use crate::executor::Executor;
use crate::request::ApiRequest;

pub struct VpsService {
    executor: Arc<Executor>,
}

impl VpsService {
    pub fn new(executor: Arc<Executor>) -> Self {
        Self { executor }
    }

    /// GET /api/vps/plans
    pub async fn plans(&self, page: PageQuery) -> Result<Paginated<VpsPlan>, ApiError> {
        let request = ApiRequest::get(format!("{}/plans", paths::VPS))
            .context("vps.plans")
            .maybe_query("page", page.page)
            .maybe_query("limit", page.limit);
        let envelope: Envelope<Vec<VpsPlan>> = self.executor.execute(request).await?;
        Ok(into_page(envelope))
    }

    /// GET /api/vps/plans/{id}
    pub async fn get_plan(&self, id: Uuid) -> Result<VpsPlan, ApiError> {
        let request = ApiRequest::get(format!("{}/plans/{id}", paths::VPS)).context("vps.get_plan");
        let envelope: Envelope<VpsPlan> = self.executor.execute(request).await?;
        require_data(envelope)
    }

    /// POST /api/vps
    ///
    /// Shares the dual-shape success normalization with order creation;
    /// the provisioning backend answers with the same inconsistent wire
    /// shapes.
    pub async fn create(&self, request: &CreateVpsRequest) -> Result<OrderReceipt, ApiError> {
        let api_request = ApiRequest::post(paths::VPS)
            .context("vps.create")
            .json(request)?;
        let raw = self.executor.execute_value(api_request).await?;
        outcome::normalize(&raw).into_result()
    }
}
