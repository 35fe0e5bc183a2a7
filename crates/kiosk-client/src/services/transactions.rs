//! Balance and ledger operations.

use std::sync::Arc;

use uuid::Uuid;

use kiosk_core::ApiError;
use kiosk_core::domain::{Transaction, TransactionKind};
use kiosk_shared::dto::DepositRequest;
use kiosk_shared::{Envelope, Paginated};

use super::{into_page, require_data};
use crate::config::paths;
use crate::executor::Executor;
use crate::request::ApiRequest;

/// Filters for the ledger listing. Absent values are not sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionFilter {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub kind: Option<TransactionKind>,
}

pub struct TransactionsService {
    executor: Arc<Executor>,
}

impl TransactionsService {
    pub fn new(executor: Arc<Executor>) -> Self {
        Self { executor }
    }

    /// GET /api/transactions
    pub async fn list(&self, filter: &TransactionFilter) -> Result<Paginated<Transaction>, ApiError> {
        let request = ApiRequest::get(paths::TRANSACTIONS)
            .context("transactions.list")
            .maybe_query("page", filter.page)
            .maybe_query("limit", filter.limit)
            .maybe_query("kind", filter.kind.map(|kind| kind.as_str()));
        let envelope: Envelope<Vec<Transaction>> = self.executor.execute(request).await?;
        Ok(into_page(envelope))
    }

    /// GET /api/transactions/{id}
    pub async fn get(&self, id: Uuid) -> Result<Transaction, ApiError> {
        let request =
            ApiRequest::get(format!("{}/{id}", paths::TRANSACTIONS)).context("transactions.get");
        let envelope: Envelope<Transaction> = self.executor.execute(request).await?;
        require_data(envelope)
    }

    /// POST /api/transactions/deposit
    pub async fn deposit(&self, request: &DepositRequest) -> Result<Transaction, ApiError> {
        let api_request = ApiRequest::post(format!("{}/deposit", paths::TRANSACTIONS))
            .context("transactions.deposit")
            .json(request)?;
        let envelope: Envelope<Transaction> = self.executor.execute(api_request).await?;
        require_data(envelope)
    }
}
