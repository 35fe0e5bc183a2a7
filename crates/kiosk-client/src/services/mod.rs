//! Per-resource façades over the request executor.
//!
//! Each service owns its resource's path building and payload extraction,
//! and nothing else; every failure is a classified error from the executor.

mod auth;
mod files;
mod orders;
mod outcome;
mod proxy;
mod tools;
mod transactions;
mod users;
mod vps;

pub use auth::{AuthService, AuthSession};
pub use files::{DownloadLink, FilesService};
pub use orders::OrdersService;
pub use proxy::ProxyService;
pub use tools::{ToolFilter, ToolsService};
pub use transactions::{TransactionFilter, TransactionsService};
pub use users::UsersService;
pub use vps::VpsService;

use std::sync::Arc;

use kiosk_core::ApiError;
use kiosk_core::ports::{ErrorMonitor, HttpTransport, TokenStore};
use kiosk_shared::{Envelope, PageMeta, Paginated};

use crate::config::ClientConfig;
use crate::executor::Executor;

/// Page selection for list endpoints. Absent values let the server pick.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// All resource façades over one shared executor.
pub struct KioskApi {
    pub auth: AuthService,
    pub users: UsersService,
    pub tools: ToolsService,
    pub files: FilesService,
    pub transactions: TransactionsService,
    pub proxy: ProxyService,
    pub orders: OrdersService,
    pub vps: VpsService,
}

impl KioskApi {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn TokenStore>,
        monitor: Arc<dyn ErrorMonitor>,
    ) -> Self {
        let executor = Arc::new(Executor::new(config, transport, store.clone(), monitor));
        Self {
            auth: AuthService::new(executor.clone(), store),
            users: UsersService::new(executor.clone()),
            tools: ToolsService::new(executor.clone()),
            files: FilesService::new(executor.clone()),
            transactions: TransactionsService::new(executor.clone()),
            proxy: ProxyService::new(executor.clone()),
            orders: OrdersService::new(executor.clone()),
            vps: VpsService::new(executor),
        }
    }
}

/// Collection envelope to typed page; missing metadata degrades to a
/// single-page view.
pub(crate) fn into_page<T>(envelope: Envelope<Vec<T>>) -> Paginated<T> {
    let items = envelope.data.unwrap_or_default();
    let meta = envelope
        .meta
        .unwrap_or_else(|| PageMeta::new(items.len() as u64, 1, (items.len() as u32).max(1)));
    Paginated::new(items, meta)
}

/// Unwrap the payload of an endpoint that must return one.
pub(crate) fn require_data<T>(envelope: Envelope<T>) -> Result<T, ApiError> {
    envelope.data.ok_or_else(|| {
        ApiError::api("The server response was missing its payload", 500, None, None)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_page_synthesizes_metadata_when_absent() {
        let page = into_page(Envelope::ok(vec![1, 2, 3]));
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.meta.total, 3);
        assert_eq!(page.meta.total_pages, 1);
        assert!(!page.meta.has_next);
    }

    #[test]
    fn second_page_of_twelve_items_preserves_server_metadata() {
        let envelope: Envelope<Vec<u32>> = serde_json::from_str(
            r#"{
                "success": true, "message": "OK", "data": [11, 12],
                "meta": { "total": 12, "page": 2, "limit": 10, "totalPages": 2, "hasNext": false, "hasPrevious": true }
            }"#,
        )
        .unwrap();
        let page = into_page(envelope);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.meta.total_pages, 2);
        assert!(!page.meta.has_next);
        assert!(page.meta.has_previous);
    }

    #[test]
    fn require_data_rejects_empty_payloads() {
        let envelope: Envelope<u32> = Envelope {
            success: true,
            message: "OK".into(),
            data: None,
            errors: None,
            meta: None,
        };
        assert!(require_data(envelope).is_err());
    }
}
