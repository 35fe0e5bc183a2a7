//! Stored file operations.

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use kiosk_core::ApiError;
use kiosk_core::domain::StoredFile;
use kiosk_shared::{Envelope, Paginated};

use super::{into_page, require_data, PageQuery};
use crate::config::paths;
use crate::executor::Executor;
use crate::request::ApiRequest;

/// A short-lived signed download link.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadLink {
    pub url: String,
}

pub struct FilesService {
    executor: Arc<Executor>,
}

impl FilesService {
    pub fn new(executor: Arc<Executor>) -> Self {
        Self { executor }
    }

    /// GET /api/files
    pub async fn list(&self, page: PageQuery) -> Result<Paginated<StoredFile>, ApiError> {
        let request = ApiRequest::get(paths::FILES)
            .context("files.list")
            .maybe_query("page", page.page)
            .maybe_query("limit", page.limit);
        let envelope: Envelope<Vec<StoredFile>> = self.executor.execute(request).await?;
        Ok(into_page(envelope))
    }

    /// GET /api/files/{id}
    pub async fn get(&self, id: Uuid) -> Result<StoredFile, ApiError> {
        let request = ApiRequest::get(format!("{}/{id}", paths::FILES)).context("files.get");
        let envelope: Envelope<StoredFile> = self.executor.execute(request).await?;
        require_data(envelope)
    }

    /// GET /api/files/{id}/download
    pub async fn download_link(&self, id: Uuid) -> Result<DownloadLink, ApiError> {
        let request = ApiRequest::get(format!("{}/{id}/download", paths::FILES))
            .context("files.download_link");
        let envelope: Envelope<DownloadLink> = self.executor.execute(request).await?;
        require_data(envelope)
    }
}
