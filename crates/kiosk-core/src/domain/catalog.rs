use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A downloadable tool offered in the storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Price in minor currency units.
    pub price: i64,
    #[serde(default)]
    pub category: String,
}

/// A VPS plan available for provisioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpsPlan {
    pub id: Uuid,
    pub name: String,
    pub cpu_cores: u16,
    pub ram_mb: u32,
    pub disk_gb: u32,
    pub monthly_price: i64,
    #[serde(default)]
    pub region: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyProtocol {
    Http,
    Socks5,
}

/// A proxy package available for purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyPlan {
    pub id: Uuid,
    pub name: String,
    pub protocol: ProxyProtocol,
    pub pool_size: u32,
    pub monthly_price: i64,
}
