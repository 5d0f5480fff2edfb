//! Purchase registration and history.

#[cfg(test)]
#[path = "purchases_test.rs"]
mod purchases_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiClient, ApiError};

/// One line of a purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductItem {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

impl ProductItem {
    /// Parse `ID:NAME:QTY:PRICE`. The name may itself contain colons.
    ///
    /// # Errors
    ///
    /// [`ApiError::Invalid`] when a field is missing or not a number.
    pub fn parse(spec: &str) -> Result<Self, ApiError> {
        let invalid = || ApiError::Invalid(format!("expected ID:NAME:QTY:PRICE, got {spec:?}"));
        let (product_id, rest) = spec.split_once(':').ok_or_else(invalid)?;
        let (rest, price) = rest.rsplit_once(':').ok_or_else(invalid)?;
        let (name, quantity) = rest.rsplit_once(':').ok_or_else(invalid)?;
        if product_id.trim().is_empty() || name.trim().is_empty() {
            return Err(invalid());
        }
        let quantity: u32 = quantity.trim().parse().map_err(|_| invalid())?;
        let price: f64 = price.trim().parse().map_err(|_| invalid())?;
        if quantity == 0 || !price.is_finite() || price < 0.0 {
            return Err(invalid());
        }
        Ok(Self {
            product_id: product_id.trim().to_owned(),
            name: name.trim().to_owned(),
            quantity,
            price,
        })
    }

    #[must_use]
    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// Sum of all line subtotals.
#[must_use]
pub fn total(items: &[ProductItem]) -> f64 {
    items.iter().map(ProductItem::subtotal).sum()
}

/// Body of a registration call.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseRequest {
    pub token: String,
    pub tenant_id: String,
    pub user_id: String,
    pub products: Vec<ProductItem>,
    pub total: f64,
}

/// History entries are always completed purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Completed,
}

/// A purchase as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Purchase {
    pub compra_id: String,
    pub user_id: String,
    pub products: Vec<ProductItem>,
    pub total: f64,
    pub fecha: String,
    pub status: PurchaseStatus,
}

/// A purchase as returned by the history endpoint.
#[derive(Debug, Deserialize)]
struct RawPurchase {
    #[serde(default)]
    purchase_id: String,
    #[serde(default)]
    user_tenant: Option<String>,
    #[serde(default)]
    products: Vec<ProductItem>,
    #[serde(default)]
    total: f64,
    #[serde(rename = "createdAt", default)]
    created_at: String,
}

impl RawPurchase {
    /// The history endpoint carries no status; listed purchases are complete.
    fn into_purchase(self, fallback_user: &str) -> Purchase {
        let user_id = self
            .user_tenant
            .as_deref()
            .and_then(|ut| ut.split('#').nth(1))
            .filter(|u| !u.is_empty())
            .unwrap_or(fallback_user)
            .to_owned();
        Purchase {
            compra_id: self.purchase_id,
            user_id,
            products: self.products,
            total: self.total,
            fecha: self.created_at,
            status: PurchaseStatus::Completed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PurchaseClient {
    api: ApiClient,
    base_url: String,
    tenant_id: String,
}

impl PurchaseClient {
    #[must_use]
    pub fn new(api: ApiClient, base_url: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self { api, base_url: base_url.into(), tenant_id: tenant_id.into() }
    }

    /// Register a purchase of `items` for `user_id`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Invalid`] for an empty item list, otherwise API errors.
    pub async fn register(&self, token: &str, user_id: &str, items: Vec<ProductItem>) -> Result<Value, ApiError> {
        if items.is_empty() {
            return Err(ApiError::Invalid("a purchase needs at least one product".to_owned()));
        }
        let body = PurchaseRequest {
            token: token.to_owned(),
            tenant_id: self.tenant_id.clone(),
            user_id: user_id.to_owned(),
            total: total(&items),
            products: items,
        };
        let request = self
            .api
            .http()
            .post(format!("{}/compras/registrar-compra", self.base_url))
            .json(&body);
        let value = self.api.send_json(request).await?;
        tracing::info!(user_id, total = body.total, lines = body.products.len(), "purchase registered");
        Ok(value)
    }

    /// List the purchases of `user_id`.
    ///
    /// A response that is not an array yields an empty history.
    ///
    /// # Errors
    ///
    /// API errors, or [`ApiError::Parse`] for malformed entries.
    pub async fn list(&self, token: &str, user_id: &str) -> Result<Vec<Purchase>, ApiError> {
        let request = self
            .api
            .http()
            .get(format!("{}/compras/listar-compras", self.base_url))
            .query(&[("token", token), ("tenant_id", self.tenant_id.as_str()), ("user_id", user_id)]);
        let value = self.api.send_json(request).await?;
        let Value::Array(_) = value else {
            tracing::debug!("purchase history is not an array; treating as empty");
            return Ok(Vec::new());
        };
        let raw: Vec<RawPurchase> = serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(raw.into_iter().map(|p| p.into_purchase(user_id)).collect())
    }
}
