//! Pharmacy product catalog CRUD.
//!
//! Wire field names follow the catalog service (`activeIngredient`,
//! `dosageForm`, ...). Every call is scoped to a tenant.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use super::{ApiClient, ApiError};

/// Dosage forms accepted by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DosageForm {
    Tableta,
    Capsula,
    Jarabe,
    Suspension,
    Solucion,
    Crema,
    Gel,
    Pomada,
}

impl DosageForm {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tableta => "tableta",
            Self::Capsula => "capsula",
            Self::Jarabe => "jarabe",
            Self::Suspension => "suspension",
            Self::Solucion => "solucion",
            Self::Crema => "crema",
            Self::Gel => "gel",
            Self::Pomada => "pomada",
        }
    }
}

/// A catalog entry as stored by the service.
///
/// `dosage_form` stays a string here: listings may carry forms this client
/// does not know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producto_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub nombre: String,
    #[serde(rename = "activeIngredient", default)]
    pub active_ingredient: String,
    #[serde(rename = "dosageForm", default)]
    pub dosage_form: String,
    #[serde(default)]
    pub precio: f64,
    #[serde(rename = "expirationDate", default)]
    pub expiration_date: String,
    #[serde(rename = "prescriptionRequired", default)]
    pub prescription_required: bool,
}

impl Product {
    /// SKU, falling back to the product id.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.sku
            .as_deref()
            .or(self.producto_id.as_deref())
            .filter(|k| !k.trim().is_empty())
    }
}

/// User-entered fields for creating or updating a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub nombre: String,
    pub active_ingredient: String,
    pub dosage_form: DosageForm,
    pub precio: f64,
    /// `YYYY-MM-DD`, or a full ISO timestamp.
    pub expiration_date: String,
    pub prescription_required: bool,
}

impl ProductDraft {
    /// Build the wire product for `tenant_id`, optionally keyed by `sku`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Invalid`] for a blank name, a negative or non-finite
    /// price, or a malformed expiration date.
    pub fn into_product(self, tenant_id: &str, sku: Option<String>) -> Result<Product, ApiError> {
        if self.nombre.trim().is_empty() {
            return Err(ApiError::Invalid("product name is empty".to_owned()));
        }
        if !self.precio.is_finite() || self.precio < 0.0 {
            return Err(ApiError::Invalid(format!("invalid price {}", self.precio)));
        }
        Ok(Product {
            sku,
            producto_id: None,
            tenant_id: Some(tenant_id.to_owned()),
            nombre: self.nombre,
            active_ingredient: self.active_ingredient,
            dosage_form: self.dosage_form.as_str().to_owned(),
            precio: self.precio,
            expiration_date: iso_expiration(&self.expiration_date)?,
            prescription_required: self.prescription_required,
        })
    }
}

/// Turn a `YYYY-MM-DD` date into `YYYY-MM-DDT00:00:00Z`. RFC 3339
/// timestamps pass through.
///
/// # Errors
///
/// [`ApiError::Invalid`] for anything that is not a real calendar date or a
/// valid RFC 3339 timestamp.
pub fn iso_expiration(date: &str) -> Result<String, ApiError> {
    let date = date.trim();
    let invalid = |e: time::error::Parse| ApiError::Invalid(format!("expiration date {date:?}: {e}"));
    if date.contains('T') {
        OffsetDateTime::parse(date, &Rfc3339).map_err(invalid)?;
        return Ok(date.to_owned());
    }
    Date::parse(date, format_description!("[year]-[month]-[day]")).map_err(invalid)?;
    Ok(format!("{date}T00:00:00Z"))
}

/// Catalog client bound to one tenant.
#[derive(Debug, Clone)]
pub struct ProductClient {
    api: ApiClient,
    base_url: String,
    tenant_id: String,
}

impl ProductClient {
    #[must_use]
    pub fn new(api: ApiClient, base_url: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self { api, base_url: base_url.into(), tenant_id: tenant_id.into() }
    }

    #[must_use]
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}/productos/{}", self.base_url, path)
    }

    /// List the tenant's products.
    ///
    /// # Errors
    ///
    /// Transport and status failures, or [`ApiError::Parse`] when the listing
    /// is neither an array nor an object holding one.
    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let request = self
            .api
            .http()
            .get(self.url("listar"))
            .query(&[("tenant_id", self.tenant_id.as_str())]);
        let value = self.api.send_json(request).await?;
        let products = parse_listing(value)?;
        tracing::debug!(count = products.len(), tenant_id = %self.tenant_id, "listed products");
        Ok(products)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Draft validation failures and API errors.
    pub async fn create(&self, draft: ProductDraft) -> Result<Value, ApiError> {
        let product = draft.into_product(&self.tenant_id, None)?;
        let request = self.api.http().post(self.url("crear")).json(&product);
        let value = self.api.send_json(request).await?;
        tracing::info!(nombre = %product.nombre, "product created");
        Ok(value)
    }

    /// Replace the product identified by `sku`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Invalid`] for a blank SKU, draft validation failures, and
    /// API errors.
    pub async fn update(&self, sku: &str, draft: ProductDraft) -> Result<Value, ApiError> {
        let sku = require_key(sku)?;
        let product = draft.into_product(&self.tenant_id, Some(sku.to_owned()))?;
        let request = self.api.http().put(self.url("actualizar")).json(&product);
        let value = self.api.send_json(request).await?;
        tracing::info!(sku, "product updated");
        Ok(value)
    }

    /// Delete the product identified by `sku` (or product id).
    ///
    /// # Errors
    ///
    /// [`ApiError::Invalid`] for a blank key, otherwise API errors.
    pub async fn delete(&self, sku: &str) -> Result<Value, ApiError> {
        let sku = require_key(sku)?;
        let request = self
            .api
            .http()
            .delete(self.url("eliminar"))
            .json(&serde_json::json!({ "tenant_id": self.tenant_id, "sku": sku }));
        let value = self.api.send_json(request).await?;
        tracing::info!(sku, "product deleted");
        Ok(value)
    }
}

fn require_key(sku: &str) -> Result<&str, ApiError> {
    let sku = sku.trim();
    if sku.is_empty() {
        return Err(ApiError::Invalid("a SKU or product id is required".to_owned()));
    }
    Ok(sku)
}

fn parse_listing(value: Value) -> Result<Vec<Product>, ApiError> {
    let items = match value {
        Value::Array(items) => Value::Array(items),
        Value::Null => return Ok(Vec::new()),
        Value::Object(mut map) => match map.remove("productos").or_else(|| map.remove("items")) {
            Some(items @ Value::Array(_)) => items,
            _ => return Err(ApiError::Parse("product listing has no product array".to_owned())),
        },
        _ => return Err(ApiError::Parse("product listing is not an array".to_owned())),
    };
    serde_json::from_value(items).map_err(|e| ApiError::Parse(e.to_string()))
}
