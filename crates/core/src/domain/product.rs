use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::errors::ValidationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Catalog entry. Field names on the wire (and in the persisted file) are
/// camelCase; `is_active = false` marks a soft-deleted product that stays in
/// storage but is invisible to every read path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Creation payload. `name`, `price` and `category` are required by shape;
/// the rest take the documented defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub image_url: String,
}

/// Partial update payload. `None` means "leave the field untouched", so a
/// client can distinguish "not sent" from "set to the default".
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl Product {
    /// Builds a product from a draft with a fresh id and timestamps. No
    /// validation happens here; callers must run [`Product::validate`]
    /// before persisting.
    pub fn new(draft: ProductDraft) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::generate(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            stock: draft.stock,
            image_url: draft.image_url,
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }

    /// Overwrites exactly the fields present in `patch` and refreshes
    /// `updated_at`. The empty patch still bumps the timestamp; it never
    /// moves backwards.
    pub fn apply_patch(&mut self, patch: &ProductPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url = image_url.clone();
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        self.touch();
    }

    /// Marks the product soft-deleted and refreshes `updated_at`.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }

    /// Checks every field constraint and reports all violations at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        let name_len = self.name.trim().chars().count();
        if name_len < 2 || name_len > 100 {
            violations.push("name must be between 2 and 100 characters".to_string());
        }

        if self.description.chars().count() > 500 {
            violations.push("description must not exceed 500 characters".to_string());
        }

        if !self.price.is_finite() || self.price < 0.0 {
            violations.push("price must be a non-negative number".to_string());
        }

        let category_len = self.category.trim().chars().count();
        if category_len < 2 || category_len > 50 {
            violations.push("category must be between 2 and 50 characters".to_string());
        }

        if !self.image_url.is_empty() && Url::parse(&self.image_url).is_err() {
            violations.push("imageUrl must be a valid absolute URL".to_string());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations))
        }
    }
}
