use std::cmp::Ordering;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::product::Product;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unsupported value `{value}` (expected {expected})")]
pub struct InvalidQueryValue {
    pub value: String,
    pub expected: &'static str,
}

/// Sortable product fields, named as they appear on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
    CreatedAt,
    UpdatedAt,
}

impl FromStr for SortField {
    type Err = InvalidQueryValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            other => Err(InvalidQueryValue {
                value: other.to_string(),
                expected: "name|price|createdAt|updatedAt",
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = InvalidQueryValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(InvalidQueryValue { value: other.to_string(), expected: "asc|desc" }),
        }
    }
}

/// Search criteria for the catalog. Each filter is optional and they combine
/// with logical AND.
#[derive(Clone, Debug, Default)]
pub struct ProductFilters {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
    pub sort_by: Option<SortField>,
    pub sort_order: SortOrder,
}

impl ProductFilters {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if !product.category.to_lowercase().contains(&category.to_lowercase()) {
                return false;
            }
        }
        if let Some(min_price) = self.min_price {
            if product.price < min_price {
                return false;
            }
        }
        if let Some(max_price) = self.max_price {
            if product.price > max_price {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let term = search.to_lowercase();
            if !product.name.to_lowercase().contains(&term)
                && !product.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        true
    }

    /// Filters and sorts in one pass over an owned snapshot.
    pub fn apply(&self, mut products: Vec<Product>) -> Vec<Product> {
        products.retain(|product| self.matches(product));
        if let Some(field) = self.sort_by {
            sort_products(&mut products, field, self.sort_order);
        }
        products
    }
}

/// Stable sort: products with equal keys keep their original relative order,
/// in both directions. String keys compare case-insensitively.
pub fn sort_products(products: &mut [Product], field: SortField, order: SortOrder) {
    products.sort_by(|a, b| {
        let ordering = match field {
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
