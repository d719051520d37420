use serde::Deserialize;
use uuid::Uuid;

use tienda_core::config::PaginationConfig;
use tienda_core::domain::product::ProductId;
use tienda_core::query::{ProductFilters, SortField, SortOrder};

/// Raw listing query parameters, exactly as they arrived. Everything is kept
/// as a string so the gate can report all violations in one response instead
/// of stopping at the first deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Gate-approved listing query: well-typed, range-checked values only.
#[derive(Debug)]
pub struct ListQuery {
    pub page: usize,
    pub limit: usize,
    pub filters: ProductFilters,
}

/// Validation gate for `GET /api/products`. Collects every violation.
pub fn parse_list_params(
    params: ListParams,
    pagination: &PaginationConfig,
) -> Result<ListQuery, Vec<String>> {
    let mut violations = Vec::new();

    let page = match params.page.as_deref().map(str::trim) {
        None | Some("") => 1,
        Some(raw) => match raw.parse::<usize>() {
            Ok(page) if page >= 1 => page,
            _ => {
                violations.push("page must be a positive integer".to_string());
                1
            }
        },
    };

    let limit = match params.limit.as_deref().map(str::trim) {
        None | Some("") => pagination.default_limit,
        Some(raw) => match raw.parse::<usize>() {
            Ok(limit) if (1..=pagination.max_limit).contains(&limit) => limit,
            _ => {
                violations.push(format!(
                    "limit must be an integer between 1 and {}",
                    pagination.max_limit
                ));
                pagination.default_limit
            }
        },
    };

    // Filters carry the trimmed values; surrounding whitespace is never part
    // of the match.
    let category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    if let Some(category) = &category {
        let len = category.chars().count();
        if !(2..=50).contains(&len) {
            violations.push("category must be between 2 and 50 characters".to_string());
        }
    }

    let min_price = parse_price(params.min_price.as_deref(), "minPrice", &mut violations);
    let max_price = parse_price(params.max_price.as_deref(), "maxPrice", &mut violations);

    let search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    if let Some(search) = &search {
        if search.chars().count() > 100 {
            violations.push("search must be between 1 and 100 characters".to_string());
        }
    }

    let sort_by = match params.sort_by.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match raw.parse::<SortField>() {
            Ok(field) => Some(field),
            Err(_) => {
                violations.push("sortBy must be one of name|price|createdAt|updatedAt".to_string());
                None
            }
        },
    };

    let sort_order = match params.sort_order.as_deref().map(str::trim) {
        None | Some("") => SortOrder::default(),
        Some(raw) => match raw.parse::<SortOrder>() {
            Ok(order) => order,
            Err(_) => {
                violations.push("sortOrder must be one of asc|desc".to_string());
                SortOrder::default()
            }
        },
    };

    if !violations.is_empty() {
        return Err(violations);
    }

    Ok(ListQuery {
        page,
        limit,
        filters: ProductFilters { category, min_price, max_price, search, sort_by, sort_order },
    })
}

fn parse_price(raw: Option<&str>, field: &str, violations: &mut Vec<String>) -> Option<f64> {
    let raw = raw.map(str::trim).filter(|value| !value.is_empty())?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        _ => {
            violations.push(format!("{field} must be a non-negative number"));
            None
        }
    }
}

/// Gate for path identifiers: must be UUID-shaped.
pub fn parse_product_id(raw: &str) -> Result<ProductId, Vec<String>> {
    Uuid::parse_str(raw.trim())
        .map(ProductId)
        .map_err(|_| vec!["product id must be a valid UUID".to_string()])
}

#[cfg(test)]
mod tests {
    use tienda_core::config::PaginationConfig;
    use tienda_core::query::{SortField, SortOrder};

    use crate::validation::{parse_list_params, parse_product_id, ListParams};

    fn pagination() -> PaginationConfig {
        PaginationConfig { default_limit: 10, max_limit: 100 }
    }

    #[test]
    fn empty_params_use_defaults() {
        let query = parse_list_params(ListParams::default(), &pagination()).expect("valid");

        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert!(query.filters.category.is_none());
        assert!(query.filters.sort_by.is_none());
        assert_eq!(query.filters.sort_order, SortOrder::Asc);
    }

    #[test]
    fn well_formed_params_flow_through() {
        let query = parse_list_params(
            ListParams {
                page: Some("2".to_string()),
                limit: Some("25".to_string()),
                category: Some("Audio".to_string()),
                min_price: Some("10".to_string()),
                max_price: Some("500.50".to_string()),
                search: Some("inalámbrico".to_string()),
                sort_by: Some("price".to_string()),
                sort_order: Some("desc".to_string()),
            },
            &pagination(),
        )
        .expect("valid");

        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 25);
        assert_eq!(query.filters.category.as_deref(), Some("Audio"));
        assert_eq!(query.filters.min_price, Some(10.0));
        assert_eq!(query.filters.max_price, Some(500.5));
        assert_eq!(query.filters.sort_by, Some(SortField::Price));
        assert_eq!(query.filters.sort_order, SortOrder::Desc);
    }

    #[test]
    fn padded_filter_values_are_trimmed() {
        let query = parse_list_params(
            ListParams {
                category: Some("  Audio  ".to_string()),
                search: Some(" inalámbrico ".to_string()),
                ..ListParams::default()
            },
            &pagination(),
        )
        .expect("valid");

        assert_eq!(query.filters.category.as_deref(), Some("Audio"));
        assert_eq!(query.filters.search.as_deref(), Some("inalámbrico"));
    }

    #[test]
    fn every_violation_is_collected() {
        let violations = parse_list_params(
            ListParams {
                page: Some("0".to_string()),
                limit: Some("500".to_string()),
                category: Some("x".to_string()),
                min_price: Some("-1".to_string()),
                max_price: Some("abc".to_string()),
                search: None,
                sort_by: Some("stock".to_string()),
                sort_order: Some("sideways".to_string()),
            },
            &pagination(),
        )
        .err()
        .expect("violations");

        assert_eq!(violations.len(), 7);
    }

    #[test]
    fn limit_respects_the_configured_maximum() {
        let small = PaginationConfig { default_limit: 5, max_limit: 20 };

        let violations = parse_list_params(
            ListParams { limit: Some("21".to_string()), ..ListParams::default() },
            &small,
        )
        .err()
        .expect("violations");

        assert_eq!(violations, vec!["limit must be an integer between 1 and 20".to_string()]);
    }

    #[test]
    fn product_id_must_be_a_uuid() {
        assert!(parse_product_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(parse_product_id("not-a-uuid").is_err());
    }
}
