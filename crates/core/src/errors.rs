use thiserror::Error;

/// Every field constraint violated by a proposed product, collected in one
/// pass. An empty list never reaches callers: constructors only build this
/// type when at least one violation exists.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid product data: {}", violations.join(", "))]
pub struct ValidationError {
    pub violations: Vec<String>,
}

impl ValidationError {
    pub fn new(violations: Vec<String>) -> Self {
        Self { violations }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ValidationError;

    #[test]
    fn display_joins_all_violations() {
        let error = ValidationError::new(vec![
            "name must be at least 2 characters".to_string(),
            "price must be a non-negative number".to_string(),
        ]);

        assert_eq!(
            error.to_string(),
            "invalid product data: name must be at least 2 characters, price must be a non-negative number"
        );
    }
}
