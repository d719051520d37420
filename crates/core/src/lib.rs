pub mod config;
pub mod domain;
pub mod errors;
pub mod pagination;
pub mod query;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::product::{Product, ProductDraft, ProductId, ProductPatch};
pub use errors::ValidationError;
pub use pagination::{paginate, Page, Pagination};
pub use query::{ProductFilters, SortField, SortOrder};
