//! Filter routes - Transaction type and category filters

pub mod api;

pub use api::{
    api_filter, api_set_category_filter, api_set_type_filter, htmx_filter_category,
    htmx_filter_clear, htmx_filter_type,
};
