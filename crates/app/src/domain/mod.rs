//! Storefront Domain Concerns

pub mod categories;
pub mod customers;
pub mod orders;
pub mod products;
pub mod validation;
