//! E-Shop
//!
//! Storefront core: a read-only product catalog, a shopping cart persisted to
//! a device-local key-value store, and page view models built from both.

pub mod cart;
pub mod catalog;
pub mod fixtures;
pub mod persistence;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod view;
