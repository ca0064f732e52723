//! Core business logic - framework-agnostic classification, aggregation,
//! and record operations. Nothing in this tree knows about HTTP; handlers
//! call in with an authenticated user id and plain data and get plain data
//! or a typed error back.

/// Waste analytics - grouped and zero-key aggregation over waste records
pub mod analytics;
/// Donation operations and the food/money tagged union
pub mod donation;
/// Expiry item operations and the live-status listing
pub mod expiry;
/// Freshness classification of perishable items
pub mod freshness;
/// Reporting-period token resolution
pub mod period;
/// Waste record operations, validation, and filtered listing
pub mod waste;
