//! Demo applications for tvfocus.

/// Simulated TV storefront.
pub mod storefront;
