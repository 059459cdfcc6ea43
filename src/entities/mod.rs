//! Table mappings for the catalog. Foreign keys are plain integer columns;
//! related rows are reached through the `Related` impls, never stored inline.

pub mod actor;
pub mod movie;
pub mod rating;
pub mod role;
