pub mod collector;
pub mod field_model;
pub mod labels;
pub mod registry;
