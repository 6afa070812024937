pub mod dom_model;
pub mod snapshot;
pub mod traversal;
pub mod visibility;
