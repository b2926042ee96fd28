pub mod batch;
pub mod resolution;
pub mod speech;
