pub mod apply;
pub mod dashboard;
