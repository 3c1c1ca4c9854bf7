pub mod dashboard;
pub mod portal;
pub mod stream;
