pub mod catalog;
pub mod error;
pub mod observer;
pub mod sky;
