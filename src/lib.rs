//! Live visibility and signal estimates for orbiting objects as seen from a
//! ground observer.

pub mod catalog;
pub mod config;
pub mod frames;
pub mod observer;
pub mod propagation;
pub mod registry;
pub mod signal;
pub mod sky;
pub mod tracker;
pub mod web;
