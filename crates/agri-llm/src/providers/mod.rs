//! Concrete text provider implementations
//!
//! This module contains implementations of the TextProvider trait.

pub mod palm;

pub use palm::PalmProvider;
