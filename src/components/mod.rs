//! UI components.

pub mod neural_field;
