/// State management module
///
/// This module handles all application state, including:
/// - Date range validation (range.rs)
/// - The gallery view state and request generations (view.rs)
/// - The detail overlay lifecycle (modal.rs)

pub mod modal;
pub mod range;
pub mod view;
