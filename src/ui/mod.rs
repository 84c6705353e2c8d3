/// User interface module
///
/// - Gallery grid and tile templates (gallery.rs)
/// - Detail overlay (modal.rs)
/// - HTML rendering for export (markup.rs)
/// - Locale-aware date display (datefmt.rs)

pub mod datefmt;
pub mod gallery;
pub mod markup;
pub mod modal;
