/// State management module
///
/// This module handles all application state, including:
/// - Records returned by TheCatAPI (data.rs)
/// - The gallery session: images, breeds, selection, paging (gallery.rs)

pub mod data;
pub mod gallery;
