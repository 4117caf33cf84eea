/// TheCatAPI access
///
/// - `client.rs` - typed requests for image search, breeds and image bytes
/// - `error.rs` - failure classes surfaced to the user

pub mod client;
pub mod error;

pub use client::CatApi;
pub use error::ApiError;
