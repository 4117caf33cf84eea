/// Image decoding module
///
/// This module handles:
/// - Downloading the picture behind a gallery tile
/// - Decoding it and cropping to a fixed-size thumbnail

pub mod thumbnail;
