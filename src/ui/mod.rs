/// User interface building blocks
///
/// - `gallery.rs` - the image grid and its per-tile load state
/// - `breed_picker.rs` - the breed dropdown and breed details
/// - `notifications.rs` - error and info notifications

pub mod breed_picker;
pub mod gallery;
pub mod notifications;

/// Colors shared by the views
pub mod palette {
    use iced::Color;

    pub const MUTED: Color = Color::from_rgb(0.6, 0.6, 0.6);
    pub const ERROR: Color = Color::from_rgb(0.94, 0.33, 0.31);
    pub const INFO: Color = Color::from_rgb(0.36, 0.62, 0.94);
}
