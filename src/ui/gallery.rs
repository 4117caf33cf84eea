/// Image grid
///
/// Each displayed `CatImage` becomes a tile. Tiles start as placeholders,
/// turn into pictures once their thumbnail is decoded, and are blanked out
/// when the picture can't be loaded. A broken tile never affects its
/// neighbours or the paging state.
use iced::widget::image::{Handle, Image};
use iced::widget::{container, text, Space};
use iced::{ContentFit, Element, Length};
use iced_aw::Wrap;
use std::collections::HashMap;

use crate::media::thumbnail::{THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH};
use crate::state::data::CatImage;
use crate::state::gallery::LoadState;
use crate::Message;

use super::palette;

/// Load state of a single tile's picture
#[derive(Debug, Clone)]
pub enum Tile {
    Loading,
    Ready(Handle),
    /// Download or decode failed; the cell stays blank
    Hidden,
}

/// Tile states keyed by `CatImage::tile_key`
#[derive(Debug, Default)]
pub struct Tiles {
    tiles: HashMap<String, Tile>,
}

impl Tiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every tile (used when page 1 replaces the list)
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// Register tiles for images that have none yet.
    ///
    /// Returns the `(key, url)` pairs whose pictures must be downloaded.
    pub fn register(&mut self, images: &[CatImage]) -> Vec<(String, String)> {
        let mut pending = Vec::new();
        for (index, cat) in images.iter().enumerate() {
            let key = cat.tile_key(index);
            if !self.tiles.contains_key(&key) {
                self.tiles.insert(key.clone(), Tile::Loading);
                pending.push((key, cat.url.clone()));
            }
        }
        pending
    }

    /// Attach a decoded picture; ignored if the tile was dropped meanwhile
    pub fn set_ready(&mut self, key: &str, handle: Handle) {
        if let Some(tile) = self.tiles.get_mut(key) {
            *tile = Tile::Ready(handle);
        }
    }

    pub fn set_hidden(&mut self, key: &str) {
        if let Some(tile) = self.tiles.get_mut(key) {
            *tile = Tile::Hidden;
        }
    }

    pub fn get(&self, key: &str) -> Option<&Tile> {
        self.tiles.get(key)
    }
}

/// Caption of the Load More button for the given loading flag
pub fn load_more_label(state: LoadState) -> &'static str {
    match state {
        LoadState::Loading => "Loading...",
        LoadState::Idle => "Load More Cats",
    }
}

/// Render the grid, or an empty-state message when there is nothing to show
pub fn view<'a>(images: &'a [CatImage], tiles: &'a Tiles) -> Element<'a, Message> {
    if images.is_empty() {
        return container(text("No images found").color(palette::MUTED))
            .padding(40)
            .center_x(Length::Fill)
            .into();
    }

    let cells: Vec<Element<'a, Message>> = images
        .iter()
        .enumerate()
        .map(|(index, cat)| tile_view(index, tiles.get(&cat.tile_key(index))))
        .collect();

    Wrap::with_elements(cells)
        .spacing(16.0)
        .line_spacing(16.0)
        .into()
}

fn tile_view<'a>(index: usize, tile: Option<&Tile>) -> Element<'a, Message> {
    let width = Length::Fixed(THUMBNAIL_WIDTH as f32);
    let height = Length::Fixed(THUMBNAIL_HEIGHT as f32);

    let content: Element<'a, Message> = match tile {
        Some(Tile::Ready(handle)) => Image::<Handle>::new(handle.clone())
            .width(width)
            .height(height)
            .content_fit(ContentFit::Cover)
            .into(),
        Some(Tile::Hidden) => Space::new(width, height).into(),
        Some(Tile::Loading) | None => container(text(format!("Cat {}", index + 1)).color(palette::MUTED))
            .center_x(width)
            .center_y(height)
            .into(),
    };

    container(content)
        .padding(8)
        .style(container::rounded_box)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: &str, url: &str) -> CatImage {
        CatImage {
            id: id.to_string(),
            url: url.to_string(),
            width: 0,
            height: 0,
            breeds: None,
        }
    }

    #[test]
    fn test_register_only_returns_new_tiles() {
        let mut tiles = Tiles::new();
        let mut images = vec![cat("a", "https://cdn/a.jpg"), cat("", "https://cdn/anon.jpg")];

        let pending = tiles.register(&images);
        assert_eq!(
            pending,
            vec![
                ("a".to_string(), "https://cdn/a.jpg".to_string()),
                ("cat-1".to_string(), "https://cdn/anon.jpg".to_string()),
            ]
        );

        images.push(cat("b", "https://cdn/b.jpg"));
        let pending = tiles.register(&images);
        assert_eq!(pending, vec![("b".to_string(), "https://cdn/b.jpg".to_string())]);
        assert!(matches!(tiles.get("cat-1"), Some(Tile::Loading)));
    }

    #[test]
    fn test_hidden_tile_leaves_siblings_alone() {
        let mut tiles = Tiles::new();
        tiles.register(&[cat("a", "https://cdn/a.jpg"), cat("b", "https://cdn/404.jpg")]);

        tiles.set_ready("a", Handle::from_rgba(1, 1, vec![0, 0, 0, 255]));
        tiles.set_hidden("b");

        assert!(matches!(tiles.get("a"), Some(Tile::Ready(_))));
        assert!(matches!(tiles.get("b"), Some(Tile::Hidden)));
    }

    #[test]
    fn test_late_result_for_cleared_tile_is_dropped() {
        let mut tiles = Tiles::new();
        tiles.register(&[cat("a", "https://cdn/a.jpg")]);
        tiles.clear();

        tiles.set_hidden("a");
        assert!(tiles.get("a").is_none());
    }

    #[test]
    fn test_load_more_label() {
        assert_eq!(load_more_label(LoadState::Idle), "Load More Cats");
        assert_eq!(load_more_label(LoadState::Loading), "Loading...");
    }
}
