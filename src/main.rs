use iced::widget::image::Handle;
use iced::widget::{button, column, container, scrollable, text, Column};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use std::time::Duration;

mod api;
mod config;
mod error;
mod media;
mod state;
mod ui;

use api::{ApiError, CatApi};
use error::AppError;
use media::thumbnail::{self, Thumbnail, ThumbnailError};
use state::data::{Breed, BreedFilter, CatImage};
use state::gallery::{FetchRequest, GalleryState, PageOutcome};
use ui::notifications::{self, Notification};

/// Main application state
struct CatGallery {
    /// Client for TheCatAPI
    api: CatApi,
    /// Images, breeds, selection and paging
    gallery: GalleryState,
    /// Per-tile picture state
    tiles: ui::gallery::Tiles,
    notifications: notifications::Manager,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// A Fetch-Images call settled
    ImagesFetched(FetchRequest, Result<Vec<CatImage>, ApiError>),
    /// The breed list call settled
    BreedsFetched(Result<Vec<Breed>, ApiError>),
    /// User picked an entry in the breed dropdown
    BreedSelected(BreedFilter),
    /// User clicked "Load More Cats"
    LoadMore,
    /// A tile's picture finished downloading and decoding
    ThumbnailLoaded(String, Result<Thumbnail, ThumbnailError>),
    Notification(notifications::Message),
}

impl CatGallery {
    /// Create the application and fire the two startup fetches
    fn new(api: CatApi, page_size: u32) -> (Self, Task<Message>) {
        let mut app = CatGallery {
            api,
            gallery: GalleryState::new(page_size),
            tiles: ui::gallery::Tiles::new(),
            notifications: notifications::Manager::new(),
            status: "Fetching cats...".to_string(),
        };

        // Images and breeds are independent; neither waits for the other
        let request = app.gallery.begin_fetch();
        let startup = Task::batch([app.fetch_images(request), app.fetch_breeds()]);

        (app, startup)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ImagesFetched(request, Ok(images)) => {
                let received = images.len();
                match self.gallery.apply_page(&request, images) {
                    PageOutcome::Stale => {
                        log::debug!(
                            "Discarding page {} for superseded filter '{}' (generation {} < {})",
                            request.page,
                            request.filter,
                            request.generation,
                            self.gallery.generation()
                        );
                        Task::none()
                    }
                    outcome => {
                        match outcome {
                            PageOutcome::Replaced { .. } => self.tiles.clear(),
                            PageOutcome::Appended { kept: 0, .. } => {
                                self.notifications.push(Notification::info("No more cats found."));
                            }
                            _ => {}
                        }
                        log::info!(
                            "🐱 Page {} ({}): {} received, {:?}",
                            request.page,
                            request.filter,
                            received,
                            outcome
                        );
                        self.status = format!(
                            "Showing {} cats. Last update {}.",
                            self.gallery.images().len(),
                            chrono::Local::now().format("%H:%M:%S")
                        );
                        self.load_thumbnails()
                    }
                }
            }
            Message::ImagesFetched(request, Err(err)) => {
                log::error!(
                    "Error fetching cat images (page {}, filter '{}'): {}",
                    request.page,
                    request.filter,
                    err
                );
                self.notifications
                    .push(Notification::error(format!("Failed to fetch cat images: {}", err)));
                // A superseded request leaves the newer one's state alone
                if self.gallery.apply_failure(&request) {
                    self.status = format!("Page {} failed. Load More will try it again.", request.page);
                }
                Task::none()
            }
            Message::BreedsFetched(Ok(breeds)) => {
                log::info!("📋 Fetched {} breeds", breeds.len());
                self.gallery.set_breeds(breeds);
                Task::none()
            }
            Message::BreedsFetched(Err(err)) => {
                log::error!("Error fetching cat breeds: {}", err);
                self.notifications
                    .push(Notification::error(format!("Failed to fetch cat breeds: {}", err)));
                Task::none()
            }
            Message::BreedSelected(filter) => {
                log::info!("Selected breed: {}", filter);
                let request = self.gallery.select_breed(filter);
                self.fetch_images(request)
            }
            Message::LoadMore => match self.gallery.load_more() {
                Some(request) => self.fetch_images(request),
                None => Task::none(),
            },
            Message::ThumbnailLoaded(key, Ok(thumb)) => {
                let handle = Handle::from_rgba(thumb.width, thumb.height, thumb.pixels);
                self.tiles.set_ready(&key, handle);
                Task::none()
            }
            Message::ThumbnailLoaded(key, Err(err)) => {
                log::warn!("Image load error for {}: {}", key, err);
                self.tiles.set_hidden(&key);
                Task::none()
            }
            Message::Notification(message) => {
                self.notifications.handle_message(&message);
                Task::none()
            }
        }
    }

    /// Launch a Fetch-Images call for `request`
    fn fetch_images(&self, request: FetchRequest) -> Task<Message> {
        log::info!("🔍 Fetching page {} (filter: {})", request.page, request.filter);
        let api = self.api.clone();

        Task::perform(
            async move {
                let result = api.search_images(&request).await;
                (request, result)
            },
            |(request, result)| Message::ImagesFetched(request, result),
        )
    }

    fn fetch_breeds(&self) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(async move { api.list_breeds().await }, Message::BreedsFetched)
    }

    /// Start downloads for tiles that don't have a picture yet
    fn load_thumbnails(&mut self) -> Task<Message> {
        let pending = self.tiles.register(self.gallery.images());

        Task::batch(pending.into_iter().map(|(key, url)| {
            let api = self.api.clone();
            Task::perform(thumbnail::load_thumbnail(api, url), move |result| {
                Message::ThumbnailLoaded(key.clone(), result)
            })
        }))
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let loading = self.gallery.is_loading();

        let load_more = button(text(ui::gallery::load_more_label(self.gallery.load_state())))
            .on_press_maybe((!loading).then_some(Message::LoadMore))
            .width(Length::Fixed(192.0))
            .padding(10);

        let body: Column<Message> = column![
            ui::gallery::view(self.gallery.images(), &self.tiles),
            load_more,
            text(&self.status).size(14),
        ]
        .spacing(24)
        .width(Length::Fill)
        .align_x(Alignment::Center);

        let content: Column<Message> = column![
            text("Cat Images Gallery").size(32),
            ui::breed_picker::view(&self.gallery),
            ui::notifications::view(&self.notifications).map(Message::Notification),
            scrollable(body).height(Length::Fill),
        ]
        .spacing(16)
        .padding(24)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    /// Ticks only while an info notification is waiting to expire
    fn subscription(&self) -> Subscription<Message> {
        if self.notifications.needs_tick() {
            iced::time::every(Duration::from_millis(500))
                .map(|_| Message::Notification(notifications::Message::Tick))
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("cat_gallery=info"))
        .init();

    let config = config::load()?;
    let api = CatApi::from_config(&config)?;
    let page_size = config.page_size;
    log::info!(
        "🎨 Cat Gallery starting against {} ({} images per page)",
        config.api_base_url,
        page_size
    );

    iced::application("Cat Images Gallery", CatGallery::update, CatGallery::view)
        .subscription(CatGallery::subscription)
        .theme(CatGallery::theme)
        .centered()
        .run_with(move || CatGallery::new(api.clone(), page_size))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use ui::gallery::Tile;

    fn app() -> CatGallery {
        let api = CatApi::new("http://127.0.0.1:9", "test-key").unwrap();
        CatGallery::new(api, 10).0
    }

    fn first_page() -> FetchRequest {
        FetchRequest {
            filter: BreedFilter::All,
            page: 1,
            limit: 10,
            generation: 0,
        }
    }

    fn cats(count: usize) -> Vec<CatImage> {
        (0..count)
            .map(|i| CatImage {
                id: format!("c{}", i),
                url: format!("https://cdn/c{}.jpg", i),
                width: 100,
                height: 100,
                breeds: None,
            })
            .collect()
    }

    #[test]
    fn test_startup_is_loading_first_page() {
        let app = app();
        assert!(app.gallery.is_loading());
        assert_eq!(app.gallery.page(), 1);
    }

    #[test]
    fn test_initial_page_skips_images_without_url() {
        let mut app = app();
        let mut images = cats(9);
        images.push(CatImage {
            id: "blank".to_string(),
            url: String::new(),
            width: 0,
            height: 0,
            breeds: None,
        });

        let _ = app.update(Message::ImagesFetched(first_page(), Ok(images)));

        assert_eq!(app.gallery.images().len(), 9);
        assert_eq!(app.gallery.page(), 2);
        assert!(!app.gallery.is_loading());
        assert!(matches!(app.tiles.get("c0"), Some(Tile::Loading)));
        assert!(app.tiles.get("blank").is_none());
    }

    #[test]
    fn test_breeds_failure_leaves_only_all_breeds() {
        let mut app = app();

        let _ = app.update(Message::BreedsFetched(Err(ApiError::Status(
            StatusCode::INTERNAL_SERVER_ERROR,
        ))));

        let options = ui::breed_picker::options(app.gallery.breeds());
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].to_string(), "All Breeds");
        assert!(app
            .notifications
            .visible()
            .any(|n| n.message() == "Failed to fetch cat breeds: HTTP error! status: 500"));
    }

    #[test]
    fn test_failed_image_fetch_notifies_and_keeps_page() {
        let mut app = app();
        let _ = app.update(Message::ImagesFetched(first_page(), Ok(cats(3))));
        let _ = app.update(Message::LoadMore);
        let second = FetchRequest {
            page: 2,
            ..first_page()
        };

        let _ = app.update(Message::ImagesFetched(
            second,
            Err(ApiError::Transport("connection refused".to_string())),
        ));

        assert_eq!(app.gallery.images().len(), 3);
        assert_eq!(app.gallery.page(), 2);
        assert!(!app.gallery.is_loading());
        assert!(app
            .notifications
            .visible()
            .any(|n| n.message() == "Failed to fetch cat images: connection refused"));
    }

    #[test]
    fn test_superseded_failure_still_notifies() {
        let mut app = app();
        let _ = app.update(Message::BreedSelected(BreedFilter::Breed("beng".to_string())));

        let _ = app.update(Message::ImagesFetched(
            first_page(),
            Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
        ));

        assert!(app
            .notifications
            .visible()
            .any(|n| n.message() == "Failed to fetch cat images: HTTP error! status: 500"));
        // the Bengal request is still outstanding
        assert!(app.gallery.is_loading());
        assert_eq!(app.gallery.selected(), &BreedFilter::Breed("beng".to_string()));
    }

    #[test]
    fn test_breed_selection_resets_paging() {
        let mut app = app();
        let _ = app.update(Message::ImagesFetched(first_page(), Ok(cats(10))));
        assert_eq!(app.gallery.page(), 2);

        let _ = app.update(Message::BreedSelected(BreedFilter::Breed("beng".to_string())));

        assert_eq!(app.gallery.page(), 1);
        assert_eq!(app.gallery.selected(), &BreedFilter::Breed("beng".to_string()));
        assert!(app.gallery.is_loading());
    }

    #[test]
    fn test_broken_image_hides_only_its_tile() {
        let mut app = app();
        let _ = app.update(Message::ImagesFetched(first_page(), Ok(cats(2))));

        let _ = app.update(Message::ThumbnailLoaded(
            "c0".to_string(),
            Err(ThumbnailError::Download(ApiError::Status(StatusCode::NOT_FOUND))),
        ));

        assert!(matches!(app.tiles.get("c0"), Some(Tile::Hidden)));
        assert!(matches!(app.tiles.get("c1"), Some(Tile::Loading)));
        assert_eq!(app.gallery.images().len(), 2);
        assert_eq!(app.gallery.page(), 2);
    }

    #[test]
    fn test_empty_follow_up_page_shows_info() {
        let mut app = app();
        let _ = app.update(Message::ImagesFetched(first_page(), Ok(cats(2))));
        let _ = app.update(Message::LoadMore);
        let second = FetchRequest {
            page: 2,
            ..first_page()
        };

        let _ = app.update(Message::ImagesFetched(second, Ok(Vec::new())));

        assert_eq!(app.gallery.page(), 3);
        assert!(app.notifications.needs_tick());
        assert!(app
            .notifications
            .visible()
            .any(|n| n.message() == "No more cats found."));
    }
}
