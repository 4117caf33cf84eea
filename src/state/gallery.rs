/// Gallery state and its transitions
///
/// All mutable session state (image list, breed list, selected breed,
/// page counter, loading flag) lives in `GalleryState`. Each user or
/// network event is a method that moves the state forward; none of them
/// perform I/O, so the main update loop only has to turn the returned
/// `FetchRequest`s into tasks.

use super::data::{Breed, BreedFilter, CatImage};

/// Number of images requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// First page of every result set
pub const FIRST_PAGE: u32 = 1;

/// Snapshot of the parameters for one Fetch-Images call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub filter: BreedFilter,
    pub page: u32,
    pub limit: u32,
    /// Bumped on every breed change so late responses can be recognised
    pub generation: u64,
}

/// Loading flag: Idle or Loading, nothing else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
}

/// What happened when a page of images was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Page 1 replaced the displayed list
    Replaced { kept: usize, dropped: usize },
    /// A later page was appended to the displayed list
    Appended { kept: usize, dropped: usize },
    /// The response belongs to a superseded breed selection and was ignored
    Stale,
}

#[derive(Debug, Clone)]
pub struct GalleryState {
    images: Vec<CatImage>,
    breeds: Vec<Breed>,
    selected: BreedFilter,
    page: u32,
    page_size: u32,
    generation: u64,
    in_flight: Option<FetchRequest>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl GalleryState {
    pub fn new(page_size: u32) -> Self {
        Self {
            images: Vec::new(),
            breeds: Vec::new(),
            selected: BreedFilter::All,
            page: FIRST_PAGE,
            page_size: page_size.max(1),
            generation: 0,
            in_flight: None,
        }
    }

    /// Start a Fetch-Images call with the current filter and page.
    ///
    /// The loading flag switches to `Loading` until this request settles.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        let request = FetchRequest {
            filter: self.selected.clone(),
            page: self.page,
            limit: self.page_size,
            generation: self.generation,
        };
        self.in_flight = Some(request.clone());
        request
    }

    /// Selection Handler: record the filter, reset to page 1, and fetch.
    ///
    /// This is the only transition that resets the page counter.
    pub fn select_breed(&mut self, filter: BreedFilter) -> FetchRequest {
        self.selected = filter;
        self.page = FIRST_PAGE;
        self.generation += 1;
        self.begin_fetch()
    }

    /// Load-More Handler: fetch the next page for the current filter.
    ///
    /// Returns `None` while a fetch is outstanding, matching the disabled
    /// Load More button.
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        if self.is_loading() {
            return None;
        }
        Some(self.begin_fetch())
    }

    /// Merge a successful page into the displayed list.
    ///
    /// Entries without a url are dropped. Page 1 replaces the list, any
    /// other page appends to it. The page counter always advances past the
    /// requested page, even when nothing was kept.
    pub fn apply_page(&mut self, request: &FetchRequest, images: Vec<CatImage>) -> PageOutcome {
        self.settle(request);

        if request.generation != self.generation {
            return PageOutcome::Stale;
        }

        let total = images.len();
        let valid: Vec<CatImage> = images.into_iter().filter(CatImage::has_url).collect();
        let kept = valid.len();
        let dropped = total - kept;

        let outcome = if request.page == FIRST_PAGE {
            self.images = valid;
            PageOutcome::Replaced { kept, dropped }
        } else {
            self.images.extend(valid);
            PageOutcome::Appended { kept, dropped }
        };

        self.page = request.page + 1;
        outcome
    }

    /// Record a failed Fetch-Images call.
    ///
    /// The list and page counter are left alone, so the next Load More asks
    /// for the same page again. Returns `false` when the failure belongs to a
    /// superseded selection.
    pub fn apply_failure(&mut self, request: &FetchRequest) -> bool {
        self.settle(request);
        request.generation == self.generation
    }

    /// Replace the breed list in full
    pub fn set_breeds(&mut self, breeds: Vec<Breed>) {
        self.breeds = breeds;
    }

    fn settle(&mut self, request: &FetchRequest) {
        if self.in_flight.as_ref() == Some(request) {
            self.in_flight = None;
        }
    }

    pub fn images(&self) -> &[CatImage] {
        &self.images
    }

    pub fn breeds(&self) -> &[Breed] {
        &self.breeds
    }

    pub fn selected(&self) -> &BreedFilter {
        &self.selected
    }

    /// The breed record behind the current filter, once breeds are loaded
    pub fn selected_breed(&self) -> Option<&Breed> {
        let id = self.selected.breed_id()?;
        self.breeds.iter().find(|breed| breed.id == id)
    }

    /// Page number the next Fetch-Images call will request
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn load_state(&self) -> LoadState {
        if self.in_flight.is_some() {
            LoadState::Loading
        } else {
            LoadState::Idle
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load_state() == LoadState::Loading
    }
}
