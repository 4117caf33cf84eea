/// Breed dropdown and details panel
use iced::widget::{column, container, pick_list, text};
use iced::{Element, Length};
use std::fmt;

use crate::state::data::{Breed, BreedFilter};
use crate::state::gallery::GalleryState;
use crate::Message;

use super::palette;

/// One entry of the breed dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedOption {
    pub filter: BreedFilter,
    pub label: String,
}

impl BreedOption {
    pub fn all() -> Self {
        Self {
            filter: BreedFilter::All,
            label: "All Breeds".to_string(),
        }
    }
}

impl From<&Breed> for BreedOption {
    fn from(breed: &Breed) -> Self {
        Self {
            filter: BreedFilter::Breed(breed.id.clone()),
            label: breed.name.clone(),
        }
    }
}

impl fmt::Display for BreedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// "All Breeds" followed by one entry per fetched breed
pub fn options(breeds: &[Breed]) -> Vec<BreedOption> {
    std::iter::once(BreedOption::all())
        .chain(breeds.iter().map(BreedOption::from))
        .collect()
}

/// The option matching `filter`, falling back to its raw id if breeds aren't loaded
pub fn selected_option(options: &[BreedOption], filter: &BreedFilter) -> BreedOption {
    options
        .iter()
        .find(|option| &option.filter == filter)
        .cloned()
        .unwrap_or_else(|| BreedOption {
            filter: filter.clone(),
            label: filter.to_string(),
        })
}

pub fn view(state: &GalleryState) -> Element<'_, Message> {
    let options = options(state.breeds());
    let selected = selected_option(&options, state.selected());

    let picker = pick_list(options, Some(selected), |option: BreedOption| {
        Message::BreedSelected(option.filter)
    })
    .placeholder("Select a Cat Breed")
    .width(Length::Fixed(280.0))
    .padding(10);

    let mut content = column![picker].spacing(12).align_x(iced::Alignment::Center);

    if let Some(breed) = state.selected_breed() {
        content = content.push(details(breed));
    }

    container(content).center_x(Length::Fill).into()
}

fn details(breed: &Breed) -> Element<'_, Message> {
    let mut info = column![text(&breed.name).size(20)].spacing(6);

    if let Some(origin) = &breed.origin {
        info = info.push(text(format!("Origin: {}", origin)).color(palette::MUTED));
    }
    if let Some(temperament) = &breed.temperament {
        info = info.push(text(format!("Temperament: {}", temperament)).color(palette::MUTED));
    }
    if let Some(description) = &breed.description {
        info = info.push(text(description).size(14));
    }

    container(info)
        .width(Length::Fixed(560.0))
        .padding(12)
        .style(container::rounded_box)
        .into()
}
