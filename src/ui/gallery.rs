/// Gallery grid rendering
///
/// Each entry becomes a `Tile` whose template is picked by media kind.
/// Only image tiles are selectable; video tiles show a placeholder and an
/// outbound link instead. Selection messages carry the generation they
/// were rendered for, so a click on a tile from a replaced render is ignored.

use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{button, column, container, text, Image};
use iced::{Alignment, Element, Length};

use crate::apod::{ImageryEntry, MediaKind};
use crate::ui::datefmt::DateFormatter;
use crate::Message;

/// Width of a gallery tile in logical pixels
const TILE_WIDTH: f32 = 256.0;

/// Template a tile is rendered with
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    /// Thumbnail tile, opens the detail overlay when selected
    Image { src: String },
    /// Placeholder glyph and a link to the video page
    Video { link: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub entry: ImageryEntry,
    pub formatted_date: String,
    pub template: Template,
}

impl Tile {
    pub fn from_entry(entry: &ImageryEntry, dates: &DateFormatter) -> Self {
        let template = match entry.media_kind {
            MediaKind::Image => Template::Image {
                src: entry.display_url().to_string(),
            },
            MediaKind::Video => Template::Video {
                link: entry.primary_url.clone(),
            },
        };

        Self {
            entry: entry.clone(),
            formatted_date: dates.format(entry.date),
            template,
        }
    }

    pub fn is_selectable(&self) -> bool {
        matches!(self.template, Template::Image { .. })
    }
}

/// Tiles of the current gallery and their selection bindings
#[derive(Debug, Default)]
pub struct GalleryRenderer {
    generation: u64,
    tiles: Vec<Tile>,
    thumbnails: HashMap<usize, Handle>,
}

impl GalleryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the gallery with `entries`.
    ///
    /// Previous tiles, their selection bindings and loaded thumbnails are
    /// all discarded.
    pub fn render(
        &mut self,
        generation: u64,
        entries: &[ImageryEntry],
        dates: &DateFormatter,
    ) -> &[Tile] {
        self.generation = generation;
        self.thumbnails.clear();
        self.tiles = entries
            .iter()
            .map(|entry| Tile::from_entry(entry, dates))
            .collect();
        &self.tiles
    }

    /// Drop everything; used when leaving the populated view
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.thumbnails.clear();
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of tiles bound to the detail overlay
    pub fn selection_handler_count(&self) -> usize {
        self.tiles().iter().filter(|tile| tile.is_selectable()).count()
    }

    /// Resolve a selection; `None` for stale generations, bad indices and video tiles
    pub fn select(&self, generation: u64, index: usize) -> Option<&ImageryEntry> {
        if generation != self.generation {
            return None;
        }
        self.tiles
            .get(index)
            .filter(|tile| tile.is_selectable())
            .map(|tile| &tile.entry)
    }

    /// Thumbnails still to be downloaded: `(index, url)` for each image tile
    pub fn thumbnail_requests(&self) -> Vec<(usize, String)> {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(index, tile)| match &tile.template {
                Template::Image { src } => Some((index, src.clone())),
                Template::Video { .. } => None,
            })
            .collect()
    }

    /// Store a loaded thumbnail; ignored if the gallery was re-rendered since
    pub fn attach_thumbnail(&mut self, generation: u64, index: usize, handle: Handle) -> bool {
        if generation != self.generation || index >= self.tiles.len() {
            return false;
        }
        self.thumbnails.insert(index, handle);
        true
    }

    #[cfg(test)]
    pub fn has_thumbnail(&self, index: usize) -> bool {
        self.thumbnails.contains_key(&index)
    }

    pub fn view(&self) -> Element<Message> {
        let tiles: Vec<Element<Message>> = self
            .tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| {
                container(self.tile_view(index, tile))
                    .padding(8)
                    .into()
            })
            .collect();

        iced_aw::Wrap::with_elements(tiles).into()
    }

    fn tile_view<'a>(&'a self, index: usize, tile: &'a Tile) -> Element<'a, Message> {
        let info = column![
            text(&tile.entry.title).size(16),
            text(&tile.formatted_date).size(13),
        ]
        .spacing(4);

        match &tile.template {
            Template::Image { .. } => {
                let preview: Element<Message> = match self.thumbnails.get(&index) {
                    Some(handle) => Image::new(handle.clone()).width(Length::Fill).into(),
                    None => container(text("Loading…").size(13))
                        .center_x(Length::Fill)
                        .center_y(Length::Fixed(TILE_WIDTH * 0.6))
                        .into(),
                };

                button(column![preview, info].spacing(8))
                    .width(Length::Fixed(TILE_WIDTH))
                    .padding(8)
                    .on_press(Message::TileSelected {
                        generation: self.generation,
                        index,
                    })
                    .into()
            }
            Template::Video { link } => {
                let placeholder = container(
                    column![text("🎥").size(48), text("Video Content").size(14)]
                        .align_x(Alignment::Center)
                        .spacing(4),
                )
                .center_x(Length::Fill)
                .center_y(Length::Fixed(TILE_WIDTH * 0.6));

                container(
                    column![
                        placeholder,
                        info,
                        button(text("Watch Video").size(13))
                            .on_press(Message::OpenLink(link.clone())),
                    ]
                    .spacing(8),
                )
                .width(Length::Fixed(TILE_WIDTH))
                .padding(8)
                .style(container::rounded_box)
                .into()
            }
        }
    }
}
