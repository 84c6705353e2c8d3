use iced::keyboard::{self, key, Key};
use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use tracing_subscriber::EnvFilter;

mod apod;
mod config;
mod facts;
mod state;
mod ui;

use apod::{media, ApodClient, FetchError, ImageryEntry};
use state::modal::{CloseTrigger, ModalController};
use state::range::{self, ValidationError, DATE_FORMAT};
use state::view::{RequestToken, ViewState, ViewStateController};
use ui::datefmt::DateFormatter;
use ui::gallery::GalleryRenderer;
use ui::markup;

/// Main application state
///
/// Owns every controller; nothing lives in globals.
struct ApodGallery {
    /// Client for the imagery endpoint
    client: ApodClient,
    /// Viewer-locale date display
    dates: DateFormatter,
    /// Raw contents of the two date fields
    start_input: String,
    end_input: String,
    /// Fact shown under the title
    fact: &'static str,
    view: ViewStateController,
    gallery: GalleryRenderer,
    modal: ModalController,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    StartChanged(String),
    EndChanged(String),
    /// User pressed "Get Space Images"
    Submit,
    /// A fetch finished; may be stale
    Fetched {
        token: RequestToken,
        result: Result<Vec<ImageryEntry>, FetchError>,
    },
    ThumbnailLoaded {
        generation: u64,
        index: usize,
        result: Result<Handle, String>,
    },
    /// An image tile was clicked
    TileSelected { generation: u64, index: usize },
    FullImageLoaded {
        url: String,
        result: Result<Handle, String>,
    },
    /// "Watch Video" on a video tile
    OpenLink(String),
    CloseModal,
    ModalBackdrop,
    CancelKey,
    ExportHtml,
}

impl ApodGallery {
    /// Create the application with the date fields prefilled
    fn new(client: ApodClient, dates: DateFormatter, fact: &'static str) -> Self {
        let today = chrono::Local::now().date_naive();
        let (start, end) = range::default_range(today);

        Self {
            client,
            dates,
            start_input: start.format(DATE_FORMAT).to_string(),
            end_input: end.format(DATE_FORMAT).to_string(),
            fact,
            view: ViewStateController::new(),
            gallery: GalleryRenderer::new(),
            modal: ModalController::new(),
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::StartChanged(value) => {
                self.start_input = value;
                Task::none()
            }
            Message::EndChanged(value) => {
                self.end_input = value;
                Task::none()
            }
            Message::Submit => match range::validate(&self.start_input, &self.end_input) {
                Ok(range) => {
                    // Old tiles, their handlers and any overlay showing one of
                    // them go away before loading starts
                    self.modal.close(CloseTrigger::NewSubmission);
                    self.gallery.clear();
                    let token = self.view.begin();
                    let client = self.client.clone();

                    Task::perform(async move { client.fetch(range).await }, move |result| {
                        Message::Fetched { token, result }
                    })
                }
                Err(err) => {
                    tracing::info!("🚫 Rejected date range: {}", err);
                    notify_invalid(&err);
                    Task::none()
                }
            },
            Message::Fetched { token, result } => {
                if !self.view.complete(token, result) {
                    return Task::none();
                }

                let entries = self.view.state().entries();
                if entries.is_empty() {
                    self.gallery.clear();
                    return Task::none();
                }

                self.gallery.render(token.generation(), entries, &self.dates);
                self.load_thumbnails()
            }
            Message::ThumbnailLoaded {
                generation,
                index,
                result,
            } => {
                match result {
                    Ok(handle) => {
                        self.gallery.attach_thumbnail(generation, index, handle);
                    }
                    Err(err) => tracing::debug!("Thumbnail {} unavailable: {}", index, err),
                }
                Task::none()
            }
            Message::TileSelected { generation, index } => {
                let Some(entry) = self.gallery.select(generation, index).cloned() else {
                    return Task::none();
                };

                let url = entry.primary_url.clone();
                self.modal.open(entry);

                Task::perform(
                    media::load_full_image(self.client.http().clone(), url.clone()),
                    move |result| Message::FullImageLoaded {
                        url: url.clone(),
                        result: result.map_err(|e| e.to_string()),
                    },
                )
            }
            Message::FullImageLoaded { url, result } => {
                if let Err(err) = &result {
                    tracing::warn!("⚠️  Full image {} unavailable: {}", url, err);
                }
                self.modal.attach_image(&url, result);
                Task::none()
            }
            Message::OpenLink(url) => {
                if let Err(err) = webbrowser::open(&url) {
                    tracing::warn!("⚠️  Could not open {}: {}", url, err);
                }
                Task::none()
            }
            Message::CloseModal => {
                self.modal.close(CloseTrigger::CloseControl);
                Task::none()
            }
            Message::ModalBackdrop => {
                self.modal.close(CloseTrigger::Backdrop);
                Task::none()
            }
            Message::CancelKey => {
                self.modal.close(CloseTrigger::CancelKey);
                Task::none()
            }
            Message::ExportHtml => {
                self.export_html();
                Task::none()
            }
        }
    }

    /// One download per image tile of the current render
    fn load_thumbnails(&self) -> Task<Message> {
        let generation = self.gallery.generation();
        let http = self.client.http().clone();

        Task::batch(
            self.gallery
                .thumbnail_requests()
                .into_iter()
                .map(|(index, url)| {
                    Task::perform(media::load_thumbnail(http.clone(), url), move |result| {
                        Message::ThumbnailLoaded {
                            generation,
                            index,
                            result: result.map_err(|e| e.to_string()),
                        }
                    })
                }),
        )
    }

    /// Write the current view as a standalone HTML page
    fn export_html(&self) {
        let Some(path) = FileDialog::new()
            .set_title("Export Gallery as HTML")
            .set_file_name("apod-gallery.html")
            .add_filter("HTML", &["html", "htm"])
            .save_file()
        else {
            return;
        };

        let html = markup::document(self.view.state(), &self.dates, self.fact);
        match std::fs::write(&path, html) {
            Ok(()) => tracing::info!("💾 Exported gallery to {}", path.display()),
            Err(err) => tracing::error!("❌ Export to {} failed: {}", path.display(), err),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let controls = row![
            text_input("Start date (YYYY-MM-DD)", &self.start_input)
                .on_input(Message::StartChanged)
                .on_submit(Message::Submit)
                .width(Length::Fixed(200.0)),
            text_input("End date (YYYY-MM-DD)", &self.end_input)
                .on_input(Message::EndChanged)
                .on_submit(Message::Submit)
                .width(Length::Fixed(200.0)),
            button("Get Space Images")
                .on_press(Message::Submit)
                .padding(10),
            button("Export HTML")
                .on_press(Message::ExportHtml)
                .padding(10),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let body: Element<Message> = match self.view.state() {
            ViewState::Idle => status_view("🔭", markup::IDLE_MESSAGE, None),
            ViewState::Loading => status_view("🔄", markup::LOADING_MESSAGE, None),
            ViewState::Populated(_) => self.gallery.view(),
            ViewState::Empty => status_view("😔", markup::EMPTY_MESSAGE, None),
            ViewState::Error(details) => {
                status_view("❌", markup::ERROR_MESSAGE, Some(details.as_str()))
            }
        };

        let content = column![
            text("Space Explorer").size(40),
            text(self.fact).size(15),
            controls,
            scrollable(body).width(Length::Fill).height(Length::Fill),
        ]
        .spacing(20)
        .padding(30)
        .align_x(Alignment::Center);

        let base = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into();

        ui::modal::overlay(base, &self.modal, &self.dates)
    }

    /// Listen for the cancel key only while the overlay holds its listener
    fn subscription(&self) -> Subscription<Message> {
        if !self.modal.listens_for_cancel_key() {
            return Subscription::none();
        }

        keyboard::on_key_press(|key, _modifiers| match key {
            Key::Named(key::Named::Escape) => Some(Message::CancelKey),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Centered icon, message and optional detail line
fn status_view<'a>(
    icon: &'a str,
    message: &'a str,
    details: Option<&'a str>,
) -> Element<'a, Message> {
    let mut content = column![text(icon).size(48), text(message).size(18)]
        .spacing(10)
        .align_x(Alignment::Center);

    if let Some(details) = details {
        content = content.push(text(details).size(14));
    }

    container(content)
        .center_x(Length::Fill)
        .padding(40)
        .into()
}

/// Blocking alert for a rejected submission
fn notify_invalid(err: &ValidationError) {
    let title = match err {
        ValidationError::MissingInput => "Missing dates",
        ValidationError::InvertedRange => "Invalid date range",
        ValidationError::MalformedDate { .. } => "Invalid date",
    };

    let _ = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(err.to_string())
        .set_buttons(MessageButtons::Ok)
        .show();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (config, warning) = config::load();
    if let Some(warning) = warning {
        tracing::warn!("⚠️  {}; using default settings", warning);
    }

    let client = ApodClient::new(&config)?;
    tracing::info!("🚀 Space Explorer starting against {}", config.base_url);

    iced::application("Space Explorer", ApodGallery::update, ApodGallery::view)
        .subscription(ApodGallery::subscription)
        .theme(ApodGallery::theme)
        .centered()
        .run_with(move || {
            let app = ApodGallery::new(client, DateFormatter::detect(), facts::random_fact());
            (app, Task::none())
        })?;

    Ok(())
}
