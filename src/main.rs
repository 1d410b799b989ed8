use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use iced::widget::{button, column, horizontal_space, image, pick_list, row, scrollable, text, Row};
use iced::{Alignment, Element, Length, Task, Theme};
use log::{error, info, warn};

mod service;
mod state;
mod ui;

use service::http::{self, HttpPhotoService};
use service::{CallResult, Photo, PhotoId, PhotoService, Principal};
use state::feed::{Category, Feed};
use state::prefs::{DisplayMode, Prefs};
use state::session::Session;

/// Builds a service client for the given session identity. Signing in
/// or out swaps the whole client so every subsequent call carries the
/// right caller.
type ServiceFactory = Arc<dyn Fn(Option<&Principal>) -> Arc<dyn PhotoService> + Send + Sync>;

/// Main application state
struct Pixel {
    /// The remote photo service, owner of all durable state.
    service: Arc<dyn PhotoService>,
    factory: ServiceFactory,
    /// The displayed photo list and active category filter.
    feed: Feed,
    /// Who we are signed in as, if anyone.
    session: Session,
    /// Persisted display-mode preference.
    prefs: Prefs,
    /// The signed-in user's profile picture URL, cached locally. The
    /// one piece of state updated directly instead of via refresh.
    profile_picture: Option<String>,
    /// Decoded card images keyed by URL.
    images: ui::feed::ImageCache,
    /// Per-photo comment drafts.
    drafts: HashMap<PhotoId, String>,
    /// The open overlay, if any.
    modal: Modal,
    /// Status message to display to the user
    status: String,
}

/// The open overlay and its form state.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    None,
    AddPhoto(AddPhotoForm),
    SignIn(String),
    ProfilePicture(String),
    ConfirmRemove(PhotoId),
}

/// Draft fields of the add-photo form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddPhotoForm {
    pub title: String,
    pub category: String,
    pub image_url: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// A feed refresh settled.
    FeedLoaded(CallResult<Vec<Photo>>),
    /// User picked a category chip.
    FilterSelected(Category),
    /// User picked a display mode.
    DisplayModeSelected(DisplayMode),
    /// An image download settled.
    ImageFetched(String, CallResult<Vec<u8>>),

    LikePressed(PhotoId),
    Liked(CallResult<()>),

    DraftChanged(PhotoId, String),
    SubmitComment(PhotoId),
    CommentAdded(PhotoId, CallResult<()>),

    OpenAddPhoto,
    PhotoTitleChanged(String),
    PhotoCategoryChanged(String),
    PhotoUrlChanged(String),
    SubmitPhoto,
    PhotoAdded(CallResult<PhotoId>),

    RemovePressed(PhotoId),
    ConfirmRemove,
    PhotoRemoved(CallResult<()>),

    OpenSignIn,
    SignInInputChanged(String),
    SubmitSignIn,
    SignOut,
    /// The signed-in user's profile picture arrived after sign-in.
    ProfileLoaded(CallResult<Option<String>>),

    OpenProfilePicture,
    ProfileUrlChanged(String),
    SubmitProfilePicture,
    ProfileSaved(String, CallResult<()>),

    CloseModal,
}

impl Pixel {
    /// Create a new instance of the application against the real
    /// HTTP service.
    fn new() -> (Self, Task<Message>) {
        let factory: ServiceFactory = Arc::new(|principal| {
            let mut service = HttpPhotoService::from_env();
            if let Some(principal) = principal {
                service = service.with_principal(principal.clone());
            }
            Arc::new(service)
        });
        Self::with_factory(factory, Prefs::load())
    }

    fn with_factory(factory: ServiceFactory, prefs: Prefs) -> (Self, Task<Message>) {
        info!("starting with display mode {}", prefs.display_mode);

        let mut app = Pixel {
            service: factory(None),
            factory,
            feed: Feed::new(),
            session: Session::anonymous(),
            prefs,
            profile_picture: None,
            images: HashMap::new(),
            drafts: HashMap::new(),
            modal: Modal::None,
            status: String::from("Loading photos..."),
        };
        let task = app.refresh();
        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // ---- Feed ----
            Message::FeedLoaded(result) => match self.feed.apply_loaded(result) {
                Some(fault) => {
                    error!("feed refresh failed: {fault}");
                    self.status = format!("⚠️ {fault}");
                    Task::none()
                }
                None => {
                    info!("feed refreshed: {} photos", self.feed.photos().len());
                    self.status = format!("{} photos", self.feed.photos().len());
                    self.fetch_missing_images()
                }
            },
            Message::FilterSelected(category) => {
                if category == self.feed.filter {
                    return Task::none();
                }
                self.feed.filter = category;
                self.refresh()
            }
            Message::DisplayModeSelected(mode) => {
                self.prefs.set_display_mode(mode);
                Task::none()
            }
            Message::ImageFetched(url, result) => {
                match result {
                    Ok(bytes) => {
                        self.images.insert(url, image::Handle::from_bytes(bytes));
                    }
                    Err(fault) => warn!("image fetch failed for {url}: {fault}"),
                }
                Task::none()
            }

            // ---- Like ----
            Message::LikePressed(id) => {
                let verdict = match self.feed.photo(id) {
                    Some(photo) => self.session.check_like(photo),
                    None => return Task::none(),
                };
                match verdict {
                    Err(denied) => {
                        self.status = denied.to_string();
                        Task::none()
                    }
                    Ok(()) => {
                        let service = self.service.clone();
                        Task::perform(
                            async move { service.like_photo(id).await },
                            Message::Liked,
                        )
                    }
                }
            }
            Message::Liked(result) => self.after_mutation(result, "❤️ Liked"),

            // ---- Comments ----
            Message::DraftChanged(id, content) => {
                self.drafts.insert(id, content);
                Task::none()
            }
            Message::SubmitComment(id) => {
                if let Err(denied) = self.session.check_mutate() {
                    self.status = denied.to_string();
                    return Task::none();
                }
                let content = self
                    .drafts
                    .get(&id)
                    .map(|draft| draft.trim().to_string())
                    .unwrap_or_default();
                if content.is_empty() {
                    return Task::none();
                }
                let service = self.service.clone();
                Task::perform(
                    async move { service.add_comment(id, &content).await },
                    move |result| Message::CommentAdded(id, result),
                )
            }
            Message::CommentAdded(id, result) => {
                if result.is_ok() {
                    self.drafts.remove(&id);
                }
                self.after_mutation(result, "✅ Comment added")
            }

            // ---- Add photo ----
            Message::OpenAddPhoto => {
                match self.session.check_mutate() {
                    Err(denied) => self.status = denied.to_string(),
                    Ok(_) => self.modal = Modal::AddPhoto(AddPhotoForm::default()),
                }
                Task::none()
            }
            Message::PhotoTitleChanged(title) => {
                if let Modal::AddPhoto(form) = &mut self.modal {
                    form.title = title;
                }
                Task::none()
            }
            Message::PhotoCategoryChanged(category) => {
                if let Modal::AddPhoto(form) = &mut self.modal {
                    form.category = category;
                }
                Task::none()
            }
            Message::PhotoUrlChanged(url) => {
                if let Modal::AddPhoto(form) = &mut self.modal {
                    form.image_url = url;
                }
                Task::none()
            }
            Message::SubmitPhoto => {
                let form = match &self.modal {
                    Modal::AddPhoto(form) => form.clone(),
                    _ => return Task::none(),
                };
                if let Err(denied) = self.session.check_mutate() {
                    self.status = denied.to_string();
                    return Task::none();
                }
                if form.title.trim().is_empty()
                    || form.category.trim().is_empty()
                    || form.image_url.trim().is_empty()
                {
                    self.status = String::from("Title, category and image URL are all required");
                    return Task::none();
                }
                let service = self.service.clone();
                Task::perform(
                    async move {
                        service
                            .add_photo(
                                form.title.trim(),
                                form.category.trim(),
                                form.image_url.trim(),
                            )
                            .await
                    },
                    Message::PhotoAdded,
                )
            }
            Message::PhotoAdded(result) => match result {
                Ok(id) => {
                    info!("photo {id} added");
                    self.modal = Modal::None;
                    self.status = String::from("✅ Photo added");
                    self.refresh()
                }
                Err(fault) => {
                    error!("add photo failed: {fault}");
                    self.status = format!("⚠️ {fault}");
                    Task::none()
                }
            },

            // ---- Remove photo ----
            Message::RemovePressed(id) => {
                let verdict = match self.feed.photo(id) {
                    Some(photo) => self.session.check_remove(photo),
                    None => return Task::none(),
                };
                match verdict {
                    Err(denied) => self.status = denied.to_string(),
                    Ok(()) => self.modal = Modal::ConfirmRemove(id),
                }
                Task::none()
            }
            Message::ConfirmRemove => {
                let id = match self.modal {
                    Modal::ConfirmRemove(id) => id,
                    _ => return Task::none(),
                };
                self.modal = Modal::None;
                let service = self.service.clone();
                Task::perform(
                    async move { service.remove_photo(id).await },
                    Message::PhotoRemoved,
                )
            }
            Message::PhotoRemoved(result) => self.after_mutation(result, "✅ Photo removed"),

            // ---- Session ----
            Message::OpenSignIn => {
                self.modal = Modal::SignIn(String::new());
                Task::none()
            }
            Message::SignInInputChanged(input) => {
                if let Modal::SignIn(current) = &mut self.modal {
                    *current = input;
                }
                Task::none()
            }
            Message::SubmitSignIn => {
                let input = match &self.modal {
                    Modal::SignIn(input) => input.clone(),
                    _ => return Task::none(),
                };
                match Principal::from_text(&input) {
                    Err(invalid) => {
                        self.status = invalid.to_string();
                        Task::none()
                    }
                    Ok(principal) => {
                        info!("signed in as {principal}");
                        self.service = (self.factory)(Some(&principal));
                        self.session.sign_in(principal);
                        self.modal = Modal::None;
                        self.status = String::from("Signed in");
                        let service = self.service.clone();
                        Task::perform(
                            async move { service.get_profile_picture().await },
                            Message::ProfileLoaded,
                        )
                    }
                }
            }
            Message::SignOut => {
                info!("signed out");
                self.service = (self.factory)(None);
                self.session.sign_out();
                self.profile_picture = None;
                self.status = String::from("Signed out");
                Task::none()
            }
            Message::ProfileLoaded(result) => match result {
                Ok(url) => {
                    self.profile_picture = url;
                    self.fetch_missing_images()
                }
                Err(fault) => {
                    warn!("profile picture fetch failed: {fault}");
                    Task::none()
                }
            },

            // ---- Profile picture ----
            Message::OpenProfilePicture => {
                match self.session.check_mutate() {
                    Err(denied) => self.status = denied.to_string(),
                    Ok(_) => {
                        self.modal =
                            Modal::ProfilePicture(self.profile_picture.clone().unwrap_or_default())
                    }
                }
                Task::none()
            }
            Message::ProfileUrlChanged(url) => {
                if let Modal::ProfilePicture(current) = &mut self.modal {
                    *current = url;
                }
                Task::none()
            }
            Message::SubmitProfilePicture => {
                let url = match &self.modal {
                    Modal::ProfilePicture(url) => url.trim().to_string(),
                    _ => return Task::none(),
                };
                if let Err(denied) = self.session.check_mutate() {
                    self.status = denied.to_string();
                    return Task::none();
                }
                if url.is_empty() {
                    self.status = String::from("An image URL is required");
                    return Task::none();
                }
                let service = self.service.clone();
                let for_message = url.clone();
                Task::perform(
                    async move { service.set_profile_picture(&url).await },
                    move |result| Message::ProfileSaved(for_message.clone(), result),
                )
            }
            Message::ProfileSaved(url, result) => match result {
                // The one direct local update: a single scalar outside
                // the photo list, so no feed refresh.
                Ok(()) => {
                    self.profile_picture = Some(url);
                    self.modal = Modal::None;
                    self.status = String::from("✅ Profile picture updated");
                    self.fetch_missing_images()
                }
                Err(fault) => {
                    error!("set profile picture failed: {fault}");
                    self.status = format!("⚠️ {fault}");
                    Task::none()
                }
            },

            Message::CloseModal => {
                self.modal = Modal::None;
                Task::none()
            }
        }
    }

    /// Shared success/failure handling for like, comment and remove:
    /// success re-fetches the whole feed unconditionally, failure
    /// surfaces the server's message and leaves all state unchanged.
    fn after_mutation(&mut self, result: CallResult<()>, done: &str) -> Task<Message> {
        match result {
            Ok(()) => {
                self.status = done.to_string();
                self.refresh()
            }
            Err(fault) => {
                error!("mutation failed: {fault}");
                self.status = format!("⚠️ {fault}");
                Task::none()
            }
        }
    }

    /// Re-fetch the photo list for the active filter. The result
    /// replaces the list wholesale in `FeedLoaded`.
    fn refresh(&mut self) -> Task<Message> {
        self.feed.loading = true;
        let service = self.service.clone();
        match self.feed.filter.query_key() {
            None => Task::perform(async move { service.get_photos().await }, Message::FeedLoaded),
            Some(category) => Task::perform(
                async move { service.get_photos_by_category(category).await },
                Message::FeedLoaded,
            ),
        }
    }

    /// Download card images (and the profile picture) we have not
    /// decoded yet. Failures keep the placeholder and retry on the
    /// next refresh.
    fn fetch_missing_images(&self) -> Task<Message> {
        let mut urls: BTreeSet<String> = self
            .feed
            .photos()
            .iter()
            .map(|photo| photo.image_url.clone())
            .collect();
        if let Some(url) = &self.profile_picture {
            urls.insert(url.clone());
        }

        let tasks: Vec<Task<Message>> = urls
            .into_iter()
            .filter(|url| !self.images.contains_key(url))
            .map(|url| {
                let for_message = url.clone();
                Task::perform(http::fetch_image(url), move |result| {
                    Message::ImageFetched(for_message.clone(), result)
                })
            })
            .collect();
        Task::batch(tasks)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let body = scrollable(ui::feed::feed_view(
            &self.feed,
            self.prefs.display_mode,
            &self.session,
            &self.images,
            &self.drafts,
        ))
        .height(Length::Fill);

        let base: Element<Message> = column![
            self.header(),
            self.filter_row(),
            body,
            text(&self.status).size(13),
        ]
        .spacing(12)
        .padding(16)
        .into();

        match &self.modal {
            Modal::None => base,
            Modal::AddPhoto(form) => ui::modal::modal(base, ui::modal::add_photo(form)),
            Modal::SignIn(input) => ui::modal::modal(base, ui::modal::sign_in(input)),
            Modal::ProfilePicture(url) => {
                ui::modal::modal(base, ui::modal::profile_picture(url))
            }
            Modal::ConfirmRemove(id) => {
                ui::modal::modal(base, ui::modal::confirm_remove(self.feed.photo(*id)))
            }
        }
    }

    fn header(&self) -> Element<Message> {
        let mut bar = row![
            text("Pixel").size(28),
            horizontal_space(),
            pick_list(
                DisplayMode::ALL,
                Some(self.prefs.display_mode),
                Message::DisplayModeSelected,
            ),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        match self.session.principal() {
            Some(principal) => {
                bar = bar.push(button(text("Add Photo")).on_press(Message::OpenAddPhoto));

                let badge: Element<Message> = match self
                    .profile_picture
                    .as_ref()
                    .and_then(|url| self.images.get(url))
                {
                    Some(handle) => image(handle.clone()).width(32).height(32).into(),
                    None => text(principal.initial().to_uppercase().to_string())
                        .size(16)
                        .into(),
                };
                bar = bar.push(
                    button(badge)
                        .style(button::text)
                        .on_press(Message::OpenProfilePicture),
                );

                bar = bar.push(
                    button(text("Sign Out"))
                        .style(button::secondary)
                        .on_press(Message::SignOut),
                );
            }
            None => {
                bar = bar.push(button(text("Sign In")).on_press(Message::OpenSignIn));
            }
        }

        bar.into()
    }

    fn filter_row(&self) -> Element<Message> {
        Category::ALL
            .iter()
            .fold(Row::new().spacing(8), |chips, &category| {
                let chip = button(text(category.label()).size(13)).padding(6);
                let chip = if category == self.feed.filter {
                    chip.style(button::primary)
                } else {
                    chip.style(button::secondary)
                        .on_press(Message::FilterSelected(category))
                };
                chips.push(chip)
            })
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    env_logger::init();

    iced::application("Pixel", Pixel::update, Pixel::view)
        .theme(Pixel::theme)
        .centered()
        .run_with(Pixel::new)
}
