//! Vetus - desktop browser and assistant for an email and document archive.
//!
//! Built with Rust and the iced GUI framework on top of `vetus-core`.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod message;
mod model;
mod style;
mod view;

use std::path::PathBuf;

use clap::Parser;
use iced::keyboard::{self, Key, Modifiers};
use iced::widget::{column, container};
use iced::{Element, Length, Subscription, Task};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vetus_core::{
    ApiClient, AssistantReply, Config, ContextMode, DocumentRecord, EmailDetail, History, HitCard,
    LookupRequest, Route, StagingStore, ThreadDetail, chat,
};

use message::{KeyboardAction, Message, Pane};
use model::{AppSettings, ChatState, DocumentState, ResultsState, ThreadState};
use style::widgets::{ThemeMode, page_style};
use view::HeaderProps;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "vetus", version, about = "Browse and question an email and document archive")]
struct Args {
    /// Location to open, e.g. `?mode=thread&id=T1` or a URL carrying such a query.
    location: Option<String>,

    /// Configuration file (defaults to `<config dir>/vetus/config.json`).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vetus=debug,vetus_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path);
    let services = Services::new(config, args.config)?;
    let location = args.location.unwrap_or_default();

    info!("Starting Vetus against {}", services.api.base_url());

    iced::application(
        move || Vetus::new(services.clone(), location.clone()),
        Vetus::update,
        Vetus::view,
    )
    .title("Vetus")
    .subscription(Vetus::subscription)
    .run()
    .map_err(|e| anyhow::anyhow!("UI failed: {e}"))
}

/// Backend client, staging store and configuration shared by every task.
#[derive(Debug, Clone)]
struct Services {
    api: ApiClient,
    staging: StagingStore,
    config: Config,
    /// Explicit `--config` path, forwarded to windows this one opens.
    config_path: Option<PathBuf>,
}

impl Services {
    fn new(config: Config, config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let api = ApiClient::new(&config.api_base_url)?;
        let staging = StagingStore::new(StagingStore::default_location(), config.staging_capacity);
        Ok(Self {
            api,
            staging,
            config,
            config_path,
        })
    }
}

/// Main application state.
///
/// The page being browsed is never stored here: it is re-derived from the
/// current history location every time it is needed.
struct Vetus {
    services: Services,
    /// Visited locations for this window.
    history: History,
    /// Pane below the header.
    pane: Pane,
    /// Query field shared by the home and results pages.
    query_input: String,
    results: ResultsState,
    thread: ThreadState,
    document: DocumentState,
    chat: ChatState,
    /// Index freshness; `None` while the first check is in flight.
    index_status: Option<Result<String, String>>,
    /// Whether an index rebuild is in flight.
    rebuilding: bool,
    /// Outcome of the last rebuild.
    rebuild_note: Option<String>,
    /// Current theme mode (light/dark).
    theme_mode: ThemeMode,
}

impl Vetus {
    /// Create new application instance showing `location`.
    fn new(services: Services, location: String) -> (Self, Task<Message>) {
        let mut app = Self {
            services,
            history: History::new(location),
            pane: Pane::Browse,
            query_input: String::new(),
            results: ResultsState::default(),
            thread: ThreadState::default(),
            document: DocumentState::default(),
            chat: ChatState::default(),
            index_status: None,
            rebuilding: false,
            rebuild_note: None,
            theme_mode: ThemeMode::default(),
        };
        app.apply_theme();

        let settings_task = Task::perform(load_settings(), Message::SettingsLoaded);
        let index_task = Task::perform(
            index_status(app.services.api.clone()),
            Message::IndexStatusLoaded,
        );
        let route_task = app.resolve_from_url();
        (app, Task::batch([settings_task, index_task, route_task]))
    }

    /// Applies the current theme mode to the global palette.
    fn apply_theme(&self) {
        style::widgets::set_theme(self.theme_mode);
    }

    /// Update state based on message.
    #[allow(clippy::needless_pass_by_value)]
    #[allow(clippy::too_many_lines)] // Large match is idiomatic for Elm architecture
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => return self.navigate(route),
            Message::Back => return self.go_back(),
            Message::Forward => return self.go_forward(),
            Message::OpenInNewWindow(route) => {
                let location = route.to_location();
                info!("Opening {:?} in a new window", location);
                return Task::perform(
                    open_window(location, self.services.config_path.clone()),
                    Message::WindowOpened,
                );
            }
            Message::WindowOpened(result) => {
                if let Err(e) = result {
                    warn!("Failed to open window: {}", e);
                }
            }
            Message::ShowPane(pane) => {
                self.pane = pane;
            }
            Message::QueryChanged(query) => {
                self.query_input = query;
            }
            Message::SubmitQuery => {
                let query = self.query_input.trim().to_string();
                if !query.is_empty() {
                    return self.navigate_to_results(query);
                }
            }
            Message::ResultsLoaded { query, result } => {
                if let Err(e) = &result {
                    warn!("Lookup for {:?} failed: {}", query, e);
                }
                if !self.results.apply(&query, result) {
                    debug!("Discarding results for stale query {:?}", query);
                }
            }
            Message::ThreadLoaded { id, result } => {
                if let Err(e) = &result {
                    warn!("Failed to load thread {}: {}", id, e);
                }
                match self.thread.apply_thread(&id, result) {
                    Some(email_ids) => return self.load_emails(&id, email_ids),
                    None => debug!("Discarding late thread {}", id),
                }
            }
            Message::EmailLoaded {
                thread_id,
                index,
                email_id,
                result,
            } => {
                if let Err(e) = &result {
                    warn!("Failed to load email {}: {}", email_id, e);
                }
                if !self.thread.apply_email(&thread_id, index, &email_id, result) {
                    debug!("Discarding late email {} of thread {}", email_id, thread_id);
                }
            }
            Message::ToggleEmail(index) => self.thread.toggle(index),
            Message::ExpandAll => self.thread.set_all_open(true),
            Message::CollapseAll => self.thread.set_all_open(false),
            Message::DocumentLoaded { id, result } => {
                if let Err(e) = &result {
                    warn!("Failed to read staged document {}: {}", id, e);
                }
                if !self.document.apply(&id, result) {
                    debug!("Discarding late document {}", id);
                }
            }
            Message::OpenLocation => {
                if let Some(source) = self.document.source().map(str::to_string) {
                    self.document.open_status = None;
                    return Task::perform(
                        open_location(self.services.api.clone(), source),
                        Message::LocationOpened,
                    );
                }
            }
            Message::LocationOpened(result) => {
                self.document.open_status = Some(result);
            }
            Message::ChatInputChanged(input) => {
                self.chat.input = input;
            }
            Message::ChatSubmit => {
                if let Some((turn, question)) = self.chat.submit() {
                    info!("Assistant question #{}", turn);
                    return Task::perform(
                        rewrite_query(
                            self.services.api.clone(),
                            question,
                            self.services.config.rewrite_model.clone(),
                        ),
                        move |query| Message::QueryRewritten { turn, query },
                    );
                }
            }
            Message::QueryRewritten { turn, query } => {
                let Some(chat_turn) = self.chat.turn_mut(turn) else {
                    debug!("Discarding rewrite for unknown turn {}", turn);
                    return Task::none();
                };
                if chat_turn.query_resolved(query.clone()) {
                    return Task::perform(
                        answer(
                            self.services.clone(),
                            chat_turn.question.clone(),
                            query,
                            self.services.config.context_mode,
                        ),
                        move |result| Message::AnswerReceived { turn, result },
                    );
                }
            }
            Message::AnswerReceived { turn, result } => {
                if let Some(chat_turn) = self.chat.turn_mut(turn) {
                    match result {
                        Ok(reply) => {
                            chat_turn.answered(reply);
                        }
                        Err(e) => {
                            warn!("Assistant answer #{} failed: {}", turn, e);
                            chat_turn.failed(e);
                        }
                    }
                }
            }
            Message::IndexStatusLoaded(result) => {
                if let Err(e) = &result {
                    warn!("Failed to check index status: {}", e);
                }
                self.index_status = Some(result);
            }
            Message::RebuildIndex => {
                if !self.rebuilding {
                    self.rebuilding = true;
                    self.rebuild_note = None;
                    return Task::perform(
                        rebuild_index(self.services.api.clone()),
                        Message::IndexRebuilt,
                    );
                }
            }
            Message::IndexRebuilt(result) => {
                self.rebuilding = false;
                match result {
                    Ok(note) => {
                        info!("Index rebuilt: {}", note);
                        self.rebuild_note = Some(note);
                        return Task::perform(
                            index_status(self.services.api.clone()),
                            Message::IndexStatusLoaded,
                        );
                    }
                    Err(e) => {
                        warn!("Index rebuild failed: {}", e);
                        self.rebuild_note = Some(format!("Rebuild failed: {e}"));
                    }
                }
            }
            Message::ToggleTheme => {
                self.theme_mode = self.theme_mode.toggled();
                self.apply_theme();
                let settings = AppSettings {
                    theme_mode: self.theme_mode,
                };
                return Task::perform(save_settings(settings), Message::SettingsSaved);
            }
            Message::SettingsLoaded(result) => match result {
                Ok(settings) => {
                    info!("Settings loaded: theme={:?}", settings.theme_mode);
                    self.theme_mode = settings.theme_mode;
                    self.apply_theme();
                }
                Err(e) => {
                    info!("Failed to load settings, using defaults: {}", e);
                }
            },
            Message::SettingsSaved(result) => {
                if let Err(e) = result {
                    warn!("Failed to save settings: {}", e);
                }
            }
            Message::KeyPressed(action) => match action {
                KeyboardAction::Back => return self.go_back(),
                KeyboardAction::Forward => return self.go_forward(),
                KeyboardAction::ToggleAssistant => {
                    self.pane = match self.pane {
                        Pane::Browse => Pane::Assistant,
                        Pane::Assistant => Pane::Browse,
                    };
                }
            },
            Message::KeyIgnored => {}
        }
        Task::none()
    }

    /// Pushes a location for `route` and shows it.
    fn navigate(&mut self, route: Route) -> Task<Message> {
        self.history.push(route.to_location());
        self.resolve_from_url()
    }

    fn navigate_to_results(&mut self, query: String) -> Task<Message> {
        self.navigate(Route::results(query))
    }

    fn go_back(&mut self) -> Task<Message> {
        if self.history.back().is_some() {
            return self.resolve_from_url();
        }
        Task::none()
    }

    fn go_forward(&mut self) -> Task<Message> {
        if self.history.forward().is_some() {
            return self.resolve_from_url();
        }
        Task::none()
    }

    /// Derives the route from the current location and renders it.
    fn resolve_from_url(&mut self) -> Task<Message> {
        let route = Route::parse(self.history.current());
        info!("Showing {:?}", route);
        self.pane = Pane::Browse;

        match route {
            Route::Home => iced::widget::operation::focus(iced::widget::Id::new(
                view::HOME_QUERY_ID,
            )),
            Route::Results { query } => self.render_results(query),
            Route::Thread { id } => self.render_thread(id),
            Route::Document { id } => self.render_document(id),
        }
    }

    fn render_results(&mut self, query: String) -> Task<Message> {
        self.query_input.clone_from(&query);
        self.results.start(query.clone());

        let config = &self.services.config;
        let request = LookupRequest::new(query.clone()).with_limits(config.top_k, config.min_score);
        Task::perform(
            search(self.services.clone(), request),
            move |result| Message::ResultsLoaded { query, result },
        )
    }

    fn render_thread(&mut self, id: String) -> Task<Message> {
        self.thread.start(id.clone());
        Task::perform(load_thread(self.services.api.clone(), id.clone()), move |result| {
            Message::ThreadLoaded { id, result }
        })
    }

    fn render_document(&mut self, id: String) -> Task<Message> {
        self.document.start(id.clone());
        Task::perform(
            load_document(self.services.staging.clone(), id.clone()),
            move |result| Message::DocumentLoaded { id, result },
        )
    }

    /// One independent task per email, so no email waits on another.
    fn load_emails(&self, thread_id: &str, email_ids: Vec<String>) -> Task<Message> {
        let tasks = email_ids.into_iter().enumerate().map(|(index, email_id)| {
            let thread_id = thread_id.to_string();
            Task::perform(
                load_email(self.services.api.clone(), email_id.clone()),
                move |result| Message::EmailLoaded {
                    thread_id,
                    index,
                    email_id,
                    result,
                },
            )
        });
        Task::batch(tasks)
    }

    /// Render current state as UI.
    fn view(&self) -> Element<'_, Message> {
        let header = view::view_header(HeaderProps {
            pane: self.pane,
            can_go_back: self.history.can_go_back(),
            can_go_forward: self.history.can_go_forward(),
            index_status: self.index_status.as_ref(),
            rebuilding: self.rebuilding,
            rebuild_note: self.rebuild_note.as_deref(),
            theme_mode: self.theme_mode,
        });

        let body = match self.pane {
            Pane::Assistant => view::view_chat(&self.chat),
            Pane::Browse => match Route::parse(self.history.current()) {
                Route::Home => view::view_home(&self.query_input),
                Route::Results { .. } => view::view_results(&self.results, &self.query_input),
                Route::Thread { .. } => view::view_thread(&self.thread),
                Route::Document { .. } => view::view_document(&self.document),
            },
        };

        container(column![header, body])
            .width(Length::Fill)
            .height(Length::Fill)
            .style(page_style)
            .into()
    }

    /// Subscribe to keyboard events for shortcuts.
    #[allow(clippy::unused_self)] // Required signature for iced subscription
    fn subscription(&self) -> Subscription<Message> {
        keyboard::listen().map(|event| {
            if let keyboard::Event::KeyPressed { key, modifiers, .. } = event {
                handle_key_press(&key, modifiers).unwrap_or(Message::KeyIgnored)
            } else {
                Message::KeyIgnored
            }
        })
    }
}

/// Handle keyboard shortcuts and return appropriate message.
fn handle_key_press(key: &Key, modifiers: Modifiers) -> Option<Message> {
    match key {
        // Alt+Left / Alt+Right: history
        Key::Named(keyboard::key::Named::ArrowLeft) if modifiers.alt() => {
            Some(Message::KeyPressed(KeyboardAction::Back))
        }
        Key::Named(keyboard::key::Named::ArrowRight) if modifiers.alt() => {
            Some(Message::KeyPressed(KeyboardAction::Forward))
        }
        // Ctrl+J: assistant pane
        Key::Character(c) if modifiers.command() && c.as_str() == "j" => {
            Some(Message::KeyPressed(KeyboardAction::ToggleAssistant))
        }
        _ => None,
    }
}

/// Runs a lookup and builds its cards.
async fn search(services: Services, request: LookupRequest) -> Result<Vec<HitCard>, String> {
    let hits = services
        .api
        .lookup(&request)
        .await
        .map_err(|e| e.to_string())?;
    Ok(HitCard::build_all(&hits, &services.staging).await)
}

async fn load_thread(api: ApiClient, id: String) -> Result<ThreadDetail, String> {
    api.thread(&id).await.map_err(|e| e.to_string())
}

async fn load_email(api: ApiClient, id: String) -> Result<EmailDetail, String> {
    api.email(&id).await.map_err(|e| e.to_string())
}

async fn load_document(
    staging: StagingStore,
    id: String,
) -> Result<Option<DocumentRecord>, String> {
    staging.get(&id).await.map_err(|e| e.to_string())
}

async fn open_location(api: ApiClient, path: String) -> Result<(), String> {
    api.open_location(&path).await.map_err(|e| e.to_string())
}

async fn rewrite_query(api: ApiClient, question: String, model: String) -> String {
    chat::rewrite_query(&api, &question, &model).await
}

async fn answer(
    services: Services,
    question: String,
    query: String,
    context_mode: ContextMode,
) -> Result<AssistantReply, String> {
    chat::answer(
        &services.api,
        &services.staging,
        &question,
        &query,
        context_mode,
    )
    .await
    .map_err(|e| e.to_string())
}

async fn index_status(api: ApiClient) -> Result<String, String> {
    api.index_status().await.map_err(|e| e.to_string())
}

async fn rebuild_index(api: ApiClient) -> Result<String, String> {
    api.rebuild_index().await.map_err(|e| e.to_string())
}

/// Launches another Vetus window showing `location`.
async fn open_window(location: String, config_path: Option<PathBuf>) -> Result<(), String> {
    let exe = std::env::current_exe().map_err(|e| e.to_string())?;
    let mut command = tokio::process::Command::new(exe);
    if let Some(config_path) = config_path {
        command.arg("--config").arg(config_path);
    }
    command.arg(location);
    command.spawn().map_err(|e| e.to_string())?;
    Ok(())
}

fn settings_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vetus")
}

/// Load application settings from file.
async fn load_settings() -> Result<AppSettings, String> {
    let settings_path = settings_dir().join("settings.json");

    if !settings_path.exists() {
        return Ok(AppSettings::default());
    }

    let contents = tokio::fs::read_to_string(&settings_path)
        .await
        .map_err(|e| e.to_string())?;

    serde_json::from_str(&contents).map_err(|e| e.to_string())
}

/// Save application settings to file.
async fn save_settings(settings: AppSettings) -> Result<(), String> {
    let config_dir = settings_dir();

    tokio::fs::create_dir_all(&config_dir)
        .await
        .map_err(|e| e.to_string())?;

    let settings_path = config_dir.join("settings.json");
    let contents = serde_json::to_string_pretty(&settings).map_err(|e| e.to_string())?;

    tokio::fs::write(&settings_path, contents)
        .await
        .map_err(|e| e.to_string())?;

    info!("Settings saved to {:?}", settings_path);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{ResultsStatus, ThreadStatus};

    fn app(location: &str) -> (Vetus, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let services = Services {
            api: ApiClient::new("http://localhost:8000").unwrap(),
            staging: StagingStore::new(dir.path(), None),
            config: Config::default(),
            config_path: None,
        };
        let (app, _task) = Vetus::new(services, location.to_string());
        (app, dir)
    }

    #[test]
    fn results_location_prefills_query() {
        let (app, _dir) = app("?mode=results&q=refund+policy");
        assert_eq!(app.query_input, "refund policy");
        assert_eq!(app.results.query, "refund policy");
        assert_eq!(app.results.status, ResultsStatus::Searching);
        assert_eq!(app.results.summary(), "Searching\u{2026}");
    }

    #[test]
    fn thread_location_starts_thread_load() {
        let (app, _dir) = app("?mode=thread&id=T1");
        assert_eq!(app.thread.id, "T1");
        assert!(matches!(app.thread.status, ThreadStatus::Loading));
    }

    #[test]
    fn thread_without_id_shows_home() {
        let (app, _dir) = app("?mode=thread");
        assert!(app.thread.id.is_empty());
        assert_eq!(Route::parse(app.history.current()), Route::Home);
    }

    #[test]
    fn back_re_derives_from_location() {
        let (mut app, _dir) = app("");
        let _ = app.update(Message::QueryChanged("budget".to_string()));
        let _ = app.update(Message::SubmitQuery);
        let _ = app.update(Message::Navigate(Route::thread("T1")));
        assert_eq!(app.history.current(), "?mode=thread&id=T1");

        app.query_input.clear();
        let _ = app.update(Message::Back);
        assert_eq!(app.history.current(), "?mode=results&q=budget");
        assert_eq!(app.query_input, "budget");
        assert_eq!(app.results.status, ResultsStatus::Searching);

        let _ = app.update(Message::Forward);
        assert_eq!(app.thread.id, "T1");
    }

    #[test]
    fn blank_query_does_not_navigate() {
        let (mut app, _dir) = app("");
        let _ = app.update(Message::QueryChanged("   ".to_string()));
        let _ = app.update(Message::SubmitQuery);
        assert!(!app.history.can_go_back());
    }

    #[test]
    fn stale_results_are_ignored() {
        let (mut app, _dir) = app("?mode=results&q=second");
        let _ = app.update(Message::ResultsLoaded {
            query: "first".to_string(),
            result: Ok(Vec::new()),
        });
        assert_eq!(app.results.status, ResultsStatus::Searching);
    }

    #[test]
    fn thread_failure_reads_not_found() {
        let (mut app, _dir) = app("?mode=thread&id=T404");
        let _ = app.update(Message::ThreadLoaded {
            id: "T404".to_string(),
            result: Err("Thread not found".to_string()),
        });
        assert_eq!(app.thread.title(), "Thread not found");
    }

    #[test]
    fn open_location_clears_previous_outcome() {
        let (mut app, _dir) = app("?mode=doc&id=0190b3f2-6a2c-7cc4-a6f4-1f2e3d4c5b6a");
        let id = app.document.id.clone();
        let _ = app.update(Message::DocumentLoaded {
            id,
            result: Ok(Some(DocumentRecord {
                doc_name: "a.pdf".to_string(),
                source: "/docs/a.pdf".to_string(),
                page: Some(2),
                paragraph_index: None,
                paragraph: "lorem".to_string(),
            })),
        });
        assert_eq!(app.document.source(), Some("/docs/a.pdf"));

        let _ = app.update(Message::LocationOpened(Err("Path not found".to_string())));
        assert!(app.document.open_status.is_some());

        let _ = app.update(Message::OpenLocation);
        assert_eq!(app.document.open_status, None);

        let _ = app.update(Message::LocationOpened(Ok(())));
        assert_eq!(app.document.open_status, Some(Ok(())));
    }

    #[test]
    fn expand_all_covers_unloaded_emails() {
        let (mut app, _dir) = app("?mode=thread&id=T1");
        let _ = app.update(Message::ThreadLoaded {
            id: "T1".to_string(),
            result: Ok(ThreadDetail {
                email_ids: vec!["e1".to_string(), "e2".to_string()],
                ..ThreadDetail::default()
            }),
        });
        let _ = app.update(Message::ExpandAll);
        assert!(app.thread.emails.iter().all(|item| item.open));
        let _ = app.update(Message::CollapseAll);
        assert!(app.thread.emails.iter().all(|item| !item.open));
    }

    #[test]
    fn chat_submit_clears_input_and_waits_for_rewrite() {
        let (mut app, _dir) = app("");
        let _ = app.update(Message::ChatInputChanged("What is our refund policy?".to_string()));
        let _ = app.update(Message::ChatSubmit);
        assert!(app.chat.input.is_empty());
        assert_eq!(app.chat.turns.len(), 1);
        assert!(app.chat.turns[0].is_pending());

        let turn = app.chat.turns[0].id;
        let _ = app.update(Message::QueryRewritten {
            turn,
            query: "refund policy".to_string(),
        });
        assert_eq!(app.chat.turns[0].query.as_deref(), Some("refund policy"));

        let _ = app.update(Message::AnswerReceived {
            turn,
            result: Err("Request failed: 500".to_string()),
        });
        assert_eq!(
            app.chat.turns[0].state,
            vetus_core::TurnState::Errored(
                "Sorry, something went wrong: Request failed: 500".to_string()
            )
        );
    }

    #[test]
    fn alt_arrows_move_history() {
        let back = handle_key_press(&Key::Named(keyboard::key::Named::ArrowLeft), Modifiers::ALT);
        assert!(matches!(back, Some(Message::KeyPressed(KeyboardAction::Back))));
        let plain = handle_key_press(&Key::Named(keyboard::key::Named::ArrowLeft), Modifiers::empty());
        assert!(plain.is_none());
    }
}
