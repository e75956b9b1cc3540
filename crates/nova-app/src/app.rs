//! Main egui application: composes the screens and dispatches user
//! actions to the sync layer.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, TopBottomPanel};
use gloo_timers::future::TimeoutFuture;

use nova_core::achievements::AchievementEvaluator;
use nova_core::api::ApiClient;
use nova_core::chat::ChatSync;
use nova_core::event_bus::EventBus;
use nova_core::goals::GoalsSync;
use nova_core::ports::{HttpPort, NavigatorPort, StoragePort};
use nova_core::session::SessionManager;
use nova_platform::http::GlooHttp;
use nova_platform::navigator::HashNavigator;
use nova_platform::storage::auto_detect_storage;
use nova_types::config::{ClientConfig, StorageBackendType};
use nova_types::event::{Route, SyncEvent};
use nova_ui::panels::{auth, chat, goals, milestone, profile};
use nova_ui::state::{rejection_event, UiAction, UiState};
use nova_ui::theme;

const CONFIG_STORAGE_KEY: &str = "nova:config";

/// Read the saved client config, falling back to defaults.
pub async fn load_config(storage: &dyn StoragePort) -> ClientConfig {
    match storage.get(CONFIG_STORAGE_KEY).await {
        Ok(Some(data)) => match serde_json::from_slice::<ClientConfig>(&data) {
            Ok(config) => {
                log::info!("Config restored from storage");
                config
            }
            Err(e) => {
                log::warn!("Ignoring unreadable config: {}", e);
                ClientConfig::default()
            }
        },
        Ok(None) => ClientConfig::default(),
        Err(e) => {
            log::warn!("Could not read config: {}", e);
            ClientConfig::default()
        }
    }
}

/// The main application state
pub struct NovaApp {
    ui_state: UiState,
    config: ClientConfig,
    event_bus: EventBus,
    navigator: Rc<HashNavigator>,
    session: Rc<SessionManager>,
    goals: Rc<GoalsSync>,
    chat: Rc<ChatSync>,
    achievements: Rc<AchievementEvaluator>,
    in_flight: Rc<Cell<usize>>,
    shown_route: Option<Route>,
    first_frame: bool,
}

impl NovaApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: ClientConfig,
        boot_storage: Rc<dyn StoragePort>,
    ) -> Self {
        let storage = match config.storage.backend {
            StorageBackendType::Auto => boot_storage,
            _ => auto_detect_storage(&config.storage),
        };
        let event_bus = EventBus::new();
        let http: Rc<dyn HttpPort> = Rc::new(GlooHttp::new(config.api.clone()));
        let navigator = Rc::new(HashNavigator::new());
        let nav_port: Rc<dyn NavigatorPort> = navigator.clone();

        let session = Rc::new(SessionManager::new(
            http.clone(),
            storage,
            nav_port,
            event_bus.clone(),
        ));
        let api = Rc::new(ApiClient::new(http, session.clone()));
        let achievements = Rc::new(AchievementEvaluator::new(event_bus.clone()));
        let goals = Rc::new(GoalsSync::new(api.clone(), achievements.clone(), event_bus.clone()));
        let chat = Rc::new(ChatSync::new(api));

        log::info!("API base URL: {}", config.api.base_url);

        let restoring = session.clone();
        wasm_bindgen_futures::spawn_local(async move {
            restoring.initialize().await;
        });

        Self {
            ui_state: UiState::new(),
            config,
            event_bus,
            navigator,
            session,
            goals,
            chat,
            achievements,
            in_flight: Rc::new(Cell::new(0)),
            shown_route: None,
            first_frame: true,
        }
    }

    /// Side effects of sync events that the UI projection cannot perform.
    fn observe(&self, events: &[SyncEvent], ctx: &egui::Context) {
        for event in events {
            match event {
                SyncEvent::SessionChanged { user: None } => self.goals.reset(),
                SyncEvent::Milestone { seq, .. } => self.arm_milestone_timeout(*seq, ctx),
                _ => {}
            }
        }
    }

    fn arm_milestone_timeout(&self, seq: u64, ctx: &egui::Context) {
        let achievements = self.achievements.clone();
        let timeout = self.config.milestone_timeout_ms;
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(timeout).await;
            if achievements.expire(seq) {
                ctx.request_repaint();
            }
        });
    }

    /// Apply the route guard and run the enter/leave hooks of a screen.
    fn sync_route(&mut self, ctx: &egui::Context) {
        if !self.ui_state.session_ready {
            return;
        }
        let requested = self.navigator.current();
        let route = self.ui_state.guard(requested);
        if route != requested {
            self.navigator.navigate(route);
        }
        self.ui_state.route = route;

        if self.shown_route == Some(route) {
            return;
        }
        if self.shown_route == Some(Route::Dashboard) {
            self.goals.unmount();
        }
        self.shown_route = Some(route);
        self.ui_state.clear_errors();
        match route {
            Route::Dashboard => self.handle(UiAction::RefreshGoals, ctx),
            Route::Chat => {
                let action = self.ui_state.request_history();
                self.handle(action, ctx);
            }
            _ => {}
        }
    }

    /// Run `task` on the event loop, counting it as in flight.
    fn spawn(&self, ctx: &egui::Context, task: impl Future<Output = ()> + 'static) {
        let in_flight = self.in_flight.clone();
        let ctx = ctx.clone();
        in_flight.set(in_flight.get() + 1);
        wasm_bindgen_futures::spawn_local(async move {
            task.await;
            in_flight.set(in_flight.get().saturating_sub(1));
            ctx.request_repaint();
        });
    }

    /// Dispatch a user action to the sync layer (async)
    fn handle(&self, action: UiAction, ctx: &egui::Context) {
        let bus = self.event_bus.clone();
        match action {
            UiAction::Navigate(route) => {
                self.navigator.navigate(route);
                ctx.request_repaint();
            }
            UiAction::Login { email, password } => {
                let session = self.session.clone();
                self.spawn(ctx, async move {
                    if let Err(e) = session.login(&email, &password).await {
                        log::warn!("Login failed: {}", e);
                        bus.emit(rejection_event(&e));
                    }
                });
            }
            UiAction::Register {
                name,
                email,
                password,
                career_objective,
            } => {
                let session = self.session.clone();
                self.spawn(ctx, async move {
                    if let Err(e) = session
                        .register(&name, &email, &password, &career_objective)
                        .await
                    {
                        log::warn!("Registration failed: {}", e);
                        bus.emit(rejection_event(&e));
                    }
                });
            }
            UiAction::Logout => {
                let session = self.session.clone();
                self.spawn(ctx, async move { session.logout().await });
            }
            UiAction::RefreshGoals => {
                let goals = self.goals.clone();
                self.spawn(ctx, async move {
                    if let Err(e) = goals.fetch().await {
                        bus.emit(SyncEvent::Error { message: e.to_string() });
                    }
                });
            }
            UiAction::CreateGoal(draft) => {
                let goals = self.goals.clone();
                self.spawn(ctx, async move {
                    if let Err(e) = goals.create(draft).await {
                        bus.emit(SyncEvent::Error { message: e.to_string() });
                    }
                });
            }
            UiAction::UpdateGoal { id, changes } => {
                let goals = self.goals.clone();
                self.spawn(ctx, async move {
                    if let Err(e) = goals.update(&id, changes).await {
                        bus.emit(SyncEvent::Error { message: e.to_string() });
                    }
                });
            }
            UiAction::ToggleGoal(id) => {
                let goals = self.goals.clone();
                self.spawn(ctx, async move {
                    if let Err(e) = goals.toggle_status(&id).await {
                        bus.emit(SyncEvent::Error { message: e.to_string() });
                    }
                });
            }
            UiAction::DeleteGoal(id) => {
                let goals = self.goals.clone();
                self.spawn(ctx, async move {
                    if let Err(e) = goals.delete(&id).await {
                        bus.emit(SyncEvent::Error { message: e.to_string() });
                    }
                });
            }
            UiAction::LoadChatHistory => {
                let Some(user_id) = self.session.user_id() else {
                    return;
                };
                let chat = self.chat.clone();
                self.spawn(ctx, async move {
                    match chat.get_history().await {
                        Ok(Some(messages)) => {
                            bus.emit(SyncEvent::ChatHistoryLoaded { user_id, messages })
                        }
                        Ok(None) => {}
                        Err(e) => log::warn!("Chat history unavailable: {}", e),
                    }
                });
            }
            UiAction::AskChat(text) => {
                let Some(user_id) = self.session.user_id() else {
                    return;
                };
                let chat = self.chat.clone();
                self.spawn(ctx, async move {
                    match chat.ask_chatbot(&text).await {
                        Ok(Some(text)) => bus.emit(SyncEvent::ChatAnswered { user_id, text }),
                        Ok(None) => {}
                        // the transcript is already gone with the session
                        Err(e) if e.is_session_expired() => {}
                        Err(e) => {
                            log::warn!("Chat request failed: {}", e);
                            bus.emit(SyncEvent::ChatFailed {
                                user_id,
                                message: e.to_string(),
                            });
                        }
                    }
                });
            }
            UiAction::SaveProfile(update) => {
                let session = self.session.clone();
                self.spawn(ctx, async move {
                    match session.update_profile(update).await {
                        Ok(()) => log::info!("Profile saved"),
                        Err(e) if e.is_session_expired() => {}
                        Err(e) => bus.emit(rejection_event(&e)),
                    }
                });
            }
            UiAction::DismissMilestone => self.achievements.dismiss(),
        }
    }

    fn top_bar(&self, ui: &mut egui::Ui) -> Option<UiAction> {
        let mut action = None;
        ui.horizontal(|ui| {
            ui.label(RichText::new("Nova").strong().color(theme::ACCENT).size(16.0));
            ui.separator();

            if self.ui_state.is_authenticated() {
                for (route, label) in [
                    (Route::Dashboard, "Goals"),
                    (Route::Chat, "Assistant"),
                    (Route::Profile, "Profile"),
                ] {
                    if ui.selectable_label(self.ui_state.route == route, label).clicked() {
                        action = Some(UiAction::Navigate(route));
                    }
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.ui_state.is_authenticated() && ui.button("Sign out").clicked() {
                    action = Some(UiAction::Logout);
                }
                let color = if self.ui_state.is_busy() {
                    theme::WARNING
                } else {
                    theme::TEXT_SECONDARY
                };
                ui.label(RichText::new(&self.ui_state.status_text).color(color).small());
            });
        });
        action
    }
}

impl eframe::App for NovaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Drain events from the sync layer
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.observe(&events, ctx);
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }
        if self.ui_state.take_goals_stale() {
            self.ui_state.set_goals(self.goals.goals());
        }
        self.ui_state.in_flight = self.in_flight.get();
        self.sync_route(ctx);

        let mut actions = Vec::new();

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            actions.extend(self.top_bar(ui));
        });

        // ── Main content ─────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| {
            if !self.ui_state.session_ready {
                ui.centered_and_justified(|ui| ui.spinner());
                return;
            }
            let action = match self.ui_state.route {
                Route::Login => auth::login_panel(ui, &mut self.ui_state),
                Route::Register => auth::register_panel(ui, &mut self.ui_state),
                Route::Dashboard => goals::goals_panel(ui, &mut self.ui_state),
                Route::Chat => chat::chat_panel(ui, &mut self.ui_state),
                Route::Profile => profile::profile_panel(ui, &mut self.ui_state),
            };
            actions.extend(action);
        });

        actions.extend(milestone::milestone_toast(ctx, &self.ui_state));

        for action in actions {
            self.handle(action, ctx);
        }
    }
}
