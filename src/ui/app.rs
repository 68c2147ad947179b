use eframe::egui;
use std::sync::mpsc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::engine::chat_session::ChatSession;
use crate::engine::credentials::{KeyGate, KeyStatus, SessionKeySelector};
use crate::engine::engine;
use crate::engine::gateway::Gateway;
use crate::engine::media_flow::{MediaForm, MediaState, MEDIA_ALERT};
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::content_package::GeneratedPackage;
use crate::model::event_input::EventInput;
use crate::ui::settings::UiSettings;
use crate::ui::{chat_widget, content_output, event_form, visual_tools};

/* =========================
   Tabs
   ========================= */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainTab {
    #[default]
    Wizard,
    Visuals,
}

/* =========================
   UI State
   ========================= */

#[derive(Default)]
pub struct UiState {
    pub main_tab: MainTab,

    pub form: EventInput,
    pub form_error: Option<String>,
    pub generating: bool,
    /// Latest package only; replaced wholesale by each response.
    pub result: Option<GeneratedPackage>,

    pub chat: ChatSession,
    pub chat_open: bool,
    pub chat_input: String,
    pub chat_scroll: bool,

    pub media_form: MediaForm,
    pub media_state: MediaState,
    pub media_texture: Option<egui::TextureHandle>,

    pub alert: Option<String>,
}

/* =========================
   App
   ========================= */

pub struct HubApp {
    ui: UiState,
    settings: UiSettings,
    key_gate: KeyGate<SessionKeySelector>,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl HubApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, gateway: Arc<dyn Gateway>) -> Self {
        // Without a configured key the desktop host offers its own key screen.
        let selector = (!gateway.has_credential()).then(SessionKeySelector::default);
        if selector.is_some() {
            info!("no API key configured, asking the user for one");
        }

        let ctx = cc.egui_ctx.clone();
        let (cmd_tx, resp_rx) = engine::start(gateway, move || ctx.request_repaint());

        Self {
            ui: UiState {
                chat: ChatSession::new(config.chat.history_limit),
                ..Default::default()
            },
            settings: config.ui,
            key_gate: KeyGate::new(selector),
            cmd_tx,
            resp_rx,
        }
    }

    fn drain_responses(&mut self, ctx: &egui::Context) {
        while let Ok(resp) = self.resp_rx.try_recv() {
            match resp {
                EngineResponse::PackageReady(package) => {
                    self.ui.generating = false;
                    self.ui.form_error = None;
                    self.ui.result = Some(package);
                }
                EngineResponse::PackageRejected(e) => {
                    self.ui.generating = false;
                    self.ui.form_error = Some(event_form::validation_message(&e).to_string());
                }
                EngineResponse::ChatReply(reply) => {
                    self.ui.chat.complete(reply);
                    self.ui.chat_scroll = true;
                }
                EngineResponse::MediaProgress(phase) => {
                    self.ui.media_state.advance(phase);
                }
                EngineResponse::MediaFinished(outcome) => {
                    match &outcome {
                        Ok(result) if !result.is_still_image() => {
                            debug!(mime = %result.mime_type, "result has no still preview");
                            self.ui.media_texture = None;
                        }
                        Ok(result) => {
                            self.ui.media_texture =
                                match visual_tools::load_texture(ctx, &result.bytes) {
                                    Ok(texture) => Some(texture),
                                    Err(e) => {
                                        warn!(error = %e, "result could not be decoded for preview");
                                        None
                                    }
                                };
                        }
                        Err(_) => self.ui.alert = Some(MEDIA_ALERT.to_string()),
                    }
                    self.ui.media_state.finish(outcome);
                }
            }
        }
    }

    fn draw_key_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.25);
                ui.heading(egui::RichText::new("CampusHub HubAI").strong().size(28.0));
                ui.add_space(8.0);
                ui.label("Gemini modellerini kullanabilmek için bir API anahtarı bağlamanız gerekmektedir.");
                ui.add_space(16.0);

                let mut submit = false;
                if let Some(selector) = self.key_gate.selector_mut() {
                    let response = ui.add_sized(
                        [360.0, 28.0],
                        egui::TextEdit::singleline(selector.pending_mut())
                            .password(true)
                            .hint_text("GEMINI_API_KEY"),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                    }
                }

                ui.add_space(8.0);
                if ui.button("API Anahtarı Seç").clicked() {
                    submit = true;
                }

                if submit {
                    submit_key(&mut self.key_gate, &self.cmd_tx);
                }

                ui.add_space(12.0);
                ui.small("Anahtar yalnızca bu oturum boyunca bellekte tutulur.");
            });
        });
    }

    fn draw_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new("CampusHub HubAI")
                        .strong()
                        .color(self.settings.color("Accent")),
                );
                ui.separator();
                ui.selectable_value(&mut self.ui.main_tab, MainTab::Wizard, "İçerik Sihirbazı");
                ui.selectable_value(&mut self.ui.main_tab, MainTab::Visuals, "Görsel Tasarım");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add(
                        egui::Slider::new(&mut self.settings.ui_scale, 0.75..=2.0).text("Ölçek"),
                    );
                });
            });
        });
    }

    fn draw_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.ui.alert.clone() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Bilgi")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(message).color(self.settings.color("Notice")));
                ui.add_space(8.0);
                if ui.button("Tamam").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.ui.alert = None;
        }
    }
}

/// Hands the typed key to the engine. The key screen stays up when the
/// engine is gone.
fn submit_key(gate: &mut KeyGate<SessionKeySelector>, cmd_tx: &mpsc::Sender<EngineCommand>) -> bool {
    let Some(key) = gate.open_select_key() else {
        return false;
    };

    if cmd_tx.send(EngineCommand::SetApiKey(key)).is_err() {
        warn!("engine is not running; API key was not applied");
        if let Some(selector) = gate.selector_mut() {
            selector.clear_selection();
        }
        return false;
    }

    true
}

/* =========================
   egui App
   ========================= */

impl eframe::App for HubApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.clamped_scale());

        self.drain_responses(ctx);

        if self.key_gate.status() == KeyStatus::NeedsSelection {
            self.draw_key_screen(ctx);
            return;
        }

        self.draw_header(ctx);

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.small("© 2024 CampusHub Digital. Powered by Gemini.");
        });

        match self.ui.main_tab {
            MainTab::Wizard => {
                event_form::draw_event_form(ctx, &mut self.ui, &self.cmd_tx);
                content_output::draw_content_output(ctx, &mut self.ui, &self.settings);
            }
            MainTab::Visuals => {
                visual_tools::draw_visual_tools(ctx, &mut self.ui, &self.cmd_tx);
            }
        }

        chat_widget::draw_chat_widget(ctx, &mut self.ui, &self.settings, &self.cmd_tx);
        self.draw_alert(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_key_is_sent_and_unlocks_the_app() {
        let (tx, rx) = mpsc::channel();
        let mut gate = KeyGate::new(Some(SessionKeySelector::new("key-123")));

        assert!(submit_key(&mut gate, &tx));
        assert_eq!(gate.status(), KeyStatus::Ready);
        assert!(matches!(rx.try_recv(), Ok(EngineCommand::SetApiKey(k)) if k == "key-123"));
    }

    #[test]
    fn key_screen_stays_when_engine_is_gone() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut gate = KeyGate::new(Some(SessionKeySelector::new("key-123")));

        assert!(!submit_key(&mut gate, &tx));
        assert_eq!(gate.status(), KeyStatus::NeedsSelection);
    }

    #[test]
    fn blank_key_sends_nothing() {
        let (tx, rx) = mpsc::channel();
        let mut gate = KeyGate::new(Some(SessionKeySelector::new("   ")));

        assert!(!submit_key(&mut gate, &tx));
        assert!(rx.try_recv().is_err());
    }
}
