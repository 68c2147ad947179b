use eframe::egui;
use egui::Layout;
use std::sync::mpsc::Sender;
use tracing::debug;

use crate::engine::gateway::GatewayError;
use crate::engine::protocol::EngineCommand;
use crate::model::chat::{ChatMessage, ChatRole};
use crate::ui::app::UiState;
use crate::ui::settings::UiSettings;

pub fn draw_chat_widget(
    ctx: &egui::Context,
    state: &mut UiState,
    settings: &UiSettings,
    cmd_tx: &Sender<EngineCommand>,
) {
    egui::Area::new(egui::Id::new("chat_toggle"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -36.0])
        .show(ctx, |ui| {
            let label = if state.chat_open { "✖" } else { "💬 HubAI" };
            if ui
                .add(egui::Button::new(label).min_size(egui::vec2(56.0, 40.0)))
                .clicked()
            {
                state.chat_open = !state.chat_open;
            }
        });

    if !state.chat_open {
        return;
    }

    let input_id = egui::Id::new("hubai_chat_input");

    egui::Window::new("HubAI Assistant")
        .collapsible(false)
        .resizable(false)
        .default_size([340.0, 460.0])
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -88.0])
        .show(ctx, |ui| {
            ui.small("Kampüs Etkinlik Danışmanı");
            ui.separator();

            egui::ScrollArea::vertical()
                .max_height(340.0)
                .stick_to_bottom(take_scroll_request(state))
                .show(ui, |ui| {
                    for msg in state.chat.messages() {
                        draw_message(ui, settings, msg);
                    }
                    if state.chat.is_awaiting() {
                        ui.add_space(6.0);
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.small("HubAI yazıyor…");
                        });
                    }
                });

            ui.separator();

            let awaiting = state.chat.is_awaiting();
            let mut send_now = false;

            ui.horizontal(|ui| {
                let response = ui.add_enabled(
                    !awaiting,
                    egui::TextEdit::singleline(&mut state.chat_input)
                        .id(input_id)
                        .desired_width(ui.available_width() - 60.0)
                        .hint_text("Bir soru sor..."),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    send_now = true;
                }

                let can_send = !awaiting && !state.chat_input.trim().is_empty();
                if ui.add_enabled(can_send, egui::Button::new("Gönder")).clicked() {
                    send_now = true;
                }
            });

            if send_now && send_chat(state, cmd_tx) {
                ui.memory_mut(|m| m.request_focus(input_id));
            }
        });
}

/// Starts a chat turn from the input box. Returns true when a request went out.
fn send_chat(state: &mut UiState, cmd_tx: &Sender<EngineCommand>) -> bool {
    let request = match state.chat.begin_send(&state.chat_input) {
        Ok(r) => r,
        Err(e) => {
            debug!(reason = %e, "chat send ignored");
            return false;
        }
    };

    state.chat_input.clear();
    state.chat_scroll = true;

    if cmd_tx
        .send(EngineCommand::SendChat {
            message: request.message,
            history: request.history,
        })
        .is_err()
    {
        state
            .chat
            .complete(Err(GatewayError::Network("engine stopped".into())));
    }

    true
}

/// One-shot: a new message scrolls the transcript once, then the user
/// is free to scroll back.
fn take_scroll_request(state: &mut UiState) -> bool {
    std::mem::take(&mut state.chat_scroll)
}

fn draw_message(ui: &mut egui::Ui, settings: &UiSettings, msg: &ChatMessage) {
    ui.add_space(6.0);

    match msg.role {
        ChatRole::User => {
            ui.with_layout(Layout::right_to_left(egui::Align::TOP), |ui| {
                bubble(ui, settings.color("User"), &msg.content);
            });
        }
        ChatRole::Assistant => bubble(ui, settings.color("Assistant"), &msg.content),
    }
}

fn bubble(ui: &mut egui::Ui, color: egui::Color32, text: &str) {
    egui::Frame::new()
        .fill(color)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.set_max_width(260.0);
            ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn sending_clears_input_and_forwards_prior_history() {
        let (tx, rx) = mpsc::channel();
        let mut state = UiState::default();
        state.chat_input = "Afiş için renk önerin var mı?".into();

        assert!(send_chat(&mut state, &tx));
        assert!(state.chat_input.is_empty());
        assert!(state.chat.is_awaiting());

        match rx.try_recv() {
            Ok(EngineCommand::SendChat { message, history }) => {
                assert_eq!(message, "Afiş için renk önerin var mı?");
                assert_eq!(history.len(), 1);
                assert_eq!(history[0].role, ChatRole::Assistant);
            }
            _ => panic!("expected a chat command"),
        }
    }

    #[test]
    fn scroll_request_is_consumed_once() {
        let (tx, _rx) = mpsc::channel();
        let mut state = UiState::default();
        state.chat_input = "Merhaba".into();

        assert!(!take_scroll_request(&mut state));
        send_chat(&mut state, &tx);
        assert!(take_scroll_request(&mut state));
        assert!(!take_scroll_request(&mut state));
    }

    #[test]
    fn second_send_while_awaiting_is_ignored() {
        let (tx, rx) = mpsc::channel();
        let mut state = UiState::default();

        state.chat_input = "ilk".into();
        assert!(send_chat(&mut state, &tx));
        state.chat_input = "ikinci".into();
        assert!(!send_chat(&mut state, &tx));

        assert_eq!(state.chat_input, "ikinci");
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn blank_input_sends_nothing() {
        let (tx, rx) = mpsc::channel();
        let mut state = UiState::default();
        state.chat_input = "   ".into();

        assert!(!send_chat(&mut state, &tx));
        assert!(rx.try_recv().is_err());
        assert_eq!(state.chat.messages().len(), 1);
    }
}
