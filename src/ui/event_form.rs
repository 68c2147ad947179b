use eframe::egui;
use std::sync::mpsc::Sender;
use tracing::debug;

use crate::engine::protocol::EngineCommand;
use crate::model::event_input::ValidationError;
use crate::ui::app::UiState;

pub fn validation_message(e: &ValidationError) -> &'static str {
    match e {
        ValidationError::MissingName => "Etkinlik adı zorunludur.",
        ValidationError::MissingTopic => "Konu ve detaylar zorunludur.",
    }
}

pub fn draw_event_form(ctx: &egui::Context, state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    egui::SidePanel::left("event_form")
        .resizable(true)
        .default_width(340.0)
        .min_width(280.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Kampüs Editörü ✨");
                ui.label("Etkinlik detaylarını gir, HubAI profesyonel metinlerini saniyeler içinde hazırlasın.");
                ui.separator();

                let form = &mut state.form;

                field(ui, "Etkinlik Adı *", &mut form.event_name, "Örn: Yapay Zeka Zirvesi");
                field(ui, "Hedef Kitle", &mut form.audience, "Örn: Tüm öğrenciler");
                field(ui, "Tarih ve Yer", &mut form.date_location, "Örn: 20 Mayıs, Amfi 1");

                ui.label("Konu ve Detaylar *");
                ui.add(
                    egui::TextEdit::multiline(&mut form.topic)
                        .desired_rows(3)
                        .desired_width(f32::INFINITY)
                        .hint_text("Etkinliğin amacını kısaca anlatın..."),
                );
                ui.add_space(4.0);

                field(
                    ui,
                    "Özel Notlar (Sertifika, Konuşmacı vb.)",
                    &mut form.notes,
                    "Örn: Pizza ikramı var!",
                );

                if let Some(err) = &state.form_error {
                    ui.colored_label(egui::Color32::from_rgb(220, 38, 38), err.as_str());
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let submit = ui.add_enabled(
                        !state.generating,
                        egui::Button::new("⚡ İçerikleri Oluştur").min_size(egui::vec2(200.0, 36.0)),
                    );
                    if state.generating {
                        ui.spinner();
                    }

                    if submit.clicked() {
                        submit_form(state, cmd_tx);
                    }
                });
            });
        });
}

/// Required fields are checked here so an invalid form never reaches the engine.
fn submit_form(state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    if state.generating {
        return;
    }

    if let Err(e) = state.form.validate() {
        state.form_error = Some(validation_message(&e).to_string());
        return;
    }

    state.form_error = None;
    debug!(event = %state.form.event_name, "submitting event form");

    if cmd_tx
        .send(EngineCommand::GeneratePackage(state.form.clone()))
        .is_ok()
    {
        state.generating = true;
    }
}

fn field(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) {
    ui.label(label);
    ui.add(
        egui::TextEdit::singleline(value)
            .desired_width(f32::INFINITY)
            .hint_text(hint),
    );
    ui.add_space(4.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn empty_name_never_reaches_the_engine() {
        let (tx, rx) = mpsc::channel();
        let mut state = UiState::default();
        state.form.topic = "AI trends".into();

        submit_form(&mut state, &tx);

        assert!(rx.try_recv().is_err());
        assert!(!state.generating);
        assert_eq!(state.form_error.as_deref(), Some("Etkinlik adı zorunludur."));
    }

    #[test]
    fn valid_form_is_sent_once_while_in_flight() {
        let (tx, rx) = mpsc::channel();
        let mut state = UiState::default();
        state.form.event_name = "Yapay Zeka Zirvesi".into();
        state.form.topic = "AI trends".into();

        submit_form(&mut state, &tx);
        submit_form(&mut state, &tx);

        assert!(state.generating);
        assert!(matches!(rx.try_recv(), Ok(EngineCommand::GeneratePackage(_))));
        assert!(rx.try_recv().is_err());
    }
}
