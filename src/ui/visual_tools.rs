use eframe::egui;
use std::fs;
use std::sync::mpsc::Sender;
use tracing::{error, info};

use crate::engine::media_flow::{MediaPhase, MediaState, MEDIA_ALERT};
use crate::engine::protocol::EngineCommand;
use crate::model::media::{AspectRatio, ImageSize, MediaKind, MediaOperation, MediaResult};
use crate::ui::app::UiState;

pub fn load_texture(ctx: &egui::Context, bytes: &[u8]) -> anyhow::Result<egui::TextureHandle> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
    Ok(ctx.load_texture("media_result", color_image, egui::TextureOptions::LINEAR))
}

pub fn draw_visual_tools(ctx: &egui::Context, state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Görsel Araç Kutusu 🎨");
                ui.label("Kampüsün için çarpıcı görseller, afişler ve kısa videolar tasarla.");
            });
            ui.add_space(8.0);

            draw_operation_tabs(ui, state);
            ui.separator();
            draw_options(ui, state);
            ui.add_space(8.0);
            draw_action(ui, state, cmd_tx);
            ui.add_space(8.0);
            draw_result(ui, state);

            ui.add_space(12.0);
            ui.small("* Görsel modelleri ücretli Google Cloud faturalandırması gerektirebilir.");
        });
    });
}

fn draw_operation_tabs(ui: &mut egui::Ui, state: &mut UiState) {
    let busy = state.media_state.is_busy();

    ui.horizontal(|ui| {
        for op in MediaOperation::ALL {
            let selected = state.media_form.operation == op;
            let tab = ui
                .add_enabled_ui(!busy, |ui| ui.selectable_label(selected, op.label()))
                .inner;
            if tab.clicked() && !selected {
                state.media_form.select_operation(op);
                clear_result(state);
            }
        }
    });
}

fn draw_options(ui: &mut egui::Ui, state: &mut UiState) {
    let form = &mut state.media_form;

    let hint = if form.operation == MediaOperation::Edit {
        "Görselde neyi değiştirmek istersiniz? (Örn: Arka planı sil)"
    } else {
        "Hayalinizdeki sahneyi tarif edin..."
    };
    ui.add(
        egui::TextEdit::multiline(&mut form.prompt)
            .desired_rows(2)
            .desired_width(f32::INFINITY)
            .hint_text(hint),
    );

    ui.horizontal(|ui| {
        egui::ComboBox::from_label("En-boy oranı")
            .selected_text(form.ratio.as_str())
            .show_ui(ui, |ui| {
                for ratio in AspectRatio::ALL {
                    ui.selectable_value(&mut form.ratio, ratio, ratio.as_str());
                }
            });

        if form.operation == MediaOperation::Generate {
            egui::ComboBox::from_label("Boyut")
                .selected_text(form.size.as_str())
                .show_ui(ui, |ui| {
                    for size in ImageSize::ALL {
                        ui.selectable_value(&mut form.size, size, size.as_str());
                    }
                });
        }
    });

    if !form.operation.accepts_source() {
        return;
    }

    let mut picked = false;
    ui.horizontal(|ui| {
        let label = if form.operation.requires_source() {
            "Kaynak görsel *"
        } else {
            "Kaynak görsel (isteğe bağlı)"
        };
        ui.label(label);

        match &form.source {
            Some(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                ui.monospace(name);
                if ui.small_button("❌").clicked() {
                    form.source = None;
                }
            }
            None => {
                if ui.button("📁 Dosya Seç").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Görsel", &["png", "jpg", "jpeg", "webp", "gif"])
                        .pick_file()
                    {
                        form.source = Some(path);
                        picked = true;
                    }
                }
            }
        }
    });

    if picked {
        clear_result(state);
    }

    if let MediaState::ReadingSource { progress } = state.media_state {
        ui.add(
            egui::ProgressBar::new(f32::from(progress) / 100.0)
                .text(format!("Dosya okunuyor… %{progress}")),
        );
    }
}

fn draw_action(ui: &mut egui::Ui, state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    let busy = state.media_state.is_busy();

    ui.horizontal(|ui| {
        let trigger = ui.add_enabled(
            state.media_form.can_trigger(busy),
            egui::Button::new("Oluştur").min_size(egui::vec2(160.0, 34.0)),
        );
        if matches!(state.media_state, MediaState::Requesting) {
            ui.spinner();
            ui.label("HubAI çalışıyor…");
        }

        if trigger.clicked() {
            start_request(state, cmd_tx);
        }
    });
}

fn start_request(state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    let request = match state.media_form.to_request() {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "media request rejected by the form");
            state.alert = Some(MEDIA_ALERT.to_string());
            return;
        }
    };

    clear_result(state);
    state.media_state.advance(if request.source.is_some() {
        MediaPhase::ReadingSource(0)
    } else {
        MediaPhase::Requesting
    });

    if cmd_tx.send(EngineCommand::RunMedia(request)).is_err() {
        state.media_state = MediaState::Idle;
    }
}

fn clear_result(state: &mut UiState) {
    state.media_texture = None;
    if !state.media_state.is_busy() {
        state.media_state = MediaState::Idle;
    }
}

fn draw_result(ui: &mut egui::Ui, state: &mut UiState) {
    let MediaState::Succeeded(result) = &state.media_state else {
        return;
    };

    ui.separator();
    if result.kind == MediaKind::Video && result.is_still_image() {
        ui.label("Video karesi (hareketli afiş)");
    }

    match &state.media_texture {
        Some(texture) => {
            let max_width = ui.available_width().min(640.0);
            ui.add(
                egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture))
                    .max_width(max_width)
                    .corner_radius(egui::CornerRadius::same(12)),
            );
        }
        None => {
            ui.label(format!("{} ({} bayt)", result.mime_type, result.bytes.len()));
        }
    }

    ui.horizontal(|ui| {
        if ui.button("💾 Kaydet").clicked() {
            if let Err(message) = save_result(result) {
                state.alert = Some(message);
            }
        }
        if ui.button("🔗 URI Kopyala").clicked() {
            ui.ctx().copy_text(result.uri.clone());
        }
    });
}

fn save_result(result: &MediaResult) -> Result<(), String> {
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(format!("hubai.{}", result.file_extension()))
        .save_file()
    else {
        return Ok(());
    };

    fs::write(&path, &result.bytes).map_err(|e| {
        error!(error = %e, path = %path.display(), "saving media failed");
        "Dosya kaydedilemedi.".to_string()
    })?;

    info!(path = %path.display(), "media saved");
    Ok(())
}
