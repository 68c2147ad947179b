use eframe::egui;

use crate::model::content_package::ContentPackage;
use crate::ui::app::UiState;
use crate::ui::settings::UiSettings;

pub fn draw_content_output(ctx: &egui::Context, state: &mut UiState, settings: &UiSettings) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(result) = &state.result else {
            draw_placeholder(ui);
            return;
        };

        let package = &result.package;
        let mut copied = false;

        egui::ScrollArea::vertical().show(ui, |ui| {
            card(ui, settings.color("Accent"), |ui| {
                ui.label(egui::RichText::new("Slogan").small().color(egui::Color32::WHITE));
                ui.label(
                    egui::RichText::new(&package.slogan)
                        .size(20.0)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
            });

            ui.add_space(10.0);
            ui.columns(2, |cols| {
                copied |= draw_social(&mut cols[0], package);
                copied |= draw_whatsapp(&mut cols[1], package);
            });

            ui.add_space(10.0);
            copied |= draw_professional(ui, package);
        });

        if copied {
            state.alert = Some("Kopyalandı!".to_string());
        }
    });
}

fn draw_placeholder(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.3);
        ui.heading("İçeriklerin Burada Görünecek");
        ui.label("Yandaki formu doldurup \"Oluştur\" butonuna bastığında sihir başlayacak!");
    });
}

fn draw_social(ui: &mut egui::Ui, package: &ContentPackage) -> bool {
    let post = &package.instagram_twitter;
    let mut copied = false;

    ui.group(|ui| {
        copied = section_header(ui, "Instagram / Twitter", &package.social_text());
        ui.label(egui::RichText::new(&post.hook).strong());
        ui.add_space(4.0);
        ui.label(&post.body);
        ui.add_space(4.0);
        ui.label(egui::RichText::new(&post.cta).italics());
        ui.add_space(4.0);
        ui.label(egui::RichText::new(package.display_hashtags()).color(egui::Color32::from_rgb(79, 70, 229)));
    });

    copied
}

fn draw_whatsapp(ui: &mut egui::Ui, package: &ContentPackage) -> bool {
    let mut copied = false;

    ui.group(|ui| {
        copied = section_header(ui, "WhatsApp Grubu", &package.whatsapp);
        ui.label(&package.whatsapp);
    });

    copied
}

fn draw_professional(ui: &mut egui::Ui, package: &ContentPackage) -> bool {
    let post = &package.linkedin_email;
    let mut copied = false;

    ui.group(|ui| {
        copied = section_header(ui, "LinkedIn & E-posta Duyurusu", &package.professional_text());
        ui.label(egui::RichText::new(&post.subject).strong());
        ui.add_space(4.0);
        ui.label(&post.body);
        ui.add_space(4.0);
        for point in &post.bullet_points {
            ui.label(format!("• {point}"));
        }
    });

    copied
}

/// Title row with a copy button. Returns true when the text was copied.
fn section_header(ui: &mut egui::Ui, title: &str, copy_text: &str) -> bool {
    let mut copied = false;
    ui.horizontal(|ui| {
        ui.heading(title);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("📋 Kopyala").clicked() {
                ui.ctx().copy_text(copy_text.to_string());
                copied = true;
            }
        });
    });
    ui.separator();
    copied
}

fn card(ui: &mut egui::Ui, color: egui::Color32, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::new()
        .fill(color)
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::symmetric(16, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
}
