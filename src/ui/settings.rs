use egui::Color32;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiSettings {
    pub ui_scale: f32,

    // Role → color mapping (extensible)
    pub colors: HashMap<String, [u8; 4]>,
}

impl Default for UiSettings {
    fn default() -> Self {
        let mut colors = HashMap::new();

        colors.insert("User".into(), [79, 70, 229, 255]);
        colors.insert("Assistant".into(), [71, 85, 105, 255]);
        colors.insert("Accent".into(), [99, 102, 241, 255]);
        colors.insert("Notice".into(), [180, 120, 30, 255]);

        Self {
            ui_scale: 1.0,
            colors,
        }
    }
}

impl UiSettings {
    pub fn color(&self, key: &str) -> Color32 {
        self.colors
            .get(key)
            .map(|c| Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3]))
            .unwrap_or(Color32::WHITE)
    }

    /// Scale clamped to what the slider allows.
    pub fn clamped_scale(&self) -> f32 {
        self.ui_scale.clamp(0.75, 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_roles_fall_back_to_white() {
        let settings = UiSettings::default();
        assert_eq!(settings.color("Nobody"), Color32::WHITE);
        assert_eq!(settings.color("User"), Color32::from_rgb(79, 70, 229));
    }

    #[test]
    fn scale_is_clamped() {
        let settings = UiSettings {
            ui_scale: 9.0,
            ..UiSettings::default()
        };
        assert_eq!(settings.clamped_scale(), 2.0);
    }
}
