use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Multi-channel marketing copy for one event.
/// Field names follow the JSON contract requested from the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPackage {
    pub instagram_twitter: SocialPost,
    pub linkedin_email: ProfessionalPost,
    pub whatsapp: String,
    pub slogan: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPost {
    pub hook: String,
    pub body: String,
    pub cta: String,
    /// Display order.
    pub hashtags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalPost {
    pub subject: String,
    pub body: String,
    /// Display order.
    pub bullet_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageOrigin {
    Generated,
    Fallback { reason: String },
}

/// The package plus where it came from. This is what the UI keeps as the
/// latest result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPackage {
    pub package: ContentPackage,
    pub origin: PackageOrigin,
}

impl GeneratedPackage {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, PackageOrigin::Fallback { .. })
    }
}

impl ContentPackage {
    /// Builds a package from any decoded JSON object without validating it.
    /// Missing or mistyped fields end up empty.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let social = object.get("instagram_twitter");
        let professional = object.get("linkedin_email");

        Self {
            instagram_twitter: SocialPost {
                hook: text_field(social, "hook"),
                body: text_field(social, "body"),
                cta: text_field(social, "cta"),
                hashtags: list_field(social, "hashtags"),
            },
            linkedin_email: ProfessionalPost {
                subject: text_field(professional, "subject"),
                body: text_field(professional, "body"),
                bullet_points: list_field(professional, "bullet_points"),
            },
            whatsapp: object
                .get("whatsapp")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            slogan: object
                .get("slogan")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// Hashtags as shown to the user, `#` prefixed once.
    pub fn display_hashtags(&self) -> String {
        self.instagram_twitter
            .hashtags
            .iter()
            .map(|tag| format!("#{}", tag.trim_start_matches('#')))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn social_text(&self) -> String {
        let post = &self.instagram_twitter;
        format!(
            "{}\n\n{}\n\n{}\n\n{}",
            post.hook,
            post.body,
            post.cta,
            self.display_hashtags()
        )
    }

    pub fn professional_text(&self) -> String {
        let post = &self.linkedin_email;
        let bullets = post
            .bullet_points
            .iter()
            .map(|p| format!("• {p}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n\n{}\n\n{}", post.subject, post.body, bullets)
    }
}

fn text_field(section: Option<&Value>, key: &str) -> String {
    section
        .and_then(|s| s.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn list_field(section: Option<&Value>, key: &str) -> Vec<String> {
    section
        .and_then(|s| s.get(key))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
