use std::sync::atomic::{AtomicUsize, Ordering};

use campus_hub::engine::content_service::generate_package;
use campus_hub::engine::fallback::fallback_package;
use campus_hub::engine::gateway::{Gateway, GatewayError};
use campus_hub::engine::response_parser::extract_json_object;
use campus_hub::model::chat::ChatMessage;
use campus_hub::model::content_package::{
    ContentPackage, PackageOrigin, ProfessionalPost, SocialPost,
};
use campus_hub::model::event_input::{EventInput, ValidationError};
use campus_hub::model::media::{MediaKind, MediaPayload, SourceImage};

/// Text-only gateway with a fixed answer.
struct CannedText {
    reply: Result<String, GatewayError>,
    calls: AtomicUsize,
}

impl CannedText {
    fn new(reply: Result<String, GatewayError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Gateway for CannedText {
    fn has_credential(&self) -> bool {
        true
    }

    fn set_api_key(&self, _key: String) {}

    fn generate_text(&self, _prompt: &str) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }

    fn generate_media(
        &self,
        _prompt: &str,
        _kind: MediaKind,
        _source: Option<&SourceImage>,
    ) -> Result<MediaPayload, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GatewayError::NoMedia)
    }

    fn chat(&self, _message: &str, _history: &[ChatMessage]) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

fn summit() -> EventInput {
    EventInput {
        audience: "Tüm öğrenciler".into(),
        ..EventInput::new("Yapay Zeka Zirvesi", "Üretken yapay zeka trendleri")
    }
}

fn sample_package() -> ContentPackage {
    ContentPackage {
        instagram_twitter: SocialPost {
            hook: "Geleceği kaçırma!".into(),
            body: "Yapay zeka zirvesinde buluşuyoruz. \"Soru-cevap\" oturumu da var.".into(),
            cta: "Hemen kayıt ol".into(),
            hashtags: vec!["YapayZeka".into(), "#Kampüs".into()],
        },
        linkedin_email: ProfessionalPost {
            subject: "Yapay Zeka Zirvesi Daveti".into(),
            body: "Değerli katılımcılar, {sektör} liderleriyle tanışın.".into(),
            bullet_points: vec!["Networking".into(), "Sertifika".into()],
        },
        whatsapp: "Arkadaşlar 20 Mayıs'ta Amfi 1'deyiz 🚀".into(),
        slogan: "Kodla, keşfet, kazan".into(),
    }
}

#[test]
fn transport_failure_yields_the_fallback_package() {
    let gateway = CannedText::new(Err(GatewayError::Network("connection refused".into())));
    let input = summit();

    let generated = generate_package(&gateway, &input).unwrap();

    assert!(generated.is_fallback());
    assert_eq!(generated.package, fallback_package(&input));
    assert!(generated.package.slogan.contains("Yapay Zeka Zirvesi"));
    assert_eq!(gateway.calls(), 1);
}

#[test]
fn missing_name_is_rejected_before_any_call() {
    let gateway = CannedText::new(Ok("{}".into()));
    let input = EventInput::new("   ", "Üretken yapay zeka trendleri");

    let err = generate_package(&gateway, &input).unwrap_err();

    assert_eq!(err, ValidationError::MissingName);
    assert_eq!(gateway.calls(), 0);
}

#[test]
fn model_answer_wrapped_in_prose_is_recovered() {
    let package = sample_package();
    let json = serde_json::to_string_pretty(&package).unwrap();
    let answer = format!("İşte içerik paketin:\n```json\n{json}\n```\nBaşarılar!");

    let object = extract_json_object(&answer).unwrap();
    assert_eq!(
        serde_json::Value::Object(object.clone()),
        serde_json::to_value(&package).unwrap()
    );
    assert_eq!(ContentPackage::from_json_object(&object), package);

    let gateway = CannedText::new(Ok(answer));
    let generated = generate_package(&gateway, &summit()).unwrap();
    assert_eq!(generated.origin, PackageOrigin::Generated);
    assert_eq!(generated.package, package);
}

#[test]
fn unparsable_answer_falls_back() {
    let gateway = CannedText::new(Ok("Üzgünüm, bu isteği işleyemiyorum.".into()));
    let input = summit();

    let generated = generate_package(&gateway, &input).unwrap();

    assert!(matches!(generated.origin, PackageOrigin::Fallback { .. }));
    assert_eq!(generated.package, fallback_package(&input));
}

#[test]
fn partial_object_leaves_missing_fields_empty() {
    let gateway = CannedText::new(Ok(r#"{"slogan": "Birlikte daha güçlü"}"#.into()));

    let generated = generate_package(&gateway, &summit()).unwrap();

    assert!(!generated.is_fallback());
    assert_eq!(generated.package.slogan, "Birlikte daha güçlü");
    assert!(generated.package.whatsapp.is_empty());
    assert!(generated.package.instagram_twitter.hashtags.is_empty());
}
