use crate::model::event_input::EventInput;
use crate::model::media::{AspectRatio, ImageSize};

/// Persona sent as the system instruction for marketing generation.
pub const MARKETING_SYSTEM_INSTRUCTION: &str = "Sen, \"CampusHub\" adlı dinamik bir üniversite platformu için çalışan, Z kuşağına ve akademik dünyaya aynı anda hitap edebilen, ödüllü bir dijital içerik stratejisti ve metin yazarı olan \"HubAI\"sın.\n\
TEMEL GÖREVİN: Üniversite etkinlikleri için yaratıcı pazarlama içerikleri üretmek.\n\
TON: Enerjik, samimi, zeki, motive edici. Asla robotik olma.\n\
FORMAT: Mutlaka JSON formatında cevap ver.";

/// Persona for the floating chat assistant.
pub const CHAT_SYSTEM_INSTRUCTION: &str = "Sen HubAI'sın. CampusHub kullanıcılarına kampüs hayatı, etkinlik yönetimi ve içerik stratejisi konularında yardımcı oluyorsun. Z kuşağı dilini kullan.";

pub const MIN_FIELD_CHARS: usize = 300;

/// Formats instructions for the generation backend.
/// Only formats text: no networking, no parsing.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn marketing(input: &EventInput) -> String {
        let mut prompt = String::new();

        prompt.push_str("Bu etkinlik için pazarlama içeriği oluştur:\n\n");
        push_event_section(&mut prompt, input);
        push_content_rules(&mut prompt);
        push_json_contract(&mut prompt);

        prompt
    }

    pub fn image(description: &str, size: ImageSize, ratio: AspectRatio) -> String {
        format!(
            "Create a high-quality, professional image for a university campus event poster.\n\
Style: Modern, vibrant, eye-catching, suitable for Gen-Z audience.\n\
Aspect ratio: {}\n\
Size preference: {}\n\n\
Image description: {}\n\n\
Make it colorful, dynamic and perfect for social media marketing.",
            ratio.as_str(),
            size.as_str(),
            description.trim()
        )
    }

    pub fn image_edit(instructions: &str) -> String {
        format!(
            "Edit this image according to the following instructions. Keep the overall style professional and suitable for university campus marketing.\n\n\
Edit instructions: {}\n\n\
Return the edited image.",
            instructions.trim()
        )
    }

    /// The backend cannot return real video, so this asks for a freeze-frame.
    pub fn video_frame(description: &str, ratio: AspectRatio, has_source: bool) -> String {
        if has_source {
            return format!(
                "Transform this image into a dynamic, motion-style promotional visual. Add energy and movement effects. {}",
                description.trim()
            );
        }

        format!(
            "Create a dynamic, eye-catching promotional image that could serve as a video thumbnail or animated poster for a university campus event.\n\n\
Style: Modern, vibrant, with motion blur effects or dynamic elements suggesting movement and energy.\n\
Aspect ratio: {}\n\
Target audience: Gen-Z university students\n\n\
Content: {}\n\n\
Make it look like a freeze-frame from an exciting promotional video. Include dynamic lighting, motion effects, and energetic composition.",
            ratio.as_str(),
            description.trim()
        )
    }
}

fn push_event_section(prompt: &mut String, input: &EventInput) {
    prompt.push_str(&format!("Etkinlik Adı: {}\n", input.event_name.trim()));
    prompt.push_str(&format!("Konu: {}\n", input.topic.trim()));

    for (label, value) in input.optional_fields() {
        prompt.push_str(&format!("{}: {}\n", label, value.trim()));
    }

    prompt.push('\n');
}

fn push_content_rules(prompt: &mut String) {
    prompt.push_str("ÖNEMLİ KURALLAR:\n");
    prompt.push_str(&format!(
        "- Her metin alanı (hook, body, cta, subject, whatsapp, slogan) EN AZ {} karakter olmalı\n",
        MIN_FIELD_CHARS
    ));
    prompt.push_str(
        "- İçerikler çok detaylı, etkileyici, heyecan verici ve Z kuşağına hitap eden bir dilde yazılmalı\n\
- BOL BOL EMOJİ KULLAN! 🎉🚀🔥💫✨🎯💪🌟⭐️🎊🎁💡🏆👏😍🤩❤️💜💙💚🧡\n\
- Kısa ve yetersiz içerik KESİNLİKLE KABUL EDİLMEZ\n\
- Her cümle enerjik ve motive edici olmalı\n\
- Emoji'leri cümle başlarında, sonlarında ve vurgu yapmak istediğin yerlerde kullan\n\
- LinkedIn/e-posta metni daha profesyonel bir tonda olmalı\n\n",
    );
}

fn push_json_contract(prompt: &mut String) {
    let min = MIN_FIELD_CHARS;
    prompt.push_str("Yanıt mutlaka aşağıdaki JSON formatında olmalı ve JSON dışında hiçbir şey içermemeli:\n");
    prompt.push_str(&format!(
        "{{\n  \"instagram_twitter\": {{ \"hook\": \"en az {min} karakter, bol emoji\", \"body\": \"en az {min} karakter, bol emoji\", \"cta\": \"en az {min} karakter, bol emoji\", \"hashtags\": [] }},\n  \"linkedin_email\": {{ \"subject\": \"en az {min} karakter, profesyonel emoji\", \"body\": \"en az {min} karakter, profesyonel emoji\", \"bullet_points\": [] }},\n  \"whatsapp\": \"en az {min} karakter, bol emoji\",\n  \"slogan\": \"en az {min} karakter, bol emoji\"\n}}"
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marketing_prompt_names_every_output_field() {
        let prompt = PromptBuilder::marketing(&EventInput::new("Yapay Zeka Zirvesi", "AI trends"));

        for field in [
            "instagram_twitter",
            "hook",
            "cta",
            "hashtags",
            "linkedin_email",
            "subject",
            "bullet_points",
            "whatsapp",
            "slogan",
        ] {
            assert!(prompt.contains(field), "missing {field}");
        }
        assert!(prompt.contains("Etkinlik Adı: Yapay Zeka Zirvesi"));
        assert!(prompt.contains("EN AZ 300 karakter"));
    }

    #[test]
    fn optional_fields_appear_only_when_filled() {
        let mut input = EventInput::new("Zirve", "AI");
        let bare = PromptBuilder::marketing(&input);
        assert!(!bare.contains("Hedef Kitle"));

        input.date_location = "20 Mayıs, Amfi 1".into();
        let filled = PromptBuilder::marketing(&input);
        assert!(filled.contains("Tarih ve Yer: 20 Mayıs, Amfi 1"));
        assert!(!filled.contains("Özel Notlar"));
    }

    #[test]
    fn json_contract_is_valid_json() {
        let prompt = PromptBuilder::marketing(&EventInput::new("Zirve", "AI"));
        let start = prompt.find('{').unwrap();
        let contract: serde_json::Value = serde_json::from_str(&prompt[start..]).unwrap();
        assert!(contract["linkedin_email"]["bullet_points"].is_array());
    }

    #[test]
    fn video_prompt_switches_on_source() {
        let plain = PromptBuilder::video_frame("konser", AspectRatio::Portrait, false);
        assert!(plain.contains("Aspect ratio: 9:16"));

        let with_source = PromptBuilder::video_frame("konser", AspectRatio::Portrait, true);
        assert!(with_source.starts_with("Transform this image"));
        assert!(with_source.ends_with("konser"));
    }
}
