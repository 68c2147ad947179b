use crate::model::content_package::{ContentPackage, ProfessionalPost, SocialPost};
use crate::model::event_input::EventInput;

const HASHTAGS: [&str; 12] = [
    "etkinlik",
    "kampus",
    "deneyim",
    "universite",
    "genclik",
    "kariyer",
    "network",
    "fırsat",
    "gelecek",
    "başarı",
    "motivasyon",
    "öğrenci",
];

const BULLET_POINTS: [&str; 4] = [
    "🤝 Sektör liderlerinden eşsiz networking ve mentorluk fırsatı - kariyerinizi şekillendirin!",
    "💡 Pratik uygulamalarla yeni beceriler kazanma imkanı - teoriden pratiğe geçin!",
    "🎯 Kariyer gelişiminizi hızlandıracak stratejik bağlantılar ve iş fırsatları!",
    "🏆 CV'nize değer katacak sertifika ve deneyim kazanma şansı!",
];

const CTA: &str = "🔥💥 YERİNİZİ HEMEN AYIRTIN! 💥🔥 Sınırlı kontenjan dolmadan kayıt olun ve bu EFSANE deneyimin bir parçası olun! 🎫✨ Kayıt için linke tıklayın ve maceraya katılın! 🚀 Arkadaşlarınızı da etiketleyin, birlikte katılalım! 👥💜 Bu fırsat kaçmaz, ŞIMDI harekete geç! ⏰🎯 Seni de aramızda görmek istiyoruz! 🤩🌟 Hadi, kampüsün en büyük buluşmasına sen de katıl! 🎊💫";

/// Network-free package built from the form alone. Same input, same output.
pub fn fallback_package(input: &EventInput) -> ContentPackage {
    let name = input.event_name.trim();
    let topic = input.topic.trim();

    ContentPackage {
        instagram_twitter: SocialPost {
            hook: format!(
                "🎉✨ {name} KAPILARI AÇIYOR! ✨🎉 Bu muhteşem fırsatı kaçırmak istemeyenler için tam zamanı geldi! 🚀💫 Kampüsün en heyecan verici, en epik, en unutulmaz etkinliğine hazır mısın? 🔥 Hadi birlikte unutulmaz anılar biriktirelim, hayallerimizi gerçekleştirelim ve geleceğimizi şekillendirelim! 💪🌟 Bu fırsat bir daha gelmez, şimdi harekete geç! ⭐️🎊"
            ),
            body: format!(
                "🤩 Heyecan verici bir deneyime hazır ol! 💥 {topic} konusunda kendini geliştirmek, yeni insanlarla tanışmak ve kariyerine yön vermek için EFSANE bir fırsat seni bekliyor! 🎯✨ Bu etkinlik sayesinde hem eğlenecek hem de öğreneceksin - üstelik hayatın boyu unutamayacağın anılar biriktirirken! 🌈💫 Kampüs hayatının en renkli, en enerjik, en inspiratif anlarından birine ortak olmak için hemen harekete geç! 🚀🔥 Sektörün en iyilerinden öğren, networking yap, CV'ni güçlendir! 💪🏆 Bu deneyim seni bir adım öne taşıyacak! ⭐️😍"
            ),
            cta: CTA.to_string(),
            hashtags: HASHTAGS.iter().map(|t| t.to_string()).collect(),
        },
        linkedin_email: ProfessionalPost {
            subject: format!(
                "🌟 {name} - Kariyer Yolculuğunuzda Yeni Bir Sayfa Açın | Profesyonel Gelişim Fırsatı | Networking & Mentorluk 🚀"
            ),
            body: format!(
                "✨ Değerli profesyonel ağımızla heyecan verici bir gelişmeyi paylaşmak istiyoruz! 🎯 {topic} konusunda düzenlenen bu özel etkinlik, kariyerinize yeni bir soluk getirecek ve sizi bir adım öne taşıyacak! 💼🌟 Sektörün önde gelen isimleriyle tanışma, değerli bilgi alışverişi yapma ve network ağınızı genişletme fırsatını kesinlikle kaçırmayın! 🤝💡 Bu etkinlik, profesyonel gelişiminiz için kritik öneme sahip bağlantılar kurmanıza ve sektördeki en güncel trendleri öğrenmenize olanak sağlayacak! 🏆✨ Kariyerinizi bir üst seviyeye taşımak için bu eşsiz fırsatı değerlendirin! 🚀💫"
            ),
            bullet_points: BULLET_POINTS.iter().map(|p| p.to_string()).collect(),
        },
        whatsapp: format!(
            "🎯💥 HEYYY! 💥🎯 {name} etkinliğini duydun mu?! 🤩✨ Kampüsün en çok konuşulan, en epik, en efsane organizasyonlarından birine katılma şansın var! 🚀🔥 {topic} hakkında hem öğrenecek hem de EFSANE insanlarla tanışacaksın! 👥💜 Gel birlikte katılalım, bu etkinlik LEGENDARY olacak! 🎊🌟 Arkadaşlarına da haber ver, grup halinde gidelim! 💪✨ Kayıt linki bio'da, hemen tıkla ve yerini ayırt! 🎫🔥 Bu fırsat kaçmaz, ŞIMDI harekete geç! ⏰💫 Seni orada görmek istiyorum! 🤩❤️"
        ),
        slogan: format!(
            "✨🌟 {name} - Geleceği Şekillendir, Potansiyelini Keşfet, Hayallerini Gerçekleştir! 🚀💫 Kampüsün En Büyük, En Epik, En Unutulmaz Buluşma Noktası Seni Bekliyor! 🔥🏆 Bir Adım At, Hayatını Değiştir! 💪⭐️ #EfsaneOlacak 🎉✨"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(p: &ContentPackage) -> [&str; 7] {
        [
            p.instagram_twitter.hook.as_str(),
            p.instagram_twitter.body.as_str(),
            p.instagram_twitter.cta.as_str(),
            p.linkedin_email.subject.as_str(),
            p.linkedin_email.body.as_str(),
            p.whatsapp.as_str(),
            p.slogan.as_str(),
        ]
    }

    #[test]
    fn every_field_is_filled() {
        let package = fallback_package(&EventInput::new("Yapay Zeka Zirvesi", "AI trends"));

        for leaf in leaves(&package) {
            assert!(!leaf.trim().is_empty());
        }
        assert!(!package.instagram_twitter.hashtags.is_empty());
        assert!(!package.linkedin_email.bullet_points.is_empty());
    }

    #[test]
    fn deterministic_for_identical_input() {
        let input = EventInput::new("Bahar Şenliği", "müzik");
        assert_eq!(fallback_package(&input), fallback_package(&input.clone()));
    }

    #[test]
    fn name_and_topic_are_interpolated() {
        let package = fallback_package(&EventInput::new("Kodlama Kampı", "Rust"));

        assert!(package.slogan.contains("Kodlama Kampı"));
        assert!(package.instagram_twitter.hook.contains("Kodlama Kampı"));
        assert!(package.linkedin_email.subject.contains("Kodlama Kampı"));
        assert!(package.whatsapp.contains("Kodlama Kampı"));
        assert!(package.whatsapp.contains("Rust"));
        assert!(package.instagram_twitter.body.contains("Rust"));
    }
}
