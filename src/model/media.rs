use base64::{engine::general_purpose::STANDARD, Engine as _};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaOperation {
    #[default]
    Generate,
    Edit,
    Video,
}

impl MediaOperation {
    pub const ALL: [MediaOperation; 3] = [
        MediaOperation::Generate,
        MediaOperation::Edit,
        MediaOperation::Video,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MediaOperation::Generate => "Görsel Oluştur",
            MediaOperation::Edit => "Görseli Düzenle",
            MediaOperation::Video => "Video (Veo)",
        }
    }

    pub fn kind(self) -> MediaKind {
        match self {
            MediaOperation::Generate | MediaOperation::Edit => MediaKind::Image,
            MediaOperation::Video => MediaKind::Video,
        }
    }

    pub fn requires_source(self) -> bool {
        self == MediaOperation::Edit
    }

    pub fn accepts_source(self) -> bool {
        matches!(self, MediaOperation::Edit | MediaOperation::Video)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    Square,
    Landscape,
    Portrait,
    FourThree,
    ThreeFour,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::FourThree,
        AspectRatio::ThreeFour,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::FourThree => "4:3",
            AspectRatio::ThreeFour => "3:4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    #[default]
    OneK,
    TwoK,
    FourK,
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [ImageSize::OneK, ImageSize::TwoK, ImageSize::FourK];

    pub fn as_str(self) -> &'static str {
        match self {
            ImageSize::OneK => "1K",
            ImageSize::TwoK => "2K",
            ImageSize::FourK => "4K",
        }
    }
}

/// A local image converted to the form the gateway transmits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub file_name: String,
    pub mime_type: String,
    /// Base64, no data-URI prefix.
    pub data: String,
}

/// Binary media returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPayload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResult {
    pub kind: MediaKind,
    pub mime_type: String,
    pub uri: String,
    pub bytes: Vec<u8>,
}

impl MediaResult {
    pub fn from_payload(kind: MediaKind, payload: MediaPayload) -> Self {
        let uri = data_uri(&payload.mime_type, &payload.bytes);
        Self {
            kind,
            mime_type: payload.mime_type,
            uri,
            bytes: payload.bytes,
        }
    }

    /// Video requests currently come back as still frames.
    pub fn is_still_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "video/mp4" => "mp4",
            _ => "png",
        }
    }
}

pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_becomes_data_uri() {
        let result = MediaResult::from_payload(
            MediaKind::Video,
            MediaPayload {
                mime_type: "image/png".into(),
                bytes: b"abc".to_vec(),
            },
        );

        assert_eq!(result.uri, "data:image/png;base64,YWJj");
        assert_eq!(result.kind, MediaKind::Video);
        assert!(result.is_still_image());
        assert_eq!(result.file_extension(), "png");
    }

    #[test]
    fn only_edit_requires_a_source() {
        assert!(MediaOperation::Edit.requires_source());
        assert!(!MediaOperation::Video.requires_source());
        assert!(MediaOperation::Video.accepts_source());
        assert!(!MediaOperation::Generate.accepts_source());
    }
}
