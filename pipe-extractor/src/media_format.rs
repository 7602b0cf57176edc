//! Static data about container, audio and subtitle formats

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaFormat {
    // video and audio
    Mpeg4,
    V3gpp,
    Webm,
    // audio
    M4a,
    Webma,
    Mp3,
    Mp2,
    Opus,
    Ogg,
    WebmaOpus,
    Aiff,
    Aif,
    Wav,
    Flac,
    Alac,
    // subtitles
    Vtt,
    Ttml,
    Transcript1,
    Transcript2,
    Transcript3,
    Srt,
}

impl MediaFormat {
    pub const ALL: [Self; 21] = [
        Self::Mpeg4,
        Self::V3gpp,
        Self::Webm,
        Self::M4a,
        Self::Webma,
        Self::Mp3,
        Self::Mp2,
        Self::Opus,
        Self::Ogg,
        Self::WebmaOpus,
        Self::Aiff,
        Self::Aif,
        Self::Wav,
        Self::Flac,
        Self::Alac,
        Self::Vtt,
        Self::Ttml,
        Self::Transcript1,
        Self::Transcript2,
        Self::Transcript3,
        Self::Srt,
    ];

    /// Numeric id; not unique (`Webma`/`WebmaOpus` and `Aiff`/`Aif` share one).
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::Mpeg4 => 0x0,
            Self::V3gpp => 0x10,
            Self::Webm => 0x20,
            Self::M4a => 0x100,
            Self::Webma | Self::WebmaOpus => 0x200,
            Self::Mp3 => 0x300,
            Self::Mp2 => 0x310,
            Self::Opus => 0x400,
            Self::Ogg => 0x500,
            Self::Aiff | Self::Aif => 0x600,
            Self::Wav => 0x700,
            Self::Flac => 0x800,
            Self::Alac => 0x900,
            Self::Vtt => 0x1000,
            Self::Ttml => 0x2000,
            Self::Transcript1 => 0x3000,
            Self::Transcript2 => 0x4000,
            Self::Transcript3 => 0x5000,
            Self::Srt => 0x6000,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mpeg4 => "MPEG-4",
            Self::V3gpp => "3GPP",
            Self::Webm | Self::Webma => "WebM",
            Self::M4a => "m4a",
            Self::Mp3 => "MP3",
            Self::Mp2 => "MP2",
            Self::Opus => "opus",
            Self::Ogg => "ogg",
            Self::WebmaOpus => "WebM Opus",
            Self::Aiff | Self::Aif => "AIFF",
            Self::Wav => "WAV",
            Self::Flac => "FLAC",
            Self::Alac => "ALAC",
            Self::Vtt => "WebVTT",
            Self::Ttml => "Timed Text Markup Language",
            Self::Transcript1 => "TranScript v1",
            Self::Transcript2 => "TranScript v2",
            Self::Transcript3 => "TranScript v3",
            Self::Srt => "SubRip file format",
        }
    }

    /// File extension without the dot
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Mpeg4 => "mp4",
            Self::V3gpp => "3gp",
            Self::Webm | Self::Webma | Self::WebmaOpus => "webm",
            Self::M4a => "m4a",
            Self::Mp3 => "mp3",
            Self::Mp2 => "mp2",
            Self::Opus => "opus",
            Self::Ogg => "ogg",
            Self::Aiff => "aiff",
            Self::Aif => "aif",
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::Alac => "alac",
            Self::Vtt => "vtt",
            Self::Ttml => "ttml",
            Self::Transcript1 => "srv1",
            Self::Transcript2 => "srv2",
            Self::Transcript3 => "srv3",
            Self::Srt => "srt",
        }
    }

    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Mpeg4 => "video/mp4",
            Self::V3gpp => "video/3gpp",
            Self::Webm => "video/webm",
            Self::M4a => "audio/mp4",
            Self::Webma | Self::WebmaOpus => "audio/webm",
            Self::Mp3 | Self::Mp2 => "audio/mpeg",
            Self::Opus => "audio/opus",
            Self::Ogg => "audio/ogg",
            Self::Aiff | Self::Aif => "audio/aiff",
            Self::Wav => "audio/wav",
            Self::Flac => "audio/flac",
            Self::Alac => "audio/alac",
            Self::Vtt => "text/vtt",
            Self::Ttml => "application/ttml+xml",
            Self::Transcript1 | Self::Transcript2 | Self::Transcript3 => "text/xml",
            Self::Srt => "text/srt",
        }
    }

    /// First format with this id.
    #[must_use]
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }

    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.suffix() == suffix)
    }

    #[must_use]
    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.mime_type() == mime_type)
    }

    #[must_use]
    pub fn all_from_mime_type(mime_type: &str) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|f| f.mime_type() == mime_type)
            .collect()
    }
}
