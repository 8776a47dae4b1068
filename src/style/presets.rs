use crate::foundation::core::Canvas;

/// A supported output size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PresetSize {
    /// Stable identifier used on the command line and in style files.
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PresetSize {
    /// Canvas with this preset's dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Look up a preset by id (case-insensitive).
    pub fn by_id(id: &str) -> Option<&'static PresetSize> {
        PRESETS.iter().find(|p| p.id.eq_ignore_ascii_case(id.trim()))
    }

    /// The full catalog.
    pub fn all() -> &'static [PresetSize] {
        PRESETS
    }
}

static PRESETS: &[PresetSize] = &[
    PresetSize {
        id: "reaction",
        label: "Reaction (128x128)",
        width: 128,
        height: 128,
    },
    PresetSize {
        id: "stamp",
        label: "Stamp (240x240)",
        width: 240,
        height: 240,
    },
    PresetSize {
        id: "sticker",
        label: "Sticker (320x320)",
        width: 320,
        height: 320,
    },
    PresetSize {
        id: "banner",
        label: "Banner (300x200)",
        width: 300,
        height: 200,
    },
    PresetSize {
        id: "wide",
        label: "Wide (480x270)",
        width: 480,
        height: 270,
    },
];

#[cfg(test)]
#[path = "../../tests/unit/style/presets.rs"]
mod tests;
