//! Emoji and plain-text marker sets.

/// Markers used by the text renderers.
///
/// Renderers take a `Glyphs` value and never branch on which set it is, so
/// switching between emoji and ASCII output cannot change what is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub search: &'static str,
    pub summary: &'static str,
    pub target: &'static str,
    pub stats: &'static str,
    pub ok: &'static str,
    pub missing: &'static str,
    pub file: &'static str,
    pub debug: &'static str,
    pub done: &'static str,
    pub high: &'static str,
    pub medium: &'static str,
    pub low: &'static str,
    pub frame: Frame,
}

/// Characters for the banner box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl Glyphs {
    pub const EMOJI: Glyphs = Glyphs {
        search: "🔍",
        summary: "📊",
        target: "🎯",
        stats: "📈",
        ok: "✅",
        missing: "❌",
        file: "📁",
        debug: "🐛",
        done: "✨",
        high: "🔴",
        medium: "🟡",
        low: "🟢",
        frame: Frame {
            top_left: '╔',
            top_right: '╗',
            bottom_left: '╚',
            bottom_right: '╝',
            horizontal: '═',
            vertical: '║',
        },
    };

    pub const PLAIN: Glyphs = Glyphs {
        search: "[*]",
        summary: "[#]",
        target: "[>]",
        stats: "[+]",
        ok: "[OK]",
        missing: "[X]",
        file: "[F]",
        debug: "[D]",
        done: "[*]",
        high: "[!!]",
        medium: "[! ]",
        low: "[ok]",
        frame: Frame {
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
            horizontal: '=',
            vertical: '|',
        },
    };

    pub fn new(emoji: bool) -> Self {
        if emoji {
            Self::EMOJI
        } else {
            Self::PLAIN
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::EMOJI
    }
}
