//! Centralized theme configuration for all UI components.
//!
//! Render files use `theme::module::CONSTANT` instead of hardcoding `Color::*`.
//!
//! Theme: Galaxy - Purple/pink accents with deep space blue background

use ratatui::style::{Color, Modifier, Style};

/// Core color palette shared by the component modules below
pub mod palette {
    use super::*;

    pub const TEXT: Color = Color::Rgb(236, 236, 244);
    pub const TEXT_DIM: Color = Color::Rgb(90, 92, 119);
    pub const TEXT_MUTED: Color = Color::Rgb(130, 133, 158);

    pub const BG_DARK: Color = Color::Rgb(26, 26, 46);
    pub const BG_SURFACE: Color = Color::Rgb(35, 35, 58);
    pub const BG_HIGHLIGHT: Color = Color::Rgb(55, 55, 85);

    pub const WARNING: Color = Color::Rgb(255, 217, 61);
    pub const ERROR: Color = Color::Rgb(224, 108, 117);

    pub const CYAN: Color = Color::Rgb(0, 217, 255);
    pub const YELLOW: Color = Color::Rgb(255, 217, 61);
    pub const GREEN: Color = Color::Rgb(107, 203, 119);
    pub const PINK: Color = Color::Rgb(255, 107, 157);
    pub const PURPLE: Color = Color::Rgb(189, 147, 249);

    pub const CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);
}

/// Utterance input styles
pub mod input {
    use super::*;

    pub const BORDER_FOCUSED: Color = palette::CYAN;
    pub const BORDER_UNFOCUSED: Color = palette::TEXT_DIM;
    pub const BORDER_DISABLED: Color = palette::TEXT_DIM;

    pub const PLACEHOLDER: Color = palette::TEXT_DIM;
    pub const DISABLED_HINT: Style = Style::new()
        .fg(palette::YELLOW)
        .add_modifier(Modifier::ITALIC);
}

/// Template outline pane styles
pub mod template {
    use super::*;

    pub const BORDER: Color = palette::GREEN;
    pub const LABEL: Color = palette::TEXT_MUTED;
    pub const TYPE_TAG: Color = palette::PURPLE;
}

/// Conversation pane styles
pub mod assistant {
    use super::*;

    pub const BORDER_FOCUSED: Color = palette::CYAN;
    pub const BORDER_UNFOCUSED: Color = palette::TEXT_DIM;
    pub const TITLE: Style = Style::new()
        .fg(palette::CYAN)
        .add_modifier(Modifier::BOLD);

    pub const USER_LABEL: Color = palette::CYAN;
    pub const ASSISTANT_LABEL: Color = palette::PINK;

    pub const SUGGESTIONS_HEADER: Color = palette::TEXT_MUTED;
    pub const SUGGESTION_MARKER: Color = palette::PINK;
    pub const SUGGESTION_SELECTED_BG: Color = palette::BG_HIGHLIGHT;

    pub const GENERATING: Style = Style::new()
        .fg(palette::YELLOW)
        .add_modifier(Modifier::ITALIC);
}

/// Apply-all confirmation popup styles
pub mod confirm {
    use super::*;

    pub const BORDER: Color = palette::YELLOW;
    pub const BACKGROUND: Color = palette::BG_SURFACE;
    pub const TEXT: Color = palette::TEXT;
    pub const KEY: Style = Style::new()
        .fg(palette::YELLOW)
        .add_modifier(Modifier::BOLD);
}

/// Key hint bar styles
pub mod hints {
    use super::*;

    pub const KEY: Color = palette::CYAN;
    pub const DESCRIPTION: Style = Style::new().fg(palette::CYAN).add_modifier(Modifier::DIM);
}

/// Notification overlay styles
pub mod notification {
    use super::*;

    pub const INFO_FG: Color = palette::TEXT;
    pub const INFO_BG: Color = palette::BG_SURFACE;
    pub const INFO_BORDER: Color = palette::TEXT_MUTED;

    pub const WARNING_FG: Color = palette::BG_DARK;
    pub const WARNING_BG: Color = palette::WARNING;
    pub const WARNING_BORDER: Color = palette::WARNING;

    pub const ERROR_FG: Color = palette::TEXT;
    pub const ERROR_BG: Color = palette::ERROR;
    pub const ERROR_BORDER: Color = palette::ERROR;
}
