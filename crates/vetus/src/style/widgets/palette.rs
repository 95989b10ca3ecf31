//! Color palette with light and dark theme support.
//!
//! Light mode leans warm (paper and ink); dark mode is a muted slate with an
//! amber accent.

use iced::Color;

/// Application theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl ThemeMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Complete color palette for the application.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    // Brand
    pub primary: Color,
    pub primary_light: Color,
    pub primary_dark: Color,

    // Surfaces
    pub surface: Color,
    pub surface_elevated: Color,
    pub surface_sunken: Color,
    pub background: Color,

    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_on_primary: Color,

    // Errors
    pub accent_red: Color,

    // Score pill and id pill
    pub pill: Color,
    pub pill_text: Color,

    // Chat bubbles
    pub bubble_user: Color,
    pub bubble_assistant: Color,

    // States
    pub selected: Color,
    pub hover: Color,

    // Borders
    pub border_subtle: Color,
    pub border_medium: Color,

    pub shadow: Color,
}

impl Palette {
    /// Creates the light theme palette.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::from_rgb(0.55, 0.27, 0.07), // Sepia
            primary_light: Color::from_rgb(0.70, 0.40, 0.16),
            primary_dark: Color::from_rgb(0.42, 0.20, 0.05),

            surface: Color::from_rgb(1.0, 0.995, 0.98),
            surface_elevated: Color::WHITE,
            surface_sunken: Color::from_rgb(0.96, 0.95, 0.92),
            background: Color::from_rgb(0.98, 0.97, 0.94), // Paper

            text_primary: Color::from_rgb(0.13, 0.11, 0.09), // Ink
            text_secondary: Color::from_rgb(0.38, 0.35, 0.31),
            text_muted: Color::from_rgb(0.58, 0.55, 0.50),
            text_on_primary: Color::WHITE,

            accent_red: Color::from_rgb(0.75, 0.20, 0.18),

            pill: Color::from_rgb(0.93, 0.88, 0.80),
            pill_text: Color::from_rgb(0.42, 0.20, 0.05),

            bubble_user: Color::from_rgb(0.93, 0.88, 0.80),
            bubble_assistant: Color::WHITE,

            selected: Color::from_rgb(0.95, 0.91, 0.85),
            hover: Color::from_rgb(0.97, 0.95, 0.91),

            border_subtle: Color::from_rgb(0.90, 0.87, 0.82),
            border_medium: Color::from_rgb(0.82, 0.78, 0.72),

            shadow: Color::from_rgba(0.2, 0.1, 0.0, 0.06),
        }
    }

    /// Creates the dark theme palette.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::from_rgb(0.96, 0.70, 0.30), // Amber
            primary_light: Color::from_rgb(1.0, 0.80, 0.45),
            primary_dark: Color::from_rgb(0.80, 0.56, 0.20),

            surface: Color::from_rgb(0.13, 0.14, 0.16),
            surface_elevated: Color::from_rgb(0.16, 0.17, 0.19),
            surface_sunken: Color::from_rgb(0.10, 0.11, 0.12),
            background: Color::from_rgb(0.09, 0.10, 0.11),

            text_primary: Color::from_rgb(0.92, 0.91, 0.88),
            text_secondary: Color::from_rgb(0.68, 0.66, 0.62),
            text_muted: Color::from_rgb(0.50, 0.49, 0.46),
            text_on_primary: Color::from_rgb(0.09, 0.10, 0.11),

            accent_red: Color::from_rgb(1.0, 0.42, 0.40),

            pill: Color::from_rgb(0.24, 0.21, 0.16),
            pill_text: Color::from_rgb(1.0, 0.80, 0.45),

            bubble_user: Color::from_rgb(0.22, 0.20, 0.16),
            bubble_assistant: Color::from_rgb(0.16, 0.17, 0.19),

            selected: Color::from_rgb(0.22, 0.20, 0.16),
            hover: Color::from_rgb(0.18, 0.19, 0.21),

            border_subtle: Color::from_rgb(0.22, 0.23, 0.25),
            border_medium: Color::from_rgb(0.30, 0.31, 0.34),

            shadow: Color::from_rgba(0.0, 0.0, 0.0, 0.25),
        }
    }

    /// Gets the palette for a given theme mode.
    #[must_use]
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }
}

/// Current active palette - defaults to light mode.
pub static CURRENT: std::sync::LazyLock<std::sync::RwLock<Palette>> =
    std::sync::LazyLock::new(|| std::sync::RwLock::new(Palette::light()));

/// Sets the current global palette.
pub fn set_theme(mode: ThemeMode) {
    if let Ok(mut palette) = CURRENT.write() {
        *palette = Palette::for_mode(mode);
    }
}

/// Gets a copy of the current palette.
#[must_use]
pub fn current() -> Palette {
    CURRENT.read().map_or_else(|_| Palette::light(), |p| *p)
}
