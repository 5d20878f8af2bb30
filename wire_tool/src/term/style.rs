//! ANSI escape sequences as [`str`] constants.
//!
//! Nothing here checks for support, see [`super::supports_ansi_escapes`].

macro_rules! define_escapes {
    ($($(#[$attr:meta])* $name:ident = $lit:literal,)*) => {
        $(
            $(#[$attr])*
            pub const $name: &str = concat!("\x1b[", $lit);
        )*
    };
}

macro_rules! define_color_escapes {
    ($($label:literal $name:ident / $name_bg:ident = $lit:literal,)*) => {
        $(
            #[doc = concat!("Change the foreground color to ", $label, ".")]
            pub const $name: &str = concat!("\x1b[38;5;", $lit);
        )*
        $(
            #[doc = concat!("Change the background color to ", $label, ".")]
            pub const $name_bg: &str = concat!("\x1b[48;5;", $lit);
        )*
    };
}

define_escapes! {
    /// Resets all styles and colors.
    RESET = "0m",

    /// Bold text.
    BOLD = "1m",
}

define_color_escapes! {
    "black" BLACK / BLACK_BG = "0m",
    "red" RED / RED_BG = "1m",
    "green" GREEN / GREEN_BG = "2m",
    "yellow" YELLOW / YELLOW_BG = "3m",
    "blue" BLUE / BLUE_BG = "4m",
    "magenta" MAGENTA / MAGENTA_BG = "5m",
    "cyan" CYAN / CYAN_BG = "6m",
    "white" WHITE / WHITE_BG = "7m",
}

/// Escape sequences that collapse to nothing when color is off.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bold: &'static str,
    pub accent: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        if color {
            Self {
                bold: BOLD,
                accent: CYAN,
                reset: RESET,
            }
        } else {
            Self {
                bold: "",
                accent: "",
                reset: "",
            }
        }
    }
}
