use std::io::IsTerminal;

use clap::{
  ValueEnum,
  builder::styling::{AnsiColor, Color as ClapColor, RgbColor, Style, Styles},
};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// One RGB triple per output role.
struct Palette {
  timestamp: (u8, u8, u8),
  primary: (u8, u8, u8),
  accent: (u8, u8, u8),
  info: (u8, u8, u8),
  success: (u8, u8, u8),
  label: (u8, u8, u8),
  value: (u8, u8, u8),
}

const DARK: Palette = Palette {
  timestamp: (128, 150, 170),
  primary: (206, 145, 120),
  accent: (224, 108, 117),
  info: (97, 175, 239),
  success: (152, 195, 121),
  label: (198, 120, 221),
  value: (229, 192, 123),
};

const LIGHT: Palette = Palette {
  timestamp: (90, 96, 110),
  primary: (120, 72, 40),
  accent: (190, 40, 60),
  info: (30, 100, 180),
  success: (40, 130, 60),
  label: (130, 50, 160),
  value: (150, 100, 10),
};

#[derive(Debug, Clone, Copy)]
pub struct Colors {
  enabled: bool,
  theme: Theme,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  fn pick(&self, role: impl Fn(&Palette) -> (u8, u8, u8)) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    let palette = match self.theme {
      Theme::Dark => &DARK,
      Theme::Light => &LIGHT,
    };
    let (r, g, b) = role(palette);
    Color::Rgb { r, g, b }
  }

  pub fn timestamp(&self) -> Color {
    self.pick(|p| p.timestamp)
  }

  pub fn primary(&self) -> Color {
    self.pick(|p| p.primary)
  }

  pub fn accent(&self) -> Color {
    self.pick(|p| p.accent)
  }

  pub fn info(&self) -> Color {
    self.pick(|p| p.info)
  }

  pub fn success(&self) -> Color {
    self.pick(|p| p.success)
  }

  pub fn label(&self) -> Color {
    self.pick(|p| p.label)
  }

  pub fn value(&self) -> Color {
    self.pick(|p| p.value)
  }

  pub fn clap_styles() -> Styles {
    let colors = Self::new(true, Theme::Dark);
    let fg = |color: Color| match color {
      Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
      _ => Some(ClapColor::Ansi(AnsiColor::White)),
    };

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(fg(colors.label())))
      .usage(Style::new().bold().fg_color(fg(colors.label())))
      .literal(Style::new().fg_color(fg(colors.success())))
      .placeholder(Style::new().fg_color(fg(colors.info())))
      .error(Style::new().bold().fg_color(fg(colors.accent())))
      .valid(Style::new().fg_color(fg(colors.success())))
      .invalid(Style::new().bold().fg_color(fg(colors.accent())))
  }
}

/// Converts a terminal colour for use in comfy-table cells.
pub fn comfy(color: Color) -> ComfyColor {
  match color {
    Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
    Color::AnsiValue(value) => ComfyColor::AnsiValue(value),
    _ => ComfyColor::Reset,
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => std::env::var("COLORFGBG")
      .ok()
      .as_deref()
      .and_then(theme_from_colorfgbg)
      .unwrap_or(Theme::Dark),
  }
}

/// `COLORFGBG` is `fg;bg`; background palette indices 8 and up are light.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
  let background = value.split(';').next_back()?.parse::<u8>().ok()?;
  Some(if background >= 8 { Theme::Light } else { Theme::Dark })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_theme_from_colorfgbg() {
    let cases = [
      ("15;0", Some(Theme::Dark)),
      ("0;15", Some(Theme::Light)),
      ("0;default;8", Some(Theme::Light)),
      ("bogus", None),
      ("", None),
    ];

    for (input, expected) in cases {
      assert_eq!(theme_from_colorfgbg(input), expected, "failed for input {input:?}");
    }
  }

  #[test]
  fn test_disabled_colors_reset() {
    let colors = Colors::new(false, Theme::Light);
    for color in [colors.primary(), colors.accent(), colors.label(), colors.value()] {
      assert_eq!(color, Color::Reset);
    }
    assert_eq!(comfy(colors.info()), ComfyColor::Reset);
  }

  #[test]
  fn test_themes_differ() {
    let dark = Colors::new(true, Theme::Dark);
    let light = Colors::new(true, Theme::Light);
    assert_ne!(dark.primary(), light.primary());
    assert_eq!(comfy(dark.value()), ComfyColor::Rgb { r: 229, g: 192, b: 123 });
  }
}
