//! Terminal rendering module for rich markdown output
//!
//! This module provides terminal rendering capabilities using termimad
//! for rich markdown display with optional fallback to plain text.

use anilearn_core::models::Theme;
use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    header_ansi: &'static str,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer with colors for the given theme
    pub fn new(rich_enabled: bool, theme: Theme) -> Self {
        let (mut skin, header_color, header_ansi, accent) = match theme {
            Theme::Light => (MadSkin::default_light(), Color::DarkBlue, "\x1b[34m", Color::DarkMagenta),
            Theme::Dark => (MadSkin::default_dark(), Color::Cyan, "\x1b[36m", Color::Yellow),
        };

        skin.set_headers_fg(header_color);
        skin.bold.set_fg(accent);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self {
            rich_enabled,
            header_ansi,
            skin,
        }
    }

    /// Render markdown text to terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            // Headers keep their hash marks; everything else goes through the skin
            for line in markdown.lines() {
                if line.starts_with('#') {
                    println!("{}{line}\x1b[0m", self.header_ansi);
                } else {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        } else {
            print!("{markdown}");
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true, Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false, Theme::Light);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_theme_selects_header_color() {
        let light = TerminalRenderer::new(true, Theme::Light);
        let dark = TerminalRenderer::new(true, Theme::Dark);
        assert_ne!(light.header_ansi, dark.header_ansi);
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }
}
