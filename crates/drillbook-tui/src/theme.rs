//! Colour themes.
//!
//! A theme is a small TOML file of style strings, embedded with
//! [`include_str!`] and parsed through `config`. A style string is a list of
//! words: the first colour is the foreground, a colour after `on` is the
//! background, and `bold`, `dim`, `italic`, `underlined` or `reversed` add
//! modifiers.
//!
//! ```toml
//! [outline]
//! title = "white bold"
//!
//! [search]
//! highlight = "black on yellow bold"
//! ```
//!
//! Colours are anything ratatui's `Color` parser accepts: names
//! (`light_cyan`, `dark gray`), `#rrggbb`, or a 0-255 palette index.
//!
//! Top-level groups get a colour from `[groups] palette`, chosen by a stable
//! hash of the group key so a category keeps its colour across reloads.

use std::str::FromStr;

use anyhow::{anyhow, bail};
use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

#[derive(Debug, Deserialize)]
struct ThemeFile {
    outline: OutlineStyles,
    borders: BorderStyles,
    search: SearchStyles,
    groups: GroupColours,
}

#[derive(Debug, Deserialize)]
struct OutlineStyles {
    title: String,
    technique: String,
    count: String,
    heading: String,
    detail: String,
    link: String,
}

#[derive(Debug, Deserialize)]
struct BorderStyles {
    focused: String,
    command_bar: String,
    unfocused: String,
}

#[derive(Debug, Deserialize)]
struct SearchStyles {
    highlight: String,
}

#[derive(Debug, Deserialize)]
struct GroupColours {
    palette: Vec<String>,
}

/// Resolved styles, ready to hand to widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Outline and article title rows.
    pub title: Style,
    pub technique: Style,
    /// `(n)` after group labels, and the query bar's match count.
    pub count: Style,
    /// Detail section headings (`Steps`, `Videos`, ...).
    pub heading: Style,
    pub detail: Style,
    pub link: Style,
    pub border_focused: Style,
    pub border_command_bar: Style,
    pub border_unfocused: Style,
    /// Technique rows while a search is active.
    pub search_highlight: Style,
    group_palette: Vec<Color>,
}

impl Theme {
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid")
    }

    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid")
    }

    /// Resolve a theme by name. Unknown names get the default theme.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            "default" => Self::load_default(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using default");
                Self::load_default()
            }
        }
    }

    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let file: ThemeFile = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        let group_palette = file
            .groups
            .palette
            .iter()
            .map(|name| parse_colour(name))
            .collect::<anyhow::Result<_>>()?;

        Ok(Self {
            title: parse_style(&file.outline.title)?,
            technique: parse_style(&file.outline.technique)?,
            count: parse_style(&file.outline.count)?,
            heading: parse_style(&file.outline.heading)?,
            detail: parse_style(&file.outline.detail)?,
            link: parse_style(&file.outline.link)?,
            border_focused: parse_style(&file.borders.focused)?,
            border_command_bar: parse_style(&file.borders.command_bar)?,
            border_unfocused: parse_style(&file.borders.unfocused)?,
            search_highlight: parse_style(&file.search.highlight)?,
            group_palette,
        })
    }

    /// Foreground colour for a top-level group, stable for a given key.
    pub fn group_style(&self, key: &str) -> Style {
        match self.group_palette.len() {
            0 => Style::default(),
            n => Style::default().fg(self.group_palette[stable_hash(key) % n]),
        }
    }
}

/// Parse a style string such as `"black on yellow bold"`.
fn parse_style(spec: &str) -> anyhow::Result<Style> {
    let mut style = Style::default();
    let mut words = spec.split_whitespace();
    while let Some(word) = words.next() {
        style = match word {
            "bold" => style.add_modifier(Modifier::BOLD),
            "dim" => style.add_modifier(Modifier::DIM),
            "italic" => style.add_modifier(Modifier::ITALIC),
            "underlined" => style.add_modifier(Modifier::UNDERLINED),
            "reversed" => style.add_modifier(Modifier::REVERSED),
            "on" => {
                let Some(bg) = words.next() else {
                    bail!("style {spec:?}: `on` needs a colour");
                };
                style.bg(parse_colour(bg)?)
            }
            colour if style.fg.is_none() => style.fg(parse_colour(colour)?),
            other => bail!("style {spec:?}: unexpected {other:?}"),
        };
    }
    Ok(style)
}

fn parse_colour(name: &str) -> anyhow::Result<Color> {
    Color::from_str(name).map_err(|_| anyhow!("unknown colour {name:?}"))
}

/// djb2. `std`'s hasher is randomly seeded per process.
fn stable_hash(s: &str) -> usize {
    s.bytes()
        .fold(5381usize, |acc, b| acc.wrapping_mul(33).wrapping_add(b as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_themes_load() {
        for theme in [Theme::load_default(), Theme::load_gruvbox_dark()] {
            assert_ne!(theme.title, Style::default());
            assert_ne!(theme.search_highlight, Style::default());
            assert_eq!(theme.group_palette.len(), 6);
        }
    }

    #[test]
    fn unknown_names_fall_back_to_default() {
        assert_eq!(Theme::by_name("no-such-theme").title, Theme::load_default().title);
        assert_eq!(Theme::by_name("Gruvbox").title, Theme::load_gruvbox_dark().title);
    }

    #[test]
    fn style_strings() {
        assert_eq!(
            parse_style("black on yellow bold").unwrap(),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        );
        assert_eq!(
            parse_style("#ff0080 underlined").unwrap(),
            Style::default()
                .fg(Color::Rgb(255, 0, 128))
                .add_modifier(Modifier::UNDERLINED)
        );
        assert_eq!(parse_style("on 42").unwrap(), Style::default().bg(Color::Indexed(42)));
        assert_eq!(parse_style("").unwrap(), Style::default());
    }

    #[test]
    fn bad_style_strings_are_errors() {
        assert!(parse_style("chartreuse").is_err());
        assert!(parse_style("red blue").is_err());
        assert!(parse_style("red on").is_err());
    }

    #[test]
    fn broken_theme_file_is_an_error() {
        let src = DEFAULT_THEME_SRC.replace("\"white bold\"", "\"white blinking\"");
        assert!(Theme::from_toml_str(&src).is_err());
    }

    #[test]
    fn group_colours_are_stable_and_from_the_palette() {
        let theme = Theme::load_default();
        let style = theme.group_style("Sweeps");
        assert_eq!(style, theme.group_style("Sweeps"));
        assert!(theme.group_palette.contains(&style.fg.unwrap()));
    }
}
