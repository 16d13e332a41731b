use crate::storage::Storage;
use log::warn;
use ratatui::style::{Color, Modifier, Style};

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Reads the stored theme; anything other than `"dark"` is light.
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get_item(THEME_KEY) {
            Ok(Some(value)) if value == "dark" => Theme::Dark,
            Ok(_) => Theme::Light,
            Err(err) => {
                warn!("failed to read theme: {err}");
                Theme::Light
            }
        }
    }

    pub fn base(self) -> Style {
        match self {
            Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
            Theme::Dark => Style::default().fg(Color::White).bg(Color::Black),
        }
    }

    pub fn muted(self) -> Style {
        self.base().fg(Color::DarkGray)
    }

    pub fn accent(self) -> Style {
        match self {
            Theme::Light => self.base().fg(Color::Blue),
            Theme::Dark => self.base().fg(Color::Cyan),
        }
    }

    pub fn held(self) -> Style {
        self.accent().add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn defaults_to_light() {
        assert_eq!(Theme::load(&MemoryStorage::new()), Theme::Light);
    }

    #[test]
    fn reads_dark() {
        let mut storage = MemoryStorage::new();
        storage.set_item(THEME_KEY, "dark").unwrap();
        assert_eq!(Theme::load(&storage), Theme::Dark);
    }

    #[test]
    fn unknown_value_is_light() {
        let mut storage = MemoryStorage::new();
        storage.set_item(THEME_KEY, "solarized").unwrap();
        assert_eq!(Theme::load(&storage), Theme::Light);
    }

    #[test]
    fn toggle_flips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_str(), "light");
    }
}
