use std::{collections::HashMap, path::Path, path::PathBuf};

use color_eyre::eyre::{eyre, Result, WrapErr};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_deref::{Deref, DerefMut};
use serde::{
    de::{self, Deserializer},
    Deserialize, Serialize,
};

use crate::{
    action::Action,
    constants::{snowman::CAPTION, TITLE},
};

const CONFIG: &str = include_str!("../.config/config.yaml");

const DEFAULT_SCALE: f64 = 2.0;

/// Key names understood in keybinding strings, besides single characters and `f1`..`f12`.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("esc", KeyCode::Esc),
    ("enter", KeyCode::Enter),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("backtab", KeyCode::BackTab),
    ("backspace", KeyCode::Backspace),
    ("delete", KeyCode::Delete),
    ("insert", KeyCode::Insert),
    ("tab", KeyCode::Tab),
    ("space", KeyCode::Char(' ')),
    ("hyphen", KeyCode::Char('-')),
    ("minus", KeyCode::Char('-')),
];

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

/// What to draw and how the window is labelled.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SnowmanConfig {
    pub scale: f64,
    pub speed: u8,
    pub caption: String,
    pub title: String,
}

impl Default for SnowmanConfig {
    fn default() -> Self {
        Self { scale: DEFAULT_SCALE, speed: 0, caption: CAPTION.to_string(), title: TITLE.to_string() }
    }
}

impl SnowmanConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(eyre!("scale must be a positive number, got {}", self.scale));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub snowman: SnowmanConfig,
}

impl Config {
    pub fn new() -> Result<Self> {
        Self::load(&crate::utils::get_data_dir(), &crate::utils::get_config_dir())
    }

    /// Built-in defaults overlaid with `config.yaml` from `config_dir`, when there is one.
    pub fn load(data_dir: &Path, config_dir: &Path) -> Result<Self> {
        let default_config: Config = serde_yaml::from_str(CONFIG)?;
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_string_lossy().as_ref())?
            .set_default("_config_dir", config_dir.to_string_lossy().as_ref())?;

        let config_files = [("config.yaml", config::FileFormat::Yaml)];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(config::File::from(config_dir.join(file)).format(*format).required(false));
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::info!("No configuration file found in {}, using defaults", config_dir.display());
        }

        let mut cfg: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .wrap_err_with(|| format!("Invalid configuration in {}", config_dir.display()))?;
        for (key, action) in default_config.keybindings.iter() {
            cfg.keybindings.entry(*key).or_insert_with(|| action.clone());
        }
        cfg.snowman.validate()?;

        Ok(cfg)
    }
}

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct KeyBindings(pub HashMap<KeyEvent, Action>);

impl KeyBindings {
    /// Bound keys for `action`, formatted and sorted.
    pub fn keys_for(&self, action: &Action) -> Vec<String> {
        let mut keys: Vec<String> =
            self.iter().filter(|(_, bound)| *bound == action).map(|(key, _)| key_event_to_string(key)).collect();
        keys.sort();
        keys
    }
}

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, String>::deserialize(deserializer)?;
        let bindings = raw
            .into_iter()
            .map(|(key_str, action_str)| {
                let action: Action =
                    action_str.parse().map_err(|_| de::Error::custom(format!("Unknown action `{action_str}`")))?;
                let key = parse_key_event(&key_str).map_err(de::Error::custom)?;
                Ok((key, action))
            })
            .collect::<Result<HashMap<_, _>, D::Error>>()?;

        Ok(KeyBindings(bindings))
    }
}

pub fn parse_key_event(raw: &str) -> Result<KeyEvent, String> {
    let raw = raw.trim();
    if raw.matches('<').count() != raw.matches('>').count() {
        return Err(format!("Unable to parse `{raw}`"));
    }
    let raw = raw.trim_start_matches('<').trim_end_matches('>').to_ascii_lowercase();

    let (remaining, modifiers) = extract_modifiers(&raw);
    parse_key_code_with_modifiers(remaining, modifiers)
}

fn extract_modifiers(raw: &str) -> (&str, KeyModifiers) {
    let mut modifiers = KeyModifiers::empty();
    let mut current = raw;

    loop {
        if let Some(rest) = current.strip_prefix("ctrl-") {
            modifiers.insert(KeyModifiers::CONTROL);
            current = rest;
        } else if let Some(rest) = current.strip_prefix("alt-") {
            modifiers.insert(KeyModifiers::ALT);
            current = rest;
        } else if let Some(rest) = current.strip_prefix("shift-") {
            modifiers.insert(KeyModifiers::SHIFT);
            current = rest;
        } else {
            break;
        }
    }

    (current, modifiers)
}

fn parse_key_code_with_modifiers(raw: &str, mut modifiers: KeyModifiers) -> Result<KeyEvent, String> {
    let function_key = raw.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()).filter(|n| (1..=12).contains(n));

    let code = if let Some((_, code)) = NAMED_KEYS.iter().find(|(name, _)| *name == raw) {
        *code
    } else if let Some(n) = function_key {
        KeyCode::F(n)
    } else {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::Char(c.to_ascii_uppercase()),
            (Some(c), None) => KeyCode::Char(c),
            _ => return Err(format!("Unable to parse {raw}")),
        }
    };
    if code == KeyCode::BackTab {
        modifiers.insert(KeyModifiers::SHIFT);
    }

    Ok(KeyEvent::new(code, modifiers))
}

/// Formats a key the way keybindings are written, e.g. `<ctrl-c>`.
pub fn key_event_to_string(key_event: &KeyEvent) -> String {
    let name = match key_event.code {
        KeyCode::F(n) => format!("f{n}"),
        code => match NAMED_KEYS.iter().find(|(_, named)| *named == code) {
            Some((name, _)) => name.to_string(),
            None => match code {
                KeyCode::Char(c) => c.to_ascii_lowercase().to_string(),
                other => format!("{other:?}").to_ascii_lowercase(),
            },
        },
    };

    let mut key = String::from("<");
    for (modifier, prefix) in
        [(KeyModifiers::CONTROL, "ctrl-"), (KeyModifiers::ALT, "alt-"), (KeyModifiers::SHIFT, "shift-")]
    {
        if key_event.modifiers.intersects(modifier) {
            key.push_str(prefix);
        }
    }
    key.push_str(&name);
    key.push('>');

    key
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("{}-{}-{}", env!("CARGO_PKG_NAME"), name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_embedded_defaults_match_code_defaults() {
        let default_config: Config = serde_yaml::from_str(CONFIG).unwrap();
        assert_eq!(default_config.snowman, SnowmanConfig::default());
        assert_eq!(default_config.keybindings.get(&parse_key_event("<q>").unwrap()), Some(&Action::Quit));
    }

    #[test]
    fn test_config_without_user_file() -> Result<()> {
        let dir = scratch_dir("empty");
        let c = Config::load(&dir, &dir)?;
        assert_eq!(c.snowman, SnowmanConfig::default());
        assert_eq!(c.keybindings.keys_for(&Action::Quit), vec!["<ctrl-c>", "<esc>", "<q>"]);
        Ok(())
    }

    #[test]
    fn test_user_config_overrides_defaults() -> Result<()> {
        let dir = scratch_dir("override");
        std::fs::write(
            dir.join("config.yaml"),
            "keybindings:\n  \"<x>\": Quit\nsnowman:\n  scale: 3.5\n  caption: \"Let it snow\"\n",
        )?;
        let c = Config::load(&dir, &dir)?;
        assert_eq!(c.snowman.scale, 3.5);
        assert_eq!(c.snowman.caption, "Let it snow");
        assert_eq!(c.snowman.title, TITLE);
        assert_eq!(c.keybindings.keys_for(&Action::Quit), vec!["<ctrl-c>", "<esc>", "<q>", "<x>"]);
        std::fs::remove_dir_all(dir)?;
        Ok(())
    }

    #[test]
    fn test_invalid_scale_is_rejected() -> Result<()> {
        let dir = scratch_dir("bad-scale");
        std::fs::write(dir.join("config.yaml"), "snowman:\n  scale: -1.0\n")?;
        assert!(Config::load(&dir, &dir).is_err());
        std::fs::remove_dir_all(dir)?;
        Ok(())
    }

    #[test]
    fn test_simple_keys() {
        assert_eq!(parse_key_event("a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::empty()));

        assert_eq!(parse_key_event("<enter>").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()));

        assert_eq!(parse_key_event("esc").unwrap(), KeyEvent::new(KeyCode::Esc, KeyModifiers::empty()));

        assert_eq!(parse_key_event("<f5>").unwrap(), KeyEvent::new(KeyCode::F(5), KeyModifiers::empty()));
    }

    #[test]
    fn test_with_modifiers() {
        assert_eq!(parse_key_event("<ctrl-c>").unwrap(), KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert_eq!(
            parse_key_event("ctrl-alt-a").unwrap(),
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL | KeyModifiers::ALT)
        );

        assert_eq!(parse_key_event("shift-tab").unwrap(), KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT));
    }

    #[test]
    fn test_case_insensitivity() {
        assert_eq!(parse_key_event("CTRL-a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));

        assert_eq!(parse_key_event("AlT-eNtEr").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
    }

    #[test]
    fn test_invalid_keys() {
        assert!(parse_key_event("invalid-key").is_err());
        assert!(parse_key_event("ctrl-invalid-key").is_err());
        assert!(parse_key_event("<ctrl-a").is_err());
    }

    #[test]
    fn test_key_event_to_string() {
        assert_eq!(key_event_to_string(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)), "<ctrl-c>");
        assert_eq!(key_event_to_string(&KeyEvent::new(KeyCode::Esc, KeyModifiers::empty())), "<esc>");
        assert_eq!(key_event_to_string(&KeyEvent::new(KeyCode::Char(' '), KeyModifiers::ALT)), "<alt-space>");

        let bound = parse_key_event("<ctrl-alt-f12>").unwrap();
        assert_eq!(parse_key_event(&key_event_to_string(&bound)).unwrap(), bound);
    }

    #[test]
    fn test_unknown_action_is_an_error() {
        let result: Result<KeyBindings, _> = serde_yaml::from_str("\"<q>\": Dance");
        assert!(result.is_err());
    }
}
