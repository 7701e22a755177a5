use serde::{Deserialize, Serialize};
use tictactoe_engine::tictactoe::{BotDifficulty, Mark};

use super::{ConfigStore, FileContentConfigProvider, Validate, YamlConfigSerializer};

const CONFIG_FILE_NAME: &str = "tictactoe_console_config.yaml";
const MAX_ROUNDS: u32 = 99;

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_store() -> ConfigStore<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigStore::from_yaml_file(&get_config_path())
}

fn default_show_encouragement() -> bool {
    true
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Offered at the round-count prompt; any positive count is still accepted.
    pub round_choices: Vec<u32>,
    /// Skips the prompt when set.
    #[serde(default)]
    pub default_rounds: Option<u32>,
    pub human_mark: Mark,
    #[serde(default)]
    pub difficulty: BotDifficulty,
    #[serde(default = "default_show_encouragement")]
    pub show_encouragement: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn validate_round_count(rounds: u32, what: &str) -> Result<(), String> {
    if rounds == 0 || rounds > MAX_ROUNDS {
        return Err(format!("{} must be between 1 and {}, got {}", what, MAX_ROUNDS, rounds));
    }
    Ok(())
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.round_choices.is_empty() {
            return Err("round_choices must not be empty".to_string());
        }
        for &choice in &self.round_choices {
            validate_round_count(choice, "round_choices entry")?;
        }
        if let Some(rounds) = self.default_rounds {
            validate_round_count(rounds, "default_rounds")?;
        }
        if self.human_mark == Mark::Empty {
            return Err("human_mark must be X or O".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            round_choices: vec![2, 5, 7, 10],
            default_rounds: None,
            human_mark: Mark::X,
            difficulty: BotDifficulty::Normal,
            show_encouragement: true,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ConfigContentProvider, ConfigSerializer, MemoryContentConfigProvider,
    };

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_console_config_{}.yaml", random_number));
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let config = Config::default();
        let serializer = YamlConfigSerializer;
        let content = serializer.serialize(&config).unwrap();
        let loaded: Config = serializer.deserialize(&content).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_store_saves_and_loads_file() {
        let config = Config {
            default_rounds: Some(3),
            human_mark: Mark::O,
            difficulty: BotDifficulty::Hard,
            seed: Some(1234),
            ..Config::default()
        };
        let file_path = get_temp_file_path();
        let store: ConfigStore<_, Config, _> =
            ConfigStore::new(FileContentConfigProvider::new(file_path.clone()), YamlConfigSerializer);
        store.set_config(&config).unwrap();

        let reloaded: ConfigStore<_, Config, _> = ConfigStore::from_yaml_file(&file_path);
        assert_eq!(reloaded.get_config().unwrap(), config);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_missing_file_returns_default_config() {
        let store: ConfigStore<_, Config, _> =
            ConfigStore::from_yaml_file("this_file_does_not_exist.yaml");
        assert_eq!(store.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_first_run_writes_default_config_file() {
        let file_path = get_temp_file_path();
        let store: ConfigStore<_, Config, _> = ConfigStore::from_yaml_file(&file_path);
        assert_eq!(store.get_or_init_config().unwrap(), Config::default());

        let content = FileContentConfigProvider::new(file_path.clone())
            .get_config_content()
            .unwrap()
            .unwrap();
        let written: Config = YamlConfigSerializer.deserialize(&content).unwrap();
        assert_eq!(written, Config::default());

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_get_or_init_keeps_existing_config() {
        let provider = MemoryContentConfigProvider::with_content(
            "round_choices: [4]\nhuman_mark: O\n",
        );
        let store: ConfigStore<_, Config, _> = ConfigStore::new(provider, YamlConfigSerializer);
        let config = store.get_or_init_config().unwrap();
        assert_eq!(config.round_choices, vec![4]);
        assert_eq!(config.human_mark, Mark::O);
    }

    #[test]
    fn test_optional_fields_fall_back_to_defaults() {
        let provider = MemoryContentConfigProvider::with_content(
            "round_choices: [3]\nhuman_mark: O\n",
        );
        let store: ConfigStore<_, Config, _> = ConfigStore::new(provider, YamlConfigSerializer);
        let config = store.get_config().unwrap();
        assert_eq!(config.round_choices, vec![3]);
        assert_eq!(config.human_mark, Mark::O);
        assert_eq!(config.difficulty, BotDifficulty::Normal);
        assert!(config.show_encouragement);
        assert_eq!(config.default_rounds, None);
    }

    #[test]
    fn test_zero_round_choice_is_rejected() {
        let provider = MemoryContentConfigProvider::with_content(
            "round_choices: [2, 0]\nhuman_mark: X\n",
        );
        let store: ConfigStore<_, Config, _> = ConfigStore::new(provider, YamlConfigSerializer);
        let error = store.get_config().unwrap_err();
        assert!(error.contains("Config validation error"));
    }

    #[test]
    fn test_empty_human_mark_is_rejected() {
        let config = Config {
            human_mark: Mark::Empty,
            ..Config::default()
        };
        let provider = MemoryContentConfigProvider::default();
        let store = ConfigStore::new(provider, YamlConfigSerializer);
        assert!(store.set_config(&config).is_err());
    }

    #[test]
    fn test_unknown_difficulty_cant_be_read() {
        let provider = MemoryContentConfigProvider::with_content(
            "round_choices: [2]\nhuman_mark: X\ndifficulty: Impossible\n",
        );
        let store: ConfigStore<_, Config, _> = ConfigStore::new(provider, YamlConfigSerializer);
        assert!(store.get_config().is_err());
    }

    #[test]
    fn test_memory_provider_starts_empty() {
        let provider = MemoryContentConfigProvider::default();
        assert_eq!(provider.get_config_content().unwrap(), None);
    }
}
