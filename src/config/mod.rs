//! Configuration management for ngamumule

use crate::agent::{builtin_personas, AgentConfig, Persona};
use crate::content::{AudioManifest, DEFAULT_AUDIO_ROOT};
use crate::core::ConfigError;
use crate::tools::{ToolRegistry, BUILTIN_TOOLS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub agent: AgentSettings,
    pub session: SessionConfig,
    pub speech: SpeechConfig,
    pub content: ContentConfig,
    /// Extra personas; one with a built-in id replaces the built-in
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub personas: Vec<Persona>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    pub name: String,
    pub model: String,
    pub max_iterations: usize,
    pub temperature: f32,
    pub tool_timeout_secs: u64,
}

impl Default for AgentSettings {
    fn default() -> Self {
        let defaults = AgentConfig::default();
        Self {
            name: defaults.name,
            model: defaults.model,
            max_iterations: defaults.max_iterations,
            temperature: defaults.temperature,
            tool_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub default_persona: String,
    /// Number of recent actions shown in the trace
    pub trace_window: usize,
    /// Shown in place of a reply when the agent fails
    pub apology: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_persona: "asisten".to_string(),
            trace_window: crate::session::TRACE_WINDOW,
            apology: crate::session::DEFAULT_APOLOGY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub enabled: bool,
    /// TTS program, called with `args` followed by the text
    pub command: String,
    pub args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: false, // Opt-in
            command: "espeak".to_string(),
            args: vec!["-v".to_string(), "id".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Prefix for audio paths, e.g. `/audio`
    pub audio_root: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            audio_root: DEFAULT_AUDIO_ROOT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from default location or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "ngamumule") {
            let config_dir = proj_dirs.config_dir();
            std::fs::create_dir_all(config_dir)?;
            Ok(config_dir.join("config.toml"))
        } else {
            Ok(PathBuf::from("config.toml"))
        }
    }

    /// Save configuration to default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let temperature = self.agent.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::Temperature(temperature));
        }
        if self.agent.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }

        let mut seen = HashSet::new();
        for persona in &self.personas {
            if !seen.insert(persona.id.as_str()) {
                return Err(ConfigError::DuplicatePersona(persona.id.clone()));
            }
            if let Some(tool) = persona
                .tools
                .iter()
                .find(|t| !BUILTIN_TOOLS.contains(&t.as_str()))
            {
                return Err(ConfigError::UnknownTool {
                    persona: persona.id.clone(),
                    tool: tool.clone(),
                });
            }
        }

        if !self
            .personas()
            .iter()
            .any(|p| p.id == self.session.default_persona)
        {
            return Err(ConfigError::UnknownDefaultPersona(
                self.session.default_persona.clone(),
            ));
        }
        Ok(())
    }

    /// Built-in personas with config overrides applied, then custom ones
    pub fn personas(&self) -> Vec<Persona> {
        let mut all = builtin_personas();
        for custom in &self.personas {
            match all.iter_mut().find(|p| p.id == custom.id) {
                Some(existing) => *existing = custom.clone(),
                None => all.push(custom.clone()),
            }
        }
        all
    }

    /// Base agent description; personas fill in name and tools
    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            name: self.agent.name.clone(),
            model: self.agent.model.clone(),
            tools: Vec::new(),
            max_iterations: self.agent.max_iterations,
            temperature: self.agent.temperature,
        }
    }

    pub fn audio_manifest(&self) -> AudioManifest {
        AudioManifest::from_vocabulary(
            self.content.audio_root.clone(),
            crate::content::vocabulary::vocabulary(),
        )
    }

    /// Registry of every built-in tool with the configured timeout
    pub fn tool_registry(&self) -> ToolRegistry {
        let mut registry = ToolRegistry::with_defaults(self.audio_manifest());
        registry.set_tool_timeout_secs(self.agent.tool_timeout_secs);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.session.trace_window, 10);
        assert_eq!(config.personas().len(), 3);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [agent]
            temperature = 0.2

            [speech]
            enabled = true
            "#,
        )
        .unwrap();
        assert_eq!(config.agent.temperature, 0.2);
        assert_eq!(config.agent.max_iterations, 5);
        assert_eq!(config.speech.command, "espeak");
        assert_eq!(config.content.audio_root, "/audio");
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let mut config = Config::default();
        config.agent.temperature = 2.5;
        assert!(matches!(config.validate(), Err(ConfigError::Temperature(t)) if t == 2.5));
    }

    #[test]
    fn rejects_unknown_persona_tool() {
        let mut config = Config::default();
        let mut persona = crate::agent::guru();
        persona.id = "kokolot".to_string();
        persona.tools.push("time_travel".to_string());
        config.personas.push(persona);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownTool { ref tool, .. }) if tool == "time_travel"
        ));
    }

    #[test]
    fn custom_persona_overrides_builtin() {
        let mut config = Config::default();
        let mut persona = crate::agent::guru();
        persona.greeting = "Sampurasun, murid!".to_string();
        config.personas.push(persona);

        let personas = config.personas();
        assert_eq!(personas.len(), 3);
        assert_eq!(personas[1].greeting, "Sampurasun, murid!");
    }

    #[test]
    fn rejects_missing_default_persona() {
        let mut config = Config::default();
        config.session.default_persona = "dalang".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownDefaultPersona(ref id)) if id == "dalang"
        ));
    }
}
