//! Text-to-speech for assistant replies
//!
//! Speech is best effort. A missing or failing TTS program is logged and
//! otherwise ignored; it never interrupts the chat.

use crate::config::SpeechConfig;
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;

const SPEAK_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait Speaker: Send + Sync {
    async fn speak(&self, text: &str) -> Result<()>;
}

/// Does nothing; used when speech is disabled
pub struct SilentSpeaker;

#[async_trait]
impl Speaker for SilentSpeaker {
    async fn speak(&self, _text: &str) -> Result<()> {
        Ok(())
    }
}

/// Speaks by running an external program with the text as last argument
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl Speaker for CommandSpeaker {
    async fn speak(&self, text: &str) -> Result<()> {
        let result = tokio::time::timeout(
            SPEAK_TIMEOUT,
            Command::new(&self.program)
                .args(&self.args)
                .arg(text)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::piped())
                .output(),
        )
        .await;

        match result {
            Ok(Ok(output)) if output.status.success() => Ok(()),
            Ok(Ok(output)) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                bail!("{} exited with {}: {}", self.program, output.status, stderr.trim())
            }
            Ok(Err(e)) => bail!("failed to run {}: {}", self.program, e),
            Err(_) => bail!("{} timed out after {:?}", self.program, SPEAK_TIMEOUT),
        }
    }
}

/// Speak and swallow any failure
pub async fn speak_quietly(speaker: &dyn Speaker, text: &str) {
    if let Err(e) = speaker.speak(text).await {
        tracing::warn!("Speech failed: {}", e);
    }
}

pub fn from_config(config: &SpeechConfig) -> Arc<dyn Speaker> {
    if config.enabled && !config.command.trim().is_empty() {
        tracing::debug!(command = %config.command, "Speech enabled");
        Arc::new(CommandSpeaker::new(config.command.clone(), config.args.clone()))
    } else {
        Arc::new(SilentSpeaker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_program_is_an_error() {
        let speaker = CommandSpeaker::new("ngamumule-no-such-tts", vec![]);
        assert!(speaker.speak("wilujeng").await.is_err());
        // and speak_quietly must not panic
        speak_quietly(&speaker, "wilujeng").await;
    }

    #[tokio::test]
    async fn disabled_config_is_silent() {
        let speaker = from_config(&SpeechConfig::default());
        assert!(speaker.speak("hatur nuhun").await.is_ok());
    }
}
