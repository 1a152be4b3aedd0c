use async_trait::async_trait;
use serde::Serialize;

use crate::engine::LanguageTag;
use crate::error::SpeechError;

/// Text handed to a speech engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    /// Voice settings for `target`; Arabic is spoken as `ar-SA`, slightly slowed
    pub fn for_language(text: impl Into<String>, target: &LanguageTag) -> Self {
        let (lang, rate) = if target.is_arabic() {
            ("ar-SA".to_string(), 0.9)
        } else {
            (target.to_string(), 1.0)
        };
        Self {
            text: text.into(),
            lang,
            rate,
            pitch: 1.0,
        }
    }
}

#[async_trait]
pub trait SpeechOutput: Send + Sync {
    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError>;
}

/// Logs the utterance instead of producing audio
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSpeech;

#[async_trait]
impl SpeechOutput for TracingSpeech {
    async fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        tracing::info!(
            lang = %utterance.lang,
            rate = utterance.rate,
            pitch = utterance.pitch,
            chars = utterance.text.chars().count(),
            "speech hand-off"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arabic_voice_settings() {
        let target = LanguageTag::parse("ar").unwrap();
        let utterance = Utterance::for_language("حمى", &target);
        assert_eq!(utterance.lang, "ar-SA");
        assert_eq!(utterance.rate, 0.9);
        assert_eq!(utterance.pitch, 1.0);
    }

    #[test]
    fn test_other_language_keeps_tag() {
        let target = LanguageTag::parse("fr").unwrap();
        let utterance = Utterance::for_language("fièvre", &target);
        assert_eq!(utterance.lang, "fr");
        assert_eq!(utterance.rate, 1.0);
    }

    #[tokio::test]
    async fn test_tracing_speech_succeeds() {
        let target = LanguageTag::parse("ar").unwrap();
        assert!(TracingSpeech
            .speak(&Utterance::for_language("حمى", &target))
            .await
            .is_ok());
    }
}
