use std::sync::Arc;

use super::error::LinkError;
use super::translit::{contains_cyrillic, cyrillic_to_latin, latin_to_cyrillic};
use crate::infrastructure::api::Translator;

/// Decides whether a search candidate's artist is the artist that was asked
/// for, bridging Latin and Cyrillic spellings.
pub struct CrossScriptMatcher {
    translator: Arc<dyn Translator>,
}

impl CrossScriptMatcher {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    /// Tries, in order: case-insensitive equality, transliteration of the
    /// candidate to Latin, and (only for Cyrillic candidates) translation of
    /// the requested name to Russian.
    pub async fn is_same_artist(&self, requested: &str, candidate: &str) -> Result<bool, LinkError> {
        let requested = requested.trim().to_lowercase();
        let candidate = candidate.trim().to_lowercase();

        if requested == candidate {
            return Ok(true);
        }

        if cyrillic_to_latin(&candidate) == requested {
            tracing::debug!(%requested, %candidate, "artist matched by transliteration");
            return Ok(true);
        }

        if !contains_cyrillic(&candidate) {
            return Ok(false);
        }

        let translated = self
            .translator
            .translate_en_to_ru(&requested)
            .await
            .map_err(LinkError::Translation)?;
        let matched = translated.trim().to_lowercase() == candidate;
        if matched {
            tracing::debug!(%requested, %candidate, "artist matched by translation");
        }
        Ok(matched)
    }
}

/// The query rewritten in the other script, or `None` when transliteration
/// leaves it unchanged.
pub fn alternate_script_query(query: &str) -> Option<String> {
    let alternate = if contains_cyrillic(query) {
        cyrillic_to_latin(query)
    } else {
        latin_to_cyrillic(query)
    };
    (alternate != query.to_lowercase()).then_some(alternate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::api::mocks::MockTranslator;

    fn matcher(pairs: &[(&str, &str)]) -> (CrossScriptMatcher, Arc<MockTranslator>) {
        let translator = Arc::new(MockTranslator::with(pairs));
        (CrossScriptMatcher::new(translator.clone()), translator)
    }

    #[tokio::test]
    async fn exact_match_ignores_case() {
        let (m, translator) = matcher(&[]);
        assert!(m.is_same_artist("massive attack", "Massive Attack").await.unwrap());
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn transliterated_match() {
        let (m, translator) = matcher(&[]);
        assert!(m.is_same_artist("zemfira", "земфира").await.unwrap());
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn translated_match() {
        let (m, _) = matcher(&[("translatable artist", "переведенный артист")]);
        assert!(
            m.is_same_artist("translatable artist", "переведенный артист")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn no_translation_means_no_match() {
        let (m, translator) = matcher(&[]);
        assert!(
            !m.is_same_artist("translatable artist", "переведенный артист")
                .await
                .unwrap()
        );
        assert_eq!(translator.calls(), ["translatable artist"]);
    }

    #[tokio::test]
    async fn latin_candidates_skip_translation() {
        let (m, translator) = matcher(&[("massive attack", "массив аттак")]);
        assert!(!m.is_same_artist("massive attack", "Portishead").await.unwrap());
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn translator_failure_is_reported() {
        let (m, translator) = matcher(&[]);
        translator.close().unwrap();
        let err = m.is_same_artist("kino", "алиса").await.unwrap_err();
        assert!(matches!(err, LinkError::Translation(_)));
    }

    #[test]
    fn alternate_query_flips_script() {
        assert_eq!(
            alternate_script_query("Zemfira Iskala").as_deref(),
            Some("земфира искала")
        );
        assert_eq!(alternate_script_query("Кино Группа крови").as_deref(), Some("kino gruppa krovi"));
        assert_eq!(alternate_script_query("2001"), None);
    }
}
