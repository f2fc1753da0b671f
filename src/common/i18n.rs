// src/common/i18n.rs

use std::collections::HashMap;

use anyhow::Context;

const DEFAULT_LANG: &str = "pt";

// Arquivos de mensagens embutidos no binário
const LOCALES: &[(&str, &str)] = &[
    ("pt", include_str!("../../locales/pt.json")),
    ("en", include_str!("../../locales/en.json")),
];

/// Catálogo de mensagens por idioma.
///
/// Idioma desconhecido cai para o português; chave desconhecida devolve a
/// própria chave.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<String, HashMap<String, String>>,
}

impl I18nStore {
    pub fn load() -> anyhow::Result<Self> {
        let mut messages = HashMap::new();
        for (lang, raw) in LOCALES {
            let table: HashMap<String, String> = serde_json::from_str(raw)
                .with_context(|| format!("Arquivo de idioma '{}' inválido", lang))?;
            messages.insert(lang.to_string(), table);
        }
        Ok(Self { messages })
    }

    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|t| t.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Traduz e substitui os marcadores `{nome}` pelos argumentos.
    pub fn translate_with(&self, lang: &str, key: &str, args: &[(&str, &str)]) -> String {
        let mut message = self.translate(lang, key);
        for (name, value) in args {
            message = message.replace(&format!("{{{}}}", name), value);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_portuguese_key_has_an_english_translation() {
        let store = I18nStore::load().unwrap();
        let pt = &store.messages["pt"];
        let en = &store.messages["en"];
        let missing: Vec<&String> = pt.keys().filter(|k| !en.contains_key(*k)).collect();
        assert!(missing.is_empty(), "faltando em en.json: {:?}", missing);
    }

    #[test]
    fn unknown_language_falls_back_to_portuguese() {
        let store = I18nStore::load().unwrap();
        assert_eq!(
            store.translate("fr", "invalid_credentials"),
            store.translate("pt", "invalid_credentials")
        );
    }

    #[test]
    fn unknown_key_returns_the_key() {
        let store = I18nStore::load().unwrap();
        assert_eq!(store.translate("pt", "nao.existe"), "nao.existe");
    }

    #[test]
    fn placeholders_are_interpolated() {
        let store = I18nStore::load().unwrap();
        let msg = store.translate_with("en", "not_found", &[("resource", "Vehicle")]);
        assert_eq!(msg, "Vehicle not found.");
    }
}
