// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

const DEFAULT_LANG: &str = "pt";

// Idioma preferido do cliente, tirado do Accept-Language
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl Locale {
    pub fn from_header(header_str: Option<&str>) -> Self {
        let lang = header_str
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .first() // Pega o idioma de maior peso (ex: "pt-BR")
                    .map(|tag_string| {
                        // "pt-BR" -> "pt"; "en" -> "en"
                        tag_string
                            .split('-')
                            .next()
                            .unwrap_or(tag_string)
                            .to_lowercase()
                    })
            })
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        Locale(lang)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_str = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok());

        Ok(Locale::from_header(header_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_defaults_to_portuguese() {
        assert_eq!(Locale::from_header(None).0, "pt");
    }

    #[test]
    fn region_is_stripped() {
        assert_eq!(Locale::from_header(Some("en-US,en;q=0.9")).0, "en");
    }

    #[test]
    fn highest_quality_wins() {
        assert_eq!(Locale::from_header(Some("en;q=0.5, pt-BR;q=0.9")).0, "pt");
    }
}
