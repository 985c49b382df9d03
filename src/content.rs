//! Editable page sections.
//!
//! Each key in the `site_content` table has a fixed document shape. Payloads
//! are parsed into [`SiteSection`] at the API boundary so the store only ever
//! sees documents the public pages know how to render.

use serde::{Deserialize, Deserializer, Serialize};

/// Section fields may be omitted but not sent as `null`; a stored document
/// has to come back exactly as it was accepted.
fn non_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    String::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HeroContent {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StatsContent {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub established_year: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub countries: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub daily_calls: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub uptime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AboutContent {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub vision: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub values: Option<String>,
}

/// A section document tagged by its content key.
///
/// On the wire this is `{"key": "hero", "content": {...}}`, the same body the
/// admin panel sends to `PUT /api/admin/content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "key", content = "content", rename_all = "lowercase")]
pub enum SiteSection {
    Hero(HeroContent),
    Stats(StatsContent),
    About(AboutContent),
}

impl SiteSection {
    pub const KEYS: [&'static str; 3] = ["hero", "stats", "about"];

    pub fn key(&self) -> &'static str {
        match self {
            SiteSection::Hero(_) => "hero",
            SiteSection::Stats(_) => "stats",
            SiteSection::About(_) => "about",
        }
    }

    /// The section body as stored in the `content` column.
    pub fn content_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            SiteSection::Hero(c) => serde_json::to_value(c),
            SiteSection::Stats(c) => serde_json::to_value(c),
            SiteSection::About(c) => serde_json::to_value(c),
        }
    }

    /// Parse a stored or submitted body for `key`.
    pub fn from_parts(key: &str, content: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::json!({ "key": key, "content": content }))
    }
}

/// Copy shown on a fresh install.
pub fn default_sections() -> Vec<SiteSection> {
    vec![
        SiteSection::Hero(HeroContent {
            title: Some("VoipFit".to_string()),
            subtitle: Some("National High-Tech Enterprise".to_string()),
            description: Some(
                "Excellent products, sincere service, and mutual win with customers".to_string(),
            ),
        }),
        SiteSection::Stats(StatsContent {
            established_year: Some("2018".to_string()),
            countries: Some("150+".to_string()),
            daily_calls: Some("5M+".to_string()),
            uptime: Some("99.9%".to_string()),
        }),
        SiteSection::About(AboutContent {
            title: Some("About VoipFit".to_string()),
            description: Some(
                "Since 2018, VoipFit has been at the forefront of telecommunications innovation, \
                 providing reliable and cutting-edge communication solutions to businesses and \
                 individuals across 150+ countries worldwide."
                    .to_string(),
            ),
            mission: Some(
                "Our mission is to deliver excellent products with sincere service, creating \
                 mutual win opportunities with our customers through advanced technology and \
                 unwavering commitment to quality."
                    .to_string(),
            ),
            vision: Some("Leading global telecom transformation".to_string()),
            values: Some("Innovation, Quality, Trust".to_string()),
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_parses_admin_payload() {
        let section: SiteSection =
            serde_json::from_value(json!({ "key": "hero", "content": { "title": "X" } })).unwrap();
        assert_eq!(
            section,
            SiteSection::Hero(HeroContent {
                title: Some("X".to_string()),
                ..Default::default()
            })
        );
        assert_eq!(section.key(), "hero");
        assert_eq!(section.content_json().unwrap(), json!({ "title": "X" }));
    }

    #[test]
    fn test_stats_fields_are_camel_case() {
        let section = SiteSection::from_parts(
            "stats",
            json!({ "establishedYear": "2018", "dailyCalls": "5M+" }),
        )
        .unwrap();
        match section {
            SiteSection::Stats(stats) => {
                assert_eq!(stats.established_year.as_deref(), Some("2018"));
                assert_eq!(stats.daily_calls.as_deref(), Some("5M+"));
                assert!(stats.uptime.is_none());
            }
            other => panic!("expected stats, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(SiteSection::from_parts("footer", json!({})).is_err());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(SiteSection::from_parts("about", json!({ "slogan": "hi" })).is_err());
    }

    #[test]
    fn test_null_field_is_rejected() {
        assert!(SiteSection::from_parts("hero", json!({ "subtitle": null })).is_err());
        assert!(SiteSection::from_parts("hero", json!({ "subtitle": "ok" })).is_ok());
    }

    #[test]
    fn test_default_sections_cover_every_key() {
        let keys: Vec<&str> = default_sections().iter().map(|s| s.key()).collect();
        assert_eq!(keys, SiteSection::KEYS);
    }
}
