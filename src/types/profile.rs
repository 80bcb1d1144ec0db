// src/types/profile.rs
//! JSON-Resume profile document consumed by the field mappers

use serde::{Deserialize, Serialize};

// ===== Profile Structure =====

/// Every field is optional: a sparse document must map to empty values,
/// never fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub basics: Basics,
    pub work: Vec<Work>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Basics {
    pub name: Option<String>,
    pub label: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub summary: Option<String>,
    pub location: Option<Location>,
    pub profiles: Vec<SocialProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialProfile {
    pub network: Option<String>,
    pub username: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Work {
    pub name: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>, // None means current
    pub location: Option<String>,
    pub summary: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub institution: Option<String>,
    pub study_type: Option<String>,
    pub area: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub language: Option<String>,
    pub fluency: Option<String>,
}

// ===== Accessors =====

/// Borrow an optional string as `&str`, treating `None` as empty.
pub(crate) fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Like [`text`] but with a fallback for missing or empty values.
pub(crate) fn text_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

impl Basics {
    pub fn name(&self) -> &str {
        text(&self.name)
    }

    pub fn email(&self) -> &str {
        text(&self.email)
    }

    pub fn phone(&self) -> &str {
        text(&self.phone)
    }

    pub fn url(&self) -> &str {
        text(&self.url)
    }

    /// First profile whose network is LinkedIn, compared case-insensitively.
    pub fn linkedin(&self) -> Option<&SocialProfile> {
        self.profiles.iter().find(|p| {
            p.network
                .as_deref()
                .is_some_and(|n| n.to_lowercase() == "linkedin")
        })
    }

    pub fn linkedin_url(&self) -> &str {
        self.linkedin().map(|p| text(&p.url)).unwrap_or("")
    }

    /// Street address, falling back to city.
    pub fn location_line(&self) -> &str {
        match &self.location {
            Some(loc) => text_or(&loc.address, text(&loc.city)),
            None => "",
        }
    }
}

impl Profile {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_document_deserializes() {
        let profile = Profile::from_json(r#"{"basics": {}}"#).unwrap();
        assert_eq!(profile.basics.name(), "");
        assert!(profile.work.is_empty());
        assert_eq!(profile.basics.location_line(), "");
    }

    #[test]
    fn test_json_resume_keys() {
        let profile = Profile::from_json(
            r#"{
                "basics": {
                    "name": "Jan Kowalski",
                    "location": {"city": "Kraków", "countryCode": "PL"},
                    "profiles": [{"network": "GitHub", "url": "https://github.com/jk"}]
                },
                "work": [{"name": "Acme", "startDate": "2019-03-01", "highlights": ["Shipped"]}],
                "education": [{"studyType": "MSc", "area": "CS"}],
                "meta": {"version": "v1"}
            }"#,
        )
        .unwrap();

        assert_eq!(profile.basics.location_line(), "Kraków");
        assert_eq!(profile.work[0].start_date.as_deref(), Some("2019-03-01"));
        assert_eq!(profile.education[0].study_type.as_deref(), Some("MSc"));
        assert_eq!(profile.basics.linkedin_url(), "");
    }

    #[test]
    fn test_linkedin_lookup_ignores_case() {
        for network in ["LinkedIn", "linkedin", "LINKEDIN"] {
            let basics = Basics {
                profiles: vec![SocialProfile {
                    network: Some(network.to_string()),
                    url: Some("https://x".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            };
            assert_eq!(basics.linkedin_url(), "https://x");
        }
    }

    #[test]
    fn test_location_prefers_address() {
        let basics = Basics {
            location: Some(Location {
                address: Some("ul. Długa 1".to_string()),
                city: Some("Gdańsk".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(basics.location_line(), "ul. Długa 1");
    }
}
