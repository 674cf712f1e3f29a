//! Profile entity types and their JSON shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A complete profile as extracted from one rendered document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// When this profile was constructed
    pub generated_at: DateTime<Utc>,
    pub name: String,
    pub headline: String,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
}

impl Profile {
    /// Create an empty profile stamped with the current time
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            name: name.into(),
            headline: String::new(),
            summary: String::new(),
            experience: Vec::new(),
            education: Vec::new(),
            projects: Vec::new(),
            certifications: Vec::new(),
        }
    }

    /// Replace the construction timestamp
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Time elapsed since `generated_at`, measured against `now`.
    ///
    /// A timestamp in the future yields a zero age.
    pub fn age_at(&self, now: DateTime<Utc>) -> std::time::Duration {
        (now - self.generated_at).to_std().unwrap_or_default()
    }
}

/// Employment at one company, holding one or more positions.
///
/// Whether the source listed a single role or a group of roles, the
/// positions always arrive here as a flat ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_image: Option<String>,
    pub positions: Vec<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub title: String,
    pub start_date: String,
    /// Empty when the position is ongoing or has no end date
    pub end_date: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub title: String,
    pub subtitle: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub title: String,
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_profile() -> Profile {
        let mut profile = Profile::new("Ada Example");
        profile.headline = "Engineer".to_string();
        profile.experience.push(Experience {
            company: "Acme".to_string(),
            company_image: None,
            positions: vec![Position {
                title: "Developer".to_string(),
                start_date: "Jan 2020".to_string(),
                ..Default::default()
            }],
        });
        profile.certifications.push(Certification {
            title: "Cert".to_string(),
            institution: "Board".to_string(),
            image_url: Some(String::new()),
            issued_on: Some("Mar 2021".to_string()),
            expires_on: None,
        });
        profile
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(sample_profile()).unwrap();
        for key in [
            "generated_at",
            "name",
            "headline",
            "summary",
            "experience",
            "education",
            "projects",
            "certifications",
        ] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
        let position = &value["experience"][0]["positions"][0];
        assert_eq!(position["start_date"], "Jan 2020");
        assert_eq!(position["end_date"], "");
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let value = serde_json::to_value(sample_profile()).unwrap();
        assert!(value["experience"][0].get("company_image").is_none());
        let cert = &value["certifications"][0];
        assert!(cert.get("expires_on").is_none());
        assert_eq!(cert["image_url"], "");
        assert_eq!(cert["issued_on"], "Mar 2021");
    }

    #[test]
    fn test_empty_and_absent_survive_json() {
        let profile = sample_profile();
        let json = serde_json::to_string(&profile).unwrap();
        let decoded: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, profile);
        assert_eq!(decoded.certifications[0].image_url, Some(String::new()));
        assert_eq!(decoded.certifications[0].expires_on, None);
    }

    #[test]
    fn test_age_at() {
        let now = Utc::now();
        let profile = Profile::new("x").with_generated_at(now - Duration::hours(6));
        assert_eq!(profile.age_at(now), std::time::Duration::from_secs(6 * 3600));

        let future = Profile::new("x").with_generated_at(now + Duration::hours(1));
        assert_eq!(future.age_at(now), std::time::Duration::ZERO);
    }
}
