//! Page extraction client
//!
//! Turns a hackathon or internship page URL into structured fields via the
//! extraction service. Sentinel values ("Not mentioned", "Not Disclosed")
//! and blanks deserialize as `None`, never as real values.

use super::{build_client, send_json};
use crate::dates::{is_unknown, parse_flexible_date};
use crate::database::{CreateJobRequest, Eligibility, JobType};
use crate::error::Result;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use std::time::Duration;

lazy_static! {
    static ref AMOUNT_RE: Regex = Regex::new(r"(\d[\d,]*(?:\.\d+)?)\s*([kK])?").unwrap();
    static ref CGPA_RE: Regex =
        Regex::new(r"(?i)(?:(\d{1,2}(?:\.\d+)?)\s*\+?\s*(?:cgpa|gpa))|(?:(?:cgpa|gpa)\D{0,12}(\d{1,2}(?:\.\d+)?))")
            .unwrap();
}

/// Text field, with sentinels and blanks read as absent
fn known_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) if !is_unknown(&s) => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Tags arrive either as an array or as one comma-separated string
fn known_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let tags: Vec<String> = match raw {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };

    Ok(tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !is_unknown(t))
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedHackathon {
    #[serde(default, deserialize_with = "known_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "known_text")]
    pub organizer: Option<String>,
    #[serde(default, deserialize_with = "known_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "known_text")]
    pub prize: Option<String>,
    #[serde(default, deserialize_with = "known_text")]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "known_text")]
    pub difficulty: Option<String>,
    #[serde(default, deserialize_with = "known_tags")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "known_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "known_text")]
    pub deadline: Option<String>,
    #[serde(default, deserialize_with = "known_text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "known_text")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedInternship {
    #[serde(default, deserialize_with = "known_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "known_text")]
    pub stipend: Option<String>,
    #[serde(default, deserialize_with = "known_text")]
    pub deadline: Option<String>,
    #[serde(default, deserialize_with = "known_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "known_text")]
    pub eligibility: Option<String>,
}

impl ExtractedInternship {
    /// First amount in the stipend text: "₹15,000/month" → 15000, "20k" → 20000
    pub fn stipend_amount(&self) -> Option<f64> {
        let stipend = self.stipend.as_deref()?;
        let caps = AMOUNT_RE.captures(stipend)?;
        let amount: f64 = caps.get(1)?.as_str().replace(',', "").parse().ok()?;
        Some(if caps.get(2).is_some() { amount * 1000.0 } else { amount })
    }

    pub fn deadline_date(&self) -> Option<NaiveDate> {
        self.deadline.as_deref().and_then(parse_flexible_date)
    }

    /// Minimum CGPA mentioned in the eligibility text, if any
    pub fn min_cgpa(&self) -> Option<f64> {
        let text = self.eligibility.as_deref()?;
        let caps = CGPA_RE.captures(text)?;
        caps.get(1)
            .or_else(|| caps.get(2))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Pre-fill a job posting. Unknown deadline falls back to `default_deadline`.
    pub fn to_job_request(&self, default_deadline: NaiveDate) -> CreateJobRequest {
        CreateJobRequest {
            title: self.title.clone().unwrap_or_default(),
            description: self.eligibility.clone().unwrap_or_default(),
            package: self.stipend_amount().unwrap_or_default(),
            location: self.location.clone().unwrap_or_default(),
            job_type: JobType::Internship,
            deadline: self.deadline_date().unwrap_or(default_deadline),
            eligibility: Eligibility {
                min_cgpa: self.min_cgpa().unwrap_or_default(),
                branches: Vec::new(),
            },
            rounds: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct ExtractionClient {
    client: reqwest::Client,
    base_url: String,
}

impl ExtractionClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn extract_hackathon(&self, url: &str) -> Result<ExtractedHackathon> {
        tracing::info!("Extracting hackathon from {}", url);
        let request = self
            .client
            .post(format!("{}/extract-hackathon", self.base_url))
            .json(&json!({ "url": url }));
        send_json(request).await
    }

    pub async fn extract_internship(&self, url: &str) -> Result<ExtractedInternship> {
        tracing::info!("Extracting internship from {}", url);
        let request = self
            .client
            .post(format!("{}/extract-internship", self.base_url))
            .json(&json!({ "url": url }));
        send_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_deserialize_as_none() {
        let extracted: ExtractedHackathon = serde_json::from_value(json!({
            "title": "Smart India Hackathon",
            "organizer": "Not mentioned",
            "prize": "Not Disclosed",
            "mode": "",
            "tags": ["AI", "Not mentioned", " Web3 "],
            "deadline": "15th March 2026",
            "startDate": "not mentioned"
        }))
        .unwrap();

        assert_eq!(extracted.title.as_deref(), Some("Smart India Hackathon"));
        assert_eq!(extracted.organizer, None);
        assert_eq!(extracted.prize, None);
        assert_eq!(extracted.mode, None);
        assert_eq!(extracted.tags, vec!["AI", "Web3"]);
        assert_eq!(extracted.deadline.as_deref(), Some("15th March 2026"));
        assert_eq!(extracted.start_date, None);
        assert_eq!(extracted.end_date, None);
    }

    #[test]
    fn test_tags_as_string() {
        let extracted: ExtractedHackathon =
            serde_json::from_value(json!({ "tags": "ML, Cloud,," })).unwrap();
        assert_eq!(extracted.tags, vec!["ML", "Cloud"]);
    }

    #[test]
    fn test_internship_helpers() {
        let internship: ExtractedInternship = serde_json::from_value(json!({
            "title": "Backend Intern",
            "stipend": "₹15,000 /month",
            "deadline": "Jan 31, 2026",
            "location": "Remote",
            "eligibility": "B.Tech students with 7.5+ CGPA"
        }))
        .unwrap();

        assert_eq!(internship.stipend_amount(), Some(15000.0));
        assert_eq!(internship.deadline_date(), NaiveDate::from_ymd_opt(2026, 1, 31));
        assert_eq!(internship.min_cgpa(), Some(7.5));

        let fallback = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let req = internship.to_job_request(fallback);
        assert_eq!(req.title, "Backend Intern");
        assert_eq!(req.package, 15000.0);
        assert_eq!(req.job_type, JobType::Internship);
        assert_eq!(req.deadline, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
        assert_eq!(req.eligibility.min_cgpa, 7.5);
    }

    #[test]
    fn test_internship_unknowns() {
        let internship: ExtractedInternship = serde_json::from_value(json!({
            "stipend": "20k",
            "deadline": "Not mentioned",
            "eligibility": "Minimum CGPA: 8"
        }))
        .unwrap();

        assert_eq!(internship.stipend_amount(), Some(20000.0));
        assert_eq!(internship.deadline, None);
        assert_eq!(internship.min_cgpa(), Some(8.0));

        let fallback = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        assert_eq!(internship.to_job_request(fallback).deadline, fallback);

        let unpaid = ExtractedInternship {
            stipend: Some("Unpaid".to_string()),
            ..Default::default()
        };
        assert_eq!(unpaid.stipend_amount(), None);
    }
}
