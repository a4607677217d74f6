//! Hackathons service
//!
//! Admin-posted hackathons, either entered by hand or built from an
//! extraction of the event page. Status is derived once at creation time
//! from the event dates and is not recomputed afterwards.

use crate::config::{MAX_SEEDED_PARTICIPANTS, MIN_SEEDED_PARTICIPANTS};
use crate::database::{
    Collection, CreateHackathonRequest, Difficulty, Hackathon, HackathonMode, HackathonStatus,
    Store, UpdateHackathonRequest,
};
use crate::dates::{is_unknown, parse_flexible_date};
use crate::error::Result;
use crate::ids::HackathonId;
use crate::remote::ExtractedHackathon;
use chrono::{NaiveDate, Utc};
use rand::Rng;

/// Status of an event with the given dates, as seen on `today`
pub fn derive_status(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> HackathonStatus {
    match (start, end) {
        (_, Some(end)) if end < today => HackathonStatus::Ended,
        (Some(start), _) if start <= today => HackathonStatus::Ongoing,
        _ => HackathonStatus::Upcoming,
    }
}

/// Logo letter: the organizer's first character, uppercased
fn derive_logo(explicit: Option<String>, organizer: &str) -> String {
    explicit
        .filter(|logo| !logo.trim().is_empty())
        .or_else(|| organizer.trim().chars().next().map(|c| c.to_uppercase().collect::<String>()))
        .unwrap_or_else(|| "?".to_string())
}

/// Build a create request from an extracted event page.
///
/// Dates go through the flexible normalizer; anything it cannot read, and
/// any sentinel value, becomes "unknown" rather than a guess.
pub fn request_from_extraction(extracted: ExtractedHackathon, url: &str) -> CreateHackathonRequest {
    let date = |raw: &Option<String>| raw.as_deref().and_then(parse_flexible_date);
    let text = |raw: Option<String>| raw.filter(|v| !is_unknown(v));

    CreateHackathonRequest {
        deadline: date(&extracted.deadline),
        start_date: date(&extracted.start_date),
        end_date: date(&extracted.end_date),
        title: text(extracted.title).unwrap_or_default(),
        organizer: text(extracted.organizer).unwrap_or_default(),
        logo: None,
        prize: text(extracted.prize).unwrap_or_default(),
        mode: extracted
            .mode
            .as_deref()
            .and_then(HackathonMode::parse_loose)
            .unwrap_or_default(),
        location: text(extracted.location),
        tags: extracted.tags.into_iter().filter(|t| !is_unknown(t)).collect(),
        difficulty: extracted
            .difficulty
            .as_deref()
            .and_then(Difficulty::parse_loose)
            .unwrap_or(Difficulty::Intermediate),
        description: text(extracted.description).unwrap_or_default(),
        registration_url: url.to_string(),
    }
}

#[derive(Clone)]
pub struct HackathonsService {
    hackathons: Collection<Hackathon>,
}

impl HackathonsService {
    pub fn new(store: Store) -> Self {
        Self {
            hackathons: store.collection(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Hackathon>> {
        self.hackathons.list().await
    }

    pub async fn get(&self, id: &HackathonId) -> Result<Hackathon> {
        self.hackathons.get(id).await
    }

    /// Hackathons whose stored status is not `Ended`
    pub async fn list_open(&self) -> Result<Vec<Hackathon>> {
        let hackathons = self.list().await?;
        Ok(hackathons
            .into_iter()
            .filter(|h| h.status != HackathonStatus::Ended)
            .collect())
    }

    pub async fn create(&self, req: CreateHackathonRequest) -> Result<Hackathon> {
        tracing::info!("Creating hackathon: {}", req.title);

        let today = Utc::now().date_naive();
        let participants =
            rand::thread_rng().gen_range(MIN_SEEDED_PARTICIPANTS..=MAX_SEEDED_PARTICIPANTS);

        let hackathon = Hackathon {
            id: HackathonId::generate(),
            logo: derive_logo(req.logo, &req.organizer),
            status: derive_status(req.start_date, req.end_date, today),
            title: req.title,
            organizer: req.organizer,
            deadline: req.deadline,
            start_date: req.start_date,
            end_date: req.end_date,
            posted_date: today,
            prize: req.prize,
            participants,
            mode: req.mode,
            location: req.location,
            tags: req.tags,
            difficulty: req.difficulty,
            description: req.description,
            registration_url: req.registration_url,
        };

        let hackathon = self.hackathons.prepend(hackathon).await?;
        tracing::info!("Hackathon created: {} ({:?})", hackathon.id, hackathon.status);

        Ok(hackathon)
    }

    pub async fn update(
        &self,
        id: &HackathonId,
        patch: &UpdateHackathonRequest,
    ) -> Result<Hackathon> {
        tracing::debug!("Updating hackathon: {}", id);
        self.hackathons.merge(id, patch).await
    }

    pub async fn remove(&self, id: &HackathonId) -> Result<()> {
        tracing::info!("Deleting hackathon: {}", id);
        self.hackathons.remove(id).await?;
        Ok(())
    }
}
