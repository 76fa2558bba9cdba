//! Discovery: match search, available players and player calendars.

use chrono::Duration;
use shared::distance::distance_km;
use shared::text::contains_normalized;
use shared::time::civil_now;
use tracing::debug;
use uuid::Uuid;

use super::Stores;
use crate::error::DomainError;
use crate::models::matches::CalendarQuery;
use crate::models::{
    AvailablePlayer, AvailablePlayersQuery, CalendarEntry, MatchSearchCriteria, MatchSearchQuery,
    MatchSearchResult,
};

/// Fallback values when a query leaves them out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscoveryDefaults {
    pub match_radius_km: f64,
    pub player_radius_km: f64,
    pub calendar_days: i64,
}

impl Default for DiscoveryDefaults {
    fn default() -> Self {
        Self {
            match_radius_km: 5.0,
            player_radius_km: 10.0,
            calendar_days: 30,
        }
    }
}

#[derive(Clone)]
pub struct DiscoveryService {
    stores: Stores,
    defaults: DiscoveryDefaults,
}

impl DiscoveryService {
    pub fn new(stores: Stores, defaults: DiscoveryDefaults) -> Self {
        Self { stores, defaults }
    }

    /// Upcoming matches with room near the player, closest first.
    pub async fn search_matches(
        &self,
        player_id: Uuid,
        query: MatchSearchQuery,
    ) -> Result<Vec<MatchSearchResult>, DomainError> {
        let player = self.stores.require_user(player_id, "User").await?;
        let origin = player.coordinates();
        let radius = query.max_distance_km.unwrap_or(self.defaults.match_radius_km);

        let criteria = MatchSearchCriteria {
            player_id,
            not_before: civil_now(),
            title: query.title.filter(|t| !t.is_empty()),
            from: query.from,
            to: query.to,
            format: query.format,
            min_age_ceiling: query.min_age_ceiling,
        };
        let candidates = self.stores.matches.search(&criteria).await?;
        let total = candidates.len();

        let mut results: Vec<MatchSearchResult> = candidates
            .into_iter()
            .filter(|summary| summary.confirmed_count < i64::from(summary.info.capacity))
            .map(|summary| MatchSearchResult {
                distance_km: distance_km(origin, summary.info.coordinates()),
                has_room: true,
                confirmed_count: summary.confirmed_count,
                organizer_name: summary.organizer_name,
                info: summary.info,
            })
            .filter(|result| result.distance_km <= radius)
            .collect();
        results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        debug!(
            player_id = %player_id,
            candidates = total,
            returned = results.len(),
            radius_km = radius,
            "Match search completed"
        );
        Ok(results)
    }

    /// Available players near the organizer, closest first.
    ///
    /// Distances are measured from the organizer's own coordinates.
    pub async fn available_players(
        &self,
        organizer_id: Uuid,
        query: AvailablePlayersQuery,
    ) -> Result<Vec<AvailablePlayer>, DomainError> {
        let organizer = self.stores.require_user(organizer_id, "Organizer").await?;
        let origin = organizer.coordinates();
        let radius = query
            .max_distance_km
            .unwrap_or(self.defaults.player_radius_km);
        let today = civil_now().date();

        let mut players: Vec<AvailablePlayer> = self
            .stores
            .users
            .list_available(organizer_id, query.gender, query.position)
            .await?
            .into_iter()
            .filter(|user| {
                query
                    .location_text
                    .as_deref()
                    .map_or(true, |needle| contains_normalized(&user.location_text, needle))
            })
            .map(|user| AvailablePlayer {
                distance_km: distance_km(origin, user.coordinates()),
                age: user.age_on(today),
                id: user.id,
                name: user.name,
                position: user.position,
                gender: user.gender,
                location_text: user.location_text,
            })
            .filter(|player| player.distance_km <= radius)
            .collect();
        players.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        debug!(
            organizer_id = %organizer_id,
            returned = players.len(),
            radius_km = radius,
            "Available players search completed"
        );
        Ok(players)
    }

    /// Confirmed matches of a player within `[max(from, now), to]`.
    pub async fn calendar(
        &self,
        player_id: Uuid,
        query: CalendarQuery,
    ) -> Result<Vec<CalendarEntry>, DomainError> {
        self.stores.require_user(player_id, "User").await?;
        let now = civil_now();
        let from = query.from.map_or(now, |from| from.max(now));
        let to = query
            .to
            .unwrap_or_else(|| now + Duration::days(self.defaults.calendar_days));

        let entries = self
            .stores
            .matches
            .calendar(player_id, from, to)
            .await?
            .into_iter()
            .map(|summary| CalendarEntry {
                match_id: summary.info.id,
                is_organizer: summary.info.is_organizer(player_id),
                confirmed_count: summary.confirmed_count,
                capacity: summary.info.capacity,
                visibility: summary.info.visibility,
                starts_at: summary.info.starts_at,
                title: summary.info.title,
                location_text: summary.info.location_text,
            })
            .collect();
        Ok(entries)
    }
}
