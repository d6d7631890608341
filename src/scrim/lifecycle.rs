use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{request_queries, scrim_queries, team_queries};
use crate::models::scrim::{
    MatchGame, MyScrimsResponse, NewScrim, OpenScrim, ProposeScrimRequest, Scrim, ScrimStatus,
    SearchFilters,
};
use crate::models::scrim_request::{ScrimRequest, ScrimRequestStatus};
use crate::models::team::TeamMembership;
use crate::scrim::error::ScrimError;
use crate::scrim::{recurring, search, validation::ScrimValidator};
use crate::services::calendar::{CalendarService, NewCalendarEvent};

const COMPLETED_VIEW_LIMIT: i64 = 10;
const UPCOMING_VIEW_LIMIT: i64 = 5;
const DEFAULT_SCRIM_DURATION_HOURS: i64 = 2;

/// Owns the scrim state machine: proposal, matching, confirmation,
/// completion and cancellation. Holds no state of its own beyond the
/// injected collaborators; every operation round-trips the store.
#[derive(Clone)]
pub struct ScrimLifecycleService {
    pool: PgPool,
    calendar: CalendarService,
    validator: ScrimValidator,
}

impl ScrimLifecycleService {
    pub fn new(pool: PgPool) -> Self {
        let calendar = CalendarService::new(pool.clone());
        Self {
            pool,
            calendar,
            validator: ScrimValidator::new(),
        }
    }

    /// Create one scrim, or a recurring group of independent sibling scrims,
    /// each paired with the system self-request that marks it open for
    /// matching. Scrims and self-requests commit atomically; companion
    /// calendar events are created best-effort afterwards.
    pub async fn propose(
        &self,
        user_id: Uuid,
        team: &TeamMembership,
        request: ProposeScrimRequest,
    ) -> Result<Vec<Scrim>, ScrimError> {
        let now = Utc::now();
        self.validator.validate_proposal(&request, now)?;

        let dates = if request.is_recurring {
            let dates = recurring::expand_occurrences(
                request.scheduled_date,
                &request.recurring_weekdays,
                request.recurring_end_date,
            );
            if dates.is_empty() {
                return Err(ScrimError::Validation(
                    "No occurrences fall inside the recurrence window".into(),
                ));
            }
            dates
        } else {
            vec![request.scheduled_date]
        };

        let recurring_group_id = if request.is_recurring {
            Some(Uuid::new_v4())
        } else {
            None
        };

        let new_scrims: Vec<NewScrim> = dates
            .into_iter()
            .map(|date| NewScrim {
                id: Uuid::new_v4(),
                team_id: team.team_id,
                created_by: user_id,
                scheduled_date: date,
                scheduled_time: request.scheduled_time,
                format: request.format,
                region: request.region.clone(),
                game: request.game.clone(),
                opponent_name: request.opponent_name.clone(),
                opponent_level: request.opponent_level,
                notes: request.notes.clone(),
                recurring_group_id,
            })
            .collect();

        let mut tx = self.pool.begin().await?;
        let scrims = scrim_queries::create_scrims(&mut tx, &new_scrims).await?;
        request_queries::create_self_requests(&mut tx, &scrims).await?;
        tx.commit().await?;

        tracing::info!(
            "Proposed {} scrim(s) for team {} ({})",
            scrims.len(),
            team.team_name,
            team.team_id
        );

        for scrim in &scrims {
            self.sync_proposal_event(team, scrim).await;
        }

        Ok(scrims)
    }

    /// The discovery surface: every team's open scrims from today onward,
    /// the caller's own included and tagged as such.
    pub async fn search(
        &self,
        own_team: Option<Uuid>,
        filters: &SearchFilters,
    ) -> Result<Vec<OpenScrim>, ScrimError> {
        let now = Utc::now();
        let open = scrim_queries::list_open_scrims(&self.pool, now.date_naive()).await?;
        Ok(search::apply_filters(open, filters, own_team, now))
    }

    pub async fn get_scrim(&self, scrim_id: Uuid) -> Result<Scrim, ScrimError> {
        scrim_queries::get_scrim(&self.pool, scrim_id)
            .await?
            .ok_or(ScrimError::NotFound("Scrim"))
    }

    /// Express interest in another team's open scrim.
    pub async fn request_scrim(
        &self,
        team: &TeamMembership,
        scrim_id: Uuid,
        message: Option<&str>,
    ) -> Result<ScrimRequest, ScrimError> {
        let scrim = self.get_scrim(scrim_id).await?;

        ensure_not_self_request(scrim.team_id, team.team_id)?;

        if scrim.status != ScrimStatus::Pending {
            return Err(ScrimError::Validation(
                "This scrim is no longer open for requests".into(),
            ));
        }

        let request = request_queries::insert_request(
            &self.pool,
            scrim.id,
            team.team_id,
            scrim.team_id,
            message,
        )
        .await
        .map_err(ScrimError::from_request_insert)?;

        tracing::info!(
            "Team {} requested scrim {} hosted by team {}",
            team.team_id,
            scrim.id,
            scrim.team_id
        );

        Ok(request)
    }

    /// Host accepts a request: the scrim turns confirmed with the requester
    /// recorded as opponent, and the request turns accepted — both writes in
    /// one transaction, both conditional on still being pending. A lost race
    /// on either side rolls everything back as AlreadyHandled.
    pub async fn accept_request(
        &self,
        team: &TeamMembership,
        request_id: Uuid,
    ) -> Result<(), ScrimError> {
        let request = request_queries::get_request(&self.pool, request_id)
            .await?
            .ok_or(ScrimError::NotFound("Request"))?;

        if request.host_team_id != team.team_id {
            return Err(ScrimError::Forbidden(
                "Only the host team can accept a scrim request".into(),
            ));
        }

        if request.is_self_request() {
            return Err(ScrimError::Validation(
                "The proposal's own open-for-matching request cannot be accepted".into(),
            ));
        }

        if request.status != ScrimRequestStatus::Pending {
            return Err(ScrimError::AlreadyHandled);
        }

        let opponent_name = team_queries::get_team_name(&self.pool, request.requesting_team_id)
            .await?
            .ok_or(ScrimError::NotFound("Requesting team"))?;

        let mut tx = self.pool.begin().await?;

        let scrim_rows = scrim_queries::confirm_scrim_if_pending(
            &mut tx,
            request.scrim_id,
            request.requesting_team_id,
            &opponent_name,
        )
        .await?;
        if scrim_rows == 0 {
            tx.rollback().await?;
            return Err(ScrimError::AlreadyHandled);
        }

        let request_rows =
            request_queries::set_status_if_pending(&mut tx, request.id, ScrimRequestStatus::Accepted)
                .await?;
        if request_rows == 0 {
            tx.rollback().await?;
            return Err(ScrimError::AlreadyHandled);
        }

        tx.commit().await?;

        tracing::info!(
            "Scrim {} confirmed: host team {} vs {}",
            request.scrim_id,
            team.team_id,
            opponent_name
        );

        self.sync_confirmation_events(&request, &opponent_name).await;

        Ok(())
    }

    /// Reject a request — by the host team, or by the requesting team
    /// withdrawing its own interest. The scrim itself is untouched.
    pub async fn reject_request(
        &self,
        team: &TeamMembership,
        request_id: Uuid,
    ) -> Result<(), ScrimError> {
        let request = request_queries::get_request(&self.pool, request_id)
            .await?
            .ok_or(ScrimError::NotFound("Request"))?;

        if request.host_team_id != team.team_id && request.requesting_team_id != team.team_id {
            return Err(ScrimError::Forbidden(
                "Only the host team or the requesting team can reject this request".into(),
            ));
        }

        if request.status != ScrimRequestStatus::Pending {
            return Err(ScrimError::AlreadyHandled);
        }

        let mut tx = self.pool.begin().await?;
        let rows =
            request_queries::set_status_if_pending(&mut tx, request.id, ScrimRequestStatus::Rejected)
                .await?;
        if rows == 0 {
            tx.rollback().await?;
            return Err(ScrimError::AlreadyHandled);
        }
        tx.commit().await?;

        tracing::info!("Request {} rejected by team {}", request.id, team.team_id);

        Ok(())
    }

    /// Cancel a scrim that has not been played. Outstanding pending
    /// requests are auto-rejected in the same transaction so nothing keeps
    /// pointing at a dead scrim.
    pub async fn cancel_scrim(
        &self,
        team: &TeamMembership,
        scrim_id: Uuid,
    ) -> Result<(), ScrimError> {
        let scrim = self.get_scrim(scrim_id).await?;

        if scrim.team_id != team.team_id {
            return Err(ScrimError::Forbidden(
                "Only the host team can cancel this scrim".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        let rows = scrim_queries::cancel_scrim_if_open(&mut tx, scrim.id).await?;
        if rows == 0 {
            tx.rollback().await?;
            return Err(ScrimError::AlreadyHandled);
        }
        let rejected = request_queries::reject_pending_for_scrim(&mut tx, scrim.id).await?;
        tx.commit().await?;

        tracing::info!(
            "Scrim {} cancelled by team {}, {} pending request(s) auto-rejected",
            scrim.id,
            team.team_id,
            rejected
        );

        if let Some(event_id) = scrim.event_id {
            if let Err(e) = self
                .calendar
                .update_event(event_id, Some("Scrim cancelled"), None)
                .await
            {
                tracing::warn!("Failed to update calendar event for cancelled scrim: {}", e);
            }
        }

        Ok(())
    }

    /// Record the result of a confirmed scrim. Either side of the match may
    /// report it.
    pub async fn complete_scrim(
        &self,
        team: &TeamMembership,
        scrim_id: Uuid,
        raw_score: &str,
        matches: &[MatchGame],
    ) -> Result<Scrim, ScrimError> {
        let score = self.validator.validate_final_score(raw_score)?;
        let scrim = self.get_scrim(scrim_id).await?;

        let is_host = scrim.team_id == team.team_id;
        let is_opponent = scrim.opponent_team_id == Some(team.team_id);
        if !is_host && !is_opponent {
            return Err(ScrimError::Forbidden(
                "Only the two matched teams can report this scrim's result".into(),
            ));
        }

        let rows =
            scrim_queries::complete_scrim_if_confirmed(&self.pool, scrim.id, score, matches).await?;
        if rows == 0 {
            return Err(ScrimError::AlreadyHandled);
        }

        tracing::info!(
            "Scrim {} completed with score {} reported by team {}",
            scrim.id,
            score,
            team.team_id
        );

        if let Some(event_id) = scrim.event_id {
            let summary = format!("Scrim played, final score {}", score);
            if let Err(e) = self.calendar.update_event(event_id, None, Some(&summary)).await {
                tracing::warn!("Failed to update calendar event for completed scrim: {}", e);
            }
        }

        self.get_scrim(scrim_id).await
    }

    /// The four dashboard views of the team manager screen.
    pub async fn my_scrims(&self, team_id: Uuid) -> Result<MyScrimsResponse, ScrimError> {
        let today = Utc::now().date_naive();
        let proposed = scrim_queries::list_proposed(&self.pool, team_id).await?;
        let received_requests = request_queries::list_received(&self.pool, team_id).await?;
        let completed =
            scrim_queries::list_completed(&self.pool, team_id, COMPLETED_VIEW_LIMIT).await?;
        let upcoming =
            scrim_queries::list_upcoming(&self.pool, team_id, today, UPCOMING_VIEW_LIMIT).await?;

        Ok(MyScrimsResponse {
            proposed,
            received_requests,
            completed,
            upcoming,
        })
    }

    /// Best-effort companion calendar event for a fresh proposal.
    async fn sync_proposal_event(&self, team: &TeamMembership, scrim: &Scrim) {
        let start = scrim.scheduled_datetime();
        let event = NewCalendarEvent {
            team_id: team.team_id,
            title: format!(
                "Scrim vs {}",
                scrim.opponent_name.as_deref().unwrap_or("TBD")
            ),
            start,
            end: start + Duration::hours(DEFAULT_SCRIM_DURATION_HOURS),
            description: scrim.notes.clone(),
            location: Some(scrim.region.clone()),
        };

        match self.calendar.create_event(event).await {
            Ok(event_id) => {
                if let Err(e) = scrim_queries::set_event_id(&self.pool, scrim.id, event_id).await {
                    tracing::warn!("Failed to link calendar event to scrim {}: {}", scrim.id, e);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to create calendar event for scrim {}: {}", scrim.id, e);
            }
        }
    }

    /// Best-effort calendar sync after a confirmation: retitle the host
    /// event and give the requesting team an event of its own.
    async fn sync_confirmation_events(&self, request: &ScrimRequest, opponent_name: &str) {
        let scrim = match scrim_queries::get_scrim(&self.pool, request.scrim_id).await {
            Ok(Some(scrim)) => scrim,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!("Calendar sync skipped, scrim fetch failed: {}", e);
                return;
            }
        };

        if let Some(event_id) = scrim.event_id {
            let title = format!("Scrim vs {} (confirmed)", opponent_name);
            if let Err(e) = self.calendar.update_event(event_id, Some(&title), None).await {
                tracing::warn!("Failed to update host calendar event: {}", e);
            }
        }

        let start = scrim.scheduled_datetime();
        let host_name = team_queries::get_team_name(&self.pool, scrim.team_id)
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| "opponent".to_string());
        let event = NewCalendarEvent {
            team_id: request.requesting_team_id,
            title: format!("Scrim vs {} (confirmed)", host_name),
            start,
            end: start + Duration::hours(DEFAULT_SCRIM_DURATION_HOURS),
            description: None,
            location: Some(scrim.region.clone()),
        };
        if let Err(e) = self.calendar.create_event(event).await {
            tracing::warn!("Failed to create calendar event for requesting team: {}", e);
        }
    }
}

/// Pure ownership guard used by request_scrim; exposed for tests.
pub fn ensure_not_self_request(scrim_team: Uuid, requesting_team: Uuid) -> Result<(), ScrimError> {
    if scrim_team == requesting_team {
        Err(ScrimError::SelfRequest)
    } else {
        Ok(())
    }
}
