use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use super::rate_limit::RateLimiter;
use crate::constants::*;
use crate::db::{browse, cards, matches, notifications, requests, social};
use crate::error::{MeetError, MeetResult};
use crate::models::*;

/// Result of a successful accept.
#[derive(Debug, Clone)]
pub struct Accepted {
    pub request: LikeRequest,
    pub matched: Match,
}

/// Whether an upsert created the card or replaced an existing one.
#[derive(Debug, Clone)]
pub struct CardWrite {
    pub card: Card,
    pub created: bool,
}

/// The Meet workflow: cards, browsing, the request/match state machine and
/// the side channels around it.
#[derive(Debug, Clone)]
pub struct MeetService {
    pool: SqlitePool,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

fn target_id(raw: Option<&str>, actor: &str, what: &str) -> MeetResult<String> {
    match raw.map(str::trim) {
        Some(id) if !id.is_empty() && id != actor => Ok(id.to_string()),
        _ => Err(MeetError::validation(format!("Invalid {what}."))),
    }
}

/// Classifies why `actor` could not move `request` to `target`.
fn check_transition(
    request: Option<&LikeRequest>,
    actor: &str,
    target: RequestStatus,
) -> MeetResult<RequestStatus> {
    let request = request.ok_or_else(|| MeetError::not_found("Request not found."))?;
    if request.to_user_id != actor {
        return Err(MeetError::forbidden("Forbidden"));
    }
    request.status.transition(target)
}

impl MeetService {
    pub fn new(pool: SqlitePool, swipes_per_minute: u32) -> Self {
        Self {
            pool,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(swipes_per_minute))),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn enforce_swipe_limit(&self, actor: &str) -> MeetResult<()> {
        let mut limiter = self.rate_limiter.lock().await;
        if limiter.can_make_request(actor, SWIPE_ACTION) {
            Ok(())
        } else {
            info!("Swipe rate limit hit for user {}", actor);
            Err(MeetError::RateLimited(limiter.max_requests_per_window()))
        }
    }

    // Card operations

    pub async fn get_card(&self, actor: &str) -> MeetResult<Option<Card>> {
        cards::get_card(&self.pool, actor).await
    }

    pub async fn upsert_card(&self, actor: &str, payload: &CardPayload) -> MeetResult<CardWrite> {
        let new_card = payload.validate_new()?;
        let card = cards::upsert_card(&self.pool, actor, &new_card).await?;

        // A replace always moves updated_at past the original created_at.
        let created = card.created_at == card.updated_at;
        info!("Card {} for user {}", if created { "created" } else { "replaced" }, actor);
        Ok(CardWrite { card, created })
    }

    pub async fn update_card(&self, actor: &str, payload: &CardPayload) -> MeetResult<Card> {
        let patch = payload.validate_patch()?;
        cards::update_card(&self.pool, actor, &patch)
            .await?
            .ok_or_else(|| MeetError::not_found("Card not found."))
    }

    // Browse

    pub async fn browse(&self, actor: &str, city: Option<&str>, limit: Option<i64>) -> MeetResult<Vec<Card>> {
        let viewer = cards::get_card(&self.pool, actor)
            .await?
            .ok_or_else(|| MeetError::forbidden("Create a Meet card before browsing."))?;

        if !viewer.is_eligible() {
            return Err(MeetError::forbidden(
                "Your Meet card must be active, adult-confirmed and 18+ to browse.",
            ));
        }

        let city = city.map(str::trim).filter(|c| !c.is_empty());
        let limit = limit
            .unwrap_or(BROWSE_TAKE_COUNT)
            .clamp(1, BROWSE_MAX_TAKE_COUNT);

        browse::browse_candidates(&self.pool, &viewer, city, limit).await
    }

    // Request / match state machine

    pub async fn like(&self, actor: &str, to_user_id: Option<&str>) -> MeetResult<LikeRequest> {
        self.enforce_swipe_limit(actor).await?;
        let to_user_id = target_id(to_user_id, actor, "toUserId")?;

        // Write first so concurrent writers queue on the database lock.
        let mut tx = self.pool.begin().await?;
        let request = requests::upsert_like_request(&mut *tx, actor, &to_user_id).await?;

        if cards::get_card(&mut *tx, &to_user_id).await?.is_none() {
            return Err(MeetError::not_found("User not found."));
        }
        if social::is_blocked_between(&mut *tx, actor, &to_user_id).await? {
            return Err(MeetError::forbidden("You cannot like this user."));
        }

        notifications::insert_notifications(
            &mut tx,
            &[NewNotification {
                user_id: to_user_id.clone(),
                kind: NotificationKind::MeetRequestReceived,
                payload: json!({ "requestId": request.id, "fromUserId": actor }),
            }],
        )
        .await?;
        tx.commit().await?;

        info!("User {} liked {} (request {})", actor, to_user_id, request.id);
        Ok(request)
    }

    pub async fn accept(&self, request_id: Uuid, actor: &str) -> MeetResult<Accepted> {
        let mut tx = self.pool.begin().await?;

        let Some(request) =
            requests::claim_pending(&mut *tx, request_id, actor, RequestStatus::Accepted).await?
        else {
            let existing = requests::find_request(&mut *tx, request_id).await?;
            check_transition(existing.as_ref(), actor, RequestStatus::Accepted)?;
            return Err(MeetError::conflict("Request is not pending."));
        };

        let matched = matches::upsert_match(&mut tx, &request.from_user_id, &request.to_user_id).await?;

        notifications::insert_notifications(
            &mut tx,
            &[
                NewNotification {
                    user_id: request.from_user_id.clone(),
                    kind: NotificationKind::MeetRequestAccepted,
                    payload: json!({
                        "requestId": request.id,
                        "byUserId": actor,
                        "matchId": matched.id,
                    }),
                },
                NewNotification {
                    user_id: request.to_user_id.clone(),
                    kind: NotificationKind::MeetMatchCreated,
                    payload: json!({
                        "requestId": request.id,
                        "withUserId": request.from_user_id,
                        "matchId": matched.id,
                    }),
                },
            ],
        )
        .await?;
        tx.commit().await?;

        info!(
            "User {} accepted request {} from {} (match {})",
            actor, request.id, request.from_user_id, matched.id
        );
        Ok(Accepted { request, matched })
    }

    pub async fn reject(&self, request_id: Uuid, actor: &str) -> MeetResult<LikeRequest> {
        let mut tx = self.pool.begin().await?;

        let Some(request) =
            requests::claim_pending(&mut *tx, request_id, actor, RequestStatus::Rejected).await?
        else {
            let existing = requests::find_request(&mut *tx, request_id).await?;
            check_transition(existing.as_ref(), actor, RequestStatus::Rejected)?;
            return Err(MeetError::conflict("Request is not pending."));
        };

        notifications::insert_notifications(
            &mut tx,
            &[NewNotification {
                user_id: request.from_user_id.clone(),
                kind: NotificationKind::MeetRequestRejected,
                payload: json!({ "requestId": request.id, "byUserId": actor }),
            }],
        )
        .await?;
        tx.commit().await?;

        info!("User {} rejected request {} from {}", actor, request.id, request.from_user_id);
        Ok(request)
    }

    // Side channels

    pub async fn pass(&self, actor: &str, to_user_id: Option<&str>) -> MeetResult<()> {
        self.enforce_swipe_limit(actor).await?;
        let to_user_id = target_id(to_user_id, actor, "toUserId")?;

        if !social::insert_pass(&self.pool, actor, &to_user_id).await? {
            debug!("User {} already passed {}", actor, to_user_id);
        }
        Ok(())
    }

    pub async fn block(&self, actor: &str, blocked_user_id: Option<&str>) -> MeetResult<()> {
        let blocked_user_id = target_id(blocked_user_id, actor, "blocked user")?;

        if social::insert_block(&self.pool, actor, &blocked_user_id).await? {
            info!("User {} blocked {}", actor, blocked_user_id);
        } else {
            debug!("User {} already blocked {}", actor, blocked_user_id);
        }
        Ok(())
    }

    pub async fn report(&self, actor: &str, reported_user_id: Option<&str>, reason: Option<&str>) -> MeetResult<Report> {
        let reported_user_id = target_id(reported_user_id, actor, "reported user")?;

        let reason = reason.map(str::trim).unwrap_or_default();
        let reason_len = reason.chars().count();
        if !(REPORT_REASON_MIN_CHARS..=REPORT_REASON_MAX_CHARS).contains(&reason_len) {
            return Err(MeetError::validation(format!(
                "Reason must be {}-{} characters.",
                REPORT_REASON_MIN_CHARS, REPORT_REASON_MAX_CHARS
            )));
        }

        let report = social::insert_report(&self.pool, actor, &reported_user_id, reason).await?;
        info!("User {} reported {} (report {})", actor, reported_user_id, report.id);
        Ok(report)
    }

    pub async fn follow(&self, actor: &str, to_user_id: Option<&str>) -> MeetResult<()> {
        let to_user_id = target_id(to_user_id, actor, "toUserId")?;

        if !social::insert_follow(&self.pool, actor, &to_user_id).await? {
            debug!("User {} already follows {}", actor, to_user_id);
        }
        Ok(())
    }

    pub async fn unfollow(&self, actor: &str, to_user_id: &str) -> MeetResult<()> {
        social::delete_follow(&self.pool, actor, to_user_id).await?;
        Ok(())
    }

    // Inbox

    pub async fn inbox(&self, actor: &str) -> MeetResult<Inbox> {
        let (incoming, outgoing, matches, notifications) = tokio::try_join!(
            requests::list_incoming_pending(&self.pool, actor),
            requests::list_outgoing(&self.pool, actor, INBOX_OUTGOING_TAKE_COUNT),
            matches::list_matches_for_user(&self.pool, actor),
            notifications::list_notifications(&self.pool, actor, INBOX_NOTIFICATIONS_TAKE_COUNT),
        )?;

        let mut counterpart_ids: Vec<String> = incoming
            .iter()
            .map(|r| r.from_user_id.clone())
            .chain(outgoing.iter().map(|r| r.to_user_id.clone()))
            .chain(matches.iter().map(|m| m.counterpart(actor).to_string()))
            .collect();
        counterpart_ids.sort();
        counterpart_ids.dedup();

        let card_by_user = cards::get_card_summaries(&self.pool, &counterpart_ids).await?;

        Ok(Inbox {
            incoming,
            outgoing,
            matches,
            notifications,
            card_by_user,
            current_user_id: actor.to_string(),
        })
    }
}
