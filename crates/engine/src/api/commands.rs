//! Sheet request dispatch.
//!
//! Converts raw request ids, runs the matching use case, and maps the result
//! onto a `ResponseResult`. Internal failures are logged in full and reported
//! to the UI with a generic message.

use serde::Serialize;
use sheetmark_domain::{ActorId, ItemId, SortUpdate, SpellSlotId, Uses};
use sheetmark_shared::{DropPayload, ErrorCode, ResponseResult, SheetRequest};

use crate::app::App;
use crate::favorites::ReorderOutcome;
use crate::use_cases::FavoriteError;

/// Response data for a reorder request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReorderResponse {
    Updated { updates: Vec<SortUpdate> },
    Ignored { reason: String },
}

impl From<ReorderOutcome> for ReorderResponse {
    fn from(outcome: ReorderOutcome) -> Self {
        match outcome {
            ReorderOutcome::Updates(updates) => Self::Updated { updates },
            ReorderOutcome::NoOp(reason) => Self::Ignored {
                reason: reason.to_string(),
            },
        }
    }
}

/// Handle one sheet request.
pub async fn handle_request(app: &App, request: SheetRequest) -> ResponseResult {
    match request {
        SheetRequest::GetFavorites { actor_id } => {
            let actor_id = match parse_actor_id(&actor_id) {
                Ok(id) => id,
                Err(e) => return e,
            };
            match app.favorites.build_view.execute(actor_id).await {
                Ok(Some(view)) => ResponseResult::success(view),
                Ok(None) => ResponseResult::success_empty(),
                Err(e) => error_response(&e, "build favorites"),
            }
        }
        SheetRequest::ToggleFavorite { actor_id, item_id } => {
            let (actor_id, item_id) = match parse_ids(&actor_id, &item_id) {
                Ok(ids) => ids,
                Err(e) => return e,
            };
            match app.favorites.toggle_favorite.execute(actor_id, item_id).await {
                Ok(is_favorite) => {
                    ResponseResult::success(serde_json::json!({ "isFavorite": is_favorite }))
                }
                Err(e) => error_response(&e, "toggle favorite"),
            }
        }
        SheetRequest::ReorderFavorite {
            actor_id,
            drop_data,
            target_item_id,
        } => {
            let owner = match parse_actor_id(&actor_id) {
                Ok(id) => id,
                Err(e) => return e,
            };
            let intent = match DropPayload::parse(&drop_data)
                .and_then(|payload| payload.into_intent(&target_item_id))
            {
                Ok(intent) => intent,
                Err(e) => {
                    tracing::debug!(actor_id = %owner, error = %e, "Ignoring unreadable drop data");
                    return ResponseResult::success(ReorderResponse::Ignored {
                        reason: "unreadable drop data".to_string(),
                    });
                }
            };
            match app.favorites.reorder.execute(owner, intent).await {
                Ok(outcome) => ResponseResult::success(ReorderResponse::from(outcome)),
                Err(e) => error_response(&e, "reorder favorites"),
            }
        }
        SheetRequest::ToggleItemActive { actor_id, item_id } => {
            let (actor_id, item_id) = match parse_ids(&actor_id, &item_id) {
                Ok(ids) => ids,
                Err(e) => return e,
            };
            match app.favorites.toggle_active.execute(actor_id, item_id).await {
                Ok(state) => ResponseResult::success(state),
                Err(e) => error_response(&e, "toggle item"),
            }
        }
        SheetRequest::ToggleAttunement { actor_id, item_id } => {
            let (actor_id, item_id) = match parse_ids(&actor_id, &item_id) {
                Ok(ids) => ids,
                Err(e) => return e,
            };
            match app.favorites.toggle_attunement.execute(actor_id, item_id).await {
                Ok(attunement) => ResponseResult::success(attunement),
                Err(e) => error_response(&e, "toggle attunement"),
            }
        }
        SheetRequest::AddItemCharges { actor_id, item_id } => {
            let (actor_id, item_id) = match parse_ids(&actor_id, &item_id) {
                Ok(ids) => ids,
                Err(e) => return e,
            };
            match app.favorites.add_charges.execute(actor_id, item_id).await {
                Ok(uses) => ResponseResult::success(uses),
                Err(e) => error_response(&e, "add item charges"),
            }
        }
        SheetRequest::SetItemUses {
            actor_id,
            item_id,
            value,
            max,
        } => {
            let (actor_id, item_id) = match parse_ids(&actor_id, &item_id) {
                Ok(ids) => ids,
                Err(e) => return e,
            };
            match app
                .favorites
                .set_uses
                .execute(actor_id, item_id, Uses::new(value, max))
                .await
            {
                Ok(uses) => ResponseResult::success(uses),
                Err(e) => error_response(&e, "set item uses"),
            }
        }
        SheetRequest::SetSpellSlot {
            actor_id,
            slot,
            field,
            value,
        } => {
            let actor_id = match parse_actor_id(&actor_id) {
                Ok(id) => id,
                Err(e) => return e,
            };
            let slot = match slot.parse::<SpellSlotId>() {
                Ok(slot) => slot,
                Err(e) => return ResponseResult::error(ErrorCode::BadRequest, e.to_string()),
            };
            match app
                .favorites
                .set_spell_slot
                .execute(actor_id, slot, field, value)
                .await
            {
                Ok(counter) => ResponseResult::success(counter),
                Err(e) => error_response(&e, "set spell slot"),
            }
        }
    }
}

fn parse_actor_id(raw: &str) -> Result<ActorId, ResponseResult> {
    ActorId::new(raw).map_err(|e| ResponseResult::error(ErrorCode::BadRequest, e.to_string()))
}

fn parse_ids(actor_id: &str, item_id: &str) -> Result<(ActorId, ItemId), ResponseResult> {
    let actor_id = parse_actor_id(actor_id)?;
    let item_id = ItemId::new(item_id)
        .map_err(|e| ResponseResult::error(ErrorCode::BadRequest, e.to_string()))?;
    Ok((actor_id, item_id))
}

/// Map a use case error onto a response. Store failures are logged and
/// replaced with a generic message.
fn error_response(error: &FavoriteError, operation: &str) -> ResponseResult {
    let code = match error {
        FavoriteError::ActorNotFound(_) | FavoriteError::ItemNotFound(_) => ErrorCode::NotFound,
        FavoriteError::NotFavoritable(_)
        | FavoriteError::AlwaysPrepared(_)
        | FavoriteError::Domain(_) => ErrorCode::BadRequest,
        FavoriteError::AttunementLimit { .. } => ErrorCode::Conflict,
        FavoriteError::ReadOnly => ErrorCode::Forbidden,
        FavoriteError::Repo(e) => {
            tracing::error!(error = %e, operation, "Item store error");
            return ResponseResult::error(
                ErrorCode::InternalError,
                format!("Failed to {} - please try again", operation),
            );
        }
    };
    ResponseResult::error(code, error.to_string())
}
