//! Invite routes: share a group invite and join via token.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use domain::models::invite::{
    generate_invite_token, GroupInvite, InviteResponse, JoinGroupInfo, JoinGroupResponse,
    RedeemInviteRequest,
};
use domain::services::{check_redemption, RedemptionError};
use persistence::entities::GroupRoleDb;
use persistence::repositories::{GroupRepository, InviteRepository};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_invite_redeemed;

/// Get the group's shareable invite, minting one if none is active.
///
/// GET /api/v1/groups/:group_id/invite
///
/// Any member can share the invite.
pub async fn get_invite(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_id): Path<Uuid>,
) -> Result<Json<InviteResponse>, ApiError> {
    let group_repo = GroupRepository::new(state.pool.clone());
    let invite_repo = InviteRepository::new(state.pool.clone());

    group_repo
        .get_membership(group_id, user_auth.profile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found or you are not a member".to_string()))?;

    let invite = match invite_repo.find_active_for_group(group_id).await? {
        Some(existing) => existing,
        None => {
            let token = invite_repo
                .generate_unique_token(generate_invite_token)
                .await?;
            let created = invite_repo
                .create_invite(group_id, &token, user_auth.profile_id)
                .await?;
            info!(
                group_id = %group_id,
                invite_id = %created.id,
                profile_id = %user_auth.profile_id,
                "Invite created"
            );
            created
        }
    };

    Ok(Json(InviteResponse {
        id: invite.id,
        group_id: invite.group_id,
        token: invite.token,
        expires_at: invite.expires_at,
        max_uses: invite.max_uses,
        use_count: invite.use_count,
        created_at: invite.created_at,
    }))
}

/// Join a group using an invite token.
///
/// POST /api/v1/invites/redeem
///
/// Every rejection is a distinct typed outcome; none of them consume a
/// use of the invite.
pub async fn redeem_invite(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<RedeemInviteRequest>,
) -> Result<Json<JoinGroupResponse>, ApiError> {
    request.validate()?;

    let group_repo = GroupRepository::new(state.pool.clone());
    let invite_repo = InviteRepository::new(state.pool.clone());

    let invite: GroupInvite = invite_repo
        .find_by_token(&request.token)
        .await?
        .ok_or(RedemptionError::InvalidOrExpired)?
        .into();

    let member_count = group_repo.count_members(invite.group_id).await?;
    let already_member = group_repo
        .get_membership(invite.group_id, user_auth.profile_id)
        .await?
        .is_some();

    check_redemption(&invite, member_count, already_member, Utc::now())?;

    let group = group_repo
        .find_by_id(invite.group_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found".to_string()))?;

    let membership = match group_repo
        .insert_member(invite.group_id, user_auth.profile_id, GroupRoleDb::Member)
        .await
    {
        Ok(membership) => membership,
        // A concurrent redemption by the same user can win the insert;
        // surface it the same way as the pre-check
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
            return Err(RedemptionError::AlreadyMember.into());
        }
        Err(e) => return Err(e.into()),
    };

    // Bump the use count after the membership lands. The SQL guard
    // re-checks the cap, so a racing join at the boundary can slightly
    // overshoot membership but never the counter.
    let bumped = invite_repo.increment_use_count(invite.id).await?;
    if bumped == 0 {
        warn!(
            invite_id = %invite.id,
            group_id = %invite.group_id,
            "Invite use count not incremented (cap reached concurrently)"
        );
    }

    record_invite_redeemed();
    info!(
        group_id = %invite.group_id,
        invite_id = %invite.id,
        profile_id = %user_auth.profile_id,
        "Joined group via invite"
    );

    Ok(Json(JoinGroupResponse {
        group: JoinGroupInfo {
            id: group.id,
            name: group.name,
            member_count: member_count + 1,
        },
        role: membership.role.into(),
        joined_at: membership.joined_at,
    }))
}
