//! Group management routes: create, browse, rename, delete groups and
//! manage their members.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::group::{
    CreateGroupRequest, CreateGroupResponse, GroupDetail, GroupRole, GroupSummary,
    ListGroupsResponse, MemberResponse, PromoteMemberResponse, RemoveMemberResponse,
    RenameGroupRequest,
};
use domain::models::invite::generate_invite_token;
use domain::models::leaderboard::{LeaderboardResponse, UserStats};
use domain::models::profile::ProfileSummary;
use domain::services::banner::BannerState;
use domain::services::{
    build_leaderboard, check_leave, check_promotion, check_removal, compute_banner_state,
    rank_in_cohort,
};
use persistence::entities::GroupRoleDb;
use persistence::repositories::{
    EventRepository, GroupRepository, InviteRepository, PredictionRepository,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::routes::leaderboard::aggregate_by_profile;

/// Create a new group.
///
/// POST /api/v1/groups
///
/// The creator becomes the owner and an invite is minted up front so
/// the group is immediately shareable.
pub async fn create_group(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<CreateGroupResponse>), ApiError> {
    request.validate()?;

    let group_repo = GroupRepository::new(state.pool.clone());
    let invite_repo = InviteRepository::new(state.pool.clone());

    let name = request.name.trim();
    let group = group_repo.create_group(name, user_auth.profile_id).await?;

    let token = invite_repo.generate_unique_token(generate_invite_token).await?;
    let invite = invite_repo
        .create_invite(group.id, &token, user_auth.profile_id)
        .await?;

    info!(
        group_id = %group.id,
        group_name = %group.name,
        profile_id = %user_auth.profile_id,
        "Group created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateGroupResponse {
            id: group.id,
            name: group.name,
            created_by: group.created_by,
            created_at: group.created_at,
            member_count: 1, // Creator is the first member
            your_role: GroupRole::Owner,
            invite_token: invite.token,
        }),
    ))
}

/// List groups the current user belongs to.
///
/// GET /api/v1/groups
pub async fn list_groups(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<ListGroupsResponse>, ApiError> {
    let group_repo = GroupRepository::new(state.pool.clone());
    let prediction_repo = PredictionRepository::new(state.pool.clone());

    let groups = group_repo.find_user_groups(user_auth.profile_id).await?;

    let mut summaries = Vec::with_capacity(groups.len());
    for g in groups {
        // The member's standing inside each group drives the card UI
        let cohort = aggregate_by_profile(prediction_repo.list_group_cohort(g.id).await?);
        let your_rank = rank_in_cohort(cohort, user_auth.profile_id);

        summaries.push(GroupSummary {
            id: g.id,
            name: g.name,
            member_count: g.member_count,
            your_role: g.role.into(),
            your_rank,
            joined_at: g.joined_at,
        });
    }

    let count = summaries.len();
    Ok(Json(ListGroupsResponse {
        data: summaries,
        count,
    }))
}

/// Get group details with the member roster.
///
/// GET /api/v1/groups/:group_id
pub async fn get_group(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_id): Path<Uuid>,
) -> Result<Json<GroupDetail>, ApiError> {
    let repo = GroupRepository::new(state.pool.clone());

    let membership = repo
        .get_membership(group_id, user_auth.profile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found or you are not a member".to_string()))?;

    let group = repo
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found".to_string()))?;

    let members = repo.list_members(group_id).await?;
    let member_count = members.len() as i64;

    let member_responses: Vec<MemberResponse> = members
        .into_iter()
        .map(|m| MemberResponse {
            id: m.id,
            profile: ProfileSummary {
                id: m.profile_id,
                username: m.username,
                display_name: m.display_name,
                avatar_url: m.avatar_url,
                title: m.title,
            },
            role: m.role.into(),
            joined_at: m.joined_at,
        })
        .collect();

    Ok(Json(GroupDetail {
        id: group.id,
        name: group.name,
        created_by: group.created_by,
        created_at: group.created_at,
        member_count,
        your_role: membership.role.into(),
        members: member_responses,
    }))
}

/// Rename a group.
///
/// PATCH /api/v1/groups/:group_id
pub async fn rename_group(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_id): Path<Uuid>,
    Json(request): Json<RenameGroupRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;

    let repo = GroupRepository::new(state.pool.clone());

    let membership = repo
        .get_membership(group_id, user_auth.profile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found or you are not a member".to_string()))?;

    let role: GroupRole = membership.role.into();
    if !role.can_manage_group() {
        return Err(ApiError::Forbidden(
            "Only the group owner can rename the group".to_string(),
        ));
    }

    let rows_affected = repo.rename_group(group_id, request.name.trim()).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("Group not found".to_string()));
    }

    info!(
        group_id = %group_id,
        profile_id = %user_auth.profile_id,
        "Group renamed"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a group.
///
/// DELETE /api/v1/groups/:group_id
pub async fn delete_group(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = GroupRepository::new(state.pool.clone());

    let membership = repo
        .get_membership(group_id, user_auth.profile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found or you are not a member".to_string()))?;

    let role: GroupRole = membership.role.into();
    if !role.can_manage_group() {
        return Err(ApiError::Forbidden(
            "Only the group owner can delete the group".to_string(),
        ));
    }

    let rows_affected = repo.delete_group(group_id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("Group not found".to_string()));
    }

    info!(
        group_id = %group_id,
        profile_id = %user_auth.profile_id,
        "Group deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Group standings: every member ranked by points scored inside the
/// group's prediction scope. Members without picks rank with empty
/// stats rather than disappearing.
///
/// GET /api/v1/groups/:group_id/standings
pub async fn group_standings(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_id): Path<Uuid>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let group_repo = GroupRepository::new(state.pool.clone());
    let prediction_repo = PredictionRepository::new(state.pool.clone());

    group_repo
        .get_membership(group_id, user_auth.profile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found or you are not a member".to_string()))?;

    let members = group_repo.list_members(group_id).await?;
    let mut aggregates: std::collections::HashMap<Uuid, UserStats> =
        aggregate_by_profile(prediction_repo.list_group_cohort(group_id).await?)
            .into_iter()
            .collect();

    let cohort: Vec<(ProfileSummary, UserStats)> = members
        .into_iter()
        .map(|m| {
            let stats = aggregates.remove(&m.profile_id).unwrap_or_default();
            (
                ProfileSummary {
                    id: m.profile_id,
                    username: m.username,
                    display_name: m.display_name,
                    avatar_url: m.avatar_url,
                    title: m.title,
                },
                stats,
            )
        })
        .collect();

    let entries = build_leaderboard(cohort);
    let count = entries.len();

    Ok(Json(LeaderboardResponse {
        data: entries,
        count,
    }))
}

/// The group's event banner state.
///
/// GET /api/v1/groups/:group_id/banner
pub async fn group_banner(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_id): Path<Uuid>,
) -> Result<Json<BannerState>, ApiError> {
    let group_repo = GroupRepository::new(state.pool.clone());
    let event_repo = EventRepository::new(state.pool.clone());

    group_repo
        .get_membership(group_id, user_auth.profile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found or you are not a member".to_string()))?;

    let event = event_repo
        .next_event_for_banner()
        .await?
        .map(domain::models::Event::from);

    // Fight counts only matter while the event is live
    let (completed, total) = match &event {
        Some(e) if e.status == domain::models::EventStatus::Live => {
            let stats = event_repo.fight_stats(e.id).await?;
            (Some(stats.completed as u32), Some(stats.total as u32))
        }
        _ => (None, None),
    };

    let banner = compute_banner_state(event.as_ref(), completed, total, chrono::Utc::now());
    Ok(Json(banner))
}

/// Promote a member to owner.
///
/// POST /api/v1/groups/:group_id/members/:profile_id/promote
pub async fn promote_member(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((group_id, target_profile_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<PromoteMemberResponse>, ApiError> {
    let repo = GroupRepository::new(state.pool.clone());

    let actor = repo
        .get_membership(group_id, user_auth.profile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found or you are not a member".to_string()))?;

    let target = repo.get_membership(group_id, target_profile_id).await?;

    check_promotion(actor.role.into(), target.map(|t| t.role.into()))?;

    repo.update_member_role(group_id, target_profile_id, GroupRoleDb::Owner)
        .await?;

    info!(
        group_id = %group_id,
        actor_profile_id = %user_auth.profile_id,
        promoted_profile_id = %target_profile_id,
        "Member promoted to owner"
    );

    Ok(Json(PromoteMemberResponse {
        group_id,
        profile_id: target_profile_id,
        role: GroupRole::Owner,
    }))
}

/// Remove a member from a group, or leave it.
///
/// DELETE /api/v1/groups/:group_id/members/:profile_id
///
/// Removing yourself is leaving; owners can neither leave nor be
/// removed while they hold the owner role.
pub async fn remove_member(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((group_id, target_profile_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<RemoveMemberResponse>, ApiError> {
    let repo = GroupRepository::new(state.pool.clone());

    let actor = repo
        .get_membership(group_id, user_auth.profile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found or you are not a member".to_string()))?;

    let is_self_removal = user_auth.profile_id == target_profile_id;

    if is_self_removal {
        check_leave(actor.role.into())?;
    } else {
        let target = repo
            .get_membership(group_id, target_profile_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Member not found".to_string()))?;

        check_removal(actor.role.into(), target.role.into())?;
    }

    let rows_affected = repo.remove_member(group_id, target_profile_id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("Member not found".to_string()));
    }

    info!(
        group_id = %group_id,
        actor_profile_id = %user_auth.profile_id,
        removed_profile_id = %target_profile_id,
        is_self_removal = is_self_removal,
        "Member removed from group"
    );

    Ok(Json(RemoveMemberResponse {
        removed: true,
        profile_id: target_profile_id,
        group_id,
    }))
}
