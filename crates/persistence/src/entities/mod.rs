//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod event;
pub mod fight;
pub mod fighter;
pub mod group;
pub mod invite;
pub mod prediction;
pub mod profile;

pub use event::{EventEntity, EventStatusDb, EventWithFightCountEntity};
pub use fight::{FightEntity, FightStatusDb, FightWithFightersEntity};
pub use fighter::FighterEntity;
pub use group::{
    GroupEntity, GroupMemberEntity, GroupRoleDb, MemberWithProfileEntity, UserGroupEntity,
};
pub use invite::GroupInviteEntity;
pub use prediction::PredictionEntity;
pub use profile::ProfileEntity;
