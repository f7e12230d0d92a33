//! Core data structures shared across the careplan crates.
//!
//! Asset kinds share a single record shape with a small set of kind-specific
//! attributes; user-selected goals have their own record type. Both use the
//! search types from [`search`].

#[macro_use]
mod text_enum;

pub mod asset;
pub mod asset_kind;
pub mod asset_types;
pub mod search;
pub mod user_selected_goal;

pub use asset::{
    AssetAttributes, AssetCreateModel, AssetDto, AssetRecord, AssetSearchFilters,
    AssetUpdateModel, DEFAULT_ASSET_VERSION,
};
pub use asset_kind::{AssetAttribute, AssetKind};
pub use asset_types::{BiometricsType, MeditationType, MessageType};
pub use search::{DeleteResult, SearchOptions, SearchResults, SortOrder};
pub use text_enum::UnknownVariant;
pub use user_selected_goal::{
    ProgressStatus, UserSelectedGoalCreateModel, UserSelectedGoalDto, UserSelectedGoalRecord,
    UserSelectedGoalSearchFilters, UserSelectedGoalUpdateModel,
};
