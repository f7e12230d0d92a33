//! # Careplan Shared
//!
//! This crate defines the domain types shared by the careplan repository and API
//! crates: asset kinds and their enumerations, create/update models, stored
//! records, response DTOs, and the search filter and result types.

pub mod types;

pub use types::{
    AssetAttribute, AssetAttributes, AssetCreateModel, AssetDto, AssetKind, AssetRecord,
    AssetSearchFilters, AssetUpdateModel, BiometricsType, DeleteResult, MeditationType,
    MessageType, ProgressStatus, SearchOptions, SearchResults, SortOrder, UnknownVariant,
    UserSelectedGoalCreateModel, UserSelectedGoalDto, UserSelectedGoalRecord,
    UserSelectedGoalSearchFilters, UserSelectedGoalUpdateModel, DEFAULT_ASSET_VERSION,
};
