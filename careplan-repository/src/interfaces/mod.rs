//! This module defines and re-exports the repository interfaces.
//! Each trait abstracts the data store for one family of entities.
mod assets;
mod user_selected_goals;

pub use assets::AssetRepository;
pub use user_selected_goals::UserSelectedGoalRepository;
