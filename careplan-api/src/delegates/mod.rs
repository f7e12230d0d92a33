//! Request pipelines: validate, map to a model, call the repository, map to a DTO.
mod assets;
mod user_selected_goals;

pub use assets::AssetsDelegate;
pub use user_selected_goals::UserSelectedGoalsDelegate;
