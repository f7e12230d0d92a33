// App state for Axum server
use std::sync::Arc;

use careplan_repository::{AssetRepository, UserSelectedGoalRepository};

use crate::delegates::{AssetsDelegate, UserSelectedGoalsDelegate};

#[derive(Clone)]
pub struct AppState {
    pub assets: AssetsDelegate,
    pub user_selected_goals: UserSelectedGoalsDelegate,
}

impl AppState {
    pub fn new(
        asset_repository: Arc<dyn AssetRepository>,
        goal_repository: Arc<dyn UserSelectedGoalRepository>,
    ) -> Self {
        Self {
            assets: AssetsDelegate::new(asset_repository),
            user_selected_goals: UserSelectedGoalsDelegate::new(goal_repository),
        }
    }
}
