//! Service providers for the presentation layer
//!
//! The composition root builds one `Services` bundle and hands it to Dioxus
//! as context. Components reach services through the `use_*` hooks and never
//! see infrastructure types.

use dioxus::prelude::*;
use std::sync::Arc;

use crate::application::api::Api;
use crate::application::services::{CaseService, PromptTestingService, UsageService};
use crate::application::GameController;
use crate::infrastructure::PollConfig;
use crate::state::Platform;

/// All services wrapped for context provision
#[derive(Clone)]
pub struct Services {
    pub game: GameController,
    pub usage: Arc<UsageService>,
    pub prompt_testing: Arc<PromptTestingService>,
}

impl Services {
    pub fn new(api: Api, platform: Platform, poll: PollConfig) -> Self {
        Self {
            game: GameController::new(CaseService::new(api.clone()), platform, poll),
            usage: Arc::new(UsageService::new(api.clone())),
            prompt_testing: Arc::new(PromptTestingService::new(api)),
        }
    }
}

/// Hook to access the game controller from context
pub fn use_game_controller() -> GameController {
    use_context::<Services>().game
}

/// Hook to access the UsageService from context
pub fn use_usage_service() -> Arc<UsageService> {
    use_context::<Services>().usage
}

/// Hook to access the PromptTestingService from context
pub fn use_prompt_testing_service() -> Arc<PromptTestingService> {
    use_context::<Services>().prompt_testing
}
