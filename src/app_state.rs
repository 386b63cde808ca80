use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    providers::ProviderGateway,
    repositories::{MongoUserRepository, UserRepository},
    services::{analysis_service::AnalysisService, user_service::UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub analysis_service: Arc<AnalysisService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db, &config.users_collection));
        user_repository.ensure_indexes().await?;
        let user_service = Arc::new(UserService::new(user_repository));

        let gateway = Arc::new(ProviderGateway::new(config.providers.clone()));
        let analysis_service = Arc::new(AnalysisService::new(gateway));

        Ok(Self {
            user_service,
            analysis_service,
            db,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
