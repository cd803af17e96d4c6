//! Domain API functions
//!
//! One typed call per backend endpoint. Nothing here retries, caches or
//! paginates; each call resolves with typed data or fails with the client's
//! normalized error.

pub mod types;

use crate::client::ApiClient;
use crate::constants::api::{
    CLIENTS, COACHES, GYMS, PORTFOLIO, RECOMMENDATIONS, REVIEWS, TRAINING_PLANS,
};
use crate::error::Result;
use std::future::Future;
pub use types::*;

/// The recommendation endpoint, as the discovery workflow sees it
pub trait RecommendationApi: Send + Sync {
    fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> impl Future<Output = Result<Vec<RecommendedCoach>>> + Send;
}

impl RecommendationApi for ApiClient {
    async fn recommend(&self, request: &RecommendationRequest) -> Result<Vec<RecommendedCoach>> {
        self.recommend_coaches(request).await
    }
}

impl ApiClient {
    /// POST /api/Recommendations
    pub async fn recommend_coaches(
        &self,
        payload: &RecommendationRequest,
    ) -> Result<Vec<RecommendedCoach>> {
        self.post_json(RECOMMENDATIONS, payload).await
    }

    /// GET /api/Coaches
    pub async fn get_coaches(&self) -> Result<Vec<CoachSummary>> {
        self.get_json(COACHES).await
    }

    /// GET /api/Gyms
    pub async fn get_gyms(&self) -> Result<Vec<GymSummary>> {
        self.get_json(GYMS).await
    }

    /// GET /api/Clients
    pub async fn get_clients(&self) -> Result<Vec<ClientSummary>> {
        self.get_json(CLIENTS).await
    }

    /// GET /api/Portfolio/coach/{id}
    pub async fn get_portfolio_for_coach(&self, coach_id: i64) -> Result<Vec<PortfolioPost>> {
        self.get_json(&format!("{}/coach/{}", PORTFOLIO, coach_id)).await
    }

    /// POST /api/Portfolio
    pub async fn create_portfolio_post(&self, payload: &CreatePortfolioPost) -> Result<PortfolioPost> {
        self.post_json(PORTFOLIO, payload).await
    }

    /// GET /api/TrainingPlans/coach/{id}
    pub async fn get_training_plans_for_coach(&self, coach_id: i64) -> Result<Vec<TrainingPlan>> {
        self.get_json(&format!("{}/coach/{}", TRAINING_PLANS, coach_id)).await
    }

    /// POST /api/TrainingPlans
    pub async fn create_training_plan(&self, payload: &CreateTrainingPlan) -> Result<TrainingPlan> {
        self.post_json(TRAINING_PLANS, payload).await
    }

    /// GET /api/Reviews/coach/{id}
    pub async fn get_reviews_for_coach(&self, coach_id: i64) -> Result<Vec<Review>> {
        self.get_json(&format!("{}/coach/{}", REVIEWS, coach_id)).await
    }

    /// POST /api/Reviews
    pub async fn create_review(&self, payload: &CreateReview) -> Result<Review> {
        self.post_json(REVIEWS, payload).await
    }
}
