use super::{ApiClient, ApiResult};
use crate::models::objective::{
    DepositResponse, NewObjective, Objective, ObjectiveMovement, ObjectivePatch,
    WithdrawalResponse,
};

const OBJECTIVES: &str = "/api/finance/objectives/";

fn objective_path(slug: &str) -> String {
    format!("{}{}/", OBJECTIVES, slug)
}

impl ApiClient {
    pub async fn objectives(&self) -> ApiResult<Vec<Objective>> {
        self.get_list(OBJECTIVES).await
    }

    pub async fn create_objective(&self, data: &NewObjective) -> ApiResult<Objective> {
        self.post(OBJECTIVES, data).await
    }

    pub async fn update_objective(&self, slug: &str, patch: &ObjectivePatch) -> ApiResult<Objective> {
        self.patch(&objective_path(slug), patch).await
    }

    pub async fn delete_objective(&self, slug: &str) -> ApiResult<()> {
        self.delete(&objective_path(slug)).await
    }

    pub async fn add_deposit(
        &self,
        slug: &str,
        movement: &ObjectiveMovement,
    ) -> ApiResult<DepositResponse> {
        self.post(&format!("{}add_deposit/", objective_path(slug)), movement)
            .await
    }

    pub async fn withdraw(
        &self,
        slug: &str,
        movement: &ObjectiveMovement,
    ) -> ApiResult<WithdrawalResponse> {
        self.post(&format!("{}withdraw/", objective_path(slug)), movement)
            .await
    }
}
