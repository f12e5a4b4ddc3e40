use std::ops::Deref;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{expire_on_unauthorized, report, use_auth, AuthHandle};
use crate::api::{ApiClient, ApiResult};
use crate::error::ApiError;
use crate::logic::objectives::ObjectiveOverview;
use crate::models::objective::{NewObjective, ObjectiveMovement, ObjectivePatch};
use crate::state::objectives::{ObjectivesAction, ObjectivesState};

#[derive(Clone, PartialEq)]
pub struct ObjectivesData {
    state: UseReducerHandle<ObjectivesState>,
    client: ApiClient,
    auth: Option<AuthHandle>,
}

impl Deref for ObjectivesData {
    type Target = ObjectivesState;

    fn deref(&self) -> &ObjectivesState {
        &self.state
    }
}

impl ObjectivesData {
    fn checked(&self, err: ApiError) -> ApiError {
        expire_on_unauthorized(self.auth.as_ref(), err)
    }

    pub fn reload(&self) {
        let this = self.clone();
        self.state.dispatch(ObjectivesAction::Loading);
        spawn_local(async move {
            match this.client.objectives().await {
                Ok(objectives) => this.state.dispatch(ObjectivesAction::Loaded(objectives)),
                Err(err) => {
                    let message = report(this.auth.as_ref(), "Could not load objectives", &err);
                    this.state.dispatch(ObjectivesAction::Failed(message));
                }
            }
        });
    }

    pub fn clear_error(&self) {
        self.state.dispatch(ObjectivesAction::ClearError);
    }

    pub fn overview(&self) -> ObjectiveOverview {
        ObjectiveOverview::compute(&self.state.objectives)
    }

    pub async fn create(&self, data: NewObjective) -> ApiResult<()> {
        let objective = self
            .client
            .create_objective(&data)
            .await
            .map_err(|err| self.checked(err))?;
        self.state.dispatch(ObjectivesAction::Added(objective));
        Ok(())
    }

    pub async fn update(&self, slug: &str, patch: ObjectivePatch) -> ApiResult<()> {
        let objective = self
            .client
            .update_objective(slug, &patch)
            .await
            .map_err(|err| self.checked(err))?;
        self.state.dispatch(ObjectivesAction::Replaced(objective));
        Ok(())
    }

    pub async fn delete(&self, slug: &str) -> ApiResult<()> {
        self
            .client
            .delete_objective(slug)
            .await
            .map_err(|err| self.checked(err))?;
        self.state
            .dispatch(ObjectivesAction::Removed(slug.to_string()));
        Ok(())
    }

    pub async fn deposit(&self, slug: &str, movement: ObjectiveMovement) -> ApiResult<()> {
        let response = self
            .client
            .add_deposit(slug, &movement)
            .await
            .map_err(|err| self.checked(err))?;
        log::info!("deposit {} on {}", response.deposit.amount, slug);
        self.state
            .dispatch(ObjectivesAction::Replaced(response.objective));
        Ok(())
    }

    pub async fn withdraw(&self, slug: &str, movement: ObjectiveMovement) -> ApiResult<()> {
        let response = self
            .client
            .withdraw(slug, &movement)
            .await
            .map_err(|err| self.checked(err))?;
        log::info!("withdrawal {} from {}", response.withdrawal.amount, slug);
        self.state
            .dispatch(ObjectivesAction::Replaced(response.objective));
        Ok(())
    }
}

#[hook]
pub fn use_objectives() -> ObjectivesData {
    let state = use_reducer(|| ObjectivesState {
        loading: true,
        ..ObjectivesState::default()
    });
    let auth = use_auth();
    let data = ObjectivesData {
        state,
        client: ApiClient::default(),
        auth,
    };

    {
        let data = data.clone();
        use_effect_with_deps(
            move |_| {
                data.reload();
                || ()
            },
            (),
        );
    }

    data
}
