use std::rc::Rc;

use yew::Reducible;

use super::replace_first;
use crate::models::objective::Objective;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectivesState {
    pub loading: bool,
    pub error: Option<String>,
    pub objectives: Vec<Objective>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectivesAction {
    Loading,
    Loaded(Vec<Objective>),
    Failed(String),
    Added(Objective),
    /// Server copy after an edit, deposit or withdrawal.
    Replaced(Objective),
    Removed(String),
    ClearError,
}

impl Reducible for ObjectivesState {
    type Action = ObjectivesAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ObjectivesAction::Loading => {
                next.loading = true;
                next.error = None;
            }
            ObjectivesAction::Loaded(objectives) => {
                next.loading = false;
                next.objectives = objectives;
            }
            ObjectivesAction::Failed(message) => {
                next.loading = false;
                next.error = Some(message);
            }
            ObjectivesAction::Added(objective) => next.objectives.push(objective),
            ObjectivesAction::Replaced(objective) => {
                let id = objective.id;
                replace_first(&mut next.objectives, |o| o.id == id, objective);
            }
            ObjectivesAction::Removed(slug) => next.objectives.retain(|o| o.slug != slug),
            ObjectivesAction::ClearError => next.error = None,
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn objective(id: u32, current: f64) -> Objective {
        serde_json::from_value(serde_json::json!({
            "id": id, "slug": format!("goal-{}", id), "title": "Goal",
            "target_value": 1000, "current_value": current
        }))
        .unwrap()
    }

    #[test]
    fn objectives_are_appended() {
        let state = Rc::new(ObjectivesState::default())
            .reduce(ObjectivesAction::Loaded(vec![objective(1, 0.0)]))
            .reduce(ObjectivesAction::Added(objective(2, 0.0)));
        let ids: Vec<u32> = state.objectives.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn deposit_replaces_with_server_copy() {
        let state = Rc::new(ObjectivesState::default())
            .reduce(ObjectivesAction::Loaded(vec![objective(1, 0.0), objective(2, 0.0)]))
            .reduce(ObjectivesAction::Replaced(objective(2, 250.0)));
        assert_eq!(state.objectives[1].current_value, 250.0);
        assert_eq!(state.objectives[0].current_value, 0.0);
    }

    #[test]
    fn removal_is_by_slug() {
        let state = Rc::new(ObjectivesState::default())
            .reduce(ObjectivesAction::Loaded(vec![objective(1, 0.0), objective(2, 0.0)]))
            .reduce(ObjectivesAction::Removed("goal-1".into()));
        assert_eq!(state.objectives.len(), 1);
        assert_eq!(state.objectives[0].id, 2);
    }
}
