use sea_orm::{ActiveValue, QueryOrder, prelude::*};

use crate::{Budget, ResultEngine, budgets};

use super::{Engine, normalize_required_text, validate_amount};

impl Engine {
    /// Return all the budgets.
    pub async fn budgets(&self) -> ResultEngine<Vec<Budget>> {
        let models = budgets::Entity::find()
            .order_by_asc(budgets::Column::Id)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Budget::from).collect())
    }

    /// Add a new budget. Nothing is spent yet, so `current` starts at `max`.
    pub async fn new_budget(&self, name: &str, max: i64) -> ResultEngine<Budget> {
        let name = normalize_required_text(name, "budget name")?;
        validate_amount(max, "budget max")?;

        let model = budgets::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name),
            max: ActiveValue::Set(max),
            current: ActiveValue::Set(max),
        }
        .insert(&self.database)
        .await?;

        Ok(Budget::from(model))
    }
}
