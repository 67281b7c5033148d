use sea_orm::{QueryOrder, prelude::*};

use crate::{EngineError, EnrichedTransaction, ResultEngine, transactions};

use super::super::Engine;
use super::helpers::enrich;

impl Engine {
    /// Return every transaction in storage order, enriched with account and
    /// budget names.
    pub async fn transactions(&self) -> ResultEngine<Vec<EnrichedTransaction>> {
        let models = transactions::Entity::find()
            .order_by_asc(transactions::Column::Id)
            .all(&self.database)
            .await?;

        enrich(&self.database, models).await
    }

    /// Return one enriched transaction.
    pub async fn transaction(&self, transaction_id: i32) -> ResultEngine<EnrichedTransaction> {
        let model = transactions::Entity::find_by_id(transaction_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| {
                EngineError::KeyNotFound(format!("transaction {transaction_id}"))
            })?;

        enrich(&self.database, vec![model])
            .await?
            .pop()
            .ok_or_else(|| {
                EngineError::KeyNotFound(format!("transaction {transaction_id}"))
            })
    }

    /// Return the transactions whose description contains `pattern`,
    /// ignoring case.
    ///
    /// Case is folded with Unicode rules on both sides. SQLite `LIKE` only
    /// folds ASCII, so the match happens here rather than in the query.
    pub async fn search_transactions(
        &self,
        pattern: &str,
    ) -> ResultEngine<Vec<EnrichedTransaction>> {
        let needle = pattern.to_lowercase();
        let models = transactions::Entity::find()
            .order_by_asc(transactions::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .filter(|model| model.description.to_lowercase().contains(&needle))
            .collect();

        enrich(&self.database, models).await
    }
}
