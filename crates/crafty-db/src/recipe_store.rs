//! Recipe catalog persistence.
//!
//! One row per recipe, keyed by `recipe_id`. Reagent lists are stored as a
//! JSONB document in the same shape the catalog fixture uses.

use crafty_types::{RecipeDefinition, RecipeReagents};
use sqlx::PgPool;

use crate::error::DbError;

/// Operations on the `recipes` table.
pub struct RecipeStore<'a> {
    pool: &'a PgPool,
}

impl<'a> RecipeStore<'a> {
    /// Create a new recipe store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a recipe, or replace the stored one with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the upsert fails, or
    /// [`DbError::InvalidRow`] if an id does not fit a `BIGINT`.
    pub async fn upsert(&self, recipe: &RecipeDefinition) -> Result<(), DbError> {
        let recipe_id = to_bigint(recipe.recipe_id)?;
        let spell_id = recipe.spell_id.map(to_bigint).transpose()?;
        let reagents = serde_json::to_value(&recipe.reagents)?;

        sqlx::query(
            r"INSERT INTO recipes (recipe_id, name, category, crafted_item_id, spell_id, media_url, reagents, updated_at)
              VALUES ($1, $2, $3, $4, $5, $6, $7, now())
              ON CONFLICT (recipe_id) DO UPDATE SET
                  name = EXCLUDED.name,
                  category = EXCLUDED.category,
                  crafted_item_id = EXCLUDED.crafted_item_id,
                  spell_id = EXCLUDED.spell_id,
                  media_url = EXCLUDED.media_url,
                  reagents = EXCLUDED.reagents,
                  updated_at = now()",
        )
        .bind(recipe_id)
        .bind(&recipe.name)
        .bind(recipe.category.as_deref())
        .bind(recipe.crafted_item_id.as_deref())
        .bind(spell_id)
        .bind(recipe.media_url.as_deref())
        .bind(reagents)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Fetch a recipe by exact display name.
    ///
    /// Should two ids share a name, the lowest id wins.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails, or a decode error
    /// if the stored row is malformed.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<RecipeDefinition>, DbError> {
        let row = sqlx::query_as::<_, RecipeRow>(
            r"SELECT recipe_id, name, category, crafted_item_id, spell_id, media_url, reagents
              FROM recipes
              WHERE name = $1
              ORDER BY recipe_id
              LIMIT 1",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        row.map(RecipeDefinition::try_from).transpose()
    }
}

/// A row from the `recipes` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeRow {
    /// Catalog id.
    pub recipe_id: i64,
    /// Display name.
    pub name: String,
    /// Catalog category.
    pub category: Option<String>,
    /// Game item id of the crafted item.
    pub crafted_item_id: Option<String>,
    /// Game spell id.
    pub spell_id: Option<i64>,
    /// Icon URL.
    pub media_url: Option<String>,
    /// Reagent lists as JSONB.
    pub reagents: serde_json::Value,
}

impl TryFrom<RecipeRow> for RecipeDefinition {
    type Error = DbError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let reagents: RecipeReagents = serde_json::from_value(row.reagents)?;
        Ok(Self {
            recipe_id: from_bigint(row.recipe_id)?,
            name: row.name,
            category: row.category,
            crafted_item_id: row.crafted_item_id,
            spell_id: row.spell_id.map(from_bigint).transpose()?,
            media_url: row.media_url,
            reagents,
        })
    }
}

fn to_bigint(id: u64) -> Result<i64, DbError> {
    i64::try_from(id).map_err(|e| DbError::InvalidRow(format!("id {id} exceeds BIGINT: {e}")))
}

fn from_bigint(id: i64) -> Result<u64, DbError> {
    u64::try_from(id).map_err(|e| DbError::InvalidRow(format!("negative id {id}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(reagents: serde_json::Value) -> RecipeRow {
        RecipeRow {
            recipe_id: 2_100,
            name: "Charged Claymore".to_owned(),
            category: Some("Weapons".to_owned()),
            crafted_item_id: Some("222441".to_owned()),
            spell_id: Some(450_227),
            media_url: None,
            reagents,
        }
    }

    #[test]
    fn row_decodes_reagent_document() {
        let recipe = RecipeDefinition::try_from(row(serde_json::json!({
            "reagents": [{ "name": "Bismuth", "quantity": 4, "itemId": "210931" }],
            "optionalReagents": []
        })));
        let recipe = recipe.ok();
        assert_eq!(recipe.as_ref().map(|r| r.recipe_id), Some(2_100));
        assert_eq!(
            recipe.and_then(|r| r.reagents.reagents.first().map(|g| g.quantity)),
            Some(4)
        );
    }

    #[test]
    fn malformed_document_is_rejected() {
        let recipe = RecipeDefinition::try_from(row(serde_json::json!({ "reagents": 3 })));
        assert!(matches!(recipe, Err(DbError::Serialization(_))));
    }

    #[test]
    fn negative_ids_are_invalid() {
        let mut bad = row(serde_json::json!({}));
        bad.recipe_id = -1;
        assert!(matches!(RecipeDefinition::try_from(bad), Err(DbError::InvalidRow(_))));
        assert!(to_bigint(u64::MAX).is_err());
    }
}
