//! Guild roster persistence.
//!
//! One row per character, keyed by `name#realm`. Professions are stored as
//! a JSONB document; a lower-cased copy of every known recipe name sits in
//! a GIN-indexed `TEXT[]` column so "who knows this recipe" is an index
//! lookup.

use chrono::{DateTime, Utc};
use crafty_types::{CharacterKey, CharacterRecord, ProfessionRecord};
use sqlx::PgPool;

use crate::error::DbError;

/// Operations on the `characters` table.
pub struct RosterStore<'a> {
    pool: &'a PgPool,
}

impl<'a> RosterStore<'a> {
    /// Create a new roster store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a character, or replace the stored one with the same key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the upsert fails, or
    /// [`DbError::InvalidRow`] if the level does not fit an `INTEGER`.
    pub async fn upsert(&self, character: &CharacterRecord) -> Result<(), DbError> {
        let professions = serde_json::to_value(&character.professions)?;
        let level = i32::try_from(character.level)
            .map_err(|e| DbError::InvalidRow(format!("level {}: {e}", character.level)))?;

        sqlx::query(
            r"INSERT INTO characters (key, character_name, realm, level, professions, known_recipes, synced_at)
              VALUES ($1, $2, $3, $4, $5, $6, now())
              ON CONFLICT (key) DO UPDATE SET
                  character_name = EXCLUDED.character_name,
                  realm = EXCLUDED.realm,
                  level = EXCLUDED.level,
                  professions = EXCLUDED.professions,
                  known_recipes = EXCLUDED.known_recipes,
                  synced_at = now()",
        )
        .bind(character.key().as_str())
        .bind(&character.character_name)
        .bind(&character.realm)
        .bind(level)
        .bind(professions)
        .bind(known_recipes(character))
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Characters with a profession listing `recipe_name`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails, or a decode error
    /// if a stored row is malformed.
    pub async fn find_knowing_recipe(
        &self,
        recipe_name: &str,
    ) -> Result<Vec<CharacterRecord>, DbError> {
        let rows = sqlx::query_as::<_, CharacterRow>(
            r"SELECT key, character_name, realm, level, professions, synced_at
              FROM characters
              WHERE known_recipes @> ARRAY[$1]
              ORDER BY key",
        )
        .bind(recipe_name.to_lowercase())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CharacterRecord::try_from).collect()
    }

    /// Characters with this normalized name, on `realm` when given.
    ///
    /// # Errors
    ///
    /// See [`Self::find_knowing_recipe`].
    pub async fn find_by_name(
        &self,
        name: &str,
        realm: Option<&str>,
    ) -> Result<Vec<CharacterRecord>, DbError> {
        let rows = match realm {
            Some(realm) => {
                sqlx::query_as::<_, CharacterRow>(
                    r"SELECT key, character_name, realm, level, professions, synced_at
                      FROM characters
                      WHERE key = $1",
                )
                .bind(CharacterKey::new(name, realm).as_str())
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, CharacterRow>(
                    r"SELECT key, character_name, realm, level, professions, synced_at
                      FROM characters
                      WHERE character_name = $1
                      ORDER BY realm",
                )
                .bind(name)
                .fetch_all(self.pool)
                .await?
            }
        };

        rows.into_iter().map(CharacterRecord::try_from).collect()
    }

    /// Keys of every stored character.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list_keys(&self) -> Result<Vec<String>, DbError> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT key FROM characters ORDER BY key")
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(|(key,)| key).collect())
    }

    /// Delete the given characters. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the delete fails.
    pub async fn delete_keys(&self, keys: &[String]) -> Result<u64, DbError> {
        if keys.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM characters WHERE key = ANY($1)")
            .bind(keys)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Lower-cased, de-duplicated recipe names across all professions.
pub fn known_recipes(character: &CharacterRecord) -> Vec<String> {
    let mut names: Vec<String> = character
        .professions
        .iter()
        .flat_map(|p| p.recipes.iter().map(|r| r.to_lowercase()))
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// A row from the `characters` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CharacterRow {
    /// `name#realm` key.
    pub key: String,
    /// Normalized character name.
    pub character_name: String,
    /// Realm slug.
    pub realm: String,
    /// Character level.
    pub level: i32,
    /// Professions as JSONB.
    pub professions: serde_json::Value,
    /// When the guild sync last wrote this row.
    pub synced_at: DateTime<Utc>,
}

impl TryFrom<CharacterRow> for CharacterRecord {
    type Error = DbError;

    fn try_from(row: CharacterRow) -> Result<Self, Self::Error> {
        let professions: Vec<ProfessionRecord> = serde_json::from_value(row.professions)?;
        let level = u32::try_from(row.level)
            .map_err(|e| DbError::InvalidRow(format!("level of {}: {e}", row.key)))?;
        Ok(Self {
            character_name: row.character_name,
            realm: row.realm,
            level,
            professions,
        })
    }
}
