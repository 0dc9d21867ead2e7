//! Specialism catalog persistence.

use crafty_types::{SpecialismCategory, SpecialismGroup};
use sqlx::PgPool;

use crate::error::DbError;

/// Groups in byte order of their key, the order [`crafty_core::MemoryStore`]
/// returns them in, whatever the database collation.
const LIST_GROUPS_SQL: &str = r#"SELECT id, crafted_items, max_points
    FROM specialism_groups
    ORDER BY id COLLATE "C""#;

/// Operations on the `specialism_groups` table.
pub struct SpecialismStore<'a> {
    pool: &'a PgPool,
}

impl<'a> SpecialismStore<'a> {
    /// Create a new specialism store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a group, or replace the stored one with the same key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the upsert fails.
    pub async fn upsert(&self, group: &SpecialismGroup) -> Result<(), DbError> {
        let crafted_items = serde_json::to_value(&group.crafted_items)?;
        let items: Vec<&str> = group
            .crafted_items
            .iter()
            .flat_map(|c| c.items.iter().map(String::as_str))
            .collect();

        sqlx::query(
            r"INSERT INTO specialism_groups (id, crafted_items, items, max_points, updated_at)
              VALUES ($1, $2, $3, $4, now())
              ON CONFLICT (id) DO UPDATE SET
                  crafted_items = EXCLUDED.crafted_items,
                  items = EXCLUDED.items,
                  max_points = EXCLUDED.max_points,
                  updated_at = now()",
        )
        .bind(&group.id)
        .bind(crafted_items)
        .bind(items)
        .bind(i64::from(group.max_points))
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Every group, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails, or a decode error
    /// if a stored category list is malformed.
    pub async fn list(&self) -> Result<Vec<SpecialismGroup>, DbError> {
        let rows = sqlx::query_as::<_, SpecialismRow>(LIST_GROUPS_SQL)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(SpecialismGroup::try_from).collect()
    }
}

/// A row from the `specialism_groups` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SpecialismRow {
    /// Group key, `profession#specialism`.
    pub id: String,
    /// Categories as JSONB.
    pub crafted_items: serde_json::Value,
    /// Maximum points.
    pub max_points: i64,
}

impl TryFrom<SpecialismRow> for SpecialismGroup {
    type Error = DbError;

    fn try_from(row: SpecialismRow) -> Result<Self, Self::Error> {
        let crafted_items: Vec<SpecialismCategory> = serde_json::from_value(row.crafted_items)?;
        let max_points = u32::try_from(row.max_points)
            .map_err(|e| DbError::InvalidRow(format!("max_points {}: {e}", row.max_points)))?;
        Ok(Self {
            id: row.id,
            crafted_items,
            max_points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_decodes_categories() {
        let group = SpecialismGroup::try_from(SpecialismRow {
            id: "Tailoring#Threads".to_owned(),
            crafted_items: serde_json::json!([
                { "category": "Spools", "items": ["Weavercloth Bolt"] }
            ]),
            max_points: 40,
        });
        let group = group.ok();
        assert!(group.as_ref().is_some_and(|g| g.lists("Weavercloth Bolt")));
        assert_eq!(group.map(|g| g.max_points), Some(40));
    }

    #[test]
    fn groups_are_listed_in_byte_order() {
        assert!(LIST_GROUPS_SQL.ends_with(r#"ORDER BY id COLLATE "C""#));
    }

    #[test]
    fn out_of_range_points_are_invalid() {
        let group = SpecialismGroup::try_from(SpecialismRow {
            id: "Tailoring#Threads".to_owned(),
            crafted_items: serde_json::json!([]),
            max_points: -5,
        });
        assert!(matches!(group, Err(DbError::InvalidRow(_))));
    }
}
