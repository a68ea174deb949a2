//! Categories Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::categories::{
    data::{CategoryPath, CategoryUpdate, NewCategory},
    records::{CategoryRecord, CategoryUuid},
    tree::CategoryTree,
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const UPDATE_CATEGORY_SQL: &str = include_str!("sql/update_category.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");
const COUNT_DEPENDENTS_SQL: &str = include_str!("sql/count_dependents.sql");
const LOCK_HIERARCHY_SQL: &str = include_str!("sql/lock_hierarchy.sql");
const INSERT_CHILD_IF_MISSING_SQL: &str = include_str!("sql/insert_child_if_missing.sql");
const FIND_CHILD_SQL: &str = include_str!("sql/find_child.sql");
const SUMMARISE_PRICES_SQL: &str = include_str!("sql/summarise_prices.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCategoriesRepository;

impl PgCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn load_tree(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<CategoryTree, sqlx::Error> {
        let categories = query_as::<Postgres, CategoryRecord>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await?;

        Ok(CategoryTree::new(categories))
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &NewCategory,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(category.parent_uuid.map(CategoryUuid::into_uuid))
            .bind(&category.name)
            .bind(category.description.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
        update: &CategoryUpdate,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(UPDATE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .bind(update.parent_uuid.map(CategoryUuid::into_uuid))
            .bind(&update.name)
            .bind(update.description.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Number of child categories and products (including soft-deleted ones).
    pub(crate) async fn count_dependents(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<(i64, i64), sqlx::Error> {
        query_as(COUNT_DEPENDENTS_SQL)
            .bind(category.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Serialise hierarchy changes for the rest of the transaction.
    pub(crate) async fn lock_hierarchy(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<(), sqlx::Error> {
        query(LOCK_HIERARCHY_SQL).execute(&mut **tx).await?;

        Ok(())
    }

    /// Walk `path` from the root, creating any missing level, and return the leaf.
    pub(crate) async fn resolve_path(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        path: &CategoryPath,
    ) -> Result<CategoryRecord, sqlx::Error> {
        let mut parent: Option<CategoryUuid> = None;
        let mut resolved = None;

        for name in path.segments() {
            let category = self.find_or_create_child(tx, parent, name).await?;

            parent = Some(category.uuid);
            resolved = Some(category);
        }

        resolved.ok_or(sqlx::Error::RowNotFound)
    }

    async fn find_or_create_child(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        parent: Option<CategoryUuid>,
        name: &str,
    ) -> Result<CategoryRecord, sqlx::Error> {
        let parent = parent.map(CategoryUuid::into_uuid);

        let inserted = query_as::<Postgres, CategoryRecord>(INSERT_CHILD_IF_MISSING_SQL)
            .bind(Uuid::now_v7())
            .bind(parent)
            .bind(name)
            .fetch_optional(&mut **tx)
            .await?;

        if let Some(category) = inserted {
            return Ok(category);
        }

        query_as::<Postgres, CategoryRecord>(FIND_CHILD_SQL)
            .bind(parent)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    /// Count and sum of live product prices across the given categories.
    pub(crate) async fn summarise_prices(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        categories: &[CategoryUuid],
    ) -> Result<(i64, Decimal), sqlx::Error> {
        let categories: Vec<Uuid> = categories.iter().map(|uuid| uuid.into_uuid()).collect();

        query_as(SUMMARISE_PRICES_SQL)
            .bind(categories)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            parent_uuid: row
                .try_get::<Option<Uuid>, _>("parent_uuid")?
                .map(CategoryUuid::from_uuid),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
