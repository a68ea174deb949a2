//! Categories service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        categories::{
            data::{CategoryPath, CategoryUpdate, NewCategory},
            errors::CategoriesServiceError,
            pricing::PriceSummary,
            records::{CategoryAveragePrice, CategoryNode, CategoryRecord, CategoryUuid},
            repository::PgCategoriesRepository,
            tree::CategoryTree,
        },
        validation::required_text,
    },
    pagination::{Page, PageRequest, count_to_total},
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

fn nodes_page(
    tree: &CategoryTree,
    ids: &[CategoryUuid],
    page: PageRequest,
) -> Page<CategoryNode> {
    let ids = page.paginate(ids.to_vec());

    Page::new(
        ids.items
            .into_iter()
            .filter_map(|category| tree.node(category))
            .collect(),
        ids.total,
        page,
    )
}

fn normalised_name(name: &str) -> Result<String, CategoriesServiceError> {
    required_text(name)
        .ok_or_else(|| CategoriesServiceError::Validation("name must not be blank".to_string()))
}

fn normalised_description(description: Option<String>) -> Option<String> {
    description.and_then(|description| required_text(&description))
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_root_categories(
        &self,
        page: PageRequest,
    ) -> Result<Page<CategoryNode>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let tree = self.repository.load_tree(&mut tx).await?;

        tx.commit().await?;

        Ok(nodes_page(&tree, tree.root_ids(), page))
    }

    async fn list_all_categories(
        &self,
        page: PageRequest,
    ) -> Result<Page<CategoryNode>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let tree = self.repository.load_tree(&mut tx).await?;

        tx.commit().await?;

        Ok(nodes_page(&tree, tree.all_ids(), page))
    }

    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryNode, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let tree = self.repository.load_tree(&mut tx).await?;

        tx.commit().await?;

        tree.node(category).ok_or(CategoriesServiceError::NotFound)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryNode, CategoriesServiceError> {
        let category = NewCategory {
            name: normalised_name(&category.name)?,
            description: normalised_description(category.description),
            ..category
        };

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_category(&mut tx, &category).await?;
        let tree = self.repository.load_tree(&mut tx).await?;

        tx.commit().await?;

        tree.node(created.uuid).ok_or(CategoriesServiceError::NotFound)
    }

    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryNode, CategoriesServiceError> {
        let update = CategoryUpdate {
            name: normalised_name(&update.name)?,
            description: normalised_description(update.description),
            ..update
        };

        let mut tx = self.db.begin().await?;

        self.repository.lock_hierarchy(&mut tx).await?;

        let tree = self.repository.load_tree(&mut tx).await?;

        if !tree.contains(category) {
            return Err(CategoriesServiceError::NotFound);
        }

        if let Some(parent) = update.parent_uuid
            && !tree.contains(parent)
        {
            return Err(CategoriesServiceError::InvalidReference);
        }

        if tree.would_create_cycle(category, update.parent_uuid) {
            return Err(CategoriesServiceError::CycleDetected);
        }

        self.repository
            .update_category(&mut tx, category, &update)
            .await?;

        let tree = self.repository.load_tree(&mut tx).await?;

        tx.commit().await?;

        tree.node(category).ok_or(CategoriesServiceError::NotFound)
    }

    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.lock_hierarchy(&mut tx).await?;

        let (children, products) = self.repository.count_dependents(&mut tx, category).await?;

        if children > 0 || products > 0 {
            return Err(CategoriesServiceError::NotEmpty);
        }

        let rows_affected = self.repository.delete_category(&mut tx, category).await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn resolve_path(
        &self,
        path: CategoryPath,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let leaf = self.repository.resolve_path(&mut tx, &path).await?;

        tx.commit().await?;

        Ok(leaf)
    }

    async fn average_price(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryAveragePrice, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let tree = self.repository.load_tree(&mut tx).await?;

        let record = tree
            .get(category)
            .ok_or(CategoriesServiceError::NotFound)?;

        let closure = tree.closure(category);

        let (count, sum) = self.repository.summarise_prices(&mut tx, &closure).await?;

        tx.commit().await?;

        let summary = PriceSummary::from_totals(sum, count_to_total(count));

        info!(
            category = %category,
            categories = closure.len(),
            products = summary.count,
            "computed category average price"
        );

        Ok(CategoryAveragePrice {
            category_uuid: category,
            category_name: record.name.clone(),
            category_path: tree.full_path(category).unwrap_or_default(),
            average_price: summary.average,
            product_count: summary.count,
            has_products: summary.has_products(),
            includes_subcategories: closure.len() > 1,
        })
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieve a page of top-level categories with their subtrees.
    async fn list_root_categories(
        &self,
        page: PageRequest,
    ) -> Result<Page<CategoryNode>, CategoriesServiceError>;

    /// Retrieve a page of every category in name order.
    async fn list_all_categories(
        &self,
        page: PageRequest,
    ) -> Result<Page<CategoryNode>, CategoriesServiceError>;

    /// Retrieve a single category with its subtree.
    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryNode, CategoriesServiceError>;

    /// Creates a category, optionally beneath an existing parent.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryNode, CategoriesServiceError>;

    /// Renames, re-describes or re-parents a category. Cycles are rejected.
    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryNode, CategoriesServiceError>;

    /// Deletes a category that has neither subcategories nor products.
    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError>;

    /// Finds or creates every level of `path` and returns the leaf.
    async fn resolve_path(
        &self,
        path: CategoryPath,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Mean price of live products in the category and all its descendants.
    async fn average_price(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryAveragePrice, CategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::products::ProductsService,
        test::{TestContext, helpers::new_product},
    };

    use super::*;

    fn new_category(name: &str, parent: Option<CategoryUuid>) -> NewCategory {
        NewCategory {
            uuid: CategoryUuid::new(),
            parent_uuid: parent,
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn create_category_reports_full_path() -> TestResult {
        let ctx = TestContext::new().await;

        let electronics = ctx
            .categories
            .create_category(new_category("Electronics", None))
            .await?;

        let laptops = ctx
            .categories
            .create_category(new_category("Laptops", Some(electronics.record.uuid)))
            .await?;

        assert_eq!(laptops.full_path, "Electronics > Laptops");
        assert_eq!(laptops.parent_name.as_deref(), Some("Electronics"));

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_sibling_name_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.categories
            .create_category(new_category("Electronics", None))
            .await?;

        let result = ctx
            .categories
            .create_category(new_category("Electronics", None))
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_category_with_unknown_parent_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .categories
            .create_category(new_category("Orphan", Some(CategoryUuid::new())))
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_root_categories_nests_children() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.categories
            .resolve_path(CategoryPath::new(["Electronics", "Laptops"])?)
            .await?;
        ctx.categories
            .resolve_path(CategoryPath::new(["Electronics", "Phones"])?)
            .await?;
        ctx.categories
            .resolve_path(CategoryPath::new(["Books"])?)
            .await?;

        let roots = ctx
            .categories
            .list_root_categories(PageRequest::default())
            .await?;

        let names: Vec<&str> = roots
            .items
            .iter()
            .map(|node| node.record.name.as_str())
            .collect();

        assert_eq!(roots.total, 2);
        assert_eq!(names, ["Books", "Electronics"]);
        assert_eq!(roots.items.get(1).map(|node| node.children.len()), Some(2));

        let all = ctx
            .categories
            .list_all_categories(PageRequest::default())
            .await?;

        assert_eq!(all.total, 4);

        Ok(())
    }

    #[tokio::test]
    async fn resolve_path_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;
        let path = CategoryPath::new(["Electronics", "Laptops"])?;

        let first = ctx.categories.resolve_path(path.clone()).await?;
        let second = ctx.categories.resolve_path(path).await?;

        let all = ctx
            .categories
            .list_all_categories(PageRequest::default())
            .await?;

        assert_eq!(first.uuid, second.uuid);
        assert_eq!(all.total, 2, "no duplicate siblings were created");

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_path_resolution_converges_on_one_leaf() -> TestResult {
        let ctx = TestContext::new().await;
        let path = CategoryPath::new(["Garden", "Tools", "Shovels"])?;

        let (first, second) = tokio::join!(
            ctx.categories.resolve_path(path.clone()),
            ctx.categories.resolve_path(path.clone()),
        );

        assert_eq!(first?.uuid, second?.uuid);

        let all = ctx
            .categories
            .list_all_categories(PageRequest::default())
            .await?;

        assert_eq!(all.total, 3);

        Ok(())
    }

    #[tokio::test]
    async fn same_name_under_different_parents_is_allowed() -> TestResult {
        let ctx = TestContext::new().await;

        let a = ctx
            .categories
            .resolve_path(CategoryPath::new(["Men", "Shoes"])?)
            .await?;
        let b = ctx
            .categories
            .resolve_path(CategoryPath::new(["Women", "Shoes"])?)
            .await?;

        assert_ne!(a.uuid, b.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn update_category_rejects_move_beneath_descendant() -> TestResult {
        let ctx = TestContext::new().await;

        let leaf = ctx
            .categories
            .resolve_path(CategoryPath::new(["Produce", "Fruits", "Apples"])?)
            .await?;
        let produce = ctx
            .categories
            .resolve_path(CategoryPath::new(["Produce"])?)
            .await?;

        let result = ctx
            .categories
            .update_category(
                produce.uuid,
                CategoryUpdate {
                    parent_uuid: Some(leaf.uuid),
                    name: "Produce".to_string(),
                    description: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::CycleDetected)),
            "expected CycleDetected, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_category_moves_subtree() -> TestResult {
        let ctx = TestContext::new().await;

        let fruits = ctx
            .categories
            .resolve_path(CategoryPath::new(["Produce", "Fruits"])?)
            .await?;
        let groceries = ctx
            .categories
            .resolve_path(CategoryPath::new(["Groceries"])?)
            .await?;

        let moved = ctx
            .categories
            .update_category(
                fruits.uuid,
                CategoryUpdate {
                    parent_uuid: Some(groceries.uuid),
                    name: "Fresh Fruit".to_string(),
                    description: Some("Seasonal".to_string()),
                },
            )
            .await?;

        assert_eq!(moved.full_path, "Groceries > Fresh Fruit");
        assert_eq!(moved.record.description.as_deref(), Some("Seasonal"));

        Ok(())
    }

    #[tokio::test]
    async fn delete_category_with_children_returns_not_empty() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.categories
            .resolve_path(CategoryPath::new(["Electronics", "Laptops"])?)
            .await?;
        let electronics = ctx
            .categories
            .resolve_path(CategoryPath::new(["Electronics"])?)
            .await?;

        let result = ctx.categories.delete_category(electronics.uuid).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotEmpty)),
            "expected NotEmpty, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_empty_category_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let books = ctx
            .categories
            .resolve_path(CategoryPath::new(["Books"])?)
            .await?;

        ctx.categories.delete_category(books.uuid).await?;

        let result = ctx.categories.get_category(books.uuid).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn average_price_spans_all_descendants() -> TestResult {
        let ctx = TestContext::new().await;

        let laptops = ctx
            .categories
            .resolve_path(CategoryPath::new(["Electronics", "Laptops"])?)
            .await?;
        let phones = ctx
            .categories
            .resolve_path(CategoryPath::new(["Electronics", "Phones"])?)
            .await?;
        let electronics = ctx
            .categories
            .resolve_path(CategoryPath::new(["Electronics"])?)
            .await?;

        for (sku, price, category) in [
            ("LAP-1", "1000", laptops.uuid),
            ("LAP-2", "1200", laptops.uuid),
            ("PHN-1", "800", phones.uuid),
        ] {
            ctx.products
                .create_product(new_product(sku, Decimal::from_str(price)?, category, 5))
                .await?;
        }

        let average = ctx.categories.average_price(electronics.uuid).await?;

        assert_eq!(average.average_price.to_string(), "1000.00");
        assert_eq!(average.product_count, 3);
        assert!(average.has_products, "three products were priced");
        assert!(
            average.includes_subcategories,
            "electronics has subcategories"
        );
        assert_eq!(average.category_path, "Electronics");

        let laptops_only = ctx.categories.average_price(laptops.uuid).await?;

        assert_eq!(laptops_only.average_price.to_string(), "1100.00");
        assert!(
            !laptops_only.includes_subcategories,
            "laptops is a leaf category"
        );

        Ok(())
    }

    #[tokio::test]
    async fn average_price_ignores_deleted_products() -> TestResult {
        let ctx = TestContext::new().await;

        let books = ctx
            .categories
            .resolve_path(CategoryPath::new(["Books"])?)
            .await?;

        ctx.products
            .create_product(new_product("BK-1", Decimal::from(10), books.uuid, 1))
            .await?;
        let removed = ctx
            .products
            .create_product(new_product("BK-2", Decimal::from(90), books.uuid, 1))
            .await?;

        ctx.products.delete_product(removed.uuid).await?;

        let average = ctx.categories.average_price(books.uuid).await?;

        assert_eq!(average.average_price.to_string(), "10.00");
        assert_eq!(average.product_count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn average_price_without_products_is_zero() -> TestResult {
        let ctx = TestContext::new().await;

        let empty = ctx
            .categories
            .resolve_path(CategoryPath::new(["Empty", "Still Empty"])?)
            .await?;

        let average = ctx.categories.average_price(empty.uuid).await?;

        assert_eq!(average.average_price.to_string(), "0.00");
        assert_eq!(average.product_count, 0);
        assert!(!average.has_products, "no products exist");

        Ok(())
    }

    #[tokio::test]
    async fn average_price_unknown_category_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.categories.average_price(CategoryUuid::new()).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
