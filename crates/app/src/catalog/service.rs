//! Catalog service.
//!
//! One instance backs one catalog view: the storefront grid and the admin
//! table are both projections of the same store, so the admin's id lookup
//! and the storefront's name/category search share a filter set. Name and
//! category intersect, exactly as the storefront search behaves.

use sphere_core::{
    editor::{CommitOutcome, OptimisticEditor, RowState},
    error::{EditError, FormError, GatewayError},
    form::{FormFlow, FormState},
    store::RemoteCollectionStore,
};

use super::{
    models::{NewProduct, Product, ProductId},
    repository::ProductsRepository,
};

#[derive(Debug)]
pub struct CatalogService<R: ProductsRepository> {
    repository: R,
    store: RemoteCollectionStore<Product>,
    editor: OptimisticEditor<Product>,
    create_form: FormFlow<NewProduct>,
}

impl<R: ProductsRepository> CatalogService<R> {
    #[must_use]
    pub fn new(repository: R) -> Self {
        let mut store = RemoteCollectionStore::new();
        store.declare_filter("name", |p: &Product| p.name.clone());
        store.declare_exact_filter("category", |p: &Product| p.category.clone());
        store.declare_exact_filter("id", |p: &Product| p.id.to_string());

        Self {
            repository,
            store,
            editor: OptimisticEditor::new(),
            create_form: FormFlow::new(),
        }
    }

    /// Fetch the catalog, replacing local state wholesale.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; the local catalog is left empty.
    pub async fn load(&mut self) -> Result<(), GatewayError> {
        self.store.load(&self.repository).await
    }

    /// The catalog in fetch order, ignoring filters.
    pub fn products(&self) -> &[Product] {
        self.store.items()
    }

    /// The filtered, sorted projection.
    pub fn view(&self) -> Vec<&Product> {
        self.store.view()
    }

    /// Distinct categories, in fetch order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for product in self.store.items() {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// Search by name substring.
    pub fn search(&mut self, term: impl Into<String>) {
        self.store.set_filter("name", term);
    }

    /// Restrict to one category; an empty value shows all categories.
    pub fn filter_category(&mut self, category: impl Into<String>) {
        self.store.set_filter("category", category);
    }

    /// Admin lookup by exact id.
    pub fn filter_id(&mut self, id: impl Into<String>) {
        self.store.set_filter("id", id);
    }

    /// Deactivate all filters.
    pub fn clear_filters(&mut self) {
        self.store.clear_filters();
    }

    /// Edit state of one admin row.
    pub fn row_state(&self, id: ProductId) -> RowState {
        self.editor.row_state(id)
    }

    /// Mark a row editable.
    pub fn begin_edit(&mut self, id: ProductId) -> bool {
        self.editor.begin_edit(&self.store, id)
    }

    /// Stage a field-level change on an editable row.
    ///
    /// # Errors
    ///
    /// See [`OptimisticEditor::stage`].
    pub fn stage(
        &mut self,
        id: ProductId,
        mutate: impl FnOnce(&mut Product),
    ) -> Result<(), EditError> {
        self.editor.stage(&mut self.store, id, mutate)
    }

    /// Persist a staged row.
    ///
    /// # Errors
    ///
    /// See [`OptimisticEditor::commit`].
    pub async fn commit(&mut self, id: ProductId) -> Result<CommitOutcome, EditError> {
        self.editor
            .commit(&mut self.store, &self.repository, id)
            .await
    }

    /// Delete a product remotely, then locally on success.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; local state is untouched.
    pub async fn delete(&mut self, id: ProductId) -> Result<(), GatewayError> {
        self.editor
            .delete(&mut self.store, &self.repository, id)
            .await
    }

    /// The "add product" draft.
    pub fn draft(&self) -> &NewProduct {
        self.create_form.draft()
    }

    /// State of the "add product" form.
    pub fn form_state(&self) -> FormState {
        self.create_form.state()
    }

    /// Mutate the "add product" draft.
    pub fn edit_draft(&mut self, mutate: impl FnOnce(&mut NewProduct)) {
        self.create_form.update(mutate);
    }

    /// Submit the draft; on success the draft resets and the catalog
    /// reloads so the new product appears in the table.
    ///
    /// # Errors
    ///
    /// Returns the submission failure; the draft is preserved.
    pub async fn create(&mut self) -> Result<Product, FormError> {
        let created = self.create_form.submit(&self.repository).await?;
        self.load().await.ok();
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;
    use rust_decimal::Decimal;
    use sphere_core::{form::SubmitTarget, gateway::CollectionGateway};
    use testresult::TestResult;

    use super::*;

    mock! {
        pub ProductsRepo {}

        #[async_trait]
        impl CollectionGateway<Product> for ProductsRepo {
            async fn list(&self) -> Result<Vec<Product>, GatewayError>;
            async fn update(&self, record: Product) -> Result<Product, GatewayError>;
            async fn delete(&self, id: ProductId) -> Result<(), GatewayError>;
        }

        #[async_trait]
        impl SubmitTarget<NewProduct, Product> for ProductsRepo {
            async fn submit(&self, draft: NewProduct) -> Result<Product, GatewayError>;
        }
    }

    impl ProductsRepository for MockProductsRepo {}

    fn product(id: i64, name: &str, category: &str) -> Product {
        Product {
            id: ProductId::from_raw(id),
            name: name.to_string(),
            description: format!("{name} description"),
            price: Decimal::from(100),
            category: category.to_string(),
            image_url: format!("https://img.example/{id}.jpg"),
            insta_url: None,
            rating: 4,
        }
    }

    fn sample_catalog() -> Vec<Product> {
        vec![
            product(1, "disco sphere", "decor"),
            product(2, "mirror sphere", "decor"),
            product(3, "strobe light", "lighting"),
            product(4, "sphere stand", "hardware"),
        ]
    }

    fn repo_listing(products: Vec<Product>) -> MockProductsRepo {
        let mut repo = MockProductsRepo::new();
        repo.expect_list().returning(move || Ok(products.clone()));
        repo
    }

    #[tokio::test]
    async fn load_mirrors_the_fetched_catalog() -> TestResult {
        let mut service = CatalogService::new(repo_listing(sample_catalog()));

        service.load().await?;

        let ids: Vec<i64> = service.products().iter().map(|p| p.id.into_raw()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4], "local ids equal the fetched payload");

        Ok(())
    }

    #[tokio::test]
    async fn name_and_category_filters_intersect() -> TestResult {
        let mut service = CatalogService::new(repo_listing(sample_catalog()));
        service.load().await?;

        service.search("sphere");
        service.filter_category("decor");

        let names: Vec<&str> = service.view().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["disco sphere", "mirror sphere"],
            "both predicates apply, order preserved"
        );

        Ok(())
    }

    #[tokio::test]
    async fn categories_are_distinct_in_fetch_order() -> TestResult {
        let mut service = CatalogService::new(repo_listing(sample_catalog()));
        service.load().await?;

        assert_eq!(
            service.categories(),
            vec!["decor", "lighting", "hardware"],
            "first appearance wins"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_submits_the_draft_and_reloads() -> TestResult {
        let mut repo = repo_listing(sample_catalog());
        repo.expect_submit().times(1).returning(|draft| {
            Ok(Product {
                id: ProductId::from_raw(9),
                name: draft.name,
                description: draft.description,
                price: draft.price,
                category: draft.category,
                image_url: draft.image_url,
                insta_url: draft.insta_url,
                rating: draft.rating,
            })
        });

        let mut service = CatalogService::new(repo);
        service.edit_draft(|d| {
            d.name = "fog machine".to_string();
            d.category = "effects".to_string();
        });

        let created = service.create().await?;

        assert_eq!(created.id.into_raw(), 9, "server assigns the id");
        assert_eq!(service.form_state(), FormState::Idle, "draft reset");
        assert_eq!(service.draft(), &NewProduct::default(), "draft reset");

        Ok(())
    }

    #[tokio::test]
    async fn admin_row_edit_round_trip() -> TestResult {
        let mut repo = repo_listing(sample_catalog());
        repo.expect_update()
            .times(1)
            .returning(|record| Ok(record));

        let mut service = CatalogService::new(repo);
        service.load().await?;

        assert!(service.begin_edit(ProductId::from_raw(1)), "row editable");
        service.stage(ProductId::from_raw(1), |p| p.rating = 5)?;
        let outcome = service.commit(ProductId::from_raw(1)).await?;

        assert!(matches!(outcome, CommitOutcome::Confirmed), "commit landed");
        assert_eq!(
            service.products().first().map(|p| p.rating),
            Some(5),
            "local record holds the committed value"
        );

        Ok(())
    }
}
