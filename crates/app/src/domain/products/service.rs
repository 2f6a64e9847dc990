//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        accounts::records::Caller,
        products::{
            data::{NewProduct, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        caller: Caller,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        caller.require_staff()?;
        product.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        info!(
            product_uuid = %created.uuid,
            staff_uuid = %caller.account,
            price = created.price,
            stock = created.stock,
            "created product"
        );

        Ok(created)
    }

    async fn update_product(
        &self,
        caller: Caller,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        caller.require_staff()?;
        update.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        info!(
            product_uuid = %updated.uuid,
            staff_uuid = %caller.account,
            price = updated.price,
            stock = updated.stock,
            "updated product"
        );

        Ok(updated)
    }

    async fn delete_product(
        &self,
        caller: Caller,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        caller.require_staff()?;

        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(product_uuid = %product, staff_uuid = %caller.account, "deleted product");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products still on sale.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product. Deleted products are not found.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product. Staff only.
    async fn create_product(
        &self,
        caller: Caller,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces the editable fields of a product. Staff only.
    async fn update_product(
        &self,
        caller: Caller,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Withdraws a product from sale. Existing purchases keep their reference.
    /// Staff only.
    async fn delete_product(
        &self,
        caller: Caller,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;
}
