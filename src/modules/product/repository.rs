use super::price;
use crate::{modules::storage::UploadedMedia, utils::pagination::Pagination};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tokio::sync::RwLock;
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "price::serialize")]
    pub price: BigDecimal,
    pub image: String,
    pub image_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Optional criteria narrowing a product listing. `name` and `description`
/// match exactly; both price bounds are inclusive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filters {
    pub name: Option<String>,
    pub description: Option<String>,
    pub min_price: Option<BigDecimal>,
    pub max_price: Option<BigDecimal>,
}

impl Filters {
    pub fn matches(&self, product: &Product) -> bool {
        self.name.as_ref().map_or(true, |name| product.name == *name)
            && self
                .description
                .as_ref()
                .map_or(true, |description| product.description == *description)
            && self
                .min_price
                .as_ref()
                .map_or(true, |min_price| product.price >= *min_price)
            && self
                .max_price
                .as_ref()
                .map_or(true, |max_price| product.price <= *max_price)
    }
}

pub struct CreateProductPayload {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub image: UploadedMedia,
}

/// Fields left as `None` keep their stored value.
#[derive(Default)]
pub struct UpdateProductPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub image: Option<UploadedMedia>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, payload: CreateProductPayload) -> Result<Product>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>>;
    async fn find_many(&self, pagination: Pagination, filters: &Filters) -> Result<Vec<Product>>;
    async fn count(&self, filters: &Filters) -> Result<u64>;
    async fn update_by_id(&self, id: &str, payload: UpdateProductPayload)
        -> Result<Option<Product>>;
    /// Removes the record in a single step and hands back what was removed.
    async fn delete_by_id(&self, id: &str) -> Result<Option<Product>>;
}

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const FILTER_CLAUSE: &str = "
    ($1::TEXT IS NULL OR name = $1)
    AND ($2::TEXT IS NULL OR description = $2)
    AND ($3::NUMERIC IS NULL OR price >= $3)
    AND ($4::NUMERIC IS NULL OR price <= $4)
";

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, payload: CreateProductPayload) -> Result<Product> {
        sqlx::query_as::<_, Product>(
            "
            INSERT INTO products (id, name, description, price, image, image_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(Ulid::new().to_string())
        .bind(payload.name)
        .bind(payload.description)
        .bind(payload.price)
        .bind(payload.image.path)
        .bind(payload.image.original_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to create a product: {}", err);
            Error::UnexpectedError
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                tracing::error!("Error occurred while trying to fetch product {}: {}", id, err);
                Error::UnexpectedError
            })
    }

    async fn find_many(&self, pagination: Pagination, filters: &Filters) -> Result<Vec<Product>> {
        let query = format!(
            "SELECT * FROM products WHERE {} ORDER BY created_at ASC, id ASC LIMIT $5 OFFSET $6",
            FILTER_CLAUSE
        );

        sqlx::query_as::<_, Product>(&query)
            .bind(filters.name.as_deref())
            .bind(filters.description.as_deref())
            .bind(filters.min_price.clone())
            .bind(filters.max_price.clone())
            .bind(i64::from(pagination.limit))
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|err| {
                tracing::error!("Error occurred while trying to fetch many products: {}", err);
                Error::UnexpectedError
            })
    }

    async fn count(&self, filters: &Filters) -> Result<u64> {
        let query = format!("SELECT COUNT(*) FROM products WHERE {}", FILTER_CLAUSE);

        sqlx::query_scalar::<_, i64>(&query)
            .bind(filters.name.as_deref())
            .bind(filters.description.as_deref())
            .bind(filters.min_price.clone())
            .bind(filters.max_price.clone())
            .fetch_one(&self.pool)
            .await
            .map(|count| count.max(0) as u64)
            .map_err(|err| {
                tracing::error!("Error occurred while trying to count products: {}", err);
                Error::UnexpectedError
            })
    }

    async fn update_by_id(
        &self,
        id: &str,
        payload: UpdateProductPayload,
    ) -> Result<Option<Product>> {
        let (image, image_name, replace_image) = match payload.image {
            Some(image) => (Some(image.path), image.original_name, true),
            None => (None, None, false),
        };

        sqlx::query_as::<_, Product>(
            "
            UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                image = COALESCE($5, image),
                image_name = CASE WHEN $7 THEN $6 ELSE image_name END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id)
        .bind(payload.name)
        .bind(payload.description)
        .bind(payload.price)
        .bind(image)
        .bind(image_name)
        .bind(replace_image)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to update product {}: {}", id, err);
            Error::UnexpectedError
        })
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Product>> {
        sqlx::query_as::<_, Product>("DELETE FROM products WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                tracing::error!("Error occurred while trying to delete product {}: {}", id, err);
                Error::UnexpectedError
            })
    }
}

/// Process-local store, kept in insertion order.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, payload: CreateProductPayload) -> Result<Product> {
        let product = Product {
            id: Ulid::new().to_string(),
            name: payload.name,
            description: payload.description,
            price: payload.price,
            image: payload.image.path,
            image_name: payload.image.original_name,
            created_at: Utc::now().naive_utc(),
            updated_at: None,
        };

        self.products.write().await.push(product.clone());

        Ok(product)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|product| product.id == id)
            .cloned())
    }

    async fn find_many(&self, pagination: Pagination, filters: &Filters) -> Result<Vec<Product>> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .filter(|product| filters.matches(product))
            .skip(usize::try_from(pagination.skip()).unwrap_or(usize::MAX))
            .take(pagination.limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filters: &Filters) -> Result<u64> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .filter(|product| filters.matches(product))
            .count() as u64)
    }

    async fn update_by_id(
        &self,
        id: &str,
        payload: UpdateProductPayload,
    ) -> Result<Option<Product>> {
        let mut products = self.products.write().await;

        let Some(product) = products.iter_mut().find(|product| product.id == id) else {
            return Ok(None);
        };

        if let Some(name) = payload.name {
            product.name = name;
        }
        if let Some(description) = payload.description {
            product.description = description;
        }
        if let Some(price) = payload.price {
            product.price = price;
        }
        if let Some(image) = payload.image {
            product.image = image.path;
            product.image_name = image.original_name;
        }
        product.updated_at = Some(Utc::now().naive_utc());

        Ok(Some(product.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Product>> {
        let mut products = self.products.write().await;

        Ok(products
            .iter()
            .position(|product| product.id == id)
            .map(|index| products.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(name: &str) -> UploadedMedia {
        UploadedMedia {
            file_name: name.to_string(),
            original_name: Some(name.to_string()),
            path: format!("/srv/uploads/{}", name),
        }
    }

    async fn seed(repository: &InMemoryProductRepository, prices: &[i32]) {
        for (index, price) in prices.iter().enumerate() {
            repository
                .create(CreateProductPayload {
                    name: format!("product-{}", index),
                    description: String::from("seeded"),
                    price: BigDecimal::from(*price),
                    image: media("a.png"),
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn applies_price_bounds_inclusively() {
        let repository = InMemoryProductRepository::default();
        seed(&repository, &[5, 10, 15, 20, 25]).await;

        let filters = Filters {
            min_price: Some(BigDecimal::from(10)),
            max_price: Some(BigDecimal::from(20)),
            ..Filters::default()
        };
        let products = repository
            .find_many(Pagination::new(1, 10), &filters)
            .await
            .unwrap();

        let prices: Vec<BigDecimal> = products.into_iter().map(|product| product.price).collect();
        assert_eq!(
            prices,
            vec![BigDecimal::from(10), BigDecimal::from(15), BigDecimal::from(20)]
        );
        assert_eq!(repository.count(&filters).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn pages_through_matches_in_insertion_order() {
        let repository = InMemoryProductRepository::default();
        seed(&repository, &[1; 12]).await;

        let third_page = repository
            .find_many(Pagination::new(3, 5), &Filters::default())
            .await
            .unwrap();

        let names: Vec<String> = third_page.into_iter().map(|product| product.name).collect();
        assert_eq!(names, vec!["product-10", "product-11"]);
    }

    #[tokio::test]
    async fn partial_updates_keep_omitted_fields() {
        let repository = InMemoryProductRepository::default();
        seed(&repository, &[7]).await;
        let product = repository
            .find_many(Pagination::default(), &Filters::default())
            .await
            .unwrap()
            .remove(0);

        let updated = repository
            .update_by_id(
                &product.id,
                UpdateProductPayload {
                    price: Some(BigDecimal::from(9)),
                    ..UpdateProductPayload::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, product.name);
        assert_eq!(updated.description, product.description);
        assert_eq!(updated.image, product.image);
        assert_eq!(updated.price, BigDecimal::from(9));
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn delete_returns_removed_record_once() {
        let repository = InMemoryProductRepository::default();
        seed(&repository, &[7]).await;
        let id = repository
            .find_many(Pagination::default(), &Filters::default())
            .await
            .unwrap()[0]
            .id
            .clone();

        assert!(repository.delete_by_id(&id).await.unwrap().is_some());
        assert!(repository.delete_by_id(&id).await.unwrap().is_none());
        assert!(repository.find_by_id(&id).await.unwrap().is_none());
    }
}
