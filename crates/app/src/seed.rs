//! Sample catalog and bootstrap admin account.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    auth::{PasswordError, hash_password},
    database::Db,
    domain::{
        catalog::{
            data::NewProduct,
            records::{ProductMetadata, ProductUuid},
            repository::PgProductsRepository,
        },
        users::{
            data::{NewUser, normalize_email},
            records::{UserRole, UserUuid},
            repository::PgUsersRepository,
        },
    },
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),

    #[error("failed to hash admin password")]
    Password(#[from] PasswordError),
}

/// Credentials for the first admin account.
#[derive(Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: Option<String>,
}

impl fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeed")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "**redacted**"))
            .finish()
    }
}

/// What a seeding run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub products_inserted: usize,
    pub admin_created: bool,
}

/// Insert the sample catalog into an empty product table and create an admin
/// when none exists. Safe to run on every start-up.
///
/// # Errors
///
/// Returns an error if a query fails or the admin password cannot be hashed.
pub async fn seed(db: &Db, admin: &AdminSeed) -> Result<SeedReport, SeedError> {
    let products = PgProductsRepository::new();
    let users = PgUsersRepository::new();
    let mut report = SeedReport::default();

    let mut tx = db.begin().await?;

    if products.count_products(&mut tx).await? == 0 {
        for product in sample_products() {
            products
                .create_product(&mut tx, ProductUuid::new(), &product)
                .await?;

            report.products_inserted += 1;
        }
    }

    if users.count_admins(&mut tx).await? == 0 {
        match admin.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => {
                users
                    .create_user(
                        &mut tx,
                        &NewUser {
                            uuid: UserUuid::new(),
                            email: normalize_email(&admin.email),
                            password_hash: hash_password(password).await?,
                            first_name: "Admin".to_string(),
                            last_name: "User".to_string(),
                            role: UserRole::Admin,
                        },
                    )
                    .await?;

                report.admin_created = true;
            }
            None => warn!("no admin account exists and ADMIN_PASSWORD is not set"),
        }
    }

    tx.commit().await?;

    if report.products_inserted > 0 {
        info!(count = report.products_inserted, "inserted sample products");
    }

    if report.admin_created {
        info!(email = %normalize_email(&admin.email), "created admin account");
    }

    Ok(report)
}

fn metadata(materials: &[&str], dimensions: &str, care_instructions: &str) -> ProductMetadata {
    ProductMetadata {
        materials: materials.iter().map(ToString::to_string).collect(),
        dimensions: Some(dimensions.to_string()),
        care_instructions: Some(care_instructions.to_string()),
    }
}

#[expect(clippy::too_many_arguments, reason = "one argument per catalog column")]
fn sample(
    name: &str,
    price: Decimal,
    category: &str,
    image: &str,
    description: &str,
    stock_quantity: u32,
    featured: bool,
    metadata: ProductMetadata,
) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        image: image.to_string(),
        images: Vec::new(),
        in_stock: None,
        stock_quantity,
        featured,
        metadata: Some(metadata),
    }
}

fn sample_products() -> Vec<NewProduct> {
    vec![
        sample(
            "Bohemian Wall Hanging",
            Decimal::new(8999, 2),
            "Wall Art",
            "/images/IMG_3122.JPG",
            "Beautiful handcrafted macramé wall hanging featuring intricate patterns and natural cotton cord.",
            5,
            true,
            metadata(
                &["Cotton Cord", "Natural Fibers"],
                "24\" x 36\"",
                "Gentle hand wash, air dry",
            ),
        ),
        sample(
            "Spiral Plant Hanger",
            Decimal::new(4550, 2),
            "Plant Hangers",
            "/images/IMG_3131.JPG",
            "Elegant spiral design plant hanger perfect for your favorite hanging plants.",
            8,
            true,
            metadata(&["Jute Cord"], "36\" length", "Spot clean only"),
        ),
        sample(
            "Macramé Table Runner",
            Decimal::new(6500, 2),
            "Home Decor",
            "/images/IMG_3136.JPG",
            "Sophisticated table runner that adds a touch of boho elegance to any dining space.",
            3,
            false,
            metadata(&["Cotton Cord"], "72\" x 12\"", "Machine washable, cold water"),
        ),
        sample(
            "Feather Wall Art",
            Decimal::new(7299, 2),
            "Wall Art",
            "/images/IMG_3139.JPG",
            "Stunning feather-inspired macramé piece that creates beautiful shadows and textures.",
            4,
            true,
            metadata(
                &["Cotton Cord", "Natural Dyes"],
                "18\" x 42\"",
                "Dust gently with soft brush",
            ),
        ),
        sample(
            "Hanging Planters Set",
            Decimal::new(12000, 2),
            "Plant Hangers",
            "/images/IMG_3144.JPG",
            "Set of three matching plant hangers in different sizes for a cohesive look.",
            0,
            false,
            metadata(
                &["Jute Cord", "Wooden Rings"],
                "Small: 24\", Medium: 30\", Large: 36\"",
                "Spot clean only",
            ),
        ),
    ]
}
