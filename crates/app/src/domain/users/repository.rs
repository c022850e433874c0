//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    types::Json,
};

use crate::domain::{
    pagination::Page,
    users::{
        data::{NewUser, ProfileUpdate},
        records::{Address, UserRecord, UserRole, UserUuid},
    },
};

const FIND_USER_SQL: &str = include_str!("sql/find_user.sql");
const FIND_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_user_by_email.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const UPDATE_USER_PROFILE_SQL: &str = include_str!("sql/update_user_profile.sql");
const UPDATE_USER_PASSWORD_SQL: &str = include_str!("sql/update_user_password.sql");
const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const SET_USER_ACTIVE_SQL: &str = include_str!("sql/set_user_active.sql");
const COUNT_ADMINS_SQL: &str = include_str!("sql/count_admins.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_user_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_USER_PROFILE_SQL)
            .bind(user.into_uuid())
            .bind(update.first_name)
            .bind(update.last_name)
            .bind(update.address.map(Json))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_password(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_USER_PASSWORD_SQL)
            .bind(email)
            .bind(password_hash)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: Page,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LIST_USERS_SQL)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn set_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        is_active: bool,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(SET_USER_ACTIVE_SQL)
            .bind(user.into_uuid())
            .bind(is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_admins(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_ADMINS_SQL).fetch_one(&mut **tx).await
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role = row
            .try_get::<&str, _>("role")?
            .parse::<UserRole>()
            .map_err(|e| e.into_decode_error("role"))?;

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            role,
            is_active: row.try_get("is_active")?,
            address: row
                .try_get::<Option<Json<Address>>, _>("address")?
                .map(|address| address.0),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
