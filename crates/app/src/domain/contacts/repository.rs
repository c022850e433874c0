//! Contacts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    contacts::{
        data::NewContact,
        records::{ContactRecord, ContactStatus, ContactUuid},
    },
    pagination::Page,
};

const CREATE_CONTACT_SQL: &str = include_str!("sql/create_contact.sql");
const LIST_CONTACTS_SQL: &str = include_str!("sql/list_contacts.sql");
const GET_CONTACT_SQL: &str = include_str!("sql/get_contact.sql");
const UPDATE_CONTACT_STATUS_SQL: &str = include_str!("sql/update_contact_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgContactsRepository;

impl PgContactsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_contact(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contact: ContactUuid,
        data: &NewContact,
    ) -> Result<ContactRecord, sqlx::Error> {
        query_as::<Postgres, ContactRecord>(CREATE_CONTACT_SQL)
            .bind(contact.into_uuid())
            .bind(&data.name)
            .bind(&data.email)
            .bind(&data.subject)
            .bind(&data.message)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_contacts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<ContactStatus>,
        page: Page,
    ) -> Result<Vec<ContactRecord>, sqlx::Error> {
        query_as::<Postgres, ContactRecord>(LIST_CONTACTS_SQL)
            .bind(status.map(ContactStatus::as_str))
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_contact(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contact: ContactUuid,
    ) -> Result<ContactRecord, sqlx::Error> {
        query_as::<Postgres, ContactRecord>(GET_CONTACT_SQL)
            .bind(contact.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contact: ContactUuid,
        status: ContactStatus,
    ) -> Result<ContactRecord, sqlx::Error> {
        query_as::<Postgres, ContactRecord>(UPDATE_CONTACT_STATUS_SQL)
            .bind(contact.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ContactRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<&str, _>("status")?
            .parse::<ContactStatus>()
            .map_err(|e| e.into_decode_error("status"))?;

        Ok(Self {
            uuid: ContactUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            subject: row.try_get("subject")?,
            message: row.try_get("message")?,
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
