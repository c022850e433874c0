//! Contacts service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        contacts::{
            data::NewContact,
            errors::ContactsServiceError,
            records::{ContactRecord, ContactStatus, ContactUuid},
            repository::PgContactsRepository,
        },
        pagination::{Page, PageBounds},
        users::data::is_valid_email,
    },
    notifications::{Notification, Notifier},
};

/// Paging for the admin inbox.
pub const CONTACTS_PAGE: PageBounds = PageBounds::new(50, 100);

#[derive(Clone)]
pub struct PgContactsService {
    db: Db,
    repository: PgContactsRepository,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for PgContactsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgContactsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgContactsService {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            repository: PgContactsRepository::new(),
            notifier,
        }
    }
}

#[async_trait]
impl ContactsService for PgContactsService {
    async fn submit(&self, contact: NewContact) -> Result<ContactRecord, ContactsServiceError> {
        let contact = NewContact {
            email: contact.email.trim().to_string(),
            ..contact
        };

        if !is_valid_email(&contact.email) {
            return Err(ContactsServiceError::InvalidData("invalid email address"));
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_contact(&mut tx, ContactUuid::new(), &contact)
            .await?;

        tx.commit().await?;

        info!(contact = %created.uuid, "received contact message");

        self.notifier.notify(Notification::ContactAlert {
            contact: created.clone(),
        });

        Ok(created)
    }

    async fn list_contacts(
        &self,
        status: Option<ContactStatus>,
        page: Page,
    ) -> Result<Vec<ContactRecord>, ContactsServiceError> {
        let mut tx = self.db.begin().await?;

        let contacts = self.repository.list_contacts(&mut tx, status, page).await?;

        tx.commit().await?;

        Ok(contacts)
    }

    async fn get_contact(&self, contact: ContactUuid) -> Result<ContactRecord, ContactsServiceError> {
        let mut tx = self.db.begin().await?;

        let contact = self.repository.get_contact(&mut tx, contact).await?;

        tx.commit().await?;

        Ok(contact)
    }

    async fn update_status(
        &self,
        contact: ContactUuid,
        status: ContactStatus,
    ) -> Result<ContactRecord, ContactsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_status(&mut tx, contact, status).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ContactsService: Send + Sync {
    /// Store a public submission with status `new` and alert the admin.
    async fn submit(&self, contact: NewContact) -> Result<ContactRecord, ContactsServiceError>;

    /// Messages newest first, optionally filtered by status.
    async fn list_contacts(
        &self,
        status: Option<ContactStatus>,
        page: Page,
    ) -> Result<Vec<ContactRecord>, ContactsServiceError>;

    async fn get_contact(&self, contact: ContactUuid) -> Result<ContactRecord, ContactsServiceError>;

    async fn update_status(
        &self,
        contact: ContactUuid,
        status: ContactStatus,
    ) -> Result<ContactRecord, ContactsServiceError>;
}
