//! Background delivery worker

use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tokio::{
    sync::mpsc,
    task::{JoinError, JoinHandle},
    time,
};
use tracing::{debug, info, warn};

use crate::notifications::{Mailer, MailerError, Notification, NotificationRenderer, Notifier};

/// Hands notifications to a background task that renders and sends them.
///
/// The worker exits once every queue handle has been dropped and the backlog
/// is drained.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    sender: mpsc::UnboundedSender<Notification>,
}

impl NotificationQueue {
    /// Spawn the delivery worker on the current runtime.
    #[must_use]
    pub fn start(
        renderer: NotificationRenderer,
        mailer: Arc<dyn Mailer>,
    ) -> (Self, NotificationWorker) {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Notification>();

        let handle = tokio::spawn(async move {
            while let Some(notification) = receiver.recv().await {
                deliver(&renderer, mailer.as_ref(), notification).await;
            }

            debug!("notification worker stopped");
        });

        (Self { sender }, NotificationWorker { handle })
    }
}

#[derive(Debug, Error)]
pub enum DrainError {
    #[error("notification backlog not delivered within {0:?}")]
    TimedOut(Duration),

    #[error("notification worker failed")]
    Worker(#[source] JoinError),
}

/// Handle to the delivery task started by [`NotificationQueue::start`].
#[derive(Debug)]
pub struct NotificationWorker {
    handle: JoinHandle<()>,
}

impl NotificationWorker {
    /// Wait for queued notifications to be delivered.
    ///
    /// The worker only finishes once every [`NotificationQueue`] handle has
    /// been dropped, so call this after the services holding them are gone.
    ///
    /// # Errors
    ///
    /// Returns [`DrainError::TimedOut`] when the backlog is still being
    /// delivered after `grace`, and [`DrainError::Worker`] if the task panicked.
    pub async fn drain(self, grace: Duration) -> Result<(), DrainError> {
        match time::timeout(grace, self.handle).await {
            Ok(joined) => joined.map_err(DrainError::Worker),
            Err(_elapsed) => Err(DrainError::TimedOut(grace)),
        }
    }
}

impl Notifier for NotificationQueue {
    fn notify(&self, notification: Notification) {
        if let Err(error) = self.sender.send(notification) {
            warn!(
                kind = error.0.kind(),
                "notification worker is not running, dropping notification"
            );
        }
    }
}

async fn deliver(renderer: &NotificationRenderer, mailer: &dyn Mailer, notification: Notification) {
    let kind = notification.kind();

    let message = match renderer.render(&notification) {
        Ok(message) => message,
        Err(error) => {
            warn!(kind, error = %error, "failed to render notification");
            return;
        }
    };

    let to = message.to.clone();

    match mailer.send(message).await {
        Ok(()) => info!(kind, to = %to, "notification sent"),
        Err(MailerError::NotConfigured) => {
            warn!(kind, to = %to, "SMTP credentials not configured, notification not sent");
        }
        Err(error) => warn!(kind, to = %to, error = %error, "failed to send notification"),
    }
}
