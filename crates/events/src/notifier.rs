//! The notifier seam between the API and delivery channels.

use async_trait::async_trait;

/// What gets announced when a movie is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieAnnouncement {
    pub title: String,
    pub poster: String,
    /// Public page of the movie on the client site.
    pub watch_url: String,
}

/// Error type for notification delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The underlying HTTP request failed (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// The remote API answered with a non-2xx status.
    #[error("Notification API returned HTTP {status}: {description}")]
    Api { status: u16, description: String },
}

// Bot API URLs embed the credential, so it never reaches the error text.
impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        NotifyError::Request(err.without_url())
    }
}

/// Publishes movie announcements to an external audience.
#[async_trait]
pub trait MovieNotifier: Send + Sync {
    /// Deliver one announcement. Returns `Ok(())` once the channel accepted it.
    async fn movie_published(&self, announcement: &MovieAnnouncement) -> Result<(), NotifyError>;

    /// Whether this notifier actually delivers anywhere.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Notifier used when no channel is configured: accepts and drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl MovieNotifier for NoopNotifier {
    async fn movie_published(&self, announcement: &MovieAnnouncement) -> Result<(), NotifyError> {
        tracing::debug!(title = %announcement.title, "Notifications disabled, skipping announcement");
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_accepts_everything() {
        let notifier = NoopNotifier;
        let announcement = MovieAnnouncement {
            title: "Dune".into(),
            poster: String::new(),
            watch_url: "http://localhost:3000/movie/dune".into(),
        };
        assert!(notifier.movie_published(&announcement).await.is_ok());
        assert!(!notifier.is_enabled());
    }
}
