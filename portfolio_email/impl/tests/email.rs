//! Delivery test against an smtp4dev instance.
//!
//! Requires `SMTP4DEV_URL` (web api, e.g. `http://127.0.0.1:5080/`) and
//! `SMTP4DEV_SMTP` (smtp endpoint, e.g. `127.0.0.1:2525`). The test is a no-op
//! if they are not set.

use std::time::{Duration, Instant};

use portfolio_email_contracts::{ContentType, Email, EmailService};
use portfolio_email_impl::{EmailServiceImpl, SmtpConfig};
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

#[tokio::test]
async fn send_email() {
    let Some(client) = setup().await else {
        eprintln!("SMTP4DEV_URL or SMTP4DEV_SMTP not set, skipping");
        return;
    };

    let result = client
        .email
        .send(Email {
            recipient: "owner@example.com".parse().unwrap(),
            subject: "Portfolio Contact Form: Message from Ada".into(),
            body: "<h1>Hello World!</h1>".into(),
            content_type: ContentType::Html,
            reply_to: Some("ada@example.com".parse().unwrap()),
        })
        .await
        .unwrap();

    assert!(result);

    let mail = client.wait_for_mail().await;
    assert_eq!(mail.from, "sender@example.com");
    assert_eq!(mail.to, "owner@example.com");
    assert_eq!(mail.subject, "Portfolio Contact Form: Message from Ada");

    let details = client.fetch_email_details(mail.id).await;
    let reply_to = details
        .headers
        .into_iter()
        .find(|h| h.name == "Reply-To")
        .unwrap();
    assert_eq!(reply_to.value, "ada@example.com");

    let source = client.fetch_email_source(mail.id).await;
    assert!(source.contains("<h1>Hello World!</h1>"));
}

#[tokio::test]
async fn unreachable_relay() {
    let config = SmtpConfig {
        host: "127.0.0.1".into(),
        port: 1,
        starttls: false,
        credentials: None,
        timeout: Some(Duration::from_secs(2)),
    };
    let email = EmailServiceImpl::new(&config, "sender@example.com".parse().unwrap()).unwrap();

    let result = email
        .send(Email {
            recipient: "owner@example.com".parse().unwrap(),
            subject: "Test".into(),
            body: "Hello World!".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await;

    assert!(result.is_err());
    assert!(email.ping().await.is_err());
}

struct TestClient {
    email: EmailServiceImpl,
    smtp4dev_url: Url,
}

impl TestClient {
    async fn reset(&self) {
        reqwest::Client::new()
            .delete(self.smtp4dev_url.join("api/Messages/*").unwrap())
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap();
    }

    async fn wait_for_mail(&self) -> EmailSummary {
        let now = Instant::now();
        while now.elapsed() < Duration::from_secs(2) {
            let mut mailbox = self.fetch_mailbox().await;
            if let Some(mail) = mailbox.pop() {
                return mail;
            }
        }
        panic!("No email received");
    }

    async fn fetch_mailbox(&self) -> Vec<EmailSummary> {
        reqwest::Client::new()
            .get(self.smtp4dev_url.join("api/Messages").unwrap())
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap()
            .json::<PaginationResponse<_>>()
            .await
            .unwrap()
            .results
    }

    async fn fetch_email_details(&self, id: Uuid) -> EmailDetails {
        reqwest::Client::new()
            .get(
                self.smtp4dev_url
                    .join(&format!("api/Messages/{id}"))
                    .unwrap(),
            )
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    async fn fetch_email_source(&self, id: Uuid) -> String {
        reqwest::Client::new()
            .get(
                self.smtp4dev_url
                    .join(&format!("api/Messages/{id}/source"))
                    .unwrap(),
            )
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap()
            .text()
            .await
            .unwrap()
    }
}

async fn setup() -> Option<TestClient> {
    let smtp4dev_url = std::env::var("SMTP4DEV_URL").ok()?.parse().unwrap();
    let smtp = std::env::var("SMTP4DEV_SMTP").ok()?;
    let (host, port) = smtp.rsplit_once(':').unwrap();

    let config = SmtpConfig {
        host: host.into(),
        port: port.parse().unwrap(),
        starttls: false,
        credentials: None,
        timeout: Some(Duration::from_secs(5)),
    };
    let email = EmailServiceImpl::new(&config, "sender@example.com".parse().unwrap()).unwrap();

    let client = TestClient {
        email,
        smtp4dev_url,
    };

    client.reset().await;

    Some(client)
}

#[derive(Debug, Deserialize)]
struct PaginationResponse<T> {
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct EmailSummary {
    id: Uuid,
    from: String,
    to: String,
    subject: String,
}

#[derive(Debug, Deserialize)]
struct EmailDetails {
    headers: Vec<EmailHeader>,
}

#[derive(Debug, Deserialize)]
struct EmailHeader {
    name: String,
    value: String,
}
