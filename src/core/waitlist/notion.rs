//! Notion-backed waitlist store
//!
//! Each entry becomes a page in the configured database. The database needs
//! the properties `Name` (title), `Email`, `Phone`, `Meta Quest`, `Vision Pro`
//! and `Sign Up Date`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use super::WaitlistStore;
use super::model::{WaitlistEntry, WaitlistError};
use crate::core::config::Config;

/// Notion error body (subset)
#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    message: Option<String>,
}

/// Waitlist store writing to the Notion pages API
#[derive(Clone)]
pub struct NotionStore {
    client: reqwest::Client,
    api_base: String,
    version: String,
    api_key: Option<String>,
    database_id: Option<String>,
}

impl NotionStore {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.notion_api_base().to_string(),
            version: config.notion_version().to_string(),
            api_key: config.notion_api_key.clone(),
            database_id: config.notion_database_id.clone(),
        }
    }

    fn pages_url(&self) -> String {
        format!("{}/pages", self.api_base)
    }
}

impl WaitlistStore for NotionStore {
    async fn add_entry(&self, entry: &WaitlistEntry) -> Result<(), WaitlistError> {
        let database_id = self
            .database_id
            .as_deref()
            .ok_or(WaitlistError::NotConfigured("NOTION_DATABASE_ID"))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(WaitlistError::NotConfigured("NOTION_API_KEY"))?;

        let body = page_payload(database_id, entry, Utc::now());

        let response = self
            .client
            .post(self.pages_url())
            .bearer_auth(api_key)
            .header("Notion-Version", &self.version)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach Notion API: {}", e);
                upstream_error(500, &e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Notion page created for {}", entry.email);
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<NotionErrorBody>(&text)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| "Failed to add entry to Notion database".to_string());

        tracing::warn!("Notion API error {}: {}", status, text);
        Err(upstream_error(status.as_u16(), &message))
    }
}

fn upstream_error(status: u16, message: &str) -> WaitlistError {
    WaitlistError::UpstreamServiceError(format!("Notion API Error ({status}): {message}"))
}

/// Build the `POST /pages` body for one entry
pub fn page_payload(database_id: &str, entry: &WaitlistEntry, signed_up: DateTime<Utc>) -> Value {
    json!({
        "parent": { "database_id": database_id },
        "properties": {
            "Name": {
                "title": [{ "text": { "content": entry.name } }]
            },
            "Email": { "email": entry.email },
            "Phone": { "phone_number": entry.phone.clone().unwrap_or_default() },
            "Meta Quest": { "checkbox": entry.owns_meta_quest },
            "Vision Pro": { "checkbox": entry.owns_vision_pro },
            "Sign Up Date": {
                "date": { "start": signed_up.to_rfc3339() }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry() -> WaitlistEntry {
        WaitlistEntry {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            owns_meta_quest: true,
            owns_vision_pro: false,
        }
    }

    fn config(key: Option<&str>, db: Option<&str>) -> Config {
        Config {
            notion_api_key: key.map(str::to_string),
            notion_database_id: db.map(str::to_string),
            notion_api_base: None,
            notion_version: None,
        }
    }

    #[test]
    fn test_page_payload_properties() {
        let signed_up = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let payload = page_payload("db-123", &entry(), signed_up);

        assert_eq!(payload["parent"]["database_id"], "db-123");

        let props = &payload["properties"];
        assert_eq!(props["Name"]["title"][0]["text"]["content"], "Ada");
        assert_eq!(props["Email"]["email"], "ada@example.com");
        assert_eq!(props["Phone"]["phone_number"], "");
        assert_eq!(props["Meta Quest"]["checkbox"], true);
        assert_eq!(props["Vision Pro"]["checkbox"], false);
        assert_eq!(
            props["Sign Up Date"]["date"]["start"],
            "2025-03-01T12:00:00+00:00"
        );
    }

    #[test]
    fn test_pages_url() {
        let store = NotionStore::from_config(&config(Some("k"), Some("db")));
        assert_eq!(store.pages_url(), "https://api.notion.com/v1/pages");
    }

    #[tokio::test]
    async fn test_missing_database_id() {
        let store = NotionStore::from_config(&config(Some("secret"), None));
        let result = store.add_entry(&entry()).await;
        assert_eq!(
            result,
            Err(WaitlistError::NotConfigured("NOTION_DATABASE_ID"))
        );
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let store = NotionStore::from_config(&config(None, Some("db-123")));
        let result = store.add_entry(&entry()).await;
        assert_eq!(result, Err(WaitlistError::NotConfigured("NOTION_API_KEY")));
    }

    #[test]
    fn test_upstream_error_message() {
        assert_eq!(
            upstream_error(401, "API token is invalid.").to_string(),
            "Notion API Error (401): API token is invalid."
        );
    }
}
