//! Supabase adapters for object storage and the mockup catalog.
//!
//! Talks to the Storage and PostgREST HTTP APIs with a blocking client;
//! publishing is sequential so there is nothing to gain from async here.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde_json::json;

use crate::config::{Credentials, ENV_URL};
use crate::error::{MockupError, Result};

use super::storage::{CatalogRecord, CatalogStore, ObjectStorage};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Authenticated connection to a Supabase project.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base: Url,
    key: String,
}

impl SupabaseClient {
    pub fn new(credentials: Credentials<'_>) -> Result<Self> {
        let base = Url::parse(credentials.url).map_err(|e| MockupError::Config {
            message: format!("Invalid Supabase URL '{}': {}", credentials.url, e),
            help: Some(format!("{} should look like https://<project>.supabase.co", ENV_URL)),
        })?;

        if base.cannot_be_a_base() {
            return Err(MockupError::Config {
                message: format!("Supabase URL '{}' cannot have a path", credentials.url),
                help: None,
            });
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MockupError::Config {
                message: format!("Failed to create HTTP client: {}", e),
                help: None,
            })?;

        Ok(Self {
            http,
            base,
            key: credentials.service_key.to_string(),
        })
    }

    /// Append path segments to the project URL, percent-encoding each.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", &self.key).bearer_auth(&self.key)
    }
}

/// Read an error body from a non-success response.
fn check(response: Response) -> std::result::Result<(), String> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().unwrap_or_default();
    Err(format!("{} {}", status, body.trim()))
}

/// A Supabase Storage bucket.
pub struct SupabaseStorage {
    client: SupabaseClient,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(client: SupabaseClient, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    fn object_url(&self, scope: &[&str], key: &str) -> Url {
        let segments = ["storage", "v1", "object"]
            .into_iter()
            .chain(scope.iter().copied())
            .chain(std::iter::once(self.bucket.as_str()))
            .chain(key.split('/'));
        self.client.endpoint(segments)
    }
}

impl ObjectStorage for SupabaseStorage {
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()> {
        let url = self.object_url(&[], key);
        let request = self
            .client
            .http
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes.to_vec());

        let response = self
            .client
            .authorized(request)
            .send()
            .map_err(|e| MockupError::Storage {
                message: format!("Upload failed for {}: {}", key, e),
            })?;

        check(response).map_err(|message| MockupError::Storage {
            message: format!("Upload failed for {}: {}", key, message),
        })
    }

    fn public_url(&self, key: &str) -> Result<Option<String>> {
        Ok(Some(self.object_url(&["public"], key).to_string()))
    }

    fn delete(&self, keys: &[String]) -> Result<()> {
        let url = self.client.endpoint(["storage", "v1", "object", self.bucket.as_str()]);
        let request = self.client.http.delete(url).json(&json!({ "prefixes": keys }));

        let response = self
            .client
            .authorized(request)
            .send()
            .map_err(|e| MockupError::Storage {
                message: format!("Delete failed: {}", e),
            })?;

        check(response).map_err(|message| MockupError::Storage {
            message: format!("Delete failed: {}", message),
        })
    }
}

/// A PostgREST table holding catalog records.
pub struct SupabaseCatalog {
    client: SupabaseClient,
    table: String,
}

impl SupabaseCatalog {
    pub fn new(client: SupabaseClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

impl CatalogStore for SupabaseCatalog {
    fn insert(&self, record: &CatalogRecord) -> Result<()> {
        let url = self.client.endpoint(["rest", "v1", self.table.as_str()]);
        let request = self
            .client
            .http
            .post(url)
            .header("Prefer", "return=minimal")
            .json(record);

        let response = self
            .client
            .authorized(request)
            .send()
            .map_err(|e| MockupError::Catalog {
                message: format!("Database insert failed: {}", e),
            })?;

        check(response).map_err(|message| MockupError::Catalog {
            message: format!("Database insert failed: {}", message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SupabaseClient {
        SupabaseClient::new(Credentials {
            url: "https://demo.supabase.co",
            service_key: "key",
        })
        .unwrap()
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let result = SupabaseClient::new(Credentials {
            url: "not a url",
            service_key: "key",
        });
        assert!(matches!(result, Err(MockupError::Config { .. })));
    }

    #[test]
    fn test_public_url_encodes_segments() {
        let storage = SupabaseStorage::new(client(), "files");

        let url = storage
            .public_url("online-mockups/Mug Front/beauty.jpg")
            .unwrap()
            .unwrap();

        assert_eq!(
            url,
            "https://demo.supabase.co/storage/v1/object/public/files/online-mockups/Mug%20Front/beauty.jpg"
        );
    }

    #[test]
    fn test_object_url() {
        let storage = SupabaseStorage::new(client(), "files");
        let url = storage.object_url(&[], "ns/shirt/mockup.json");

        assert_eq!(
            url.as_str(),
            "https://demo.supabase.co/storage/v1/object/files/ns/shirt/mockup.json"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let client = SupabaseClient::new(Credentials {
            url: "https://demo.supabase.co/",
            service_key: "key",
        })
        .unwrap();

        assert_eq!(
            client.endpoint(["rest", "v1", "mockups"]).as_str(),
            "https://demo.supabase.co/rest/v1/mockups"
        );
    }
}
