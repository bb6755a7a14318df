//! the hosted record store
use {
    crate::{
        error::{Result, ThemeError},
        settings::record::RawSettingsRecord,
    },
    async_trait::async_trait,
    reqwest::{Client, RequestBuilder, header::HeaderValue},
    tracing::debug,
    url::Url,
};

/// somewhere settings rows can be written to and read from
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// insert the row, or replace the row with the same key
    async fn upsert(&self, record: &RawSettingsRecord) -> Result<()>;

    /// fetch the row with this key, if there is one
    async fn fetch(&self, key: &str) -> Result<Option<RawSettingsRecord>>;
}

/// a PostgREST-style table of settings rows (`{base_url}/rest/v1/{table}`)
///
/// requests carry no timeout; a save resolves or fails on its own
#[derive(Debug, Clone)]
pub struct RestRecordStore {
    /// the http client
    client: Client,
    /// the table endpoint
    endpoint: Url,
    /// sent as both `apikey` and the bearer token
    api_key: Option<String>,
}

impl RestRecordStore {
    /// make a store for `table` on the service at `base_url`
    ///
    /// # Errors
    ///
    /// returns an error if `base_url` isn't a url or the client can't be built
    pub fn new(base_url: &str, table: &str, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Self::with_client(client, base_url, table, api_key)
    }

    /// like [`RestRecordStore::new`], but with a client you've built yourself
    ///
    /// # Errors
    ///
    /// returns an error if `base_url` isn't a url
    pub fn with_client(
        client: Client,
        base_url: &str,
        table: &str,
        api_key: Option<String>,
    ) -> Result<Self> {
        let mut base = Url::parse(base_url)?;

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let endpoint = base.join(&format!("rest/v1/{}", table))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// the table endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// attach the api key, if there is one
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("apikey", key).bearer_auth(key),
            None => request,
        }
    }

    /// turn a non-2xx response into an error
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ThemeError::RemoteStatus {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl RecordStore for RestRecordStore {
    async fn upsert(&self, record: &RawSettingsRecord) -> Result<()> {
        debug!("upserting `{}` settings to {}", record.key, self.endpoint);

        let request = self
            .client
            .post(self.endpoint.clone())
            .query(&[("on_conflict", "key")])
            .header(
                "Prefer",
                HeaderValue::from_static("resolution=merge-duplicates,return=minimal"),
            )
            .json(record);

        Self::check(self.authorize(request).send().await?).await?;
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<Option<RawSettingsRecord>> {
        debug!("fetching `{}` settings from {}", key, self.endpoint);

        let request = self
            .client
            .get(self.endpoint.clone())
            .query(&[("key", format!("eq.{}", key)), ("select", "*".to_string())]);

        let response = Self::check(self.authorize(request).send().await?).await?;
        let rows: Vec<RawSettingsRecord> = response.json().await?;

        Ok(rows.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        serde_json::json,
        tokio::{
            io::{AsyncReadExt, AsyncWriteExt},
            net::TcpListener,
            task::JoinHandle,
        },
    };

    /// answer one http request with `status` and a json `body`, handing back the
    /// raw request that came in
    async fn answer_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];

            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();

                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);

                    if request.len() >= end + 4 + length || n == 0 {
                        break;
                    }
                } else if n == 0 {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&request).to_string()
        });

        (base_url, handle)
    }

    fn store(base_url: &str) -> RestRecordStore {
        let client = Client::builder().no_proxy().build().unwrap();
        RestRecordStore::with_client(client, base_url, "site_settings", Some("anon-key".to_string()))
            .unwrap()
    }

    fn theme_row() -> RawSettingsRecord {
        RawSettingsRecord {
            key: "theme".to_string(),
            value: json!({ "current": "classic", "available": ["luxury", "classic"] }),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_sends_merge_request() {
        let (base_url, server) = answer_once("201 Created", "").await;

        store(&base_url).upsert(&theme_row()).await.unwrap();

        let request = server.await.unwrap();
        let lower = request.to_lowercase();
        assert!(request.starts_with("POST /rest/v1/site_settings?on_conflict=key HTTP/1.1"));
        assert!(lower.contains("prefer: resolution=merge-duplicates"));
        assert!(lower.contains("apikey: anon-key"));
        assert!(lower.contains("authorization: bearer anon-key"));
        assert!(request.contains(r#""current":"classic""#));
    }

    #[tokio::test]
    async fn test_server_error_becomes_remote_status() {
        let (base_url, server) = answer_once("503 Service Unavailable", "unavailable").await;

        let result = store(&base_url).upsert(&theme_row()).await;
        server.await.unwrap();

        assert!(matches!(
            result,
            Err(ThemeError::RemoteStatus { status: 503, ref body }) if body == "unavailable"
        ));
    }

    #[tokio::test]
    async fn test_fetch_empty_rows_is_none() {
        let (base_url, server) = answer_once("200 OK", "[]").await;

        let row = store(&base_url).fetch("theme").await.unwrap();

        let request = server.await.unwrap();
        assert!(row.is_none());
        assert!(request.starts_with("GET /rest/v1/site_settings?key=eq.theme&select=*"));
    }

    #[tokio::test]
    async fn test_fetch_returns_first_row() {
        let (base_url, server) = answer_once(
            "200 OK",
            r#"[{"key":"theme","value":{"current":"emerald","available":["emerald"]},"updated_at":"2026-03-01T09:30:00Z"}]"#,
        )
        .await;

        let row = store(&base_url).fetch("theme").await.unwrap().unwrap();
        server.await.unwrap();

        assert_eq!(row.key, "theme");
        assert_eq!(row.value["current"], "emerald");
        assert!(row.updated_at.is_some());
    }

    #[test]
    fn test_endpoint_joins_table() {
        let store = RestRecordStore::new("https://db.example.com", "site_settings", None).unwrap();
        assert_eq!(
            store.endpoint().as_str(),
            "https://db.example.com/rest/v1/site_settings"
        );

        let store = RestRecordStore::new("https://example.com/api", "site_settings", None).unwrap();
        assert_eq!(
            store.endpoint().as_str(),
            "https://example.com/api/rest/v1/site_settings"
        );
    }

    #[test]
    fn test_bad_base_url() {
        assert!(matches!(
            RestRecordStore::new("not a url", "site_settings", None),
            Err(ThemeError::InvalidUrl(_))
        ));
    }
}
