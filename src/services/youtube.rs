// collabsync-service/src/services/youtube.rs
//
// Publishing Adapter Facade over the YouTube Data / Analytics REST APIs.
//
// The adapter is stateless: credentials are explicit parameters on every
// call, never stored, never refreshed here (token refresh is the User
// entity's concern). No call is retried; publish in particular is at-most-once
// per invocation, since a blind retry against the platform can create a
// duplicate upload.
use crate::models::{PlatformCredentials, ServiceError, VideoMetadata};
use chrono::Utc;
use log::error;
use serde_json::{json, Value};
use std::time::Duration;

const DATA_API: &str = "https://www.googleapis.com/youtube/v3";
const UPLOAD_API: &str = "https://www.googleapis.com/upload/youtube/v3";
const ANALYTICS_API: &str = "https://youtubeanalytics.googleapis.com/v2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

// Analytics window opens here unless the caller narrows it
const DEFAULT_ANALYTICS_START: &str = "2023-01-01";

// Capability boundary to the external video platform. Implemented by
// `YoutubeApi` in production and by stubs in tests.
pub trait PublishingPlatform {
    // Upload a video with its metadata; returns the platform's response for
    // the created video. Any transport or platform-side rejection is
    // PublishFailed and leaves no local state behind.
    fn publish(
        &self,
        creds: &PlatformCredentials,
        metadata: &VideoMetadata,
        media_url: &str,
    ) -> impl std::future::Future<Output = Result<Value, ServiceError>> + Send;

    // Channel info for a bound channel id
    fn fetch_channel(
        &self,
        creds: &PlatformCredentials,
        channel_id: &str,
    ) -> impl std::future::Future<Output = Result<Value, ServiceError>> + Send;

    // Day-by-day channel analytics time series
    fn fetch_analytics(
        &self,
        creds: &PlatformCredentials,
        channel_id: &str,
        start_date: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Value, ServiceError>> + Send;

    // Best-performing videos of a channel, by view count
    fn fetch_top_videos(
        &self,
        creds: &PlatformCredentials,
        channel_id: &str,
        max_results: u32,
    ) -> impl std::future::Future<Output = Result<Value, ServiceError>> + Send;

    // The caller's own channel id, if any. Used for best-effort channel
    // binding at workspace creation.
    fn resolve_own_channel(
        &self,
        creds: &PlatformCredentials,
    ) -> impl std::future::Future<Output = Result<Option<String>, ServiceError>> + Send;
}

// Real adapter. Holds only an HTTP client; constructed per request, no
// process-wide singleton.
pub struct YoutubeApi {
    http: reqwest::Client,
}

impl YoutubeApi {
    pub fn new() -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                error!("❌ Failed to build HTTP client: {:?}", e);
                ServiceError::Internal
            })?;

        Ok(Self { http })
    }

    async fn get_json(
        &self,
        creds: &PlatformCredentials,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Value, ServiceError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&creds.access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!("❌ Platform request failed: {:?}", e);
                ServiceError::ExternalService(format!("request to platform failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("❌ Platform returned {}: {}", status, body);
            return Err(ServiceError::ExternalService(format!(
                "platform returned status {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            error!("❌ Malformed platform response: {:?}", e);
            ServiceError::ExternalService("malformed platform response".to_string())
        })
    }
}

impl PublishingPlatform for YoutubeApi {
    async fn publish(
        &self,
        creds: &PlatformCredentials,
        metadata: &VideoMetadata,
        media_url: &str,
    ) -> Result<Value, ServiceError> {
        let body = json!({
            "snippet": {
                "title": metadata.title,
                "description": metadata.description,
                "tags": metadata.tags,
            },
            "status": {
                "privacyStatus": metadata.privacy_status.as_deref().unwrap_or("private"),
            },
        });

        // Open a resumable upload session for the metadata
        let session = self
            .http
            .post(format!("{}/videos", UPLOAD_API))
            .bearer_auth(&creds.access_token)
            .query(&[("uploadType", "resumable"), ("part", "snippet,status")])
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::PublishFailed(format!("upload session failed: {}", e)))?;

        if !session.status().is_success() {
            return Err(ServiceError::PublishFailed(format!(
                "platform refused upload session: status {}",
                session.status()
            )));
        }

        let upload_url = session
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                ServiceError::PublishFailed("upload session returned no location".to_string())
            })?;

        // Pull the media from its locator and hand it to the session.
        // The service core never sees these bytes; they stay inside the facade.
        let media = self
            .http
            .get(media_url)
            .timeout(UPLOAD_TIMEOUT)
            .send()
            .await
            .map_err(|e| ServiceError::PublishFailed(format!("media fetch failed: {}", e)))?;

        if !media.status().is_success() {
            return Err(ServiceError::PublishFailed(format!(
                "media locator returned status {}",
                media.status()
            )));
        }

        let bytes = media
            .bytes()
            .await
            .map_err(|e| ServiceError::PublishFailed(format!("media read failed: {}", e)))?;

        let uploaded = self
            .http
            .put(&upload_url)
            .bearer_auth(&creds.access_token)
            .timeout(UPLOAD_TIMEOUT)
            .body(bytes)
            .send()
            .await
            .map_err(|e| ServiceError::PublishFailed(format!("media upload failed: {}", e)))?;

        if !uploaded.status().is_success() {
            return Err(ServiceError::PublishFailed(format!(
                "platform rejected upload: status {}",
                uploaded.status()
            )));
        }

        uploaded
            .json()
            .await
            .map_err(|_| ServiceError::PublishFailed("malformed upload response".to_string()))
    }

    async fn fetch_channel(
        &self,
        creds: &PlatformCredentials,
        channel_id: &str,
    ) -> Result<Value, ServiceError> {
        self.get_json(
            creds,
            &format!("{}/channels", DATA_API),
            &[
                ("part", "snippet,statistics".to_string()),
                ("id", channel_id.to_string()),
            ],
        )
        .await
    }

    async fn fetch_analytics(
        &self,
        creds: &PlatformCredentials,
        channel_id: &str,
        start_date: Option<&str>,
    ) -> Result<Value, ServiceError> {
        let end_date = Utc::now().format("%Y-%m-%d").to_string();
        self.get_json(
            creds,
            &format!("{}/reports", ANALYTICS_API),
            &[
                ("ids", format!("channel=={}", channel_id)),
                (
                    "startDate",
                    start_date.unwrap_or(DEFAULT_ANALYTICS_START).to_string(),
                ),
                ("endDate", end_date),
                ("metrics", "views,comments,likes,dislikes,shares".to_string()),
                ("dimensions", "day".to_string()),
                ("sort", "day".to_string()),
            ],
        )
        .await
    }

    async fn fetch_top_videos(
        &self,
        creds: &PlatformCredentials,
        channel_id: &str,
        max_results: u32,
    ) -> Result<Value, ServiceError> {
        let search = self
            .get_json(
                creds,
                &format!("{}/search", DATA_API),
                &[
                    ("part", "id".to_string()),
                    ("channelId", channel_id.to_string()),
                    ("maxResults", max_results.to_string()),
                    ("order", "viewCount".to_string()),
                    ("type", "video".to_string()),
                ],
            )
            .await?;

        let video_ids: Vec<&str> = search["items"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item["id"]["videoId"].as_str())
                    .collect()
            })
            .unwrap_or_default();

        if video_ids.is_empty() {
            return Ok(json!({ "items": [] }));
        }

        self.get_json(
            creds,
            &format!("{}/videos", DATA_API),
            &[
                ("part", "snippet,statistics".to_string()),
                ("id", video_ids.join(",")),
            ],
        )
        .await
    }

    async fn resolve_own_channel(
        &self,
        creds: &PlatformCredentials,
    ) -> Result<Option<String>, ServiceError> {
        let response = self
            .get_json(
                creds,
                &format!("{}/channels", DATA_API),
                &[("part", "id".to_string()), ("mine", "true".to_string())],
            )
            .await?;

        Ok(response["items"]
            .as_array()
            .and_then(|items| items.first())
            .and_then(|item| item["id"].as_str())
            .map(str::to_string))
    }
}
