use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::instrument;

use crate::model::{Collection, CollectionId, CollectionMetadata, CollectionPatch, LibraryAsset};

use super::{
    AdapterError, AdapterResult, AssetLibrary, AssetUploader, CollectionStore, Credentials,
    TokenSource, UploadFile, UploadedAsset,
};

/// Collection store behind the metadata API, rooted at `{base_url}/albums`.
/// Requests carry the bearer credential when one is available.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl HttpStore {
    pub fn new(client: Client, base_url: impl Into<String>, credentials: Credentials) -> HttpStore {
        HttpStore {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            credentials,
        }
    }

    async fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.bearer().await {
            Some(bearer) => request.bearer_auth(bearer),
            None => request,
        }
    }

    fn collections_url(&self) -> String {
        format!("{}/albums", self.base_url)
    }

    fn collection_url(&self, id: &CollectionId) -> String {
        format!("{}/albums/{}", self.base_url, id)
    }
}

#[async_trait]
impl CollectionStore for HttpStore {
    #[instrument(skip(self), level = "debug")]
    async fn list(&self) -> AdapterResult<Vec<Collection>> {
        let response = self
            .authorized(self.client.get(self.collections_url()))
            .await
            .send()
            .await?;
        Ok(check_response(response).await?.json().await?)
    }

    #[instrument(skip(self), level = "debug")]
    async fn create(&self, metadata: CollectionMetadata) -> AdapterResult<Collection> {
        let response = self
            .authorized(self.client.post(self.collections_url()))
            .await
            .json(&metadata)
            .send()
            .await?;
        Ok(check_response(response).await?.json().await?)
    }

    #[instrument(skip(self), level = "debug")]
    async fn update(&self, id: &CollectionId, patch: CollectionPatch) -> AdapterResult<Collection> {
        let response = self
            .authorized(self.client.put(self.collection_url(id)))
            .await
            .json(&patch)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AdapterError::NotFound(id.clone()));
        }
        Ok(check_response(response).await?.json().await?)
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete(&self, id: &CollectionId) -> AdapterResult<()> {
        let response = self
            .authorized(self.client.delete(self.collection_url(id)))
            .await
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AdapterError::NotFound(id.clone()));
        }
        check_response(response).await?;
        Ok(())
    }
}

/// Uploads single files as `multipart/form-data` with the binary in the `file` part.
#[derive(Debug, Clone)]
pub struct HttpUploader {
    client: Client,
    upload_url: String,
}

impl HttpUploader {
    pub fn new(client: Client, upload_url: impl Into<String>) -> HttpUploader {
        HttpUploader {
            client,
            upload_url: upload_url.into(),
        }
    }
}

#[async_trait]
impl AssetUploader for HttpUploader {
    #[instrument(skip(self, bearer), level = "debug")]
    async fn upload(&self, file: UploadFile, bearer: &str) -> AdapterResult<UploadedAsset> {
        let part = multipart::Part::bytes(file.bytes).file_name(file.file_name);
        let form = multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(&self.upload_url)
            .bearer_auth(bearer)
            .multipart(form)
            .send()
            .await?;
        Ok(check_response(response).await?.json().await?)
    }
}

#[derive(Debug, Clone)]
pub struct HttpLibrary {
    client: Client,
    library_url: String,
}

impl HttpLibrary {
    pub fn new(client: Client, library_url: impl Into<String>) -> HttpLibrary {
        HttpLibrary {
            client,
            library_url: library_url.into(),
        }
    }
}

#[async_trait]
impl AssetLibrary for HttpLibrary {
    #[instrument(skip(self, bearer), level = "debug")]
    async fn list_assets(&self, bearer: &str) -> AdapterResult<Vec<LibraryAsset>> {
        let response = self
            .client
            .get(&self.library_url)
            .bearer_auth(bearer)
            .send()
            .await?;
        Ok(check_response(response).await?.json().await?)
    }
}

async fn check_response(response: Response) -> AdapterResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AdapterError::Rejected(rejection_message(status, &body)))
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn rejection_message(status: StatusCode, body: &str) -> String {
    if let Ok(error_body) = serde_json::from_str::<ErrorBody>(body) {
        return error_body.message;
    }
    let body = body.trim();
    if body.is_empty() {
        format!("request failed with status {}", status)
    } else {
        body.to_owned()
    }
}

#[cfg(test)]
mod test {
    use reqwest::header::AUTHORIZATION;

    use super::*;
    use crate::adapter::StaticToken;

    #[test]
    fn rejection_message_prefers_json_message() {
        assert_eq!(
            rejection_message(
                StatusCode::BAD_REQUEST,
                r#"{"message": "Title is required"}"#
            ),
            "Title is required"
        );
        assert_eq!(
            rejection_message(StatusCode::FORBIDDEN, "  not allowed\n"),
            "not allowed"
        );
        assert_eq!(
            rejection_message(StatusCode::BAD_GATEWAY, ""),
            "request failed with status 502 Bad Gateway"
        );
    }

    #[test]
    fn urls_ignore_trailing_slash() {
        let store = HttpStore::new(
            Client::new(),
            "http://localhost:5000/api/",
            StaticToken(None).into(),
        );
        assert_eq!(
            store.collection_url(&CollectionId::from("c1")),
            "http://localhost:5000/api/albums/c1"
        );
    }

    #[tokio::test]
    async fn store_requests_carry_bearer() {
        let store = HttpStore::new(
            Client::new(),
            "http://localhost:5000/api",
            StaticToken(Some("abc.def".to_owned())).into(),
        );
        let request = store
            .authorized(store.client.get(store.collections_url()))
            .await
            .build()
            .unwrap();
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer abc.def");

        let anonymous = HttpStore::new(
            Client::new(),
            "http://localhost:5000/api",
            StaticToken(None).into(),
        );
        let request = anonymous
            .authorized(anonymous.client.get(anonymous.collections_url()))
            .await
            .build()
            .unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }
}
