use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;

use crate::error::{Error, Result};
use crate::models::{
    Batch, BatchInput, ExportFormat, ExportPayload, Faculty, FacultyInput, FixedSlot,
    FixedSlotInput, GenerationOutcome, Room, RoomInput, Subject, SubjectInput, Timetable,
    TimetableStatus, User,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Non-2xx bodies carry the human-readable reason in `detail` (FastAPI)
/// or `message`.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// reqwest-backed [`super::Backend`]. Cheap to clone; one shared
/// connection pool.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Reads the base URL from `TIMEGRID_API_URL`, falling back to the
    /// local development server.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("TIMEGRID_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Turns a non-2xx response into `Error::Backend`, pulling the
    /// message out of the body when the server provided one.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail.or(body.message))
            .unwrap_or_else(|| "an error occurred while communicating with the server".to_string());

        Err(Error::backend(Some(status.as_u16()), message))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T> {
        let response = Self::bearer(self.client.get(self.url(path)), token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json::<T>().await?)
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T> {
        let response = Self::bearer(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json::<T>().await?)
    }

    async fn put_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json::<T>().await?)
    }

    async fn delete(&self, path: &str, token: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl super::Backend for HttpBackend {
    async fn request_login_code(&self, email: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("/auth/login/"))
            .json(&json!({ "email": email }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn verify_login_code(&self, email: &str, code: &str) -> Result<String> {
        let response = self
            .client
            .post(self.url("/auth/verify-otp/"))
            .json(&json!({ "email": email, "otp": code }))
            .send()
            .await?;

        // A rejected code is a first-class outcome, not a generic
        // backend failure.
        match Self::check(response).await {
            Ok(ok) => Ok(ok.json::<TokenResponse>().await?.access_token),
            Err(Error::Backend {
                status: Some(400 | 401),
                ..
            }) => Err(Error::InvalidCode),
            Err(err) => Err(err),
        }
    }

    async fn current_user(&self, token: &str) -> Result<User> {
        self.get_json("/auth/me/", Some(token)).await
    }

    async fn generate_timetables(
        &self,
        token: &str,
        num_variants: u32,
    ) -> Result<GenerationOutcome> {
        // The endpoint answers with either a variant array or an
        // `{error, suggestions}` object; the untagged enum sorts it out.
        self.post_json(
            "/timetables/generate/",
            Some(token),
            &json!({ "num_variants": num_variants }),
        )
        .await
    }

    async fn list_timetables(
        &self,
        token: &str,
        status: Option<TimetableStatus>,
    ) -> Result<Vec<Timetable>> {
        let path = match status {
            Some(status) => format!("/timetables/?status={}", status.as_str()),
            None => "/timetables/".to_string(),
        };
        self.get_json(&path, Some(token)).await
    }

    async fn get_timetable(&self, token: &str, id: i64) -> Result<Timetable> {
        self.get_json(&format!("/timetables/{id}/"), Some(token))
            .await
    }

    async fn send_for_approval(&self, token: &str, id: i64) -> Result<Timetable> {
        self.post_json(
            &format!("/timetables/{id}/send-for-approval/"),
            Some(token),
            &json!({}),
        )
        .await
    }

    async fn decide_approval(
        &self,
        token: &str,
        id: i64,
        approved: bool,
        comment: Option<String>,
    ) -> Result<Timetable> {
        self.post_json(
            &format!("/timetables/{id}/approve/"),
            Some(token),
            &json!({ "approved": approved, "comment": comment }),
        )
        .await
    }

    async fn export_timetable(
        &self,
        token: Option<&str>,
        id: i64,
        format: ExportFormat,
    ) -> Result<ExportPayload> {
        self.get_json(&format!("/timetables/{id}/{}/", format.as_str()), token)
            .await
    }

    async fn public_timetable(&self, public_url: &str) -> Result<Timetable> {
        self.get_json(&format!("/timetables/public/{public_url}/"), None)
            .await
    }
}

/// Master-data CRUD. Plain pass-through; no trait seam because nothing
/// in the core depends on these.
impl HttpBackend {
    pub async fn list_rooms(&self, token: &str) -> Result<Vec<Room>> {
        self.get_json("/rooms/", Some(token)).await
    }

    pub async fn create_room(&self, token: &str, input: &RoomInput) -> Result<Room> {
        self.post_json("/rooms/", Some(token), input).await
    }

    pub async fn update_room(&self, token: &str, id: i64, input: &RoomInput) -> Result<Room> {
        self.put_json(&format!("/rooms/{id}"), token, input).await
    }

    pub async fn delete_room(&self, token: &str, id: i64) -> Result<()> {
        self.delete(&format!("/rooms/{id}"), token).await
    }

    pub async fn list_faculty(&self, token: &str) -> Result<Vec<Faculty>> {
        self.get_json("/faculty/", Some(token)).await
    }

    pub async fn create_faculty(&self, token: &str, input: &FacultyInput) -> Result<Faculty> {
        self.post_json("/faculty/", Some(token), input).await
    }

    pub async fn update_faculty(
        &self,
        token: &str,
        id: i64,
        input: &FacultyInput,
    ) -> Result<Faculty> {
        self.put_json(&format!("/faculty/{id}"), token, input).await
    }

    pub async fn delete_faculty(&self, token: &str, id: i64) -> Result<()> {
        self.delete(&format!("/faculty/{id}"), token).await
    }

    pub async fn list_batches(&self, token: &str) -> Result<Vec<Batch>> {
        self.get_json("/batches/", Some(token)).await
    }

    pub async fn create_batch(&self, token: &str, input: &BatchInput) -> Result<Batch> {
        self.post_json("/batches/", Some(token), input).await
    }

    pub async fn update_batch(&self, token: &str, id: i64, input: &BatchInput) -> Result<Batch> {
        self.put_json(&format!("/batches/{id}"), token, input).await
    }

    pub async fn delete_batch(&self, token: &str, id: i64) -> Result<()> {
        self.delete(&format!("/batches/{id}"), token).await
    }

    pub async fn list_subjects(&self, token: &str) -> Result<Vec<Subject>> {
        self.get_json("/subjects/", Some(token)).await
    }

    pub async fn create_subject(&self, token: &str, input: &SubjectInput) -> Result<Subject> {
        self.post_json("/subjects/", Some(token), input).await
    }

    pub async fn update_subject(
        &self,
        token: &str,
        id: i64,
        input: &SubjectInput,
    ) -> Result<Subject> {
        self.put_json(&format!("/subjects/{id}"), token, input)
            .await
    }

    pub async fn delete_subject(&self, token: &str, id: i64) -> Result<()> {
        self.delete(&format!("/subjects/{id}"), token).await
    }

    pub async fn list_fixed_slots(&self, token: &str) -> Result<Vec<FixedSlot>> {
        self.get_json("/fixed-slots/", Some(token)).await
    }

    pub async fn create_fixed_slot(&self, token: &str, input: &FixedSlotInput) -> Result<FixedSlot> {
        self.post_json("/fixed-slots/", Some(token), input).await
    }

    pub async fn update_fixed_slot(
        &self,
        token: &str,
        id: i64,
        input: &FixedSlotInput,
    ) -> Result<FixedSlot> {
        self.put_json(&format!("/fixed-slots/{id}"), token, input)
            .await
    }

    pub async fn delete_fixed_slot(&self, token: &str, id: i64) -> Result<()> {
        self.delete(&format!("/fixed-slots/{id}"), token).await
    }
}
