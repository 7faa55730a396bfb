//! The timetable service as the client consumes it.
//!
//! Everything with real logic talks to [`Backend`], a trait object, so
//! the session/generation/approval components can be exercised against
//! an in-memory implementation. [`HttpBackend`] is the production
//! implementation.

mod http;

pub use http::HttpBackend;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    ExportFormat, ExportPayload, GenerationOutcome, Timetable, TimetableStatus, User,
};

#[async_trait]
pub trait Backend: Send + Sync {
    /// Ask the server to mail a one-time login code to `email`.
    async fn request_login_code(&self, email: &str) -> Result<()>;

    /// Exchange `(email, code)` for an access token.
    async fn verify_login_code(&self, email: &str, code: &str) -> Result<String>;

    /// Resolve the account behind a token.
    async fn current_user(&self, token: &str) -> Result<User>;

    async fn generate_timetables(&self, token: &str, num_variants: u32)
        -> Result<GenerationOutcome>;

    async fn list_timetables(
        &self,
        token: &str,
        status: Option<TimetableStatus>,
    ) -> Result<Vec<Timetable>>;

    async fn get_timetable(&self, token: &str, id: i64) -> Result<Timetable>;

    async fn send_for_approval(&self, token: &str, id: i64) -> Result<Timetable>;

    async fn decide_approval(
        &self,
        token: &str,
        id: i64,
        approved: bool,
        comment: Option<String>,
    ) -> Result<Timetable>;

    /// Fetch a rendered export. Published timetables may be exported
    /// without a token.
    async fn export_timetable(
        &self,
        token: Option<&str>,
        id: i64,
        format: ExportFormat,
    ) -> Result<ExportPayload>;

    /// Anonymous access to a published schedule.
    async fn public_timetable(&self, public_url: &str) -> Result<Timetable>;
}
