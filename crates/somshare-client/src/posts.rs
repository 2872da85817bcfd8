//! Post board endpoints: listing, upload, owner edit/delete, download
//! with the already-owned special case, and ratings.

use std::path::{Path, PathBuf};

use reqwest::multipart;
use reqwest::StatusCode;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use somshare_types::api::{
    ActivityList, AlreadyDownloadedResponse, DownloadResponse, MessageResponse, PostListing,
    PostUpdateRequest, PostUploadResponse, RateResponse,
};
use somshare_types::models::{Post, Rating};

use crate::error::{ApiError, expect_success};
use crate::validate::{require_field, validate_bounded, validate_pdf, PDF_CONTENT_TYPE};
use crate::ApiClient;

/// Query parameters of GET /api/posts. The backend filters by exact
/// major only; college scoping is the caller's job.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub search: Option<String>,
    pub major: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl ListQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(s) = &self.search {
            params.push(("search", s.clone()));
        }
        if let Some(m) = &self.major {
            params.push(("major", m.clone()));
        }
        if let Some(p) = self.page {
            params.push(("page", p.to_string()));
        }
        if let Some(s) = self.size {
            params.push(("size", s.to_string()));
        }
        params
    }
}

/// Everything needed to publish a 족보. Metadata fields are trimmed and
/// required; the file is validated before the request is built.
pub struct PostUpload {
    pub file: PathBuf,
    pub title: String,
    pub subject: String,
    pub professor: String,
    pub major: String,
}

/// Outcome of a download request. A 409 is not an error: the file is
/// already owned and nothing was charged.
#[derive(Debug)]
pub enum DownloadOutcome {
    Charged(DownloadResponse),
    AlreadyOwned(AlreadyDownloadedResponse),
}

impl DownloadOutcome {
    pub fn pdf_url(&self) -> &str {
        match self {
            DownloadOutcome::Charged(r) => &r.pdf_url,
            DownloadOutcome::AlreadyOwned(r) => &r.pdf_url,
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            DownloadOutcome::Charged(r) => &r.file_name,
            DownloadOutcome::AlreadyOwned(r) => &r.file_name,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DownloadOutcome::Charged(r) => &r.message,
            DownloadOutcome::AlreadyOwned(r) => &r.message,
        }
    }

    pub fn points_deducted(&self) -> i64 {
        match self {
            DownloadOutcome::Charged(r) => r.points_deducted,
            DownloadOutcome::AlreadyOwned(_) => 0,
        }
    }
}

impl ApiClient {
    pub async fn list_posts(&self, query: &ListQuery) -> Result<PostListing, ApiError> {
        let resp = self
            .get("/api/posts")
            .query(&query.params())
            .send()
            .await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    /// Validate, then submit the multipart post form. The file part is
    /// streamed from disk rather than buffered.
    pub async fn upload_post(&self, upload: PostUpload) -> Result<PostUploadResponse, ApiError> {
        let title = required(&upload.title, "제목을 입력해 주세요.")?;
        let subject = required(&upload.subject, "과목명을 입력해 주세요.")?;
        let professor = required(&upload.professor, "교수명을 입력해 주세요.")?;
        let major = required(&upload.major, "전공을 선택해 주세요.")?;

        let part = pdf_part(&upload.file).await?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("title", title)
            .text("subject", subject)
            .text("professor", professor)
            .text("major", major);

        let resp = self.post("/api/posts").multipart(form).send().await?;
        let result: PostUploadResponse = expect_success(resp).await?.json().await?;
        info!(earned = result.earned_points, "post uploaded");
        Ok(result)
    }

    /// Owner-only edit. Field bounds mirror the edit form: title
    /// 3..=100, subject 2..=50, professor 2..=20 characters.
    pub async fn update_post(
        &self,
        id: i64,
        update: &PostUpdateRequest,
    ) -> Result<MessageResponse, ApiError> {
        let update = PostUpdateRequest {
            title: bounded(&update.title, "제목", 3, 100)?,
            subject: bounded(&update.subject, "과목명", 2, 50)?,
            professor: bounded(&update.professor, "교수명", 2, 20)?,
            major: required(&update.major, "전공을 선택해 주세요.")?,
        };
        let resp = self
            .patch(&format!("/api/posts/{}", id))
            .json(&update)
            .send()
            .await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    /// Owner-only delete.
    pub async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        let resp = self.delete(&format!("/api/posts/{}", id)).send().await?;
        expect_success(resp).await?;
        Ok(())
    }

    /// Charge-and-download. A 409 means the caller already owns the
    /// file: same URL back, zero deduction.
    pub async fn download_post(&self, id: i64) -> Result<DownloadOutcome, ApiError> {
        let resp = self
            .post(&format!("/api/posts/{}/download", id))
            .send()
            .await?;

        if resp.status() == StatusCode::CONFLICT {
            let owned: AlreadyDownloadedResponse = resp.json().await?;
            debug!(post = id, "already downloaded, no charge");
            return Ok(DownloadOutcome::AlreadyOwned(owned));
        }

        let resp = expect_success(resp).await?;
        let charged: DownloadResponse = resp.json().await?;
        info!(
            post = id,
            deducted = charged.points_deducted,
            remaining = charged.remaining_points,
            "download charged"
        );
        Ok(DownloadOutcome::Charged(charged))
    }

    /// Toggle a rating. The response carries the authoritative counts
    /// and the caller's rating after the toggle (None when cleared).
    pub async fn rate_post(&self, id: i64, rating: Rating) -> Result<RateResponse, ApiError> {
        let resp = self
            .post(&format!("/api/posts/{}/rate", id))
            .query(&[("type", rating.as_query())])
            .send()
            .await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    /// Posts the user has paid for; gates repeat charges and unlocks
    /// rating eligibility.
    pub async fn downloaded_posts(&self) -> Result<Vec<Post>, ApiError> {
        let resp = self.get("/api/users/me/downloaded-posts").send().await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    pub async fn my_uploads(&self) -> Result<ActivityList, ApiError> {
        let resp = self.get("/api/users/me/uploads").send().await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    pub async fn my_downloads(&self) -> Result<ActivityList, ApiError> {
        let resp = self.get("/api/users/me/downloads").send().await?;
        Ok(expect_success(resp).await?.json().await?)
    }
}

fn required(value: &str, message: &str) -> Result<String, ApiError> {
    require_field(value, message)
        .map(str::to_string)
        .map_err(|e| ApiError::Validation(e.0))
}

fn bounded(value: &str, label: &str, min: usize, max: usize) -> Result<String, ApiError> {
    validate_bounded(value, label, min, max)
        .map(str::to_string)
        .map_err(|e| ApiError::Validation(e.0))
}

async fn pdf_part(path: &Path) -> Result<multipart::Part, ApiError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let meta = tokio::fs::metadata(path).await?;
    validate_pdf(&file_name, Some(PDF_CONTENT_TYPE), meta.len())
        .map_err(|e| ApiError::Validation(e.0))?;

    let file = tokio::fs::File::open(path).await?;
    let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
    let part = multipart::Part::stream_with_length(body, meta.len())
        .file_name(file_name)
        .mime_str(PDF_CONTENT_TYPE)
        .map_err(ApiError::Transport)?;
    Ok(part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_include_only_set_fields() {
        let query = ListQuery {
            search: Some("자료구조".into()),
            major: None,
            page: Some(0),
            size: Some(20),
        };
        let params = query.params();
        assert_eq!(params.len(), 3);
        assert!(params.contains(&("search", "자료구조".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "major"));
    }

    #[test]
    fn outcome_deduction_is_zero_when_already_owned() {
        let outcome = DownloadOutcome::AlreadyOwned(
            serde_json::from_str(
                r#"{"pdfUrl":"/files/a.pdf","fileName":"a.pdf","message":"이미 다운로드한 족보입니다."}"#,
            )
            .unwrap(),
        );
        assert_eq!(outcome.points_deducted(), 0);
        assert_eq!(outcome.pdf_url(), "/files/a.pdf");
    }
}
