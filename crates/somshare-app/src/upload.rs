//! The post upload form and its single in-flight flag.

use std::path::PathBuf;

use tracing::info;

use somshare_client::posts::PostUpload;
use somshare_client::{ApiClient, ApiError};
use somshare_types::api::PostUploadResponse;

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file: Option<PathBuf>,
    pub title: String,
    pub subject: String,
    pub professor: String,
    pub major: String,
}

impl UploadForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Default)]
pub struct UploadFlow {
    pub form: UploadForm,
    in_flight: bool,
}

impl UploadFlow {
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Submit the form. Re-submission while a request is in flight is
    /// refused; field and file validation happens inside the client
    /// before anything goes on the wire. On success the form resets.
    pub async fn submit(&mut self, client: &ApiClient) -> Result<PostUploadResponse, ApiError> {
        if self.in_flight {
            return Err(ApiError::Validation("업로드가 이미 진행 중이에요.".into()));
        }
        let Some(file) = self.form.file.clone() else {
            return Err(ApiError::Validation("업로드할 PDF를 선택해 주세요.".into()));
        };

        let upload = PostUpload {
            file,
            title: self.form.title.clone(),
            subject: self.form.subject.clone(),
            professor: self.form.professor.clone(),
            major: self.form.major.clone(),
        };

        self.in_flight = true;
        let result = client.upload_post(upload).await;
        self.in_flight = false;

        let resp = result?;
        info!(earned = resp.earned_points, "upload complete, form reset");
        self.form.reset();
        Ok(resp)
    }
}
