//! Identity bootstrap: verification mail, signup, login, profile setup,
//! session re-validation, logout.

use std::path::{Path, PathBuf};

use reqwest::multipart;
use tokio_util::io::ReaderStream;
use tracing::debug;

use somshare_types::api::{
    LoginRequest, LoginResponse, MessageResponse, SendVerificationRequest, SignupRequest,
    VerifyCodeRequest,
};
use somshare_types::models::UserInfo;

use crate::error::{ApiError, expect_success};
use crate::validate::validate_image;
use crate::ApiClient;

/// Profile-setup form; the image is optional and checked client-side
/// before a single byte leaves the machine.
pub struct ProfileSetup {
    pub email: String,
    pub nickname: String,
    pub college: String,
    pub major: String,
    pub image: Option<PathBuf>,
}

impl ApiClient {
    pub async fn send_verification(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let resp = self
            .post("/api/auth/send-verification")
            .json(&SendVerificationRequest {
                email: email.to_string(),
            })
            .send()
            .await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    pub async fn verify_code(&self, email: &str, code: &str) -> Result<MessageResponse, ApiError> {
        let resp = self
            .post("/api/auth/verify-code")
            .json(&VerifyCodeRequest {
                email: email.to_string(),
                code: code.to_string(),
            })
            .send()
            .await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<MessageResponse, ApiError> {
        let resp = self
            .post("/api/auth/signup")
            .json(&SignupRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let resp = self
            .post("/api/auth/login")
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    /// Multipart form: email, nickname, college, major, optional image.
    pub async fn setup_profile(&self, setup: ProfileSetup) -> Result<MessageResponse, ApiError> {
        let mut form = multipart::Form::new()
            .text("email", setup.email)
            .text("nickname", setup.nickname)
            .text("college", setup.college)
            .text("major", setup.major);

        if let Some(path) = &setup.image {
            form = form.part("image", image_part(path).await?);
        }

        let resp = self
            .post("/api/auth/profile-setup")
            .multipart(form)
            .send()
            .await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    /// Re-validate the stored credential. A failure here is routine on
    /// startup (expired token) and maps back to the anonymous state.
    pub async fn me(&self) -> Result<UserInfo, ApiError> {
        let resp = self.get("/api/users/me").send().await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    /// Ask the server to drop its session state. Best-effort: callers
    /// clear local state whether or not this succeeds.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let resp = self.post("/api/auth/logout").send().await?;
        expect_success(resp).await?;
        Ok(())
    }
}

/// Build the streamed multipart part for a profile image, rejecting
/// non-images and anything over the 5 MB ceiling first.
async fn image_part(path: &Path) -> Result<multipart::Part, ApiError> {
    let meta = tokio::fs::metadata(path).await?;
    let content_type = guess_image_type(path);
    validate_image(content_type, meta.len()).map_err(|e| ApiError::Validation(e.0))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "profile".to_string());
    debug!(file = %file_name, size = meta.len(), "attaching profile image");

    let file = tokio::fs::File::open(path).await?;
    let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
    let part = multipart::Part::stream_with_length(body, meta.len())
        .file_name(file_name)
        .mime_str(content_type.unwrap_or("application/octet-stream"))
        .map_err(ApiError::Transport)?;
    Ok(part)
}

fn guess_image_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
