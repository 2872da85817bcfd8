//! Top-level controller: owns the session context, the API client, and
//! every per-screen state container. UI layers call into this and
//! render whatever it holds afterwards.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use somshare_client::auth::ProfileSetup;
use somshare_client::posts::DownloadOutcome;
use somshare_client::validate::validate_nickname;
use somshare_client::{ApiClient, ApiError};
use somshare_types::api::{ActivityList, HistoryKind, RateResponse};
use somshare_types::models::{Post, Rating};

use crate::board::BoardState;
use crate::config::AppConfig;
use crate::downloads::{display_cost, DownloadTracker};
use crate::ledger::LedgerView;
use crate::nav::Screen;
use crate::ratings::{RatingBook, RATE_REQUIRES_DOWNLOAD};
use crate::session::{SessionContext, SessionState};
use crate::upload::UploadFlow;

const SCHOOL_DOMAIN: &str = "@dongduk.ac.kr";

/// What came out of a download: where the file went, what it cost,
/// and the balance the server reported afterwards.
#[derive(Debug)]
pub struct DownloadReport {
    pub post_id: i64,
    pub saved_to: Option<PathBuf>,
    pub pdf_url: String,
    pub message: String,
    pub points_deducted: i64,
    pub balance_after: Option<i64>,
    pub already_owned: bool,
}

pub struct AppController {
    pub client: ApiClient,
    pub session: SessionContext,
    pub screen: Screen,
    pub board: BoardState,
    pub downloads: DownloadTracker,
    pub ratings: RatingBook,
    pub uploader: UploadFlow,
    config: AppConfig,
    email_verified: bool,
}

impl AppController {
    pub fn new(config: AppConfig) -> Self {
        let session = SessionContext::load(config.session_file());
        let client = match session.token() {
            Some(token) => ApiClient::with_token(config.api_base.clone(), token),
            None => ApiClient::new(config.api_base.clone()),
        };
        Self {
            client,
            session,
            screen: Screen::Login,
            board: BoardState::default(),
            downloads: DownloadTracker::default(),
            ratings: RatingBook::default(),
            uploader: UploadFlow::default(),
            config,
            email_verified: false,
        }
    }

    pub fn navigate(&mut self, screen: Screen) {
        self.screen = screen;
    }

    // -- Session lifecycle ------------------------------------------------

    /// Startup resumption: re-validate a stored credential. Failure is
    /// silent and leaves us anonymous.
    pub async fn resume(&mut self) -> bool {
        if self.session.token().is_none() {
            return false;
        }
        match self.client.me().await {
            Ok(profile) => {
                info!(email = %profile.email, "session resumed");
                self.session.set_profile(profile);
                self.session.state = SessionState::Authenticated;
                self.seed_downloads().await;
                self.screen = Screen::Home;
                true
            }
            Err(e) => {
                debug!("stored session rejected: {}", e.user_message());
                self.session.clear();
                self.client.clear_token();
                false
            }
        }
    }

    pub async fn send_verification(&self, email: &str) -> Result<String, ApiError> {
        if !email.ends_with(SCHOOL_DOMAIN) {
            return Err(ApiError::Validation(
                "동덕여대 이메일 주소를 입력해주세요. (학번@dongduk.ac.kr)".into(),
            ));
        }
        Ok(self.client.send_verification(email).await?.message)
    }

    pub async fn verify_code(&mut self, email: &str, code: &str) -> Result<String, ApiError> {
        let resp = self.client.verify_code(email, code).await?;
        self.email_verified = true;
        Ok(resp.message)
    }

    /// Signup gates run client-side first: verified email, matching
    /// passwords. Success leaves the session owing a profile.
    pub async fn signup(
        &mut self,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<String, ApiError> {
        if !self.email_verified {
            return Err(ApiError::Validation("이메일 인증을 완료해주세요.".into()));
        }
        if password != confirm {
            return Err(ApiError::Validation("비밀번호가 일치하지 않습니다.".into()));
        }
        let resp = self.client.signup(email, password).await?;
        self.session.enter_profile_setup(email);
        self.screen = Screen::ProfileSetup;
        Ok(resp.message)
    }

    pub async fn setup_profile(
        &mut self,
        nickname: &str,
        college: &str,
        major: &str,
        image: Option<PathBuf>,
    ) -> Result<String, ApiError> {
        let nickname = validate_nickname(nickname)
            .map_err(|e| ApiError::Validation(e.0))?
            .to_string();
        if college.trim().is_empty() {
            return Err(ApiError::Validation("소속 대학을 선택해주세요.".into()));
        }
        if major.trim().is_empty() {
            return Err(ApiError::Validation("전공을 선택해주세요.".into()));
        }
        let Some(email) = self.session.email().map(str::to_string) else {
            return Err(ApiError::Validation("다시 로그인해 주세요.".into()));
        };

        let resp = self
            .client
            .setup_profile(ProfileSetup {
                email,
                nickname,
                college: college.trim().to_string(),
                major: major.trim().to_string(),
                image,
            })
            .await?;

        // Profile owed no longer; where we land depends on whether a
        // credential is already held (signup flows log in afterwards).
        if self.session.token().is_some() {
            if let Ok(profile) = self.client.me().await {
                self.session.set_profile(profile);
            }
            self.session.state = SessionState::Authenticated;
            self.screen = Screen::Home;
        } else {
            self.session.state = SessionState::Anonymous;
            self.screen = Screen::Login;
        }
        Ok(resp.message)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<String, ApiError> {
        let prior_email = self.session.email().map(str::to_string);
        self.session.begin_login(email);
        let resp = match self.client.login(email, password).await {
            Ok(resp) => resp,
            Err(e) => {
                self.session.abort_login(prior_email);
                return Err(e);
            }
        };

        let Some(token) = resp.token else {
            // Bearer-only client: a tokenless 200 is a failed login.
            self.session.abort_login(prior_email);
            return Err(ApiError::Validation(
                resp.message.unwrap_or_else(|| "로그인에 실패했어요.".into()),
            ));
        };

        self.client.set_token(&token);
        let profile = self.client.me().await.ok();
        self.session.complete_login(token, profile);
        self.seed_downloads().await;
        self.screen = Screen::Home;
        Ok(resp.message.unwrap_or_else(|| "로그인 성공".into()))
    }

    /// Server-side invalidation is best-effort; local cleanup always
    /// runs and always lands on the login screen.
    pub async fn logout(&mut self) {
        self.session.state = SessionState::LoggingOut;
        if let Err(e) = self.client.logout().await {
            warn!("server-side logout failed: {}", e.user_message());
        }
        self.session.clear();
        self.client.clear_token();
        self.downloads = DownloadTracker::default();
        self.ratings = RatingBook::default();
        self.board = BoardState::default();
        self.screen = Screen::Login;
    }

    async fn seed_downloads(&mut self) {
        match self.client.downloaded_posts().await {
            Ok(posts) => self.downloads.seed(posts.iter().map(|p| p.id)),
            Err(e) => debug!("could not seed downloaded set: {}", e.user_message()),
        }
    }

    // -- Board ------------------------------------------------------------

    pub async fn refresh_board(&mut self) -> Result<usize, ApiError> {
        self.board.refresh(&self.client).await
    }

    pub fn display_cost(&self, post: &Post) -> i64 {
        display_cost(post, self.session.profile(), &self.downloads)
    }

    // -- Downloads --------------------------------------------------------

    /// Download a post, reconciling the points cache against whatever
    /// the server reports. Any failure leaves local state untouched.
    pub async fn download(&mut self, post_id: i64) -> Result<DownloadReport, ApiError> {
        if !self.downloads.begin(post_id) {
            return Err(ApiError::Validation("다운로드가 진행 중이에요.".into()));
        }
        let result = self.perform_download(post_id).await;
        self.downloads.finish(post_id);
        result
    }

    async fn perform_download(&mut self, post_id: i64) -> Result<DownloadReport, ApiError> {
        let outcome = self.client.download_post(post_id).await?;

        let (deducted, balance_after, already_owned) = match &outcome {
            DownloadOutcome::Charged(r) => {
                // First successful charge: provisional counter bump for
                // immediate feedback, balance replaced with server truth.
                self.downloads.mark_downloaded(post_id);
                self.board.bump_download_count(post_id);
                self.session.set_points(r.remaining_points);
                (r.points_deducted, Some(r.remaining_points), false)
            }
            DownloadOutcome::AlreadyOwned(_) => {
                self.downloads.mark_downloaded(post_id);
                (0, None, true)
            }
        };

        // Fetch the actual binary. If saving fails the transaction
        // above still stands; the UI falls back to opening the URL.
        let saved_to = match self
            .client
            .fetch_to_file(
                outcome.pdf_url(),
                &self.config.download_dir,
                outcome.file_name(),
            )
            .await
        {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("file fetch failed, falling back to URL: {}", e.user_message());
                None
            }
        };

        Ok(DownloadReport {
            post_id,
            saved_to,
            pdf_url: outcome.pdf_url().to_string(),
            message: outcome.message().to_string(),
            points_deducted: deducted,
            balance_after,
            already_owned,
        })
    }

    // -- Ratings ----------------------------------------------------------

    /// Rating is gated on ownership: undownloaded posts get guidance
    /// and no request. Counters come back from the server and replace
    /// local state wholesale.
    pub async fn rate(&mut self, post_id: i64, rating: Rating) -> Result<RateResponse, ApiError> {
        if !self.downloads.is_downloaded(post_id) {
            return Err(ApiError::Validation(RATE_REQUIRES_DOWNLOAD.into()));
        }
        let resp = self.client.rate_post(post_id, rating).await?;
        self.board.apply_rating(post_id, &resp);
        self.ratings.apply(post_id, &resp);
        Ok(resp)
    }

    // -- Upload -----------------------------------------------------------

    pub async fn submit_upload(&mut self) -> Result<String, ApiError> {
        let resp = self.uploader.submit(&self.client).await?;
        // The response credits points but not the new balance; refetch.
        if let Ok(balance) = self.client.point_balance().await {
            self.session.set_points(balance);
        }
        Ok(format!("{} (+{}P)", resp.message, resp.earned_points))
    }

    // -- My page ----------------------------------------------------------

    /// Uploaded and downloaded histories, as the my-page screen lists
    /// them.
    pub async fn my_activity(&self) -> Result<(ActivityList, ActivityList), ApiError> {
        let uploads = self.client.my_uploads().await?;
        let downloads = self.client.my_downloads().await?;
        Ok((uploads, downloads))
    }

    // -- Ledger -----------------------------------------------------------

    pub async fn ledger(&self, kind: HistoryKind) -> Result<LedgerView, ApiError> {
        let mut view = LedgerView::default();
        view.refresh(&self.client, kind, 0, 20).await?;
        Ok(view)
    }
}
