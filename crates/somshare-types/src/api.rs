use serde::{Deserialize, Serialize};

use crate::models::{ActivityEntry, Post, Rating};

// -- Auth --

#[derive(Debug, Serialize)]
pub struct SendVerificationRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The backend may carry the bearer token, a message, or both.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Generic `{ "message": ... }` body used by several endpoints.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// -- Posts --

/// Spring-style page envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    #[serde(default, alias = "number")]
    pub current_page: u32,
}

/// GET /api/posts answers either a bare array or a page envelope,
/// depending on backend version. Absorb both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PostListing {
    Paged(Page<Post>),
    Plain(Vec<Post>),
}

impl PostListing {
    pub fn into_posts(self) -> Vec<Post> {
        match self {
            PostListing::Paged(page) => page.content,
            PostListing::Plain(posts) => posts,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PostListing::Paged(page) => page.content.len(),
            PostListing::Plain(posts) => posts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUploadResponse {
    #[serde(default)]
    pub post: Option<Post>,
    pub earned_points: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostUpdateRequest {
    pub title: String,
    pub subject: String,
    pub professor: String,
    pub major: String,
}

/// 200 body of POST /api/posts/{id}/download.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub pdf_url: String,
    pub file_name: String,
    pub points_deducted: i64,
    pub remaining_points: i64,
    pub message: String,
}

/// 409 body of the same endpoint: the file is already owned, nothing
/// was charged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlreadyDownloadedResponse {
    pub pdf_url: String,
    pub file_name: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateResponse {
    pub like_count: u64,
    pub dislike_count: u64,
    /// The caller's rating after this toggle; `None` when it was cleared.
    #[serde(default)]
    pub user_rating: Option<Rating>,
}

pub type ActivityList = Vec<ActivityEntry>;

// -- Points --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReducePointsRequest {
    pub file_id: i64,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCompleteRequest {
    pub file_name: String,
    pub original_name: String,
    pub file_size: u64,
    pub description: String,
}

/// GET /api/points/history filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryKind {
    #[default]
    All,
    Earn,
    Charge,
    Use,
}

impl HistoryKind {
    pub fn as_query(self) -> &'static str {
        match self {
            HistoryKind::All => "ALL",
            HistoryKind::Earn => "EARN",
            HistoryKind::Charge => "CHARGE",
            HistoryKind::Use => "USE",
        }
    }
}

// -- Legacy raw file upload --

/// Body of the prototype single-file upload endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUploadResult {
    pub original_name: String,
    pub stored_name: String,
    pub url: String,
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_parses_bare_array() {
        let listing: PostListing = serde_json::from_str(
            r#"[{"id":1,"title":"t","subject":"s","professor":"p","major":"english",
                "uploader":"u","uploadDate":"2024-06-20","downloadCount":0,"points":50}]"#,
        )
        .unwrap();
        assert_eq!(listing.len(), 1);
        assert!(matches!(listing, PostListing::Plain(_)));
    }

    #[test]
    fn listing_parses_page_envelope() {
        let listing: PostListing = serde_json::from_str(
            r#"{"content":[],"totalElements":0,"totalPages":0,"currentPage":0}"#,
        )
        .unwrap();
        assert!(listing.is_empty());
        assert!(matches!(listing, PostListing::Paged(_)));
    }

    #[test]
    fn rate_response_null_rating_means_cleared() {
        let resp: RateResponse =
            serde_json::from_str(r#"{"likeCount":3,"dislikeCount":1,"userRating":null}"#).unwrap();
        assert_eq!(resp.like_count, 3);
        assert_eq!(resp.user_rating, None);
    }
}
