use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile of the signed-in user, as returned by the backend and cached
/// locally for session resumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub email: String,
    pub nickname: String,
    pub college: String,
    pub major: String,
    pub points: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

/// A shared document record. The server is authoritative; the client
/// holds a transient copy per fetch.
///
/// `upload_date` stays a string on purpose: the backend emits ISO dates,
/// so lexicographic order is chronological order and the board sorts by
/// plain string comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub subject: String,
    pub professor: String,
    pub major: String,
    pub uploader: String,
    pub upload_date: String,
    pub download_count: u64,
    pub points: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub dislike_count: u64,
}

/// A like/dislike mark. At most one active value per (user, post);
/// submitting the active value again clears it server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Like,
    Dislike,
}

impl Rating {
    pub fn as_query(self) -> &'static str {
        match self {
            Rating::Like => "like",
            Rating::Dislike => "dislike",
        }
    }
}

/// Ledger entry kind as the backend spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Earn,
    Charge,
    Use,
}

impl TransactionKind {
    /// Earned vs spent partition used by the ledger view.
    pub fn is_earn(self) -> bool {
        matches!(self, TransactionKind::Earn)
    }
}

/// Append-only point ledger entry. The balance is the server's running
/// sum, fetched, never derived client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointTransaction {
    pub id: i64,
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// One line of the per-user upload/download history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub points: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": 7,
            "title": "2024-2학기 중간고사 족보",
            "subject": "자료구조",
            "professor": "김교수",
            "major": "computer-science",
            "uploader": "somsom",
            "uploadDate": "2024-10-15",
            "downloadCount": 45,
            "points": 50
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.pdf_url, None);
        assert_eq!(post.like_count, 0);
        assert_eq!(post.dislike_count, 0);
    }

    #[test]
    fn transaction_kind_uses_backend_spelling() {
        let tx: PointTransaction = serde_json::from_str(
            r#"{"id":1,"amount":-50,"type":"USE","description":"족보 다운로드","createdAt":"2024-10-15T09:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(tx.kind, TransactionKind::Use);
        assert!(!tx.kind.is_earn());
        assert_eq!(tx.amount, -50);
    }

    #[test]
    fn rating_round_trips_lowercase() {
        assert_eq!(serde_json::to_string(&Rating::Like).unwrap(), "\"like\"");
        let r: Rating = serde_json::from_str("\"dislike\"").unwrap();
        assert_eq!(r, Rating::Dislike);
    }
}
