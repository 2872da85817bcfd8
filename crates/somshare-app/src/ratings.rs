//! The user's like/dislike marks, kept as a pure mirror of the latest
//! server responses.

use std::collections::HashMap;

use somshare_types::api::RateResponse;
use somshare_types::models::Rating;

/// Guidance shown when rating a post that was never downloaded.
pub const RATE_REQUIRES_DOWNLOAD: &str = "다운로드한 족보만 평가할 수 있어요.";

#[derive(Default)]
pub struct RatingBook {
    by_post: HashMap<i64, Rating>,
}

impl RatingBook {
    pub fn current(&self, post_id: i64) -> Option<Rating> {
        self.by_post.get(&post_id).copied()
    }

    /// Replace the local mark with the server's answer. `None` means
    /// the toggle cleared it.
    pub fn apply(&mut self, post_id: i64, resp: &RateResponse) {
        match resp.user_rating {
            Some(rating) => {
                self.by_post.insert(post_id, rating);
            }
            None => {
                self.by_post.remove(&post_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resp(user_rating: Option<&str>) -> RateResponse {
        let rating = match user_rating {
            Some(r) => format!("\"{}\"", r),
            None => "null".into(),
        };
        serde_json::from_str(&format!(
            r#"{{"likeCount":1,"dislikeCount":0,"userRating":{}}}"#,
            rating
        ))
        .unwrap()
    }

    #[test]
    fn server_response_sets_and_clears_the_mark() {
        let mut book = RatingBook::default();
        book.apply(1, &resp(Some("like")));
        assert_eq!(book.current(1), Some(Rating::Like));

        // same value toggled again: server reports null, mark clears
        book.apply(1, &resp(None));
        assert_eq!(book.current(1), None);

        book.apply(1, &resp(Some("dislike")));
        assert_eq!(book.current(1), Some(Rating::Dislike));
    }
}
