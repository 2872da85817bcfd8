//! Per-session download bookkeeping: which posts are owned, which
//! requests are in flight, and what cost to display.

use std::collections::HashSet;

use somshare_types::models::{Post, UserInfo};

#[derive(Default)]
pub struct DownloadTracker {
    downloaded: HashSet<i64>,
    in_flight: HashSet<i64>,
}

impl DownloadTracker {
    /// Register an outgoing download. Returns false when a request for
    /// the same post is still in flight, in which case the trigger
    /// stays disabled and nothing is issued.
    pub fn begin(&mut self, post_id: i64) -> bool {
        self.in_flight.insert(post_id)
    }

    pub fn finish(&mut self, post_id: i64) {
        self.in_flight.remove(&post_id);
    }

    pub fn is_in_flight(&self, post_id: i64) -> bool {
        self.in_flight.contains(&post_id)
    }

    pub fn mark_downloaded(&mut self, post_id: i64) {
        self.downloaded.insert(post_id);
    }

    pub fn is_downloaded(&self, post_id: i64) -> bool {
        self.downloaded.contains(&post_id)
    }

    /// Seed from the server's per-user download history on login.
    pub fn seed<I: IntoIterator<Item = i64>>(&mut self, ids: I) {
        self.downloaded.extend(ids);
    }

    pub fn downloaded_count(&self) -> usize {
        self.downloaded.len()
    }
}

/// Cost shown on a card: waived for the uploader's own posts and for
/// posts already owned. The server remains the source of truth for any
/// actual charge.
pub fn display_cost(post: &Post, viewer: Option<&UserInfo>, tracker: &DownloadTracker) -> i64 {
    if tracker.is_downloaded(post.id) {
        return 0;
    }
    if let Some(user) = viewer {
        if post.uploader == user.nickname || post.uploader == user.email {
            return 0;
        }
    }
    post.points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer() -> UserInfo {
        UserInfo {
            email: "20241234@dongduk.ac.kr".into(),
            nickname: "솜솜이".into(),
            college: "자연정보과학대학".into(),
            major: "computer-science".into(),
            points: 500,
            profile_image_url: None,
        }
    }

    fn post(uploader: &str) -> Post {
        Post {
            id: 1,
            title: "중간고사 족보".into(),
            subject: "자료구조".into(),
            professor: "김교수".into(),
            major: "computer-science".into(),
            uploader: uploader.into(),
            upload_date: "2024-10-15".into(),
            download_count: 0,
            points: 50,
            pdf_url: None,
            like_count: 0,
            dislike_count: 0,
        }
    }

    #[test]
    fn in_flight_gate_blocks_duplicates() {
        let mut tracker = DownloadTracker::default();
        assert!(tracker.begin(1));
        assert!(!tracker.begin(1));
        tracker.finish(1);
        assert!(tracker.begin(1));
    }

    #[test]
    fn cost_is_waived_for_own_posts() {
        let tracker = DownloadTracker::default();
        let user = viewer();
        assert_eq!(display_cost(&post("솜솜이"), Some(&user), &tracker), 0);
        assert_eq!(display_cost(&post("다른사람"), Some(&user), &tracker), 50);
        assert_eq!(display_cost(&post("다른사람"), None, &tracker), 50);
    }

    #[test]
    fn cost_is_waived_once_downloaded() {
        let mut tracker = DownloadTracker::default();
        tracker.mark_downloaded(1);
        assert_eq!(display_cost(&post("다른사람"), None, &tracker), 0);
    }
}
