//! Point ledger endpoints: balance, history, reduce, upload-complete.

use somshare_types::api::{HistoryKind, Page, ReducePointsRequest, UploadCompleteRequest};
use somshare_types::models::PointTransaction;

use crate::error::{ApiError, expect_success};
use crate::ApiClient;

impl ApiClient {
    /// Current balance, the server's running sum. Never derived locally.
    pub async fn point_balance(&self) -> Result<i64, ApiError> {
        let resp = self.get("/api/points/balance").send().await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    pub async fn point_history(
        &self,
        kind: HistoryKind,
        page: u32,
        size: u32,
    ) -> Result<Page<PointTransaction>, ApiError> {
        let resp = self
            .get("/api/points/history")
            .query(&[
                ("type", kind.as_query().to_string()),
                ("page", page.to_string()),
                ("size", size.to_string()),
            ])
            .send()
            .await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    /// Explicit charge against a file, used by the legacy dropzone path.
    pub async fn reduce_points(&self, file_id: i64, description: &str) -> Result<String, ApiError> {
        let resp = self
            .post("/api/points/reduce")
            .json(&ReducePointsRequest {
                file_id,
                description: description.to_string(),
            })
            .send()
            .await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    /// Report a finished raw upload so the ledger can credit it.
    pub async fn complete_upload(&self, req: &UploadCompleteRequest) -> Result<(), ApiError> {
        let resp = self.post("/api/points/upload-complete").json(req).send().await?;
        expect_success(resp).await?;
        Ok(())
    }
}
