//! Raw file plumbing: the prototype single-file upload endpoint and the
//! streamed fetch that saves a downloaded PDF to disk.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::multipart;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::info;

use somshare_types::api::RawUploadResult;

use crate::error::{ApiError, expect_success};
use crate::validate::{validate_pdf, PDF_CONTENT_TYPE};
use crate::ApiClient;

impl ApiClient {
    /// Prototype dropzone path: a bare multipart upload with no
    /// metadata form, returning where the file landed.
    pub async fn upload_raw(&self, path: &Path) -> Result<RawUploadResult, ApiError> {
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
        let form = multipart::Form::new().part("file", part);

        let resp = self.post("/api/files/upload").multipart(form).send().await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    /// Stream a served file to `dest_dir/file_name`, returning the final
    /// path. The URL may be relative to the configured base.
    pub async fn fetch_to_file(
        &self,
        url: &str,
        dest_dir: &Path,
        file_name: &str,
    ) -> Result<PathBuf, ApiError> {
        let resolved = self.resolve(url);
        let resp = self.get_absolute(&resolved).send().await?;
        let resp = expect_success(resp).await?;

        tokio::fs::create_dir_all(dest_dir).await?;
        let dest = dest_dir.join(file_name);
        let mut file = tokio::fs::File::create(&dest).await?;

        let mut written: u64 = 0;
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        info!(path = %dest.display(), bytes = written, "file saved");
        Ok(dest)
    }
}
