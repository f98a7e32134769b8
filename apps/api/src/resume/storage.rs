//! Resume object storage on S3 / MinIO.

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

/// `resumes/<user>/<upload id>/<file name>`; path separators in the name are flattened.
pub fn resume_key(user_id: Uuid, upload_id: Uuid, file_name: &str) -> String {
    let safe_name: String = file_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("resumes/{user_id}/{upload_id}/{safe_name}")
}

pub async fn put_resume(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    content_type: &str,
    body: Bytes,
) -> Result<(), AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("Upload of {key} failed: {e}")))?;

    info!("Stored resume at s3://{bucket}/{key}");
    Ok(())
}

pub async fn get_resume(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<Bytes, AppError> {
    let object = s3
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("Fetch of {key} failed: {e}")))?;

    let data = object
        .body
        .collect()
        .await
        .map_err(|e| AppError::Storage(format!("Reading {key} failed: {e}")))?;
    Ok(data.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_key_layout() {
        let user = Uuid::nil();
        let upload = Uuid::nil();
        assert_eq!(
            resume_key(user, upload, "cv.pdf"),
            format!("resumes/{user}/{upload}/cv.pdf")
        );
    }

    #[test]
    fn test_resume_key_flattens_separators() {
        let key = resume_key(Uuid::nil(), Uuid::nil(), "../etc\\passwd.pdf");
        assert!(key.ends_with("/.._etc_passwd.pdf"));
    }
}
