use crate::{
    naming::{date_directory, random_hex_string, NAME_ENTROPY_BYTES},
    sniff::{sniff, FileKind},
};
use chrono::{DateTime, Utc};
use s3::Bucket;
use serde::Serialize;
use tokio::{fs::File, io::AsyncReadExt};

///one file on its way to the bucket; identity is fixed at construction
pub struct UploadCandidate {
    data: Vec<u8>,
    kind: FileKind,
    name: String,
    directory: String,
}

impl UploadCandidate {
    pub fn new(data: Vec<u8>, now: DateTime<Utc>) -> color_eyre::Result<Self> {
        let kind = sniff(&data);
        let name = random_hex_string(NAME_ENTROPY_BYTES)?;
        let directory = date_directory(now);

        Ok(Self {
            data,
            kind,
            name,
            directory,
        })
    }

    ///full object key: `YYYY-MM-DD/<32 hex chars>.<ext>`
    pub fn key(&self) -> String {
        format!("{}/{}.{}", self.directory, self.name, self.kind.extension)
    }

    pub fn content_type(&self) -> &'static str {
        self.kind.mime_type
    }
}

///what the storage provider told us about the landed object
#[derive(Serialize, Debug, Clone)]
pub struct UploadReceipt {
    pub location: String,
    pub bucket: String,
    pub key: String,
    pub etag: Option<String>,
    pub status_code: u16,
}

///the one seam between the pipeline and the storage provider, so tests can
///substitute a stub
pub trait ObjectStore {
    async fn put(
        &self,
        key: &str,
        body: &[u8],
        content_type: &str,
    ) -> color_eyre::Result<UploadReceipt>;
}

impl ObjectStore for Bucket {
    async fn put(
        &self,
        key: &str,
        body: &[u8],
        content_type: &str,
    ) -> color_eyre::Result<UploadReceipt> {
        let rsp = self
            .put_object_with_content_type(key, body, content_type)
            .await?;

        Ok(UploadReceipt {
            location: format!("{}/{key}", self.url()),
            bucket: self.name(),
            key: key.to_string(),
            etag: rsp.headers().get("etag").cloned(),
            status_code: rsp.status_code(),
        })
    }
}

///read, classify, name, then hand the candidate to the store - strictly in
///that order, nothing concurrent
pub async fn send_file(
    path: &str,
    store: &impl ObjectStore,
    now: DateTime<Utc>,
) -> color_eyre::Result<UploadReceipt> {
    let contents = read_file(path).await?;
    let candidate = UploadCandidate::new(contents, now)?;

    let key = candidate.key();
    info!(
        %key,
        content_type = candidate.content_type(),
        len = candidate.data.len(),
        "Uploading to S3"
    );

    let receipt = store
        .put(&key, &candidate.data, candidate.content_type())
        .await?;

    info!(location = %receipt.location, code = %receipt.status_code, "Uploaded to S3");

    Ok(receipt)
}

async fn read_file(path: &str) -> color_eyre::Result<Vec<u8>> {
    trace!(?path, "Reading file");

    let mut file = File::open(path).await?;
    let mut contents = vec![];
    let mut tmp = [0_u8; 1024];
    loop {
        match file.read(&mut tmp).await? {
            0 => break,
            n => {
                contents.extend(&tmp[0..n]);
            }
        }
    }

    info!(len = contents.len(), ?path, "Read file");

    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use color_eyre::eyre::bail;
    use regex::Regex;
    use std::sync::Mutex;

    struct SeenPut {
        key: String,
        content_type: String,
        len: usize,
    }

    ///records every put and always reports success
    #[derive(Default)]
    struct RecordingStore {
        seen: Mutex<Vec<SeenPut>>,
    }

    impl ObjectStore for RecordingStore {
        async fn put(
            &self,
            key: &str,
            body: &[u8],
            content_type: &str,
        ) -> color_eyre::Result<UploadReceipt> {
            self.seen.lock().unwrap().push(SeenPut {
                key: key.to_string(),
                content_type: content_type.to_string(),
                len: body.len(),
            });

            Ok(UploadReceipt {
                location: format!("https://stub.test/{key}"),
                bucket: "stub".to_string(),
                key: key.to_string(),
                etag: None,
                status_code: 200,
            })
        }
    }

    ///storage provider that is always down
    struct FailingStore;

    impl ObjectStore for FailingStore {
        async fn put(
            &self,
            _key: &str,
            _body: &[u8],
            _content_type: &str,
        ) -> color_eyre::Result<UploadReceipt> {
            bail!("storage offline")
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()
    }

    async fn temp_file_with(contents: &[u8]) -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload");
        tokio::fs::write(&path, contents).await.unwrap();

        (dir, path.to_str().unwrap().to_string())
    }

    #[test]
    fn test_candidate_key_shape() {
        let data = b"\x89PNG\r\n\x1a\n\0\0\0\x0dIHDR".to_vec();
        let candidate = UploadCandidate::new(data, fixed_now()).unwrap();

        let pattern = Regex::new(r"^2024-01-05/[0-9a-f]{32}\.png$").unwrap();
        assert!(pattern.is_match(&candidate.key()));
        assert_eq!(candidate.content_type(), "image/png");
    }

    #[test]
    fn test_candidate_identity_is_stable() {
        let candidate = UploadCandidate::new(vec![0_u8; 10], fixed_now()).unwrap();

        assert_eq!(candidate.key(), candidate.key());
    }

    #[tokio::test]
    async fn test_zero_byte_payload_end_to_end() {
        let (_dir, path) = temp_file_with(&[0_u8; 10]).await;
        let store = RecordingStore::default();

        let receipt = send_file(&path, &store, fixed_now()).await.unwrap();

        let seen = store.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);

        let pattern = Regex::new(r"^2024-01-05/[0-9a-f]{32}\.bin$").unwrap();
        assert!(pattern.is_match(&seen[0].key));
        assert_eq!(seen[0].content_type, "application/octet-stream");
        assert_eq!(seen[0].len, 10);
        assert_eq!(receipt.key, seen[0].key);
    }

    #[tokio::test]
    async fn test_sniffed_content_type_reaches_store() {
        let (_dir, path) = temp_file_with(b"%PDF-1.7\nhello").await;
        let store = RecordingStore::default();

        send_file(&path, &store, fixed_now()).await.unwrap();

        let seen = store.seen.lock().unwrap();
        assert_eq!(seen[0].content_type, "application/pdf");
        assert!(seen[0].key.ends_with(".pdf"));
    }

    #[tokio::test]
    async fn test_missing_file_means_no_put() {
        let store = RecordingStore::default();

        let result = send_file("/definitely/not/here", &store, fixed_now()).await;

        assert!(result.is_err());
        assert!(store.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_path_means_no_put() {
        //what an absent CLI argument degrades to
        let store = RecordingStore::default();

        let result = send_file("", &store, fixed_now()).await;

        assert!(result.is_err());
        assert!(store.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let (_dir, path) = temp_file_with(b"some bytes").await;

        let result = send_file(&path, &FailingStore, fixed_now()).await;

        assert!(result.unwrap_err().to_string().contains("storage offline"));
    }

    #[tokio::test]
    async fn test_large_file_read_round_trip() {
        //bigger than the 1024-byte read buffer, to cross a chunk boundary
        let payload = vec![7_u8; 5000];
        let (_dir, path) = temp_file_with(&payload).await;
        let store = RecordingStore::default();

        send_file(&path, &store, fixed_now()).await.unwrap();

        assert_eq!(store.seen.lock().unwrap()[0].len, 5000);
    }
}
