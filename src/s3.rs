use color_eyre::eyre::bail;
use http::{HeaderMap, HeaderValue};
use s3::{creds::Credentials, Bucket, Region};
use std::env::var;

///every upload lands in this bucket
pub const BUCKET_NAME: &str = "lob-drops";

const BUCKET_REGION: Region = Region::UsEast1;

///uploaded objects are retrievable by anyone with the URL
const ACL_PUBLIC_READ: &str = "public-read";

pub fn get_bucket() -> color_eyre::Result<Bucket> {
    let aws_creds = get_aws_creds()?;
    let bucket = Bucket::new(BUCKET_NAME, BUCKET_REGION, aws_creds)?;

    let mut extra_headers = HeaderMap::new();
    extra_headers.insert("x-amz-acl", HeaderValue::from_static(ACL_PUBLIC_READ));

    Ok(bucket.with_extra_headers(extra_headers)?)
}

pub fn get_aws_creds() -> color_eyre::Result<Credentials> {
    let Ok(access_key) = var("AWS_ACCESS_KEY_ID") else {
        bail!("expected env var AWS_ACCESS_KEY_ID");
    };
    let Ok(secret_key) = var("AWS_SECRET_ACCESS_KEY") else {
        bail!("expected env var AWS_SECRET_ACCESS_KEY");
    };

    Ok(Credentials::new(
        Some(&access_key),
        Some(&secret_key),
        None,
        None,
        None,
    )?)
}
