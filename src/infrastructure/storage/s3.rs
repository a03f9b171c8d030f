use super::{ImageStorage, is_safe_key};
use crate::config::settings::S3Config;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::{Client, config::BehaviorVersion, config::Credentials, config::Region};
use bytes::Bytes;
use tracing::info;

#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    public_base: String,
}

impl S3Storage {
    pub fn new(config: &S3Config) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "static",
        );

        let sdk_config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(&config.endpoint)
            .credentials_provider(credentials)
            .force_path_style(true) // Required for MinIO
            .build();

        info!("Using S3 bucket {} at {}", config.bucket, config.endpoint);

        Self {
            client: Client::from_conf(sdk_config),
            bucket: config.bucket.clone(),
            public_base: config.public_base(),
        }
    }
}

#[async_trait]
impl ImageStorage for S3Storage {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<()> {
        if !is_safe_key(key) {
            bail!("refusing unsafe storage key {:?}", key);
        }

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .with_context(|| format!("failed to upload {} to bucket {}", key, self.bucket))?;

        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("failed to delete {} from bucket {}", key, self.bucket))?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }
}
