// src/services/blob_storage.rs

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_credential_types::Credentials;
use aws_sdk_s3::{
    config::{Builder as S3ConfigBuilder, Region},
    primitives::ByteStream,
    Client as S3Client,
};

#[cfg(test)]
use mockall::automock;

use crate::config::Config;

/// Armazenamento dos anexos de projeto.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Envia o conteúdo e devolve a URL pública do objeto.
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: Option<String>) -> Result<String>;

    async fn download(&self, key: &str) -> Result<Vec<u8>>;

    async fn delete(&self, key: &str) -> Result<()>;
}

pub struct S3BlobStorage {
    client: S3Client,
    bucket: String,
    public_base_url: String,
}

impl S3BlobStorage {
    pub async fn from_config(config: &Config) -> Result<Self> {
        let region = Region::new(config.blob_region.clone());
        let region_provider = RegionProviderChain::first_try(Some(region))
            .or_default_provider()
            .or_else("us-east-1");

        #[allow(deprecated)]
        let mut loader = aws_config::from_env().region(region_provider);

        if let Some(endpoint) = &config.blob_endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        if let (Some(access_key), Some(secret_key)) = (
            config.blob_access_key_id.clone(),
            config.blob_secret_access_key.clone(),
        ) {
            let credentials = Credentials::new(access_key, secret_key, None, None, "static");
            loader = loader.credentials_provider(credentials);
        }

        let base_config = loader.load().await;
        let s3_config = S3ConfigBuilder::from(&base_config)
            .force_path_style(true)
            .build();

        Ok(Self {
            client: S3Client::from_conf(s3_config),
            bucket: config.blob_bucket.clone(),
            public_base_url: public_base_url(config),
        })
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

// BLOB_PUBLIC_BASE_URL > endpoint/bucket > host virtual da AWS
fn public_base_url(config: &Config) -> String {
    if let Some(base) = &config.blob_public_base_url {
        return base.trim_end_matches('/').to_string();
    }
    match &config.blob_endpoint_url {
        Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), config.blob_bucket),
        None => format!(
            "https://{}.s3.{}.amazonaws.com",
            config.blob_bucket, config.blob_region
        ),
    }
}

#[async_trait]
impl BlobStorage for S3BlobStorage {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: Option<String>) -> Result<String> {
        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes));

        if let Some(content_type) = content_type {
            request = request.content_type(content_type);
        }

        request
            .send()
            .await
            .with_context(|| format!("falha ao enviar o objeto '{key}' ao storage"))?;

        Ok(self.object_url(key))
    }

    async fn download(&self, key: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("falha ao baixar o objeto '{key}' do storage"))?;

        let bytes = response
            .body
            .collect()
            .await
            .context("falha ao ler o conteúdo do objeto")?
            .into_bytes()
            .to_vec();

        Ok(bytes)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("falha ao remover o objeto '{key}' do storage"))?;

        Ok(())
    }
}
