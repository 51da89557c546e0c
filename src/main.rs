use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use tracing_subscriber::{fmt, EnvFilter};

use upload_gateway::{
    server,
    storage::UploadStorage,
    types::{Config, Environment},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // JSON format for staging/production log pipelines, regular format for
    // development
    match config.environment {
        Environment::Production | Environment::Staging => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    let s3_client = Arc::new(S3Client::from_conf(config.s3_client_config()));
    let storage = Arc::new(UploadStorage::new(
        s3_client,
        config.bucket.clone(),
        config.key_prefix.clone(),
        config.presign_expiry_secs,
    ));

    server::start(config, storage).await
}
