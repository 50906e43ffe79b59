use std::str::FromStr;
use lambda_http::{run, Error};
use book_catalog::catalog::controller::router;
use book_catalog::core::controller::AppState;
use book_catalog::core::domain::Configuration;
use book_catalog::core::repository::{RepositoryStore, STORE_ENV};
use book_catalog::utils::ddb::{build_db_client, ensure_tables, setup_tracing};

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/images-test.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

const DEV_MODE_ENV: &str = "LIBRARY_DEV_MODE";

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let dev_mode = std::env::var(DEV_MODE_ENV).map(|v| v.trim() == "true").unwrap_or(false);
    if dev_mode {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
    }

    let store = RepositoryStore::from_str(std::env::var(STORE_ENV).unwrap_or_default().as_str())?;
    let config = Configuration::from_env(if dev_mode { "dev" } else { "prod" });
    if store == RepositoryStore::LocalDynamoDB {
        let client = build_db_client(&config, store).await;
        ensure_tables(&client, &config).await;
    }
    tracing::info!(store = %store, branch = config.branch_id.as_str(), "starting book catalog");

    let app = router(AppState::new(config, store));

    run(app).await
}
