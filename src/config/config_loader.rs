use anyhow::{Ok, Result};

use super::config_model::{Database, DotEnvyConfig, Email, Receipt, Server};

const DEFAULT_EMAIL_SERVICE_URL: &str = "http://localhost:8080/send-email";
const DEFAULT_RECEIPT_ISSUER: &str = "Example Corp";

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let email = Email {
        service_url: std::env::var("EMAIL_SERVICE_URL")
            .unwrap_or(DEFAULT_EMAIL_SERVICE_URL.to_string()),
    };

    let receipt = Receipt {
        issuer: std::env::var("RECEIPT_ISSUER").unwrap_or(DEFAULT_RECEIPT_ISSUER.to_string()),
    };

    Ok(DotEnvyConfig {
        server,
        database,
        email,
        receipt,
    })
}
