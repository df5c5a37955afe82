#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub email: Email,
    pub receipt: Receipt,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

/// Delivery endpoint of the external email microservice.
#[derive(Debug, Clone)]
pub struct Email {
    pub service_url: String,
}

#[derive(Debug, Clone)]
pub struct Receipt {
    pub issuer: String,
}
