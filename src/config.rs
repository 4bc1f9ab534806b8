use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub db_max_connections: u32,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("TASKBOARD_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid TASKBOARD_HOST: {e}"))?;

        let port: u16 = env_or("TASKBOARD_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid TASKBOARD_PORT: {e}"))?;

        let max_body_size: usize = env_or("TASKBOARD_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid TASKBOARD_MAX_BODY_SIZE: {e}"))?;

        let db_max_connections: u32 = env_or("TASKBOARD_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid TASKBOARD_DB_MAX_CONNECTIONS: {e}"))?;

        let log_level = env_or("TASKBOARD_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            host,
            port,
            max_body_size,
            db_max_connections,
            log_level,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            database_url: String::new(),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            max_body_size: 1_048_576,
            db_max_connections: 1,
            log_level: "warn".to_string(),
        }
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
