use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
}

impl AppConfig {
    /// Read configuration from the environment. `DATABASE_URL` wins; the
    /// discrete `DB_*` variables the original deployment used are accepted
    /// as a fallback.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let host = std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".into());
                let port = std::env::var("DB_PORT").unwrap_or_else(|_| "5432".into());
                let name = std::env::var("DB_NAME")?;
                let user = std::env::var("DB_USER")?;
                let pass = std::env::var("DB_PASS")?;
                format!("postgres://{user}:{pass}@{host}:{port}/{name}")
            }
        };
        Ok(Self { database_url })
    }
}
