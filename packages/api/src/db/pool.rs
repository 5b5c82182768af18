//! Process-wide PostgreSQL pool.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// `DATABASE_MAX_CONNECTIONS`, falling back to 5 when unset or not a positive number.
fn max_connections(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MAX_CONNECTIONS)
}

/// The shared pool, connecting to `DATABASE_URL` on first use.
pub async fn get_pool() -> Result<&'static PgPool, sqlx::Error> {
    POOL.get_or_try_init(|| async {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| sqlx::Error::Configuration("DATABASE_URL must be set".into()))?;
        let limit = max_connections(std::env::var("DATABASE_MAX_CONNECTIONS").ok().as_deref());

        tracing::info!(max_connections = limit, "connecting to PostgreSQL");
        PgPoolOptions::new()
            .max_connections(limit)
            .connect(&database_url)
            .await
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_connections() {
        assert_eq!(max_connections(None), 5);
        assert_eq!(max_connections(Some("12")), 12);
        assert_eq!(max_connections(Some(" 3 ")), 3);
        assert_eq!(max_connections(Some("0")), 5);
        assert_eq!(max_connections(Some("many")), 5);
    }
}
