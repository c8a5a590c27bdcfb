/// Database layer for Postboard
///
/// - `pool`: lazily connecting PostgreSQL pool with bounded timeouts
/// - `migrations`: applies the bundled schema at startup
///
/// # Example
///
/// ```no_run
/// use postboard_shared::db::{migrations::run_migrations, pool::{create_lazy_pool, DatabaseConfig}};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_lazy_pool(&DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

pub mod migrations;
pub mod pool;
