use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let pool = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::migrate(&pool).await?;

    let target = config.database.redacted_url().unwrap_or_default();
    output_success(
        &output_format,
        &format!("Migrations applied to {}", target),
        Some(serde_json::json!({ "database": target })),
    )
}
