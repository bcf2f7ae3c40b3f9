use anyhow::{anyhow, Context};
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(user: Uuid, hours: Option<u64>, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    if config.security.jwt_secret.is_empty() {
        return Err(anyhow!("JWT_SECRET is not set"));
    }

    let hours = hours.unwrap_or(config.security.jwt_expiry_hours);
    let claims = Claims::new(user, hours)?;
    let token = generate_jwt(&claims, &config.security.jwt_secret).context("failed to sign token")?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "token": token,
                "user": user,
                "expires_at": claims.exp,
            }))?
        ),
        // Bare token so it can be captured with $(catalog token ...)
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
