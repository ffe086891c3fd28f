//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! cb-cli user create -u alice -p 's3cret!' -e alice@example.com -n "Alice"
//! ```

use comparebuddy_api::services::AuthService;
use comparebuddy_api::services::auth::Registration;

use super::{CommandError, connect};

/// Create a password user with the same validation as `POST /api/auth/register`.
///
/// # Errors
///
/// Returns an error if validation fails, the username or email is taken, or
/// the database is unreachable.
pub async fn create(
    username: &str,
    password: &str,
    email: Option<&str>,
    display_name: Option<&str>,
) -> Result<(), CommandError> {
    let pool = connect().await?;

    let user = AuthService::new(&pool)
        .register(&Registration {
            username,
            email: email.unwrap_or_default(),
            password,
            display_name: display_name.unwrap_or_default(),
        })
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, Username: {}",
        user.id,
        user.username
    );

    pool.close().await;
    Ok(())
}
