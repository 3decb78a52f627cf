// Creates an admin account from the command line.
// Elevation is disabled in production, so this is how the first ticket creator is made.

use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::AuthCoordinator;

/// Create an admin and print its generated password once
pub async fn create_admin(app_data: Arc<AppData>, username: &str) -> Result<(), Box<dyn std::error::Error>> {
    let coordinator = AuthCoordinator::new(app_data);
    let (user, password) = coordinator.bootstrap_admin(username).await?;

    println!("\n=== Admin account created ===\n");
    println!("  user_id:  {}", user.id);
    println!("  username: {}", user.username);
    println!("  password: {}", password);
    println!("\nStore this password now; it will not be shown again.\n");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppEnvironment;
    use crate::test::utils::setup_test_app;

    #[tokio::test]
    async fn test_create_admin_persists_admin_role() {
        let app_data = setup_test_app(AppEnvironment::Production).await;

        create_admin(app_data.clone(), "root").await.unwrap();

        let user = app_data
            .user_store
            .find_by_username(&app_data.db, "root")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.role, "admin");
    }

    #[tokio::test]
    async fn test_create_admin_twice_fails() {
        let app_data = setup_test_app(AppEnvironment::Production).await;

        create_admin(app_data.clone(), "root").await.unwrap();
        assert!(create_admin(app_data, "root").await.is_err());
    }
}
