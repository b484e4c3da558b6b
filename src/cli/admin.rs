use std::sync::Arc;

use crate::app_data::AppData;
use crate::services::IdentityService;
use crate::types::internal::context::RequestContext;
use crate::types::internal::NewAccount;

/// Register an administrator from the command line
///
/// Runs the same validation and uniqueness checks as the signup endpoint.
pub async fn create_admin(
    app_data: Arc<AppData>,
    email: String,
    password: String,
    name: String,
    phone: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("create_admin");
    let identity = IdentityService::new(app_data);

    let account = NewAccount {
        email,
        password,
        real_name: name,
        phone,
        nickname: None,
    };

    match identity.register_admin(&ctx, account).await {
        Ok(admin) => {
            println!("✅ Administrator {} created (id {})", admin.email, admin.id);
            Ok(())
        }
        Err(e) => {
            println!("❌ Error: {}", e);
            Err(e.into())
        }
    }
}
