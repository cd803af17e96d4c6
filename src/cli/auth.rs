//! Login and logout
//!
//! Token acquisition happens elsewhere; these commands only store or drop
//! the token attached to backend requests.

use crate::error::Result;
use crate::session::{SessionContext, TokenStore};
use clap::Args;

/// Login command arguments
#[derive(Args)]
pub struct LoginArgs {
    /// Access token issued by the backend
    pub token: String,
}

/// Run the login command
pub fn login(args: LoginArgs) -> Result<()> {
    let store = TokenStore::new()?;
    let path = store.path().to_path_buf();

    SessionContext::persistent(store)?.set_token(args.token.trim())?;
    println!("Token saved to {}", path.display());
    Ok(())
}

/// Run the logout command
pub fn logout() -> Result<()> {
    let session = SessionContext::persistent(TokenStore::new()?)?;
    if !session.is_authenticated() {
        println!("Not logged in");
        return Ok(());
    }

    session.clear_token()?;
    println!("Token removed");
    Ok(())
}
