//! fitspace CLI entry point
//!
//! Coach and gym discovery - CLI + web app

use fitspace::cli;
use fitspace::Error;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        match e {
            Error::Validation(fields) => {
                eprintln!("Error: invalid input");
                for (field, message) in fields.iter() {
                    eprintln!("  {}: {}", field, message);
                }
            }
            other => eprintln!("Error: {}", other),
        }
        std::process::exit(1);
    }
}
