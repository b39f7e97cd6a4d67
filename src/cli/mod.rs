//! Terminal menus driving the credential and inventory stores.

pub mod prompt;
mod shoes;

use crate::auth::service as auth_service;
use crate::auth::User;
use crate::db::AppState;
use crate::error::AppError;
use prompt::read_line;

/// Print a business-rule or infrastructure error for the user.
/// Validation failures list every rejected field.
pub(crate) fn report_error(err: &AppError) {
    match err {
        AppError::Validation(v) => {
            println!("Invalid input:");
            for field in &v.errors {
                println!("  - {}: {}", field.field, field.message);
            }
        }
        AppError::Database(e) => {
            println!("Database error: {e}");
            println!("Please try again later.");
        }
        AppError::PasswordHash(_) => {
            println!("Internal error while processing credentials. Please try again.");
        }
        other => println!("Error: {other}"),
    }
}

fn is_eof(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .map(|e| e.kind() == std::io::ErrorKind::UnexpectedEof)
        .unwrap_or(false)
}

/// Run the whole interactive session: login menu, then the shoe menu.
pub async fn run(state: &AppState) -> anyhow::Result<()> {
    match session(state).await {
        // Closing stdin ends the session cleanly.
        Err(e) if is_eof(&e) => Ok(()),
        other => other,
    }
}

async fn session(state: &AppState) -> anyhow::Result<()> {
    let Some(user) = login_menu(state).await? else {
        return Ok(());
    };
    shoes::shoe_menu(&state.db, user.id).await
}

async fn login_menu(state: &AppState) -> anyhow::Result<Option<User>> {
    loop {
        println!("Welcome to the Shoe Database");
        println!("Are you a new user or an existing user?");
        println!("1. New user");
        println!("2. Existing user");
        println!("3. Exit");

        match read_line("Enter your choice: ")?.as_str() {
            "1" => return create_account(state).await,
            "2" => {
                println!("Existing user, redirecting to login");
                return login(state).await;
            }
            "3" => {
                println!("Exiting Shoe Database...");
                return Ok(None);
            }
            _ => println!("\nError: Invalid choice, please try again\n"),
        }
    }
}

async fn create_account(state: &AppState) -> anyhow::Result<Option<User>> {
    println!("New user, you will need to create an account");
    loop {
        let username = read_line("Enter your username: ")?;
        let email = read_line("Enter your email: ")?;
        let password = read_line("Enter your password: ")?;

        match auth_service::register(&state.db, &username, &email, &password).await {
            Ok(user) => {
                println!("User created successfully, heading to main menu...");
                return Ok(Some(user));
            }
            Err(e) if e.is_infrastructure() => {
                report_error(&e);
                println!("Unable to create account. Please try again later.");
                return Ok(None);
            }
            Err(e) => {
                report_error(&e);
                println!("Please try again with different credentials");
            }
        }
    }
}

async fn login(state: &AppState) -> anyhow::Result<Option<User>> {
    loop {
        let username = read_line("Enter your username: ")?;
        let password = read_line("Enter your password: ")?;

        match auth_service::login(&state.db, &username, &password).await {
            Ok(user) => {
                println!("Login successful, heading to main menu...");
                return Ok(Some(user));
            }
            Err(AppError::Auth) => {
                println!("Invalid username or password, please try again");
            }
            Err(e) => {
                report_error(&e);
                println!("Unable to login. Please try again later.");
                return Ok(None);
            }
        }
    }
}
