use clap::{Parser, Subcommand};
use petstore_client::{ApiClient, ClientConfig};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line front end for the Petstore API
///
/// The server is taken from `PETSTORE_BASE_URL`; extra headers from
/// `PETSTORE_DEFAULT_HEADERS` (`name:value,name:value`).
#[derive(Parser)]
#[command(name = "petstore")]
#[command(about = "Query and manage a Swagger Petstore server", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pet operations
    #[command(subcommand)]
    Pet(PetCommand),
    /// User operations
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Subcommand)]
enum PetCommand {
    /// Fetch a single pet
    Get { id: i64 },
    /// List pets with any of the given statuses
    FindByStatus {
        #[arg(value_delimiter = ',', required = true)]
        status: Vec<String>,
    },
    /// List pets carrying any of the given tags
    FindByTags {
        #[arg(value_delimiter = ',', required = true)]
        tags: Vec<String>,
    },
    /// Delete a pet
    Delete { id: i64, api_key: Option<String> },
}

#[derive(Subcommand)]
enum UserCommand {
    /// Fetch a user by name
    Get { username: String },
    /// Log in and print the session token
    Login { username: String, password: String },
    /// End the current session
    Logout,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(client: &ApiClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Pet(PetCommand::Get { id }) => print_json(&client.pet().get_pet_by_id(id).await?),
        Command::Pet(PetCommand::FindByStatus { status }) => {
            print_json(&client.pet().find_pets_by_status(&status).await?)
        }
        Command::Pet(PetCommand::FindByTags { tags }) => {
            print_json(&client.pet().find_pets_by_tags(&tags).await?)
        }
        Command::Pet(PetCommand::Delete { id, api_key }) => {
            client.pet().delete_pet(id, api_key.as_deref()).await?;
            tracing::info!(id, "pet deleted");
            Ok(())
        }
        Command::User(UserCommand::Get { username }) => {
            print_json(&client.user().get_user_by_name(&username).await?)
        }
        Command::User(UserCommand::Login { username, password }) => {
            let token = client.user().login_user(&username, &password).await?;
            println!("{token}");
            Ok(())
        }
        Command::User(UserCommand::Logout) => {
            client.user().logout_user().await?;
            tracing::info!("logged out");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env();
    tracing::debug!(base_url = %config.base_url, "using Petstore server");
    let client = ApiClient::from_config(&config)?;

    if let Err(e) = run(&client, cli.command).await {
        tracing::error!("Request failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
