use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog_client::CatalogClient;
use chapa_client::ChapaClient;
use identity_client::IdentityClient;
use myticket_common::{BuyerContact, Config, EventId, MyTicketError, TierLabel};
use myticket_storefront::{
    entry_route, CheckoutConfig, FileStore, Preferences, Route, SessionGate, Storefront,
    EVENT_CATEGORIES,
};

#[derive(Parser)]
#[command(name = "myticket", about = "Browse events and buy tickets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List events from the catalog
    Events,
    /// List places from the catalog
    Places,
    /// Show one event with its ticket tiers
    Event {
        id: String,
    },
    /// Log in with email and password
    Login {
        email: String,
    },
    /// Create an account
    Register {
        email: String,
    },
    /// Send a password-reset email
    ResetPassword {
        email: String,
    },
    /// Log out and clear the persisted session
    Logout,
    /// Show favourite categories, or toggle one
    Prefs {
        #[arg(long)]
        toggle: Option<String>,
    },
    /// Buy tickets for an event and print the gateway checkout URL
    Buy {
        event_id: String,
        #[arg(long, default_value_t = 0)]
        regular: u32,
        #[arg(long, default_value_t = 0)]
        vip: u32,
        #[arg(long, default_value_t = 0)]
        vvip: u32,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("myticket=info".parse()?))
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli.command).await {
        // Every flow failure is recoverable: render it and stop, no panic.
        eprintln!("{err}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Command) -> std::result::Result<(), MyTicketError> {
    match command {
        Command::Events => {
            let config = Config::browse_from_env();
            let catalog = CatalogClient::new(&config.catalog_url)
                .fetch_catalog()
                .await?;

            println!("Top events:");
            for event in catalog.top_events() {
                print_event_line(event);
            }
            println!("\nEvents:");
            for event in catalog.regular_events() {
                print_event_line(event);
            }
        }

        Command::Places => {
            let config = Config::browse_from_env();
            let catalog = CatalogClient::new(&config.catalog_url)
                .fetch_catalog()
                .await?;

            for place in &catalog.places {
                println!("[{}] {} - {}", place.id, place.name, place.description);
            }
        }

        Command::Event { id } => {
            let config = Config::browse_from_env();
            let catalog = CatalogClient::new(&config.catalog_url)
                .fetch_catalog()
                .await?;

            let id = EventId(id);
            let event = catalog
                .event(&id)
                .ok_or(MyTicketError::EventNotFound(id))?;

            println!("{}", event.display_name);
            println!("{}", event.description);
            println!("{} - {}", format_date(&event.date_time), event.location);
            for tier in &event.tiers {
                println!("  {}: {}", tier.label, tier.price);
            }
        }

        Command::Login { email } => {
            let config = Config::from_env();
            let mut gate = session_gate(&config)?;
            let password = prompt_password()?;
            let session = gate.login(&email, &password).await?;
            println!("Logged in as {}", session.email);
        }

        Command::Register { email } => {
            let config = Config::from_env();
            let gate = session_gate(&config)?;
            let password = prompt_password()?;
            let confirm = rpassword::prompt_password("Re-type password: ")
                .map_err(|e| MyTicketError::Anyhow(anyhow::anyhow!("could not read password: {e}")))?;
            gate.register(&myticket_storefront::Registration {
                email,
                password,
                confirm_password: confirm,
                accepted_terms: confirm_terms()?,
            })
            .await?;
            println!("Account created. Log in with `myticket login`.");
        }

        Command::ResetPassword { email } => {
            let config = Config::from_env();
            let gate = session_gate(&config)?;
            gate.send_password_reset(&email).await?;
            println!("Password reset email sent to {email}. Check your inbox.");
        }

        Command::Logout => {
            let config = Config::from_env();
            let mut gate = session_gate(&config)?;
            gate.logout()?;
            println!("Logged out.");
        }

        Command::Prefs { toggle } => {
            let config = Config::browse_from_env();
            let store = FileStore::new(&config.data_dir);
            let mut prefs = Preferences::load(&store)?;

            if let Some(category) = toggle {
                match prefs.toggle(&category) {
                    Some(true) => println!("Added {category}"),
                    Some(false) => println!("Removed {category}"),
                    None => {
                        println!("Unknown category {category:?}. Choose one of:");
                        for known in EVENT_CATEGORIES {
                            println!("  {known}");
                        }
                        return Ok(());
                    }
                }
                prefs.save(&store)?;
            }

            for category in EVENT_CATEGORIES {
                let mark = if prefs.is_selected(category) { "x" } else { " " };
                println!("[{mark}] {category}");
            }
        }

        Command::Buy {
            event_id,
            regular,
            vip,
            vvip,
            first_name,
            last_name,
            email,
            phone,
        } => {
            let config = Config::from_env();
            config.log_redacted();

            let gate = session_gate(&config)?;
            if entry_route(&gate) == Route::Login {
                return Err(MyTicketError::NotAuthenticated);
            }

            let storefront = Storefront::new(
                Arc::new(CatalogClient::new(&config.catalog_url)),
                Arc::new(ChapaClient::new(
                    &config.chapa_base_url,
                    &config.chapa_secret_key,
                )),
                gate,
                CheckoutConfig::from_config(&config),
            );

            let requested = [
                (TierLabel::Regular, regular),
                (TierLabel::Vip, vip),
                (TierLabel::Vvip, vvip),
            ];
            let requested: Vec<_> = requested.into_iter().filter(|&(_, n)| n > 0).collect();

            let buyer = BuyerContact {
                first_name,
                last_name,
                email,
                phone_number: phone,
            };

            info!(event_id = event_id.as_str(), "Starting purchase");
            let route = storefront
                .purchase(&EventId(event_id), &requested, &buyer)
                .await?;

            if let Route::ExternalRedirect(url) = route {
                println!("Complete your payment at:\n{url}");
            }
        }
    }

    Ok(())
}

fn session_gate(config: &Config) -> std::result::Result<SessionGate, MyTicketError> {
    let provider = Arc::new(IdentityClient::new(
        &config.identity_base_url,
        &config.identity_api_key,
    ));
    let store = Arc::new(FileStore::new(&config.data_dir));
    SessionGate::new(provider, store)
}

fn prompt_password() -> std::result::Result<String, MyTicketError> {
    rpassword::prompt_password("Password: ")
        .map_err(|e| MyTicketError::Anyhow(anyhow::anyhow!("could not read password: {e}")))
}

fn confirm_terms() -> std::result::Result<bool, MyTicketError> {
    println!("Accept the Privacy Policy and Terms? [y/N]");
    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .map_err(|e| MyTicketError::Anyhow(anyhow::anyhow!("could not read input: {e}")))?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_event_line(event: &myticket_common::Event) {
    println!(
        "[{}] {} - {} - {}",
        event.id,
        event.display_name,
        format_date(&event.date_time),
        event.location
    );
}

/// `Nov 02 19:30`, the short date/time format the event cards use.
fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%b %d %H:%M").to_string()
}
