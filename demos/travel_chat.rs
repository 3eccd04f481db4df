//! Interactive travel chat in the terminal
//!
//! History and the API key are kept in `.wayfarer/` under the current
//! directory, so a restarted session picks up where it left off.
//!
//! Commands:
//! - `/form`    fill in the trip form
//! - `/flights` show flight options from the last form
//! - `/key`     configure a Gemini API key
//! - `/nokey`   forget the API key and use sample responses
//! - `/clear`   clear the conversation
//! - `/quit`    exit
//!
//! Run with: cargo run --example travel_chat
//! Set RUST_LOG=wayfarer=debug for detailed logs.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;
use wayfarer::{
    FileStore, MessageRole, ProviderConfig, SessionPhase, TravelAgent, TravelFormData,
};

type Input = Lines<BufReader<Stdin>>;

async fn prompt(input: &mut Input, label: &str) -> Result<String, Box<dyn std::error::Error>> {
    println!("{}", label);
    Ok(input.next_line().await?.unwrap_or_default().trim().to_string())
}

async fn configure(agent: &TravelAgent, input: &mut Input) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔑 Gemini API key");
    println!("   Get a key at https://makersuite.google.com/app/apikey");
    let key = prompt(input, "   Paste your key, or press Enter to use sample responses:").await?;

    if key.is_empty() {
        agent.continue_without_key().await;
        println!("✓ Using sample responses\n");
        return Ok(());
    }

    match agent.configure_api_key(&key).await {
        Ok(()) => println!("✓ API key saved\n"),
        Err(e) => {
            println!("❌ {}", e);
            agent.continue_without_key().await;
        }
    }
    Ok(())
}

async fn fill_form(agent: &TravelAgent, input: &mut Input) -> Result<(), Box<dyn std::error::Error>> {
    println!("📝 Trip details");
    let source = prompt(input, "   From:").await?;
    let destination = prompt(input, "   To:").await?;
    let start = prompt(input, "   Start date (YYYY-MM-DD):").await?;
    let end = prompt(input, "   End date (YYYY-MM-DD):").await?;
    let budget = prompt(input, "   Budget (optional):").await?;
    let travelers = prompt(input, "   Travelers (optional):").await?;
    let interests = prompt(input, "   Interests (optional):").await?;
    let flights = prompt(input, "   Include flights? [y/N]:").await?;

    let form = TravelFormData::new(source, destination)
        .with_dates(start, end)
        .with_budget(budget)
        .with_travelers(travelers)
        .with_interests(interests)
        .with_flights(flights.eq_ignore_ascii_case("y"));

    match agent.submit_form(form).await {
        Ok(outcome) => {
            println!("\n🤖 {}\n", outcome.reply);
            if let Some(s) = outcome.suggestion {
                println!("🌍 {} ({}), best {}", s.destination, s.duration, s.when_to_go);
            }
            if !outcome.flights.is_empty() {
                println!("✈️  {} flight options found, type /flights to see them", outcome.flights.len());
            }
            println!();
        }
        Err(e) => println!("❌ {}\n", e),
    }
    Ok(())
}

async fn show_flights(agent: &TravelAgent) {
    let flights = agent.flights().await;
    if flights.is_empty() {
        println!("No flight options yet. Submit a form with flights included.\n");
        return;
    }
    for option in flights {
        println!(
            "  ${:>5}  {:>4} min  {} stop(s)  {}",
            option.price,
            option.total_duration,
            option.stops(),
            option.flight_numbers()
        );
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wayfarer=warn")),
        )
        .init();

    println!("🧳 Travel Assistant");
    println!("===================\n");

    let agent = TravelAgent::builder()
        .name("Travel Assistant")
        .store(Arc::new(FileStore::new(".wayfarer")))
        .provider_config(ProviderConfig::from_env())
        .build()?;
    agent.restore().await?;

    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        agent.configure_api_key(&key).await?;
    }

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    if agent.phase().await == SessionPhase::AwaitingConfiguration {
        configure(&agent, &mut input).await?;
    }

    for message in agent.messages().await {
        let who = match message.role {
            MessageRole::User => "🧑",
            MessageRole::Assistant => "🤖",
        };
        println!("{} {}\n", who, message.content);
    }

    println!("Ask anything about your trip, or type /form to plan one. /quit exits.\n");

    while let Some(line) = input.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" => break,
            "/form" => fill_form(&agent, &mut input).await?,
            "/flights" => show_flights(&agent).await,
            "/key" => {
                agent.show_configuration().await;
                configure(&agent, &mut input).await?;
            }
            "/nokey" => {
                agent.clear_api_key().await?;
                println!("✓ API key removed, using sample responses\n");
            }
            "/clear" => match agent.clear_conversation().await {
                Ok(()) => println!("✓ Conversation cleared\n"),
                Err(e) => println!("❌ {}\n", e),
            },
            text => match agent.send_message(text).await {
                Ok(reply) => {
                    println!("\n🤖 {}\n", reply);
                    if let Some(s) = agent.suggestion().await {
                        println!("🌍 Suggested: {}, {}\n", s.destination, s.for_whom);
                    }
                }
                Err(e) => println!("❌ {}\n", e),
            },
        }
    }

    println!("👋 Safe travels!");
    Ok(())
}
