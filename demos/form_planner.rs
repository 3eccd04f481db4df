//! Trip form example
//!
//! Submits a trip form, prints the plan, the destination suggestion and the
//! mock flight options, then asks a follow-up question that carries the trip
//! details automatically.
//!
//! Uses Gemini when GEMINI_API_KEY is set, sample responses otherwise.
//!
//! Run with: cargo run --example form_planner

use wayfarer::{AgentConfig, FailurePolicy, TravelAgent, TravelFormData};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("🗺️  Trip Form Planner");
    println!("=====================\n");

    let agent = TravelAgent::builder()
        .name("Form Planner")
        .config(AgentConfig {
            failure_policy: FailurePolicy::Apologize,
            ..AgentConfig::default()
        })
        .build()?;

    match std::env::var("GEMINI_API_KEY") {
        Ok(key) => {
            agent.configure_api_key(&key).await?;
            println!("✅ Using Gemini\n");
        }
        Err(_) => {
            agent.continue_without_key().await;
            println!("ℹ️  GEMINI_API_KEY not set, using sample responses\n");
        }
    }

    let form = TravelFormData::new("New York", "Paris, France")
        .with_dates("2025-06-01", "2025-06-08")
        .with_budget("$3000")
        .with_travelers("2")
        .with_interests("museums, food, architecture")
        .with_flights(true);

    println!("📤 Submitting trip form...\n");
    let outcome = agent.submit_form(form).await?;

    println!("🤖 {}\n", outcome.reply);

    if let Some(s) = &outcome.suggestion {
        println!("🌍 {}", s.destination);
        println!("   {}", s.description);
        println!("   Duration: {}", s.duration);
        println!("   When to go: {}", s.when_to_go);
        println!("   For: {}\n", s.for_whom);
    }

    println!("✈️  Flight options:");
    for option in &outcome.flights {
        println!(
            "   ${} | {} min | {} stop(s) | {}",
            option.price,
            option.total_duration,
            option.stops(),
            option.flight_numbers()
        );
    }
    println!();

    let question = "What neighborhoods should we stay in?";
    println!("🧑 {}\n", question);
    let reply = agent.send_message(question).await?;
    println!("🤖 {}\n", reply);

    println!("📊 {} messages in this conversation", agent.messages().await.len());
    Ok(())
}
