use rusbrowser::{AgentConfig, BrowserAgent, BrowserRequest, logging::init_tracing};

#[tokio::main]
async fn main() {
    let config = match AgentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(2);
        }
    };
    init_tracing(&config.log_level);

    let query = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let query = if query.is_empty() {
        "Go to Google and search for 'Rust programming'".to_string()
    } else {
        query
    };

    let request = BrowserRequest::new(query).with_current_url("https://example.com");
    let agent = BrowserAgent::from_config(&config);

    println!("🚀 Running browser agent: {}", request.query);
    let outcome = agent.run(&request, config.max_iterations).await;

    match serde_json::to_string_pretty(&outcome) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("❌ could not render outcome: {e}"),
    }
    if !outcome.success {
        std::process::exit(1);
    }
}
