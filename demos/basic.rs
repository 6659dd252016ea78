//! Basic example demonstrating the TeamCity API client.
//!
//! Run with:
//! ```
//! TEAMCITY_ADDR=http://localhost:8111 TEAMCITY_USER=admin TEAMCITY_PASSWORD=secret \
//!     cargo run --example basic -- MyProject
//! ```

use std::env;

use teamcity::{Resource, TeamCityClient, Transport};

#[tokio::main]
async fn main() -> teamcity::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let user = env::var("TEAMCITY_USER").unwrap_or_default();
    let password = env::var("TEAMCITY_PASSWORD").unwrap_or_default();
    let project_id = env::args().nth(1).unwrap_or_else(|| "_Root".to_string());

    println!("Creating TeamCity client...");
    let client = TeamCityClient::from_env(&user, &password, Transport::default_client()?)?;
    println!("REST root: {}", client.base_url());

    client.validate().await?;
    println!("Server is reachable");

    println!("\n--- Server ---");
    let info = client.server.info().await?;
    println!("Version: {}", info.version.as_deref().unwrap_or("unknown"));
    if let Some(now) = info.current_time_parsed() {
        println!("Server time: {now}");
    }

    println!("\n--- Project {project_id} ---");
    let project = client.projects.get(&project_id).await?;
    println!("Name: {}", project["name"]);

    let params = client.project_parameters(&project_id).list().await?;
    println!("Found {} parameters", params.count);
    for prop in params.items.iter().take(10) {
        println!("  - {} = {}", prop.name, prop.value);
    }

    Ok(())
}
