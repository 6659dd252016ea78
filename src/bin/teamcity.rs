//! TeamCity REST API CLI binary.
//!
//! A command-line interface for interacting with a TeamCity server.

use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use teamcity::cli::{startup_hint, Cli, Command, Entity, ParamOwner, ParamsAction};
use teamcity::output::PrettyPrint;
use teamcity::{
    ParameterService, Property, Resource, TeamCityClient, TeamCityError, TraceConfig, Transport,
};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match build_client(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(hint) = startup_hint(&e) {
                eprintln!("{hint}");
            }
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_client(cli: &Cli) -> teamcity::Result<TeamCityClient> {
    let trace = TraceConfig::new()
        .with_requests(cli.trace_requests)
        .with_responses(cli.trace_responses);
    let transport = Transport::default_client()?.with_trace_config(trace);

    match cli.address.as_deref() {
        Some(address) => TeamCityClient::with_address(&cli.user, &cli.password, address, transport),
        None => TeamCityClient::from_env(&cli.user, &cli.password, transport),
    }
}

async fn run(client: &TeamCityClient, cli: Cli) -> teamcity::Result<()> {
    match cli.command {
        Command::Validate => {
            client.validate().await?;
            println!("OK: {} is reachable", client.config().address());
        }
        Command::Server => {
            let info = client.server.info().await?;
            output_single(&info, cli.json)?;
        }
        Command::Get { entity, id } => handle_get(client, entity, &id).await?,
        Command::Params { action } => handle_params(client, action, cli.json).await?,
    }
    Ok(())
}

async fn handle_get(client: &TeamCityClient, entity: Entity, id: &str) -> teamcity::Result<()> {
    let value = match entity {
        Entity::Project => client.projects.get(id).await?,
        Entity::BuildType => client.build_types.get(id).await?,
        Entity::VcsRoot => client.vcs_roots.get(id).await?,
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

async fn handle_params(
    client: &TeamCityClient,
    action: ParamsAction,
    json: bool,
) -> teamcity::Result<()> {
    match action {
        ParamsAction::List { owner } => {
            let props = parameters(client, &owner)?.list().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&props.items)?);
            } else {
                let rows: Vec<PropertyRow> = props.items.iter().map(PropertyRow::from).collect();
                println!("{}", Table::new(rows));
                println!("\n{} parameters", props.count);
            }
        }
        ParamsAction::Get { name, owner } => {
            let prop = parameters(client, &owner)?.get(&name).await?;
            output_single(&prop, json)?;
        }
        ParamsAction::Set { name, value, owner } => {
            let prop = parameters(client, &owner)?.set(&name, &value).await?;
            output_single(&prop, json)?;
        }
        ParamsAction::Delete { name, owner } => {
            parameters(client, &owner)?.delete(&name).await?;
            println!("Deleted parameter {name}");
        }
    }
    Ok(())
}

fn parameters(client: &TeamCityClient, owner: &ParamOwner) -> teamcity::Result<ParameterService> {
    match (&owner.project, &owner.build_type) {
        (Some(project), _) => Ok(client.project_parameters(project)),
        (None, Some(build_type)) => Ok(client.build_type_parameters(build_type)),
        (None, None) => Err(TeamCityError::Configuration(
            "--project or --build-type is required".to_string(),
        )),
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> teamcity::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

#[derive(Tabled)]
struct PropertyRow {
    name: String,
    value: String,
    inherited: String,
}

impl From<&Property> for PropertyRow {
    fn from(p: &Property) -> Self {
        Self {
            name: p.name.clone(),
            value: p.value.clone(),
            inherited: if p.inherited { "yes" } else { "" }.to_string(),
        }
    }
}
