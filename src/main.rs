//! CLI entry point for zentral, a command-line client for the Zentral API.
//!
//! Usage: `zentral [OPTIONS] <RESOURCE> <ACTION>`, e.g.
//!
//! ```text
//! zentral tags list
//! zentral tags get-by-name --name VIP
//! zentral santa-rules create --data '{"configuration": 1, ...}'
//! zentral mdm-blueprints delete --id 4
//! ```
//!
//! Results are printed to stdout as pretty JSON.
//!
//! Exit codes:
//! - 0: success
//! - 1: runtime error (configuration, API error, network failure, etc.)
//! - 2: argument validation error (clap handles this automatically)

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use zentral_client::client::Client;
use zentral_client::config::Config;
use zentral_client::context::Context;
use zentral_client::error::{ArgError, Error, Result};
use zentral_client::resource::{NamedResource, Resource, Service};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (base_url, token, timeouts).
    #[arg(long)]
    config: Option<PathBuf>,

    /// API base URL, with a trailing slash.
    #[arg(long, env = "ZENTRAL_BASE_URL")]
    base_url: Option<String>,

    /// API token. Prefer setting via the ZENTRAL_TOKEN environment variable
    /// to keep it out of process listings and shell history.
    #[arg(long, env = "ZENTRAL_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Abort the call after this many seconds.
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    resource: ResourceCommand,
}

/// The resource to operate on.
#[derive(Subcommand)]
enum ResourceCommand {
    /// Inventory tags.
    Tags {
        #[command(subcommand)]
        action: Action,
    },
    /// Tag taxonomies.
    Taxonomies {
        #[command(subcommand)]
        action: Action,
    },
    /// Inventory meta business units.
    MetaBusinessUnits {
        #[command(subcommand)]
        action: Action,
    },
    /// Santa configurations.
    SantaConfigurations {
        #[command(subcommand)]
        action: Action,
    },
    /// Santa rules.
    SantaRules {
        #[command(subcommand)]
        action: Action,
    },
    /// MDM blueprints.
    MdmBlueprints {
        #[command(subcommand)]
        action: Action,
    },
    /// Osquery packs.
    OsqueryPacks {
        #[command(subcommand)]
        action: Action,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
enum Action {
    /// List every item.
    List,
    /// Fetch one item by ID.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Fetch one item by name. Prints `null` when there is no match.
    GetByName {
        #[arg(long)]
        name: String,
    },
    /// Create an item from a JSON request body.
    Create {
        #[arg(long)]
        data: String,
    },
    /// Replace an item with a JSON request body.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        data: String,
    },
    /// Delete an item by ID.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let client = match build_client(&args) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut ctx = Context::background();
    if let Some(secs) = args.timeout {
        ctx = ctx.with_timeout(Duration::from_secs(secs));
    }

    match dispatch(&client, &ctx, args.resource).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: cannot render output: {e}");
                return ExitCode::FAILURE;
            }
        },
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

/// Merges the config file, environment and flags into a client.
fn build_client(args: &Cli) -> Result<Client> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(token) = &args.token {
        config.token = token.clone();
    }
    config.client()
}

async fn dispatch(client: &Client, ctx: &Context, resource: ResourceCommand) -> Result<Value> {
    match resource {
        ResourceCommand::Tags { action } => run_named(client.tags(), ctx, action).await,
        ResourceCommand::Taxonomies { action } => {
            run_named(client.taxonomies(), ctx, action).await
        }
        ResourceCommand::MetaBusinessUnits { action } => {
            run_named(client.meta_business_units(), ctx, action).await
        }
        ResourceCommand::SantaConfigurations { action } => {
            run_named(client.santa_configurations(), ctx, action).await
        }
        ResourceCommand::SantaRules { action } => {
            run_action(client.santa_rules(), ctx, action).await
        }
        ResourceCommand::MdmBlueprints { action } => {
            run_named(client.mdm_blueprints(), ctx, action).await
        }
        ResourceCommand::OsqueryPacks { action } => {
            run_named(client.osquery_packs(), ctx, action).await
        }
    }
}

/// Runs `action` on a resource that supports lookup by name.
async fn run_named<R>(service: Service<'_, R>, ctx: &Context, action: Action) -> Result<Value>
where
    R: NamedResource + Serialize,
    R::Request: DeserializeOwned,
{
    match action {
        Action::GetByName { name } => {
            let (item, _) = service.get_by_name(ctx, &name).await?;
            to_output(&item)
        }
        other => run_action(service, ctx, other).await,
    }
}

/// Runs `action` on any resource. Name lookups are rejected here because
/// only [`NamedResource`]s support them.
async fn run_action<R>(service: Service<'_, R>, ctx: &Context, action: Action) -> Result<Value>
where
    R: Resource + Serialize,
    R::Request: DeserializeOwned,
{
    match action {
        Action::List => {
            let (items, _) = service.list(ctx, None).await?;
            to_output(&items)
        }
        Action::Get { id } => {
            let (item, _) = service.get_by_id(ctx, id).await?;
            to_output(&item)
        }
        Action::GetByName { .. } => Err(ArgError::new(
            "name",
            format!("{} cannot be looked up by name", R::KIND),
        )
        .into()),
        Action::Create { data } => {
            let request = parse_data::<R::Request>(&data)?;
            let (item, _) = service.create(ctx, &request).await?;
            to_output(&item)
        }
        Action::Update { id, data } => {
            let request = parse_data::<R::Request>(&data)?;
            let (item, _) = service.update(ctx, id, &request).await?;
            to_output(&item)
        }
        Action::Delete { id } => {
            let response = service.delete(ctx, id).await?;
            Ok(serde_json::json!({ "deleted": id, "status": response.status.as_u16() }))
        }
    }
}

fn parse_data<T: DeserializeOwned>(data: &str) -> Result<T> {
    serde_json::from_str(data)
        .map_err(|e| ArgError::new("data", format!("invalid request body: {e}")).into())
}

fn to_output<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(Error::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zentral_client::inventory::TagRequest;

    #[test]
    fn resource_and_action_are_required() {
        assert!(Cli::try_parse_from(["zentral"]).is_err());
        assert!(Cli::try_parse_from(["zentral", "tags"]).is_err());
    }

    #[test]
    fn list_parses_for_every_resource() {
        for resource in [
            "tags",
            "taxonomies",
            "meta-business-units",
            "santa-configurations",
            "santa-rules",
            "mdm-blueprints",
            "osquery-packs",
        ] {
            let cli = Cli::try_parse_from(["zentral", resource, "list"]);
            assert!(cli.is_ok(), "{resource} list should parse");
        }
    }

    #[test]
    fn get_by_name_parses_name() {
        let cli = Cli::try_parse_from(["zentral", "tags", "get-by-name", "--name", "VIP"])
            .expect("should parse get-by-name");
        match cli.resource {
            ResourceCommand::Tags { action } => {
                assert_eq!(action, Action::GetByName { name: "VIP".to_string() });
            }
            _ => panic!("expected tags"),
        }
    }

    #[test]
    fn get_requires_id() {
        assert!(Cli::try_parse_from(["zentral", "tags", "get"]).is_err());
    }

    #[test]
    fn global_flags_parse_before_resource() {
        let cli = Cli::try_parse_from([
            "zentral",
            "--base-url",
            "https://zentral.example.com/api/",
            "--token",
            "tok",
            "--timeout",
            "5",
            "santa-rules",
            "delete",
            "--id",
            "3",
        ])
        .expect("should parse global flags");
        assert_eq!(
            cli.base_url.as_deref(),
            Some("https://zentral.example.com/api/")
        );
        assert_eq!(cli.token.as_deref(), Some("tok"));
        assert_eq!(cli.timeout, Some(5));
    }

    #[test]
    fn data_is_parsed_into_request_type() {
        let req: TagRequest =
            parse_data(r#"{"taxonomy": null, "name": "VIP", "color": "ff0000"}"#).unwrap();
        assert_eq!(req.name, "VIP");

        let err = parse_data::<TagRequest>("{not json").unwrap_err();
        assert!(matches!(err, Error::Arg(_)), "got {err:?}");
    }
}
