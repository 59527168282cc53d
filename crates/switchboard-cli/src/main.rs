use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use async_trait::async_trait;
use clap::Parser;
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use tracing::{error, info};

use switchboard_core::impls::LoggingHandler;
use switchboard_core::observability::init_tracing;
use switchboard_core::{
    ActionKind, DispatchError, Dispatcher, DispatcherBuilder, Handler, HandlerError, Labeled,
    RoutingConfig, SharedHandler, rule,
};

type BoxError = Box<dyn Error + Send + Sync>;
type Pending = Vec<(String, JoinHandle<Result<Value, HandlerError>>)>;

/// Sends labeled actions through a proxy dispatcher backed by simulated services.
#[derive(Debug, Parser)]
#[command(name = "switchboard", version)]
struct Cli {
    /// Routing table in TOML. Without it the built-in github/xkcd table is used.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Label of an action to send. Repeatable.
    #[arg(long = "label", default_values = ["github", "xkcd"])]
    labels: Vec<String>,

    /// Simulated backend latency.
    #[arg(long, default_value_t = 50)]
    latency_ms: u64,
}

#[derive(Debug, Clone)]
struct SampleAction {
    label: String,
    path: String,
}

impl SampleAction {
    fn for_label(label: &str) -> Self {
        let path = match label {
            "github" => "/users/octocat/repos",
            "xkcd" => "/info.0.json",
            _ => "/",
        };
        Self {
            label: label.to_string(),
            path: path.to_string(),
        }
    }
}

impl Labeled for SampleAction {
    fn label(&self) -> &str {
        &self.label
    }
}

/// Stand-in for an HTTP service: answers after a delay with a canned body.
struct SimulatedBackend {
    name: &'static str,
    base_url: &'static str,
    kind: ActionKind,
    latency: Duration,
}

#[async_trait]
impl Handler<SampleAction> for SimulatedBackend {
    type Output = Value;

    fn action_kind(&self) -> &ActionKind {
        &self.kind
    }

    async fn execute(&self, action: SampleAction) -> Result<Value, HandlerError> {
        sleep(self.latency).await;
        let body = match self.name {
            "github" => json!([
                { "name": "switchboard", "description": "action router" },
                { "name": "hello-world", "description": "first repository" },
            ]),
            "xkcd" => json!({ "num": 353, "title": "Python" }),
            _ => Value::Null,
        };
        Ok(json!({
            "backend": self.name,
            "url": format!("{}{}", self.base_url, action.path),
            "body": body,
        }))
    }
}

fn backends(
    kind: &ActionKind,
    latency: Duration,
) -> HashMap<String, SharedHandler<SampleAction, Value>> {
    let mut map: HashMap<String, SharedHandler<SampleAction, Value>> = HashMap::new();
    for (name, base_url) in [
        ("github", "https://api.github.com"),
        ("xkcd", "http://xkcd.com"),
    ] {
        let backend = SimulatedBackend {
            name,
            base_url,
            kind: kind.clone(),
            latency,
        };
        map.insert(name.to_string(), Arc::new(backend));
    }
    map
}

fn build_dispatcher(cli: &Cli) -> Result<Dispatcher<SampleAction, Value>, BoxError> {
    let latency = Duration::from_millis(cli.latency_ms);
    if let Some(path) = &cli.config {
        let config = RoutingConfig::load(path)?;
        let kind = ActionKind::new(&config.kind)?;
        return Ok(config.build_dispatcher(&backends(&kind, latency))?);
    }

    let kind = ActionKind::new("http")?;
    let mut backends = backends(&kind, latency);
    let mut builder = DispatcherBuilder::for_kind(kind);
    for name in ["github", "xkcd"] {
        if let Some(backend) = backends.remove(name) {
            builder = builder.add_shared(backend, rule::label_is(name))?;
        }
    }
    Ok(builder.build()?)
}

fn describe(err: &HandlerError) -> String {
    match err.downcast_ref::<DispatchError>() {
        Some(DispatchError::NoRoute { .. }) => format!("unrouted: {err}"),
        Some(DispatchError::Internal { source, .. }) => format!("backend failed: {source}"),
        None => err.to_string(),
    }
}

/// Awaits every spawned send, printing replies. Returns how many failed.
async fn drain(joins: Pending) -> usize {
    let mut failures = 0;
    for (label, join) in joins {
        match join.await {
            Ok(Ok(reply)) => println!("{label}: {reply}"),
            Ok(Err(err)) => {
                failures += 1;
                error!(%label, "{}", describe(&err));
            }
            Err(err) => {
                failures += 1;
                error!(%label, %err, "send task aborted");
            }
        }
    }
    failures
}

async fn run(cli: Cli) -> Result<(), BoxError> {
    let proxy = Arc::new(LoggingHandler::new("proxy-sample", build_dispatcher(&cli)?));

    let mut joins = Vec::with_capacity(cli.labels.len());
    for label in &cli.labels {
        let proxy = Arc::clone(&proxy);
        let action = SampleAction::for_label(label);
        joins.push((
            label.clone(),
            tokio::spawn(async move { proxy.execute(action).await }),
        ));
    }

    let failures = drain(joins).await;

    if failures > 0 {
        return Err(format!("{failures} of {} actions failed", cli.labels.len()).into());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_tracing("info") {
        eprintln!("tracing init failed: {e}");
    }

    let cli = Cli::parse();
    info!(labels = ?cli.labels, "sending actions");
    match run(cli).await {
        Ok(()) => {
            println!("Success!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
