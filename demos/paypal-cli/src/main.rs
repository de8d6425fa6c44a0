//! PayPal Toolkit CLI Demo
//!
//! Exercises the client wrapper and the Orders tools from the command line.
//! Credentials come from `PAYPAL_CLIENT_ID` / `PAYPAL_CLIENT_SECRET`; the
//! context from `PAYPAL_SANDBOX`, `PAYPAL_DEBUG`, `PAYPAL_REQUEST_ID` and
//! `PAYPAL_MERCHANT_ID`, overridable with flags.
//!
//! Run with:
//!   cargo run -p paypal-cli -- headers --request-id checkout-1
//!   cargo run -p paypal-cli -- create --json '{"currency_code":"USD","items":[{"name":"Hoodie","item_cost":49.99}]}'
//!   cargo run -p paypal-cli -- capture 5O190127TN364715T

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use paypal_agent_toolkit::auth::Credentials;
use paypal_agent_toolkit::tools::{CAPTURE_ORDER, CREATE_ORDER, GET_ORDER};
use paypal_agent_toolkit::{Configuration, Context, PayPalClient, PayPalToolkit};
use serde_json::{Value, json};

/// PayPal toolkit command-line demo
#[derive(Parser, Debug)]
#[command(name = "paypal-cli")]
#[command(about = "Fetch PayPal tokens and headers, and run the Orders tools")]
struct Args {
    /// Use the production environment instead of sandbox
    #[arg(long, global = true)]
    production: bool,

    /// Log requests and responses (headers masked)
    #[arg(long, global = true)]
    debug: bool,

    /// Value sent as PayPal-Request-Id
    #[arg(long, global = true)]
    request_id: Option<String>,

    /// Tenant context JSON sent as PayPal-Tenant-Context
    #[arg(long, global = true)]
    tenant_context: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange the client credentials for an access token
    Token,
    /// Print the headers a REST call would carry
    Headers,
    /// List the tools
    Tools,
    /// Create an order from JSON arguments
    Create {
        /// Order arguments, e.g. {"currency_code":"USD","items":[...]}
        #[arg(long)]
        json: String,
    },
    /// Capture an approved order
    Capture {
        /// Order id
        order_id: String,
    },
    /// Show an order
    Get {
        /// Order id
        order_id: String,
    },
}

fn build_context(args: &Args) -> anyhow::Result<Context> {
    let mut context = Context::from_env();
    if args.production {
        context.is_sandbox = Some(false);
    }
    if args.debug {
        context.debug = Some(true);
    }
    if let Some(request_id) = &args.request_id {
        context.request_id = Some(request_id.clone());
    }
    if let Some(tenant_context) = &args.tenant_context {
        let value: Value =
            serde_json::from_str(tenant_context).context("--tenant-context is not valid JSON")?;
        context.tenant_context = Some(value);
    }
    Ok(context)
}

fn build_toolkit(credentials: &Credentials, context: Context) -> PayPalToolkit {
    let client = PayPalClient::builder()
        .credentials(credentials.clone())
        .context(context)
        .build();
    let configuration = Configuration::new()
        .with_action("orders", "create", true)
        .with_action("orders", "capture", true)
        .with_action("orders", "get", true);
    PayPalToolkit::from_client(client, &configuration)
}

fn print_json(output: &str) -> anyhow::Result<()> {
    let value: Value = serde_json::from_str(output)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Quiet by default, use RUST_LOG=debug to see request logs
    let default_filter = if args.debug {
        "paypal_agent_toolkit=debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Command::Tools = args.command {
        for tool in paypal_agent_toolkit::tools::tools() {
            println!("{:<16} {}", tool.method, tool.name);
            println!("{:<16} {}", "", tool.description);
        }
        return Ok(());
    }

    let credentials = Credentials::from_env()?;
    let context = build_context(&args)?;
    tracing::info!(environment = %context.environment(), "Using PayPal environment");

    match &args.command {
        Command::Token => {
            let client = PayPalClient::builder()
                .credentials(credentials)
                .context(context)
                .build();
            let token = client.fetch_access_token().await?;
            println!("{token}");
        }
        Command::Headers => {
            let client = PayPalClient::builder()
                .credentials(credentials)
                .context(context)
                .build();
            println!("# {}", client.base_url());
            let mut headers: Vec<_> = client.headers().await?.into_iter().collect();
            headers.sort();
            for (name, value) in headers {
                println!("{name}: {value}");
            }
        }
        Command::Create { json } => {
            let toolkit = build_toolkit(&credentials, context);
            print_json(&toolkit.run(CREATE_ORDER, json).await?)?;
        }
        Command::Capture { order_id } => {
            let toolkit = build_toolkit(&credentials, context);
            let arguments = json!({ "order_id": order_id }).to_string();
            print_json(&toolkit.run(CAPTURE_ORDER, &arguments).await?)?;
        }
        Command::Get { order_id } => {
            let toolkit = build_toolkit(&credentials, context);
            let arguments = json!({ "order_id": order_id }).to_string();
            print_json(&toolkit.run(GET_ORDER, &arguments).await?)?;
        }
        Command::Tools => {}
    }

    Ok(())
}
