//! skein - A terminal client for Yarn.social pods
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skein::pipeline::DiskStore;
use skein::{Config, Session, TimelineName, YarnClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match parse_args()? {
        Command::Auth { server, username } => auth_cli(server.as_deref(), username.as_deref()).await,
        Command::Timeline { name } => timeline_cli(name.as_deref()).await,
        Command::Post { content } => post_cli(&content).await,
        Command::Upload { file } => upload_cli(&file).await,
        Command::Whoami => whoami_cli().await,
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Auth {
        server: Option<String>,
        username: Option<String>,
    },
    Timeline {
        name: Option<String>,
    },
    Post {
        content: String,
    },
    Upload {
        file: PathBuf,
    },
    Whoami,
    Help,
    Version,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Timeline { name: None });
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),

        "auth" => Ok(Command::Auth {
            server: args.get(2).cloned(),
            username: args.get(3).cloned(),
        }),

        "timeline" | "tl" => Ok(Command::Timeline {
            name: args.get(2).cloned(),
        }),

        "post" => {
            let content = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("Missing post content"))?
                .clone();
            Ok(Command::Post { content })
        }

        "upload" => {
            let file = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("Missing file path"))?;
            Ok(Command::Upload {
                file: PathBuf::from(file),
            })
        }

        "whoami" => Ok(Command::Whoami),

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'skein --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r"{}
🧶 skein - A terminal client for Yarn.social pods

USAGE:
    skein                              Show your default timeline
    skein [COMMAND]

COMMANDS:
    auth [server] [username]           Log in to a pod and save it as default
      Examples:
        skein auth https://twtxt.net alice

    timeline [name]                    Show a timeline (discover, timeline, mentions)
      Examples:
        skein timeline
        skein timeline mentions

    post <content>                     Post a status
      Examples:
        skein post 'Hello Yarn!'

    upload <file>                      Upload media, print the markdown to embed

    whoami                             Show who the pod thinks you are

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

ENVIRONMENT:
    SKEIN_PASSWORD                     Password used for login (prompted otherwise)
    RUST_LOG                           Log filter (default: warn)

CONFIG:
    {}
",
        skein::LOGO,
        config_path
    );
}

fn print_version() {
    println!("skein {}", skein::VERSION);
}

/// Read the pod password from the environment or a prompt. It is never
/// written to the config file.
fn read_password() -> Result<String> {
    if let Ok(password) = std::env::var("SKEIN_PASSWORD") {
        return Ok(password);
    }

    print!("Password: ");
    std::io::stdout().flush()?;
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;
    Ok(password.trim().to_string())
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    let mut value = String::new();
    std::io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

/// Build a logged-in client from the saved config.
async fn logged_in_client() -> Result<YarnClient> {
    let config = Config::load()?;
    if config.server_url.is_empty() || config.username.is_empty() {
        anyhow::bail!("No pod configured. Run: skein auth <server> <username>");
    }

    let session = Session::new(&config.username, &config.server_url, config.verify_ssl);
    let mut client = YarnClient::new(session)?;
    client.login(&read_password()?).await?;
    Ok(client)
}

async fn auth_cli(server: Option<&str>, username: Option<&str>) -> Result<()> {
    let mut config = Config::load()?;

    let server = match server {
        Some(s) => s.to_string(),
        None => prompt("Pod URL")?,
    };
    let username = match username {
        Some(u) => u.to_string(),
        None => prompt("Username")?,
    };

    let session = Session::new(&username, &server, config.verify_ssl);
    let mut client = YarnClient::new(session)?;
    client.login(&read_password()?).await?;

    config.server_url = client.session().server_url.clone();
    config.username = client.session().username.clone();
    config.save()?;

    println!("✓ Logged in as @{}", client.session().username);
    println!("✓ Pod saved: {}", client.session().server_url);
    Ok(())
}

async fn timeline_cli(name: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let name = name.map_or_else(|| config.default_timeline.clone(), ToString::to_string);
    let timeline = TimelineName::from_str(&name)
        .ok_or_else(|| anyhow::anyhow!("Unknown timeline: {name}\nKnown: discover, timeline, mentions"))?;

    let client = logged_in_client().await?;

    let payload = client.fetch_timeline(timeline).await?;
    let store = DiskStore::new(skein::paths::asset_cache_dir()?);
    let outcome = skein::decode(&payload, &client.session().username, &store)?;

    for dropped in &outcome.dropped {
        tracing::warn!("{dropped}");
    }

    let failures = client.fetch_assets(&store, &outcome.fetch_plan).await;
    for failure in &failures {
        tracing::warn!("{failure}");
    }

    println!("\n🧶 {} (@{})", timeline, client.session().username);
    println!("{}", "─".repeat(60));

    for post in &outcome.posts {
        println!("{}", post.display_body);
        println!("↩ reply with: {}", post.reply_seed);
        println!("{}", "─".repeat(60));
    }

    Ok(())
}

async fn post_cli(content: &str) -> Result<()> {
    let client = logged_in_client().await?;
    client.post_status(content).await?;
    println!("✓ Posted");
    Ok(())
}

async fn upload_cli(file: &PathBuf) -> Result<()> {
    let client = logged_in_client().await?;
    let snippet = client
        .upload_media(file)
        .await
        .with_context(|| format!("Failed to upload {}", file.display()))?;
    println!("✓ Uploaded. Embed it with:\n{snippet}");
    Ok(())
}

async fn whoami_cli() -> Result<()> {
    let client = logged_in_client().await?;
    println!("@{}", client.whoami().await?);
    Ok(())
}
