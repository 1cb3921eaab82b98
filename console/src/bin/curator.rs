use camino::Utf8PathBuf as PathBuf;
use clap::Parser;
use curator::{
    command::{parse_line, read_upload, resolve_choice, ConsoleCommand, HELP},
    offline,
    render::Screen,
};
use curator_core::{
    config::{read_config, Config},
    model::{ActorContext, Role},
    session::{Adapters, Intent, Session, SessionHandle},
};
use eyre::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser)]
#[command(version, about = "Manage gallery collections from the terminal", long_about = None)]
struct Cli {
    #[arg(short, long)]
    config: Option<String>,
    /// Keep everything in memory instead of talking to the backend
    #[arg(long)]
    offline: bool,
}

async fn setup(args: &Cli) -> Result<(ActorContext, Adapters)> {
    let config: Option<Config> = match &args.config {
        Some(path) => Some(read_config(&PathBuf::from(path)).await?),
        None => None,
    };
    match (config, args.offline) {
        (Some(config), false) => {
            info!(base_url = %config.api.base_url, role = %config.actor.role(), "using backend");
            let adapters = Adapters::from_config(&config);
            Ok((config.actor, adapters))
        }
        (config, true) => {
            info!("running offline");
            let actor = match config {
                Some(config) => config.actor,
                None => ActorContext::unrestricted(Role::SuperAdmin)?,
            };
            Ok((actor, offline::adapters()))
        }
        (None, false) => bail!("--config is required unless running with --offline"),
    }
}

/// Turns a parsed line into the intent to dispatch. `None` means nothing to send.
async fn to_intent(command: ConsoleCommand, handle: &SessionHandle) -> Result<Option<Intent>> {
    match command {
        ConsoleCommand::Intent(intent) => Ok(Some(intent)),
        ConsoleCommand::Choose(n) => Ok(Some(resolve_choice(n, &handle.snapshot())?)),
        ConsoleCommand::Upload { target, path } => Ok(Some(read_upload(target, &path).await?)),
        ConsoleCommand::Help => {
            println!("{}", HELP);
            Ok(None)
        }
        ConsoleCommand::Quit => Ok(None),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "1")
    }
    if std::env::var("RUST_SPANTRACE").is_err() {
        std::env::set_var("RUST_SPANTRACE", "1");
    }
    color_eyre::install()?;
    if std::env::var("CURATOR_LOG").is_err() {
        std::env::set_var("CURATOR_LOG", "warn,curator_core=info")
    }
    tracing_subscriber::registry()
        .with(EnvFilter::from_env("CURATOR_LOG"))
        .with(ErrorLayer::default())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (actor, adapters) = setup(&args).await?;
    let handle = SessionHandle::new(Session::new(actor), adapters);
    print!("{}", Screen(&handle.settled().await?.session));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.wrap_err("Error reading stdin")? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };
        if command == ConsoleCommand::Quit {
            break;
        }
        let intent = match to_intent(command, &handle).await {
            Ok(Some(intent)) => intent,
            Ok(None) => continue,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };
        if let Err(err) = handle.dispatch(intent).await? {
            println!("{}", err);
            continue;
        }
        print!("{}", Screen(&handle.settled().await?.session));
    }
    handle.shutdown()?;
    Ok(())
}
