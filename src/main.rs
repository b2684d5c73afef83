use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use log::debug;
use tokio::io::{AsyncBufReadExt, BufReader};

use recipe_viewer::session::Session;
use recipe_viewer::{ApiClient, RecipeSource, Route, ViewerConfig, ViewerError};

#[derive(Parser, Debug)]
#[command(name = "recipe-viewer", version, about = "Browse the dummyjson recipe catalogue")]
struct Cli {
    /// Path to open first: "/" for the list or "/recipe/<id>" for one recipe
    #[arg(default_value = "/")]
    path: String,

    /// API origin, overrides the configured base_url
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

const HELP: &str = "commands: /  |  /recipe/<id>  |  page <n>  |  q";

fn prompt(session: &Session) -> Result<(), ViewerError> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}\n> ", session.render())?;
    stdout.flush()?;
    Ok(())
}

/// Handle one line of input. Returns false when the user asked to quit.
fn command(session: &mut Session, input: &str) -> bool {
    match input {
        "q" | "quit" => return false,
        "" => {}
        _ if input.starts_with('/') => match Route::parse(input) {
            Ok(route) => session.open(route),
            Err(e) => eprintln!("{e}"),
        },
        _ => match (session.list_mut(), input.strip_prefix("page ")) {
            (Some(view), Some(page)) => match page.trim().parse::<usize>() {
                Ok(page) if view.page_numbers().contains(&page) => view.select_page(page),
                _ => eprintln!("pages: 1..={}", view.total_pages()),
            },
            _ => eprintln!("{HELP}"),
        },
    }
    true
}

#[tokio::main]
async fn main() -> Result<(), ViewerError> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = ViewerConfig::load()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    debug!("{:?}", config);

    let source: Arc<dyn RecipeSource> = Arc::new(ApiClient::new(&config));
    let route = Route::parse(&cli.path)?;
    let (mut session, mut events) = Session::new(source, config.stale_policy);
    session.open(route);
    prompt(&session)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !command(&mut session, line.trim()) {
                    break;
                }
            }
            Some(event) = events.recv() => session.apply(event),
        }
        prompt(&session)?;
    }

    Ok(())
}
