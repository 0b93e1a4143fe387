// (C) Coralbits SL 2025
// This file is part of Pagelayout and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use pagelayout::utils::setup_logging;
use pagelayout::{
    server, Banner, Config, FormAction, FormState, Layout, PageLayoutUpdater, ReqwestClient,
    UpdatePhase, UpdateResult,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing::{debug, info};

/// Set the page layout of a SharePoint page
#[derive(Parser)]
#[command(name = "pagelayout")]
#[command(version, about = "Set the page layout of a SharePoint page")]
struct Cli {
    /// Config file, defaults are used when it does not exist
    #[arg(long, default_value = "config.yaml")]
    config: String,

    /// Debug logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Update the layout of one page and exit
    Set {
        /// e.g. https://contoso.sharepoint.com/sites/DEVSBX/Sub-Site/
        #[arg(long)]
        site_url: String,

        /// e.g. /sites/DEVSBX/Sub-Site/SitePages/page.aspx
        #[arg(long)]
        page_url: String,

        #[arg(long, default_value_t = Layout::Article)]
        layout: Layout,
    },
    /// Ask for the form fields on the terminal, one update per round
    Interactive,
    /// Serve the update over HTTP
    Serve {
        /// host:port, overrides the config
        #[arg(long)]
        listen: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, found) = Config::read_or_default(&cli.config)?;
    setup_logging(cli.debug || config.debug)?;
    if found {
        info!("Read config_file={}", cli.config);
    } else {
        debug!("No config file at {}, using defaults", cli.config);
    }

    let client = Arc::new(ReqwestClient::new(&config.http)?);
    let updater = Arc::new(PageLayoutUpdater::new(client));

    match cli.command {
        Commands::Set {
            site_url,
            page_url,
            layout,
        } => {
            let result = updater.submit(&site_url, &page_url, layout).await;
            println!("{}", result.message);
            if !result.success {
                std::process::exit(1);
            }
        }
        Commands::Interactive => interactive(&updater).await?,
        Commands::Serve { listen } => {
            let listen = listen.unwrap_or_else(|| config.server.listen());
            server::start(&listen, updater).await?;
            info!("Server stopped");
        }
    }
    Ok(())
}

async fn prompt(
    lines: &mut Lines<BufReader<Stdin>>,
    label: &str,
) -> anyhow::Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;
    Ok(lines.next_line().await?)
}

async fn interactive(updater: &PageLayoutUpdater) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut state = FormState::new();

    loop {
        let Some(site_url) = prompt(&mut lines, "Web Url: ").await? else {
            break;
        };
        state = state.reduce(FormAction::SiteUrlChanged(site_url));

        let Some(page_url) = prompt(&mut lines, "Page Url: ").await? else {
            break;
        };
        state = state.reduce(FormAction::PageUrlChanged(page_url));

        let label = format!(
            "Select Page Layout [Article|SingleWebPartAppPage] ({}): ",
            state.layout
        );
        let Some(layout) = prompt(&mut lines, &label).await? else {
            break;
        };
        if !layout.trim().is_empty() {
            match layout.parse::<Layout>() {
                Ok(layout) => state = state.reduce(FormAction::LayoutChanged(layout)),
                Err(e) => {
                    eprintln!("{}", e);
                    continue;
                }
            }
        }

        if !state.can_submit() {
            continue;
        }
        state = state.reduce(FormAction::Submitted);
        let result = match state.request() {
            Ok(request) => {
                let mut show_phase = |phase: UpdatePhase| {
                    if phase != UpdatePhase::Idle && !phase.is_terminal() {
                        eprintln!("  {}...", phase);
                    }
                };
                UpdateResult::from(updater.run(&request, &mut show_phase).await)
            }
            Err(e) => UpdateResult::from(&e),
        };
        state = state.reduce(FormAction::Completed(result));

        match state.banner() {
            Some(Banner::Success(message)) => println!("{}", message),
            Some(Banner::Error(message)) => eprintln!("{}", message),
            None => {}
        }
    }
    Ok(())
}
