use super::{Cli, Command, ui};
use anyhow::{Context, Result};
use pantry::{AppConfig, AppState, Inventory, SortMode, build_router};
use tracing::info;

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(mut self, cli: Cli) -> Result<()> {
        if let Some(path) = cli.store {
            self.config = self.config.json_file(path);
        }

        match cli.command {
            Command::List { search, sort } => {
                let inventory = self.load().await?;
                let sort: SortMode = sort.parse().unwrap_or_default();
                print!("{}", ui::render_items(&inventory.view(&search, sort)));
            }
            Command::Add {
                name,
                quantity,
                category,
            } => {
                let mut inventory = self.load().await?;
                inventory
                    .add_item(&name, quantity, category)
                    .await
                    .with_context(|| format!("failed to add \"{name}\""))?;
                print!("{}", ui::render_items(&inventory.view("", SortMode::Unsorted)));
            }
            Command::Increment { name } => {
                let mut inventory = self.load().await?;
                inventory
                    .increment_one(&name)
                    .await
                    .with_context(|| format!("failed to increment \"{name}\""))?;
                print!("{}", ui::render_items(&inventory.view("", SortMode::Unsorted)));
            }
            Command::Decrement { name } => {
                let mut inventory = self.load().await?;
                inventory
                    .decrement_one(&name)
                    .await
                    .with_context(|| format!("failed to decrement \"{name}\""))?;
                print!("{}", ui::render_items(&inventory.view("", SortMode::Unsorted)));
            }
            Command::Delete { name, amount } => {
                let mut inventory = self.load().await?;
                inventory
                    .delete_quantity(&name, amount)
                    .await
                    .with_context(|| format!("failed to delete from \"{name}\""))?;
                print!("{}", ui::render_items(&inventory.view("", SortMode::Unsorted)));
            }
            Command::Categories => print!("{}", ui::render_categories()),
            Command::Serve { host, port, memory } => {
                if let Some(host) = host {
                    self.config = self.config.host(&host);
                }
                if let Some(port) = port {
                    self.config = self.config.port(port);
                }
                if memory {
                    self.config = self.config.in_memory();
                }
                self.serve().await?;
            }
        }
        Ok(())
    }

    async fn load(&self) -> Result<Inventory> {
        Inventory::load(self.config.open_gateway())
            .await
            .context("failed to load inventory")
    }

    async fn serve(&self) -> Result<()> {
        let inventory = self.load().await?;
        let app = build_router(AppState::new(inventory));

        let addr = self.config.address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind to {addr}"))?;

        info!(address = %addr, store = ?self.config.store, "pantry server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "unable to install Ctrl+C signal handler");
        std::future::pending::<()>().await;
    }
}
