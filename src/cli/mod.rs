//! Command-line interface for licenz.
//!
//! Provides commands for listing and inspecting the content library,
//! minting records through the (stubbed) provider, deleting records,
//! and checking backend health.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::adapters::{BackendClient, ContentApi, MintOptions, StubMintProvider};
use crate::domain::{ContentKey, ContentRecord, ContentTypeFilter, FilterState, NftStatusFilter};
use crate::library::{ContentManager, JsonStatusStore};

/// Mint status filter for the CLI (maps to NftStatusFilter)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NftStatusArg {
    All,
    Minted,
    NotMinted,
}

impl From<NftStatusArg> for NftStatusFilter {
    fn from(arg: NftStatusArg) -> Self {
        match arg {
            NftStatusArg::All => NftStatusFilter::All,
            NftStatusArg::Minted => NftStatusFilter::Minted,
            NftStatusArg::NotMinted => NftStatusFilter::NotMinted,
        }
    }
}

/// Content type filter for the CLI (maps to ContentTypeFilter)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ContentTypeArg {
    All,
    AiGenerated,
    Uploaded,
}

impl From<ContentTypeArg> for ContentTypeFilter {
    fn from(arg: ContentTypeArg) -> Self {
        match arg {
            ContentTypeArg::All => ContentTypeFilter::All,
            ContentTypeArg::AiGenerated => ContentTypeFilter::AiGenerated,
            ContentTypeArg::Uploaded => ContentTypeFilter::Uploaded,
        }
    }
}

/// licenz - content library with NFT mint tracking
#[derive(Parser, Debug)]
#[command(name = "licenz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List library content (backend merged with persisted mint status)
    List {
        /// Filter by mint status
        #[arg(long, value_enum, default_value = "all")]
        nft_status: NftStatusArg,

        /// Filter by content type
        #[arg(long, value_enum, default_value = "all")]
        content_type: ContentTypeArg,

        /// Maximum number of items to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show details of one record
    Show {
        /// Identity key (id or content hash)
        key: String,
    },

    /// Mint a record as an NFT (stubbed provider)
    Mint {
        /// Identity key (id or content hash)
        key: String,
    },

    /// Delete a record from the backend
    Delete {
        /// Identity key (id or content hash)
        key: String,
    },

    /// Check backend health
    Status,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::List {
                nft_status,
                content_type,
                limit,
            } => list(nft_status.into(), content_type.into(), limit).await,
            Commands::Show { key } => show(&ContentKey::new(key)).await,
            Commands::Mint { key } => mint(&ContentKey::new(key)).await,
            Commands::Delete { key } => delete(&ContentKey::new(key)).await,
            Commands::Status => status().await,
            Commands::Config => show_config(),
        }
    }
}

/// Build the manager over the configured backend and status store
fn build_manager() -> Result<ContentManager<BackendClient, JsonStatusStore>> {
    let api = BackendClient::from_config().context("Failed to build backend client")?;
    let store = JsonStatusStore::from_config().context("Failed to open NFT status store")?;

    let mut manager = ContentManager::new(api, store);
    if let Some(address) = crate::config::config()?.wallet_address.clone() {
        manager = manager.with_wallet_address(address);
    }

    Ok(manager)
}

async fn list(
    nft_status: NftStatusFilter,
    content_type: ContentTypeFilter,
    limit: usize,
) -> Result<()> {
    let manager = build_manager()?;
    manager.refresh().await?;

    let filters = FilterState {
        nft_status,
        content_type,
    };
    let items = manager.filtered(&filters);

    if items.is_empty() {
        println!("No content matches the current filters.");
        return Ok(());
    }

    println!("{} item(s):\n", items.len());
    for record in items.iter().take(limit) {
        print_summary(record);
    }

    Ok(())
}

async fn show(key: &ContentKey) -> Result<()> {
    let manager = build_manager()?;
    manager.refresh().await?;

    let record = manager
        .content()
        .into_iter()
        .find(|r| r.key().as_ref() == Some(key))
        .with_context(|| format!("No content with key {}", key))?;

    println!("Key:          {}", key);
    if let Some(prompt) = &record.prompt {
        println!("Prompt:       {}", prompt);
    }
    if let Some(style) = &record.style {
        println!("Style:        {}", style);
    }
    if let Some(model) = &record.model {
        println!("Model:        {}", model);
    }
    if let Some(url) = &record.image_url {
        println!("Image URL:    {}", url);
    }
    if let Some(wallet) = &record.wallet_address {
        println!("Wallet:       {}", wallet);
    }
    println!("Created:      {}", record.created_at.format("%Y-%m-%d %H:%M"));
    println!("Minted:       {}", if record.mint.minted { "yes" } else { "no" });
    if let Some(token) = &record.mint.token_id {
        println!("Token ID:     {}", token);
    }
    if let Some(tx) = &record.mint.transaction_hash {
        println!("Transaction:  {}", tx);
    }
    if let Some(contract) = &record.mint.contract_address {
        println!("Contract:     {}", contract);
    }
    if let Some(chain) = &record.mint.chain {
        println!("Chain:        {}", chain);
    }

    Ok(())
}

async fn mint(key: &ContentKey) -> Result<()> {
    let manager = build_manager()?;
    manager.refresh().await?;

    let settings = crate::config::config()?.mint.clone();
    let mut provider = StubMintProvider::new();
    if let Some(contract) = settings.contract_address.clone() {
        provider = provider.with_contract_address(contract);
    }
    if let Some(chain) = settings.chain.clone() {
        provider = provider.with_chain(chain);
    }

    let options = MintOptions {
        recipient: settings.recipient,
        chain: settings.chain,
    };

    let result = manager.mint(key, &provider, &options).await?;

    println!("Minted {}", key);
    if let Some(token) = result.token_id {
        println!("  Token ID:    {}", token);
    }
    if let Some(tx) = result.transaction_hash {
        println!("  Transaction: {}", tx);
    }
    if let Some(chain) = result.chain {
        println!("  Chain:       {}", chain);
    }

    Ok(())
}

async fn delete(key: &ContentKey) -> Result<()> {
    let manager = build_manager()?;
    manager.refresh().await?;
    manager.delete(key).await?;

    println!("Deleted {}", key);
    Ok(())
}

async fn status() -> Result<()> {
    let api = BackendClient::from_config()?;

    match api.health().await {
        Ok(health) => println!("Backend: {}", health.status),
        Err(e) => println!("Backend unreachable: {}", e),
    }

    Ok(())
}

fn show_config() -> Result<()> {
    let config = crate::config::config()?;

    println!("Home:         {}", config.home.display());
    println!("Status file:  {}", config.status_path().display());
    println!("Backend URL:  {}", config.backend.url);
    println!("Timeout:      {}s", config.backend.timeout_seconds);
    match &config.wallet_address {
        Some(address) => println!("Wallet:       {}", address),
        None => println!("Wallet:       (not set)"),
    }
    match &config.config_file {
        Some(path) => println!("Config file:  {}", path.display()),
        None => println!("Config file:  (none found)"),
    }

    Ok(())
}

fn print_summary(record: &ContentRecord) {
    let key = record
        .key()
        .map(|k| k.to_string())
        .unwrap_or_else(|| "(unkeyed)".to_string());
    let minted = if record.mint.minted { "minted" } else { "not minted" };
    let prompt = record.prompt.as_deref().unwrap_or("(no prompt)");

    println!("  {}  [{}]", key, minted);
    println!("    {}", truncate(prompt, 70));
    if let Some(token) = &record.mint.token_id {
        println!("    token {}", token);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{}...", cut)
    }
}
