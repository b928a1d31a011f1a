use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shipdesk",
    about = "Shalom shipping back office: packages, billing documents, and payments",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the collection files [default: data]
    #[arg(long, global = true, env = "SHIPDESK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// List packages
    Packages,
    /// Show the package audit history
    History,
    /// Inspect and manage billing documents
    Documents(DocumentsArgs),
    /// List payment transactions
    Transactions,
    /// Create the administrator account if it is missing
    Seed,
    /// Look up a user or employee by login or email
    Account { login: String },
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides the config file and PORT)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// TOML server configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Skip administrator seeding
    #[arg(long)]
    pub no_seed: bool,
}

#[derive(Args)]
pub struct DocumentsArgs {
    #[command(subcommand)]
    pub action: DocumentsAction,
}

#[derive(Subcommand)]
pub enum DocumentsAction {
    /// List every document
    List,
    /// Show one document by `numero` or `codigo`
    Show { id: String },
    /// Search documents
    Search(SearchArgs),
    /// Duplicate a document as a pending copy
    Duplicate { id: String },
    /// Convert a document to a receipt (boleta) or an invoice (factura)
    Convert(ConvertArgs),
}

#[derive(Args, Default)]
pub struct SearchArgs {
    /// Client name fragment, case-insensitive
    #[arg(long)]
    pub cliente: Option<String>,
    /// Earliest emission date (YYYY-MM-DD)
    #[arg(long)]
    pub desde: Option<String>,
    /// Latest emission date (YYYY-MM-DD)
    #[arg(long)]
    pub hasta: Option<String>,
    #[arg(long)]
    pub estado: Option<String>,
    #[arg(long)]
    pub tipo: Option<String>,
}

#[derive(Args)]
pub struct ConvertArgs {
    pub id: String,
    /// `boleta` or `factura`
    pub tipo: String,
    #[arg(long)]
    pub ruc: Option<String>,
    #[arg(long)]
    pub razon_social: Option<String>,
    #[arg(long)]
    pub dni: Option<String>,
    #[arg(long)]
    pub nombre: Option<String>,
}
