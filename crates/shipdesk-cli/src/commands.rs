use std::path::PathBuf;

use anyhow::Context;
use colored::Colorize;
use serde_json::Value;
use shipdesk_office::{
    AdminProfile, AuditAction, AuditEntry, BackOffice, DocumentFilter, Record, StoreConfig,
};
use shipdesk_server::{ServerConfig, ShipdeskServer};
use shipdesk_types::RecordExt;

use crate::cli::*;

/// Data directory used when neither the flag nor the config names one.
const DEFAULT_DATA_DIR: &str = "data";

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        command,
        data_dir,
        verbose,
        format,
    } = cli;

    match command {
        Command::Serve(args) => {
            let config = server_config(&args, data_dir)?;
            init_tracing(if verbose { "debug" } else { config.log_level.as_str() });
            cmd_serve(config)
        }
        Command::Packages => cmd_packages(&open_office(data_dir, verbose)?, format),
        Command::History => cmd_history(&open_office(data_dir, verbose)?, format),
        Command::Documents(args) => cmd_documents(&open_office(data_dir, verbose)?, args.action, format),
        Command::Transactions => cmd_transactions(&open_office(data_dir, verbose)?, format),
        Command::Seed => cmd_seed(&open_office(data_dir, verbose)?),
        Command::Account { login } => cmd_account(&open_office(data_dir, verbose)?, &login, format),
    }
}

/// Open the back office for an offline command.
fn open_office(data_dir: Option<PathBuf>, verbose: bool) -> anyhow::Result<BackOffice> {
    init_tracing(if verbose { "debug" } else { "warn" });
    let data_dir = data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    BackOffice::open(StoreConfig::new(&data_dir))
        .with_context(|| format!("opening data directory {}", data_dir.display()))
}

/// Start tracing at `default_level` unless `RUST_LOG` says otherwise.
fn init_tracing(default_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Layer the server configuration: file (or defaults), then `PORT`, then
/// command-line flags.
pub fn server_config(args: &ServeArgs, data_dir: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_toml_file(path)?,
        None => ServerConfig::default(),
    }
    .with_env_port()?;

    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    if args.no_seed {
        config.seed_admin = false;
    }
    Ok(config)
}

fn cmd_serve(config: ServerConfig) -> anyhow::Result<()> {
    println!(
        "{} shipdesk on {} (data: {})",
        "▶".green().bold(),
        config.bind_addr.to_string().bold(),
        config.data_dir.display()
    );
    let server = ShipdeskServer::new(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_packages(office: &BackOffice, format: OutputFormat) -> anyhow::Result<()> {
    let packages = office.list_packages()?;
    if format == OutputFormat::Json {
        return print_json(&packages);
    }
    if packages.is_empty() {
        println!("No packages.");
    }
    for package in &packages {
        println!("{}  {}", package.text("codigo").yellow().bold(), render_fields(package, &["codigo"]));
    }
    Ok(())
}

fn cmd_history(office: &BackOffice, format: OutputFormat) -> anyhow::Result<()> {
    let lines = office.list_audit()?;
    if format == OutputFormat::Json {
        return print_json(&lines);
    }
    if lines.is_empty() {
        println!("Audit trail: no entries.");
    }
    for line in &lines {
        match AuditEntry::parse(line) {
            Some(entry) => println!("{}", render_entry(&entry)),
            None => println!("{}", line.dimmed()),
        }
    }
    Ok(())
}

fn cmd_documents(office: &BackOffice, action: DocumentsAction, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        DocumentsAction::List => print_documents(&office.list_documents()?, format),
        DocumentsAction::Show { id } => {
            let document = office.get_document(&id)?;
            if format == OutputFormat::Json {
                return print_json(&document);
            }
            for (field, value) in &document {
                println!("{:>16}: {}", field.bold(), display_value(value));
            }
            Ok(())
        }
        DocumentsAction::Search(args) => {
            print_documents(&office.search_documents(&document_filter(args))?, format)
        }
        DocumentsAction::Duplicate { id } => {
            let copy = office.duplicate_document(&id)?;
            if format == OutputFormat::Json {
                return print_json(&copy);
            }
            println!("{} Duplicated {} as {}", "✓".green().bold(), id.yellow(), copy.text("numero").yellow().bold());
            Ok(())
        }
        DocumentsAction::Convert(args) => {
            let (id, tipo, extra) = conversion(args);
            let document = office.change_document_type(&id, &tipo, &extra)?;
            if format == OutputFormat::Json {
                return print_json(&document);
            }
            let number_field = if tipo == "factura" { "numero_factura" } else { "numero_boleta" };
            let number = document.text(number_field);
            println!("{} {} is now a {} ({})", "✓".green().bold(), id.yellow(), tipo.cyan(), number.bold());
            Ok(())
        }
    }
}

fn cmd_transactions(office: &BackOffice, format: OutputFormat) -> anyhow::Result<()> {
    let transactions = office.list_transactions()?;
    if format == OutputFormat::Json {
        return print_json(&transactions);
    }
    if transactions.is_empty() {
        println!("No transactions.");
    }
    for transaction in &transactions {
        println!("  {}", render_fields(transaction, &[]));
    }
    Ok(())
}

fn cmd_seed(office: &BackOffice) -> anyhow::Result<()> {
    if office.seed_admin(&AdminProfile::default())? {
        println!("{} Administrator account created", "✓".green().bold());
    } else {
        println!("Administrator account already present.");
    }
    Ok(())
}

fn cmd_account(office: &BackOffice, login: &str, format: OutputFormat) -> anyhow::Result<()> {
    let Some(account) = office.find_account(login)? else {
        anyhow::bail!("no user or employee with login {login:?}");
    };
    let summary = account.summary();
    if format == OutputFormat::Json {
        return print_json(&summary);
    }
    println!(
        "{} {} ({})",
        summary.text("usuario").yellow().bold(),
        account.kind.to_string().cyan(),
        render_fields(&summary, &["usuario", "tipo"])
    );
    Ok(())
}

// ---- Rendering ----

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_documents(documents: &[Record], format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return print_json(documents);
    }
    if documents.is_empty() {
        println!("No documents.");
    }
    for doc in documents {
        let id = doc.str_field("numero").unwrap_or_else(|| doc.text("codigo"));
        let client = doc.str_field("cliente").unwrap_or_else(|| doc.text("nombre_cliente"));
        let duplicate = if doc.get("es_duplicado") == Some(&Value::Bool(true)) { " (copia)" } else { "" };
        println!(
            "{:<12} {:<8} {:<10} {:<11} {}{}",
            id.yellow().bold(),
            doc.text("tipo_documento").cyan(),
            doc.text("estado"),
            doc.text("fecha_emision"),
            client,
            duplicate.dimmed()
        );
    }
    Ok(())
}

fn render_entry(entry: &AuditEntry) -> String {
    let action = match entry.action {
        AuditAction::Registered => entry.action.phrase().green(),
        AuditAction::Edited => entry.action.phrase().yellow(),
        AuditAction::Deleted => entry.action.phrase().red(),
    };
    format!("{} {} {}", entry.timestamp.dimmed(), action, entry.code.bold())
}

/// String values print bare; everything else prints as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `key=value` pairs in record order, skipping `skip`.
pub fn render_fields(record: &Record, skip: &[&str]) -> String {
    record
        .iter()
        .filter(|(k, _)| !skip.contains(&k.as_str()))
        .map(|(k, v)| format!("{k}={}", display_value(v)))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn document_filter(args: SearchArgs) -> DocumentFilter {
    DocumentFilter {
        cliente: args.cliente,
        fecha_inicio: args.desde,
        fecha_fin: args.hasta,
        estado: args.estado,
        tipo_documento: args.tipo,
    }
}

/// Split convert arguments into id, target type, and the extra customer
/// fields. Unset flags are left out so the ledger's defaults apply.
pub fn conversion(args: ConvertArgs) -> (String, String, Record) {
    let mut extra = Record::new();
    for (field, value) in [
        ("ruc_cliente", args.ruc),
        ("razon_social", args.razon_social),
        ("dni_cliente", args.dni),
        ("nombre_cliente", args.nombre),
    ] {
        if let Some(value) = value {
            extra.set_text(field, value);
        }
    }
    (args.id, args.tipo, extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn serve_args() -> ServeArgs {
        ServeArgs {
            bind: None,
            config: None,
            no_seed: false,
        }
    }

    #[test]
    fn render_fields_in_order() {
        let r = record(json!({"codigo": "P1", "peso": 2.5, "destino": "Lima"}));
        assert_eq!(render_fields(&r, &["codigo"]), "peso=2.5 destino=Lima");
        assert_eq!(render_fields(&r, &[]), "codigo=P1 peso=2.5 destino=Lima");
    }

    #[test]
    fn search_args_map_to_filter() {
        let filter = document_filter(SearchArgs {
            cliente: Some("ana".into()),
            desde: Some("2024-01-01".into()),
            ..SearchArgs::default()
        });
        assert_eq!(filter.cliente.as_deref(), Some("ana"));
        assert_eq!(filter.fecha_inicio.as_deref(), Some("2024-01-01"));
        assert!(filter.fecha_fin.is_none());
    }

    #[test]
    fn conversion_keeps_only_given_fields() {
        let (id, tipo, extra) = conversion(ConvertArgs {
            id: "X1".into(),
            tipo: "boleta".into(),
            ruc: None,
            razon_social: None,
            dni: Some("4455".into()),
            nombre: None,
        });
        assert_eq!((id.as_str(), tipo.as_str()), ("X1", "boleta"));
        assert_eq!(extra, record(json!({"dni_cliente": "4455"})));
    }

    #[test]
    fn server_config_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shipdesk.toml");
        std::fs::write(&path, "bind_addr = \"0.0.0.0:7000\"\ndata_dir = \"/from/file\"\n").unwrap();

        let args = ServeArgs {
            bind: Some("127.0.0.1:9000".parse().unwrap()),
            config: Some(path),
            no_seed: true,
        };
        let config = server_config(&args, Some(PathBuf::from("/from/flag"))).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.data_dir, PathBuf::from("/from/flag"));
        assert!(!config.seed_admin);
    }

    #[test]
    fn server_config_without_flags_uses_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shipdesk.toml");
        std::fs::write(&path, "data_dir = \"/from/file\"\nseed_admin = false\n").unwrap();

        let args = ServeArgs { config: Some(path), ..serve_args() };
        let config = server_config(&args, None).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/from/file"));
        assert!(!config.seed_admin);
    }

    #[test]
    fn offline_commands_run_against_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let run = |command| {
            run_command(Cli {
                command,
                data_dir: Some(dir.path().to_path_buf()),
                verbose: false,
                format: OutputFormat::Json,
            })
        };

        run(Command::Seed).unwrap();
        run(Command::Packages).unwrap();
        run(Command::History).unwrap();
        run(Command::Transactions).unwrap();
        run(Command::Documents(DocumentsArgs { action: DocumentsAction::List })).unwrap();
        assert!(run(Command::Documents(DocumentsArgs {
            action: DocumentsAction::Show { id: "missing".into() }
        }))
        .is_err());

        let office = BackOffice::open(StoreConfig::new(dir.path())).unwrap();
        assert!(office.find_account("admin").unwrap().is_some());

        run(Command::Account { login: "admin".into() }).unwrap();
        assert!(run(Command::Account { login: "nadie".into() }).is_err());
    }
}
