mod api;
mod config;
mod editor;
mod services;
mod session;
mod state;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use viewer::render::SurfaceStyle;

use crate::api::products::{DosageForm, ProductDraft};
use crate::api::purchases::ProductItem;
use crate::api::{ApiError, AuthApi, Credentials};
use crate::config::{AppConfig, ConfigError, load_dotenv, normalize_base_url};
use crate::editor::{EditorError, EditorState};
use crate::services::export::{self, ExportError};
use crate::services::source::{self, CodeSource, SourceError};
use crate::services::templates::TEMPLATES;
use crate::session::SessionError;
use crate::state::{AppState, StateError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("not logged in; run `diagramify login` first")]
    NotLoggedIn,
    #[error("your session has expired; run `diagramify login` again")]
    SessionExpired,
    #[error("no template with id {0}")]
    UnknownTemplate(usize),
}

#[derive(Parser, Debug)]
#[command(name = "diagramify", about = "Generate, view and export architecture diagrams")]
struct Cli {
    #[arg(long, env = "DIAGRAMIFY_DIAGRAM_URL")]
    diagram_url: Option<String>,

    #[arg(long, env = "DIAGRAMIFY_AUTH_URL")]
    auth_url: Option<String>,

    #[arg(long, env = "DIAGRAMIFY_PRODUCTS_URL")]
    products_url: Option<String>,

    #[arg(long, env = "DIAGRAMIFY_PURCHASES_URL")]
    purchases_url: Option<String>,

    #[arg(long, env = "DIAGRAMIFY_TENANT_ID")]
    tenant_id: Option<String>,

    #[arg(long, env = "DIAGRAMIFY_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Repeat for more log output on stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the token in the session file.
    Login(CredentialArgs),
    Register(CredentialArgs),
    /// Forget the stored session.
    Logout,
    /// Check the stored token with the auth service.
    Whoami,
    Templates(TemplatesCommand),
    /// Generate a diagram from code.
    Generate(GenerateArgs),
    Products(ProductsCommand),
    Purchases(PurchasesCommand),
}

#[derive(Args, Debug)]
struct CredentialArgs {
    #[arg(long)]
    user_id: String,
    #[arg(long, env = "DIAGRAMIFY_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct TemplatesCommand {
    #[command(subcommand)]
    command: TemplatesSubcommand,
}

#[derive(Subcommand, Debug)]
enum TemplatesSubcommand {
    List,
    Show { id: usize },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Code file (.txt, .json, .yaml, .yml).
    #[arg(long, conflicts_with_all = ["github", "template"])]
    file: Option<PathBuf>,

    /// GitHub page or raw URL to fetch code from.
    #[arg(long, conflicts_with = "template")]
    github: Option<String>,

    /// Built-in template id (see `templates list`).
    #[arg(long)]
    template: Option<usize>,

    /// Write the artifact to this file.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Write the artifact to `diagrama-<millis>.<png|txt>`.
    #[arg(long, conflicts_with = "output")]
    save: bool,

    /// Write a standalone HTML preview to this file.
    #[arg(long)]
    html: Option<PathBuf>,

    /// Zoom-in button presses applied before the preview is rendered.
    #[arg(long, default_value_t = 0)]
    zoom_in: u32,

    #[arg(long, default_value_t = 0)]
    zoom_out: u32,
}

impl GenerateArgs {
    fn source(&self) -> CodeSource {
        if let Some(path) = &self.file {
            CodeSource::File(path.clone())
        } else if let Some(url) = &self.github {
            CodeSource::Github(url.clone())
        } else if let Some(id) = self.template {
            CodeSource::Template(id)
        } else {
            CodeSource::Stdin
        }
    }
}

#[derive(Args, Debug)]
struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProductsSubcommand {
    List,
    Create(ProductFields),
    Update {
        sku: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    Delete {
        sku: String,
    },
}

#[derive(Args, Debug)]
struct ProductFields {
    #[arg(long)]
    nombre: String,
    #[arg(long)]
    active_ingredient: String,
    #[arg(long, value_enum)]
    dosage_form: DosageForm,
    #[arg(long)]
    precio: f64,
    /// `YYYY-MM-DD`.
    #[arg(long)]
    expiration_date: String,
    #[arg(long, default_value_t = false)]
    prescription_required: bool,
}

impl From<ProductFields> for ProductDraft {
    fn from(f: ProductFields) -> Self {
        Self {
            nombre: f.nombre,
            active_ingredient: f.active_ingredient,
            dosage_form: f.dosage_form,
            precio: f.precio,
            expiration_date: f.expiration_date,
            prescription_required: f.prescription_required,
        }
    }
}

#[derive(Args, Debug)]
struct PurchasesCommand {
    #[command(subcommand)]
    command: PurchasesSubcommand,
}

#[derive(Subcommand, Debug)]
enum PurchasesSubcommand {
    List,
    Register {
        /// `ID:NAME:QTY:PRICE`, repeatable.
        #[arg(long = "product", value_parser = ProductItem::parse, required = true)]
        products: Vec<ProductItem>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let dotenv = load_dotenv();
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
    if let Err(e) = dotenv {
        tracing::warn!(error = %e, ".env not loaded");
    }

    let config = apply_overrides(AppConfig::from_env()?, &cli);
    let mut state = AppState::new(&config)?;

    let result = match cli.command {
        Command::Login(creds) => run_login(&mut state, creds).await,
        Command::Register(creds) => run_register(&state, creds).await,
        Command::Logout => {
            state.sign_out()?;
            println!("logged out");
            Ok(())
        }
        Command::Whoami => run_whoami(&mut state).await,
        Command::Templates(templates) => run_templates(templates),
        Command::Generate(args) => run_generate(&mut state, args).await,
        Command::Products(products) => run_products(&state, products).await,
        Command::Purchases(purchases) => run_purchases(&mut state, purchases).await,
    };
    if let Err(CliError::Api(e)) = &result {
        if e.retryable() {
            tracing::warn!(error = %e, "temporary failure; retrying may succeed");
        }
    }
    result
}

fn apply_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(url) = &cli.diagram_url {
        config.diagram_url = normalize_base_url(url);
    }
    if let Some(url) = &cli.auth_url {
        config.auth_url = normalize_base_url(url);
    }
    if let Some(url) = &cli.products_url {
        config.products_url = normalize_base_url(url);
    }
    if let Some(url) = &cli.purchases_url {
        config.purchases_url = normalize_base_url(url);
    }
    if let Some(tenant) = &cli.tenant_id {
        config.tenant_id.clone_from(tenant);
    }
    if let Some(path) = &cli.session_file {
        config.session_file.clone_from(path);
    }
    config
}

// =============================================================================
// SESSION
// =============================================================================

async fn run_login(state: &mut AppState, args: CredentialArgs) -> Result<(), CliError> {
    let creds = Credentials { user_id: args.user_id, password: args.password };
    let token = state.auth.login(&creds).await?;
    state.sign_in(token, creds.user_id.clone())?;
    println!("logged in as {} (session stored in {})", creds.user_id, state.store.path().display());
    Ok(())
}

async fn run_register(state: &AppState, args: CredentialArgs) -> Result<(), CliError> {
    let creds = Credentials { user_id: args.user_id, password: args.password };
    let response = state.auth.register(&creds).await?;
    print_json(&response)
}

async fn run_whoami(state: &mut AppState) -> Result<(), CliError> {
    match ensure_session(state).await {
        Ok(()) => println!("{}", state.session.user_id().unwrap_or("(unknown user)")),
        Err(CliError::NotLoggedIn) => println!("not logged in"),
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Validate the stored token, clearing it when the auth service rejects it.
async fn ensure_session(state: &mut AppState) -> Result<(), CliError> {
    let auth = state.auth.clone();
    if state.validate_session(&auth).await? {
        Ok(())
    } else {
        Err(CliError::NotLoggedIn)
    }
}

// =============================================================================
// TEMPLATES
// =============================================================================

fn run_templates(templates: TemplatesCommand) -> Result<(), CliError> {
    match templates.command {
        TemplatesSubcommand::List => {
            for t in TEMPLATES {
                println!("{:>2}  {:<40} {}", t.id, t.name, t.preview);
            }
            Ok(())
        }
        TemplatesSubcommand::Show { id } => {
            let template = services::templates::by_id(id).ok_or(CliError::UnknownTemplate(id))?;
            println!("# {}\n# {}\n{}", template.name, template.description, template.code);
            Ok(())
        }
    }
}

// =============================================================================
// GENERATE
// =============================================================================

async fn run_generate(state: &mut AppState, args: GenerateArgs) -> Result<(), CliError> {
    ensure_session(state).await?;

    let code = source::load(&state.api, &args.source()).await?;
    let mut editor = EditorState::new();
    editor.load_code(code);
    let stats = editor.stats();
    tracing::info!(lines = stats.lines, chars = stats.chars, "code loaded");

    if let Err(e) = editor.generate(&state.diagrams, &state.session).await {
        if e.is_session_expired() {
            state.sign_out()?;
            return Err(CliError::SessionExpired);
        }
        return Err(e.into());
    }

    let core = editor.viewer_mut();
    for _ in 0..args.zoom_in {
        core.zoom_in();
    }
    for _ in 0..args.zoom_out {
        core.zoom_out();
    }

    let artifact = editor.artifact()?;
    let output = match (args.output, args.save) {
        (Some(path), _) => Some(path),
        (None, true) => Some(PathBuf::from(export::default_file_name_now(artifact))),
        (None, false) => None,
    };

    if let Some(path) = &args.html {
        let style = SurfaceStyle::for_viewer(editor.viewer());
        export::write_file(path, export::html_preview(artifact, &style)).await?;
        eprintln!("preview written to {} (zoom {}%)", path.display(), editor.viewer().zoom_percent());
    }

    match output {
        Some(path) => {
            let bytes = export::export(&state.api, artifact, &path).await?;
            eprintln!("{bytes} bytes written to {}", path.display());
        }
        None if args.html.is_none() => println!("{}", artifact.payload()),
        None => {}
    }
    Ok(())
}

// =============================================================================
// PRODUCTS / PURCHASES
// =============================================================================

async fn run_products(state: &AppState, products: ProductsCommand) -> Result<(), CliError> {
    let client = &state.products;
    tracing::debug!(tenant_id = client.tenant_id(), "products command");
    let response = match products.command {
        ProductsSubcommand::List => serde_json::to_value(client.list().await?)?,
        ProductsSubcommand::Create(fields) => client.create(fields.into()).await?,
        ProductsSubcommand::Update { sku, fields } => client.update(&sku, fields.into()).await?,
        ProductsSubcommand::Delete { sku } => client.delete(&sku).await?,
    };
    print_json(&response)
}

async fn run_purchases(state: &mut AppState, purchases: PurchasesCommand) -> Result<(), CliError> {
    ensure_session(state).await?;
    let token = state.session.bearer()?;
    let user_id = state.session.user_id().unwrap_or_default();
    let response = match purchases.command {
        PurchasesSubcommand::List => serde_json::to_value(state.purchases.list(token, user_id).await?)?,
        PurchasesSubcommand::Register { products } => state.purchases.register(token, user_id, products).await?,
    };
    print_json(&response)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
