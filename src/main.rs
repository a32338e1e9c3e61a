use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use school_admin::api::ApiClient;
use school_admin::config::ClientConfig;
use school_admin::error::{AppError, ErrorResponse};
use school_admin::models::User;
use school_admin::routing::{AppRouter, Dashboard, LayoutView, LocationHistory, Mounted, RoutingError};
use school_admin::session::{SessionContext, SqliteSessionStore};
use school_admin::views::{ConsoleNotifier, FieldSpec, PageContext, PageView, pages};

#[derive(Parser, Debug)]
#[command(name = "school-admin", version, about = "School management admin client")]
struct Cli {
    /// Print failures as a JSON object instead of plain text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session locally
    Login {
        email: String,
        #[arg(long, env = "SCHOOL_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List the pages available to the signed-in user
    Routes,

    /// Render the page at a dashboard path, e.g. /admin/holidays
    Open { path: String },

    /// Submit the create form of a page
    Submit {
        path: String,
        /// Form values as field=value
        #[arg(value_parser = parse_field)]
        values: Vec<(String, String)>,
    },

    /// Change fields of a record listed on a page
    Edit {
        path: String,
        id: i64,
        /// New values as field=value; fields left out keep their value
        #[arg(value_parser = parse_field)]
        values: Vec<(String, String)>,
    },

    /// Show one record and what is attached to it
    Show { path: String, id: i64 },

    /// Delete a record listed on a page
    Remove { path: String, id: i64 },

    /// Enrol a student in a class
    Assign { class_id: i64, student_id: i64 },

    /// Import people from an Excel sheet (.xlsx or .xls)
    Upload { path: String, file: PathBuf },

    /// Choose a password using the token from an invitation email
    SetPassword {
        #[arg(long)]
        token: String,
        #[arg(long, env = "SCHOOL_ADMIN_NEW_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create the platform's super admin account (first run only)
    Setup,

    /// Check that the backend is reachable
    Health,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected field=value, got `{}`", raw))
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "school_admin=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.cmd).await {
        let response = ErrorResponse::from(&e);
        if cli.json {
            println!(
                "{}",
                serde_json::to_string(&response).unwrap_or_else(|_| response.message.clone())
            );
        } else {
            eprintln!("error: {}", response.message);
        }
        std::process::exit(1);
    }
}

async fn run(cmd: Command) -> Result<(), AppError> {
    let config = ClientConfig::new_from_env()?;
    let store = Arc::new(SqliteSessionStore::connect(&config.session_db).await?);
    let session = Arc::new(SessionContext::init(store).await?);
    let navigator = Arc::new(LocationHistory::default());
    let api = ApiClient::new(&config, session.clone(), navigator.clone())?;
    let ctx = PageContext::new(api.clone(), Arc::new(ConsoleNotifier));

    info!("backend at {}", config.api_url);

    match cmd {
        Command::Login { email, password } => {
            let user = api.auth().sign_in(&email, &password).await?;
            println!("Signed in as {} ({})", user.email, user.role.label());
            match Dashboard::for_user(&user) {
                Ok(dashboard) => println!("Home: {}", dashboard.home()),
                Err(e) => println!("{}", e),
            }
        }
        Command::Logout => {
            api.auth().sign_out().await?;
            println!("Signed out");
        }
        Command::Whoami => match session.current_user().await {
            Some(user) => print_user(&user),
            None => println!("Not signed in"),
        },
        Command::Routes => {
            let user = require_user(&session).await?;
            let dashboard = Dashboard::for_user(&user)?;
            for route in dashboard.routes() {
                println!("{:<24} {}", route.path, route.label);
            }
        }
        Command::Open { path } => {
            let mounted = mount_point(&session, &path).await?;
            let view = pages::render(mounted.page, &ctx).await?;
            print_frame(&mounted.frame);
            print_page(&view);
            print_fields("Edit fields (by id):", pages::edit_fields(mounted.page));
        }
        Command::Submit { path, values } => {
            let page = mount_point(&session, &path).await?.page;
            let view = pages::submit(page, &ctx, &values).await?;
            print_page(&view);
        }
        Command::Edit { path, id, values } => {
            let page = mount_point(&session, &path).await?.page;
            let view = pages::edit(page, &ctx, id, &values).await?;
            print_page(&view);
        }
        Command::Show { path, id } => {
            let page = mount_point(&session, &path).await?.page;
            let view = pages::details(page, &ctx, id).await?;
            print_page(&view);
        }
        Command::Assign { class_id, student_id } => {
            mount_point(&session, "/admin/classes").await?;
            pages::assign_student(&ctx, class_id, student_id).await?;
        }
        Command::Remove { path, id } => {
            let page = mount_point(&session, &path).await?.page;
            let view = pages::remove(page, &ctx, id).await?;
            print_page(&view);
        }
        Command::Upload { path, file } => {
            let page = mount_point(&session, &path).await?.page;
            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| AppError::BadRequest(format!("{} is not a file", file.display())))?
                .to_string();
            let bytes = tokio::fs::read(&file).await?;
            pages::upload(page, &ctx, &file_name, bytes).await?;
        }
        Command::SetPassword { token, password } => {
            api.auth().set_password(&token, &password).await?;
            println!("Password set. You can now sign in.");
        }
        Command::Setup => {
            let res = api.auth().setup_super_admin().await?;
            println!("{}", res.message);
        }
        Command::Health => {
            let health = api.auth().health().await?;
            println!("{}", health.status);
        }
    }

    Ok(())
}

async fn require_user(session: &SessionContext) -> Result<User, AppError> {
    session
        .current_user()
        .await
        .ok_or_else(|| AppError::BadRequest("Not signed in. Run `school-admin login` first.".to_string()))
}

/// Resolves `path` for the current user and passes it through the role's
/// layout gate.
async fn mount_point(session: &SessionContext, path: &str) -> Result<Mounted, AppError> {
    let user = session.current_user().await;
    AppRouter::mount(user.as_ref(), path).map_err(|e| match e {
        RoutingError::NotSignedIn => {
            AppError::BadRequest("Not signed in. Run `school-admin login` first.".to_string())
        }
        RoutingError::NotADashboardPage(_) => {
            AppError::BadRequest("Use `school-admin set-password --token <token>`".to_string())
        }
        other => other.into(),
    })
}

fn print_user(user: &User) {
    let name = if user.name.is_empty() { "-" } else { user.name.as_str() };
    println!("{} <{}>", name, user.email);
    println!("role: {}", user.role.label());
    if let Some(school_id) = user.school_id {
        println!("school: {}", school_id);
    }
}

fn print_frame(frame: &LayoutView) {
    if let LayoutView::Frame { header, sidebar } = frame {
        println!("{} | {} ({})", header.title, header.user_name, header.role.label());
        for item in sidebar {
            let marker = if item.active { ">" } else { " " };
            println!("{} {:<16} {}", marker, item.label, item.path);
        }
        println!();
    }
}

fn print_page(view: &PageView) {
    println!("== {} ==", view.title);
    for table in &view.sections {
        println!("{}", table);
    }
    print_fields("Form fields (* required):", view.form);
}

fn print_fields(heading: &str, fields: &[FieldSpec]) {
    if fields.is_empty() {
        return;
    }
    println!("{}", heading);
    for field in fields {
        let mark = if field.required { "*" } else { "" };
        println!("  {}{}  {}", field.name, mark, field.label);
    }
}
