use clap::{CommandFactory, Parser};
use cmsctl::api::{Category, CmsApi};
use cmsctl::cache::CacheStore;
use cmsctl::config::{self, SessionConfig, Settings};
use cmsctl::editor::resolve_editor;
use cmsctl::error::{CmsError, Result};
use cmsctl::http::HttpTransport;
use cmsctl::resource::{display_name, sort_by_display_name};
use cmsctl::session::EditSession;
use colored::Colorize;
use serde::de::Error as _;
use serde_json::Value;
use std::path::PathBuf;

mod args;
mod print;

use args::{Cli, Commands, ProjectCommands, ResourceCommands};
use print::columns;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: CmsApi<HttpTransport>,
    cache: CacheStore,
    settings: Settings,
    config_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help().map_err(CmsError::Filesystem)?;
        return Ok(());
    };

    let mut ctx = init_context()?;

    match command {
        Commands::Login {
            host,
            username,
            password,
        } => handle_login(&mut ctx, host, username, password),
        Commands::Use {
            project,
            environment,
        } => handle_use(&mut ctx, project, environment),
        Commands::Set { name, value } => handle_set(&mut ctx, name, value),
        Commands::Get { name } => handle_get(&ctx, name),
        Commands::Project {
            command: ProjectCommands::Ls,
        } => handle_project_ls(&ctx),
        Commands::Content { command } => handle_resource(&ctx, Category::Content, command),
        Commands::Schema { command } => handle_resource(&ctx, Category::Schemas, command),
        Commands::Form { command } => handle_resource(&ctx, Category::Forms, command),
        Commands::Connection { command } => handle_resource(&ctx, Category::Connections, command),
    }
}

fn init_context() -> Result<AppContext> {
    let config_dir = config::config_dir()?;
    let session = SessionConfig::load(&config_dir);
    let settings = Settings::load(&config_dir);

    Ok(AppContext {
        api: CmsApi::new(HttpTransport, session),
        cache: CacheStore::new(&config_dir),
        settings,
        config_dir,
    })
}

fn handle_login(ctx: &mut AppContext, host: String, username: String, password: String) -> Result<()> {
    let token = ctx.api.login(&host, &username, &password)?;
    println!("Login successful, received token {}", token);

    let session = ctx.api.session_mut();
    session.host = Some(host);
    session.token = Some(token);
    session.project = None;
    session.environment = None;
    session.save(&ctx.config_dir)
}

fn handle_use(ctx: &mut AppContext, project: String, environment: String) -> Result<()> {
    ctx.api.session().require_login()?;

    let session = ctx.api.session_mut();
    session.project = Some(project);
    session.environment = Some(environment);
    session.save(&ctx.config_dir)
}

fn handle_set(ctx: &mut AppContext, name: String, value: String) -> Result<()> {
    ctx.settings.set(&name, &value);
    ctx.settings.save(&ctx.config_dir)
}

fn handle_get(ctx: &AppContext, name: String) -> Result<()> {
    if let Some(value) = ctx.settings.get(&name) {
        println!("{}", value);
    }
    Ok(())
}

fn handle_project_ls(ctx: &AppContext) -> Result<()> {
    ctx.api.session().require_login()?;

    let projects = ctx.api.list_projects()?;

    header(ctx.api.session(), true);
    for (i, project) in projects.iter().enumerate() {
        let mut line = Vec::new();
        if let Some(name) = project.pointer("/settings/info/name").and_then(Value::as_str) {
            line.push(name.to_string());
        }
        if let Some(id) = project.get("id").and_then(Value::as_str) {
            line.push(id.to_string());
        }
        columns(&line, 2);

        match project.get("environments").and_then(Value::as_array) {
            Some(environments) if !environments.is_empty() => {
                for environment in environments {
                    let name = environment.as_str().unwrap_or_default();
                    columns(&[" ".to_string(), format!("- {}", name)], 2);
                }
            }
            _ => columns(&[" ".to_string(), "- live".to_string()], 2),
        }

        if i + 1 < projects.len() {
            println!();
        }
    }
    footer();

    Ok(())
}

fn handle_resource(ctx: &AppContext, category: Category, command: ResourceCommands) -> Result<()> {
    match command {
        ResourceCommands::Ls => handle_resource_ls(ctx, category),
        ResourceCommands::New { schema } => handle_resource_new(ctx, category, schema),
        ResourceCommands::Rm { id } => ctx.api.delete_resource(category, &id),
        ResourceCommands::Edit { id } => edit_resource(ctx, category, &id),
    }
}

fn handle_resource_ls(ctx: &AppContext, category: Category) -> Result<()> {
    let mut all = ctx.api.list_resources(category)?;
    sort_by_display_name(&mut all);

    header(ctx.api.session(), false);
    for resource in &all {
        let id = resource.get("id").and_then(Value::as_str).unwrap_or_default();
        columns(&[display_name(resource), id.to_string()], 3);
    }
    footer();

    Ok(())
}

fn handle_resource_new(ctx: &AppContext, category: Category, schema: Option<String>) -> Result<()> {
    if category == Category::Content && schema.is_none() {
        return Err(CmsError::Usage("content new <schema>".to_string()));
    }

    let created = ctx.api.create_resource(category, schema.as_deref())?;
    let id = created.get("id").and_then(Value::as_str).ok_or_else(|| {
        CmsError::Parse(serde_json::Error::custom(format!(
            "created {} resource has no id",
            category
        )))
    })?;

    edit_resource(ctx, category, id)
}

fn edit_resource(ctx: &AppContext, category: Category, id: &str) -> Result<()> {
    let editor = resolve_editor(&ctx.settings);
    EditSession::new(&ctx.api, &ctx.cache, editor).run(category, id)
}

/// Prints the session header above a listing.
fn header(session: &SessionConfig, skip_location: bool) {
    let host = session.host.as_deref().unwrap_or_default();

    println!();
    match (skip_location, &session.project, &session.environment) {
        (false, Some(project), Some(environment)) => {
            println!(
                "{}",
                format!("{}:{}@{}", project, environment, host_name(host)).bold()
            );
        }
        _ => println!("{}", host_name(host).bold()),
    }
    println!("--------------------");
}

fn footer() {
    println!();
}

/// Reduces a host URL to its bare host name for display.
fn host_name(host: &str) -> &str {
    let rest = host.split("://").nth(1).unwrap_or(host);
    rest.split(['/', ':']).next().unwrap_or(rest)
}
