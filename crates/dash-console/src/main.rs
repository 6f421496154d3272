//! Dashboard operator console
//!
//! Inspect the widget catalog and role table, resolve roles, and render a
//! role's dashboard against the live API or offline.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use dash_core::{
    init_tracing, DashboardDataSource, DashboardOrchestrator, DashboardSettings, HttpDataSource,
    StaticDataSource,
};
use dash_render::audit_table;
use dash_roles::{RoleAssignments, RoleConfigTable, RoleResolver, UserRoleAssignment};
use dash_widget::{WidgetCategory, WidgetRegistry};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

mod output;

fn cli() -> Command {
    Command::new("dash-console")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Unified dashboard operator console")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Settings file (TOML)"),
        )
        .subcommand(
            Command::new("widgets")
                .about("List the widget catalog")
                .arg(
                    Arg::new("category")
                        .long("category")
                        .value_parser(value_parser!(WidgetCategory))
                        .help("Only widgets of this category"),
                )
                .arg(json_flag()),
        )
        .subcommand(Command::new("roles").about("List role dashboards").arg(json_flag()))
        .subcommand(
            Command::new("resolve")
                .about("Show which dashboard a role code is served")
                .arg(Arg::new("role").required(true).help("Raw role code")),
        )
        .subcommand(
            Command::new("render")
                .about("Load data and render a role's dashboard")
                .arg(Arg::new("role").required(true).help("Raw role code"))
                .arg(
                    Arg::new("offline")
                        .long("offline")
                        .action(ArgAction::SetTrue)
                        .help("Skip the API; render without widget data"),
                )
                .arg(json_flag()),
        )
        .subcommand(Command::new("check").about("Check role configs against the widget catalog"))
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn settings(matches: &ArgMatches) -> Result<DashboardSettings> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => DashboardSettings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => DashboardSettings::from_env().context("invalid settings in environment"),
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn widgets(args: &ArgMatches) -> Result<()> {
    let registry = WidgetRegistry::standard();
    let selected = match args.get_one::<WidgetCategory>("category") {
        Some(category) => registry.list_by_category(*category),
        None => registry.iter().collect(),
    };

    if args.get_flag("json") {
        let rows: Vec<_> = selected
            .iter()
            .map(|def| {
                json!({
                    "id": def.id,
                    "title": def.title,
                    "category": def.category,
                    "default_size": def.default_size,
                    "description": def.description,
                })
            })
            .collect();
        return print_json(&rows);
    }
    print!("{}", output::widget_table(selected));
    Ok(())
}

fn roles(args: &ArgMatches) -> Result<()> {
    let table = RoleConfigTable::standard();
    if args.get_flag("json") {
        let rows: serde_json::Map<_, _> = table
            .iter()
            .map(|(code, config)| (code.to_string(), json!(config.as_ref())))
            .collect();
        return print_json(&rows);
    }
    print!(
        "{}",
        output::role_table(table.iter().map(|(code, config)| (code, config.as_ref())))
    );
    Ok(())
}

fn resolve(args: &ArgMatches) -> Result<()> {
    let raw = args.get_one::<String>("role").map(String::as_str);
    let resolver = RoleResolver::new(Arc::new(RoleConfigTable::standard()));
    let resolved = resolver.resolve_role(raw);

    print_json(&json!({
        "requested": resolved.requested,
        "served": resolved.served,
        "fallback": resolved.is_fallback(),
        "config": resolved.config.as_ref(),
    }))
}

async fn render(settings: &DashboardSettings, args: &ArgMatches) -> Result<bool> {
    let role = args
        .get_one::<String>("role")
        .context("role is required")?;

    let offline = args.get_flag("offline");
    tracing::debug!(%role, offline, "rendering dashboard");

    let source: Arc<dyn DashboardDataSource> = if offline {
        Arc::new(StaticDataSource::new())
    } else {
        Arc::new(HttpDataSource::from_settings(&settings.api)?)
    };

    let dashboard = DashboardOrchestrator::standard(settings, source);
    let assignments = RoleAssignments::new(vec![UserRoleAssignment::new(role, role).primary()]);
    dashboard.initialize_with(assignments).await;

    let page = dashboard
        .render_page()
        .await
        .context("dashboard was not initialized")?;

    if let Some(banner) = &page.banner {
        tracing::warn!(role = %page.role, error = %banner.message, "dashboard data unavailable");
    }
    if args.get_flag("json") {
        print_json(&page)?;
    } else {
        print!("{}", output::page(&page));
    }
    Ok(page.banner.is_none())
}

fn check() -> bool {
    let issues = audit_table(&RoleConfigTable::standard(), &WidgetRegistry::standard());
    if !issues.is_empty() {
        tracing::warn!(issues = issues.len(), "role configs reference problems");
    }
    print!("{}", output::issues(&issues));
    issues.is_empty()
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    let settings = settings(&matches)?;
    init_tracing(&settings.logging);

    let ok = match matches.subcommand() {
        Some(("widgets", args)) => widgets(args).map(|()| true)?,
        Some(("roles", args)) => roles(args).map(|()| true)?,
        Some(("resolve", args)) => resolve(args).map(|()| true)?,
        Some(("render", args)) => render(&settings, args).await?,
        Some(("check", _)) => check(),
        _ => true,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
