//! Group reconciliation commands
//!
//! Each command is one pass of the same pipeline: resolve the connection,
//! build the typed request, fetch current state, reconcile, apply, report.

use anyhow::{bail, Result};
use converge::{reconcile, GroupRequest, GroupStore, Report, Status};
use log::debug;
use serde_json::Value;
use studiokit::StudioClient;

use crate::cli::{ApplyArgs, DeleteArgs, ShowArgs};
use crate::config;
use crate::store::RemoteGroups;
use crate::ui;
use crate::Context;

pub fn apply(ctx: &Context, args: &ApplyArgs) -> Result<()> {
    let connection = config::resolve(&args.connection)?;
    let request = build_request(args)?;
    let mut store = RemoteGroups::new(StudioClient::new(&connection.url, &connection.api_key));
    run(ctx, &mut store, &request, args.dry_run, args.json)
}

pub fn delete(ctx: &Context, args: &DeleteArgs) -> Result<()> {
    let connection = config::resolve(&args.connection)?;
    let request = GroupRequest::absent(&args.name);
    let mut store = RemoteGroups::new(StudioClient::new(&connection.url, &connection.api_key));
    run(ctx, &mut store, &request, args.dry_run, args.json)
}

pub fn show(ctx: &Context, args: &ShowArgs) -> Result<()> {
    let connection = config::resolve(&args.connection)?;
    let store = RemoteGroups::new(StudioClient::new(&connection.url, &connection.api_key));

    let Some(definition) = store.fetch(&args.name)? else {
        bail!("group '{}' does not exist", args.name);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&definition)?);
        return Ok(());
    }
    if !ctx.quiet {
        ui::header(&args.name);
    }
    for (key, value) in definition.iter() {
        ui::kv(key, &value.to_string());
    }
    Ok(())
}

/// Fetch, reconcile, apply, report: the whole reconciliation of one group
fn run(
    ctx: &Context,
    store: &mut dyn GroupStore,
    request: &GroupRequest,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let current = store.fetch(&request.group.name)?;
    let outcome = reconcile(request, current);
    debug!(
        "group '{}': action {:?}, changed {}",
        outcome.name, outcome.action, outcome.changed
    );

    let applied = converge::apply(store, &outcome, dry_run)?;
    let report = Report::new(&outcome, applied);
    render(ctx, &report, &outcome.name, dry_run, json)
}

fn render(ctx: &Context, report: &Report, name: &str, dry_run: bool, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    if ctx.quiet {
        return Ok(());
    }
    if dry_run {
        ui::warn("dry-run: no changes applied");
    }
    let line = format!("{} group {}", report.message, name);
    match report.message {
        Status::Unchanged => ui::info(&line),
        _ => ui::success(&line),
    }
    if ctx.verbose > 0 && report.changed {
        if let Some(current) = &report.current_definition {
            ui::dim(&serde_json::to_string(current)?);
        }
    }
    Ok(())
}

/// Build the typed request from the parsed flags; fails fast, before any
/// remote call
fn build_request(args: &ApplyArgs) -> Result<GroupRequest> {
    let mut request = GroupRequest::new(&args.name);
    request.intent = args.state.into();

    let group = &mut request.group;
    group.description = args.description.clone();
    group.source_type = args.source_type.map(Into::into);
    group.admin = args.admin;
    group.ldap_group_names = args.ldap_group_names.clone();
    group.may_create_authenticated_connections = args.may_create_authenticated_connections;
    group.may_create_code_envs = args.may_create_code_envs;
    group.may_create_clusters = args.may_create_clusters;
    group.may_create_projects = args.may_create_projects;
    group.may_create_projects_from_macros = args.may_create_projects_from_macros;
    group.may_create_projects_from_templates = args.may_create_projects_from_templates;
    group.may_create_projects_from_apps = args.may_create_projects_from_apps;
    group.may_create_published_api_services = args.may_create_published_api_services;
    group.may_create_published_projects = args.may_create_published_projects;
    group.may_create_active_web_content = args.may_create_active_web_content;
    group.may_develop_plugins = args.may_develop_plugins;
    group.may_edit_lib_folders = args.may_edit_lib_folders;
    group.may_manage_code_envs = args.may_manage_code_envs;
    group.may_manage_clusters = args.may_manage_clusters;
    group.may_manage_udm = args.may_manage_udm;
    group.may_view_indexed_hive_connections = args.may_view_indexed_hive_connections;
    group.may_write_safe_code = args.may_write_safe_code;
    group.may_write_unsafe_code = args.may_write_unsafe_code;
    group.may_write_in_root_project_folder = args.may_write_in_root_project_folder;
    group.can_obtain_api_ticket_from_cookies_for_groups_regex = args
        .can_obtain_api_ticket_from_cookies_for_groups_regex
        .clone();

    for pair in &args.set {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("invalid --set '{pair}': expected KEY=VALUE");
        };
        // A value that parses as JSON keeps its type; anything else is a string
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        request.extras.insert(key.to_string(), value);
    }

    Ok(request)
}
