//! Project management commands for CLI.

use clap::Subcommand;
use rotaday_core::{registry, ValidationError};

use super::{open_session, print_json, CommandResult};

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Add a project
    Add {
        /// Project name
        name: String,
        /// Work-days per week (defaults to rotation.default_quota)
        #[arg(long)]
        quota: Option<u32>,
        /// Add the project as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Remove a project
    Remove {
        /// Project name or id
        project: String,
    },
    /// Set a project's weekly quota
    Quota {
        /// Project name or id
        project: String,
        days: u32,
    },
    /// Enable or disable a project
    Active {
        /// Project name or id
        project: String,
        #[arg(action = clap::ArgAction::Set)]
        active: bool,
    },
    /// List all projects
    List {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ProjectAction) -> CommandResult {
    let (mut session, now) = open_session()?;

    match action {
        ProjectAction::Add {
            name,
            quota,
            inactive,
        } => {
            if registry::find_by_name(session.state(), name.trim()).is_some() {
                return Err(ValidationError::DuplicateName(name.trim().to_string()).into());
            }
            let id = session.add_project(&name, quota, !inactive, now)?;
            println!("Project added: {id}");
        }
        ProjectAction::Remove { project } => {
            let id = registry::resolve(session.state(), &project)?;
            let removed = session.remove_project(&id, now)?;
            println!("Project removed: {}", removed.name);
        }
        ProjectAction::Quota { project, days } => {
            let id = registry::resolve(session.state(), &project)?;
            if session.set_quota(&id, days, now)? {
                println!("ok");
            } else {
                println!("unchanged");
            }
        }
        ProjectAction::Active { project, active } => {
            let id = registry::resolve(session.state(), &project)?;
            if session.set_active(&id, active, now)? {
                println!("ok");
            } else {
                println!("unchanged");
            }
        }
        ProjectAction::List { json } => {
            let projects = &session.state().projects;
            if json {
                return print_json(projects);
            }
            for p in projects {
                let short_id: String = p.id.chars().take(8).collect();
                println!(
                    "{:<8}  {:<24} {}/{} this week  backlog {}{}",
                    short_id,
                    p.name,
                    p.worked_this_week,
                    p.quota_per_week,
                    p.backlog,
                    if p.active { "" } else { "  (inactive)" }
                );
            }
        }
    }
    Ok(())
}
