//! Project registry edits.
//!
//! Names are not required to be unique; projects are addressed by id.
//! [`resolve`] turns a user-typed selector into an id.

use crate::error::ValidationError;
use crate::state::{Project, SessionState};

/// Append a project with zeroed counters and return its id.
pub fn add(
    state: &mut SessionState,
    name: &str,
    quota: u32,
    active: bool,
) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let project = Project::new(name, quota, active);
    let id = project.id.clone();
    state.projects.push(project);
    Ok(id)
}

pub fn remove(state: &mut SessionState, id: &str) -> Result<Project, ValidationError> {
    let index = state
        .projects
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| ValidationError::UnknownProject(id.to_string()))?;
    Ok(state.projects.remove(index))
}

/// Returns whether the quota changed.
pub fn set_quota(state: &mut SessionState, id: &str, quota: u32) -> Result<bool, ValidationError> {
    let project = state
        .project_mut(id)
        .ok_or_else(|| ValidationError::UnknownProject(id.to_string()))?;
    let changed = project.quota_per_week != quota;
    project.quota_per_week = quota;
    Ok(changed)
}

/// Returns whether the flag changed.
pub fn set_active(state: &mut SessionState, id: &str, active: bool) -> Result<bool, ValidationError> {
    let project = state
        .project_mut(id)
        .ok_or_else(|| ValidationError::UnknownProject(id.to_string()))?;
    let changed = project.active != active;
    project.active = active;
    Ok(changed)
}

/// First project with exactly this name.
pub fn find_by_name<'a>(state: &'a SessionState, name: &str) -> Option<&'a Project> {
    state.projects.iter().find(|p| p.name == name)
}

/// Resolve a selector to a project id.
///
/// Tries an exact id, then an exact name, then a case-insensitive name,
/// then an id prefix. A selector matching several projects at the same
/// step is rejected.
pub fn resolve(state: &SessionState, selector: &str) -> Result<String, ValidationError> {
    let selector = selector.trim();
    if let Some(p) = state.project(selector) {
        return Ok(p.id.clone());
    }

    let steps: [&dyn Fn(&Project) -> bool; 3] = [
        &|p: &Project| p.name == selector,
        &|p: &Project| p.name.eq_ignore_ascii_case(selector),
        &|p: &Project| !selector.is_empty() && p.id.starts_with(selector),
    ];
    for rule in steps {
        let found: Vec<&Project> = state.projects.iter().filter(|p| rule(p)).collect();
        match found.as_slice() {
            [] => continue,
            [one] => return Ok(one.id.clone()),
            many => {
                return Err(ValidationError::AmbiguousProject {
                    selector: selector.to_string(),
                    candidates: many.iter().map(|p| format!("{} ({})", p.name, p.id)).collect(),
                })
            }
        }
    }
    Err(ValidationError::UnknownProject(selector.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn empty() -> SessionState {
        SessionState::empty(Utc::now())
    }

    #[test]
    fn add_appends_with_zero_counters() {
        let mut s = empty();
        let a = add(&mut s, "Alpha", 0, true).unwrap();
        let b = add(&mut s, "  Beta ", 3, false).unwrap();
        assert_eq!(s.projects.len(), 2);
        assert_eq!(s.projects[0].id, a);
        assert_eq!(s.projects[1].id, b);
        assert_eq!(s.projects[1].name, "Beta");
        assert_eq!(s.projects[1].quota_per_week, 3);
        assert!(!s.projects[1].active);
        assert_eq!(s.projects[1].total_worked, 0);
        assert_eq!(s.projects[1].backlog, 0);
    }

    #[test]
    fn add_rejects_blank_names() {
        let mut s = empty();
        assert_eq!(add(&mut s, "   ", 1, true), Err(ValidationError::EmptyName));
        assert!(s.projects.is_empty());
    }

    #[test]
    fn remove_by_id_keeps_order() {
        let mut s = empty();
        let a = add(&mut s, "A", 1, true).unwrap();
        let b = add(&mut s, "B", 1, true).unwrap();
        let c = add(&mut s, "C", 1, true).unwrap();
        assert_eq!(remove(&mut s, &b).unwrap().name, "B");
        let ids: Vec<_> = s.projects.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![a, c]);
        assert!(remove(&mut s, &b).is_err());
    }

    #[test]
    fn setters_report_change() {
        let mut s = empty();
        let a = add(&mut s, "A", 2, true).unwrap();
        assert_eq!(set_quota(&mut s, &a, 2), Ok(false));
        assert_eq!(set_quota(&mut s, &a, 4), Ok(true));
        assert_eq!(set_active(&mut s, &a, true), Ok(false));
        assert_eq!(set_active(&mut s, &a, false), Ok(true));
        assert_eq!(s.projects[0].quota_per_week, 4);
        assert!(!s.projects[0].active);
        assert!(set_quota(&mut s, "missing", 1).is_err());
    }

    #[test]
    fn resolve_by_id_name_and_prefix() {
        let mut s = empty();
        let a = add(&mut s, "Alpha", 1, true).unwrap();
        let b = add(&mut s, "Beta", 1, true).unwrap();
        assert_eq!(resolve(&s, &a).unwrap(), a);
        assert_eq!(resolve(&s, "Beta").unwrap(), b);
        assert_eq!(resolve(&s, "alpha").unwrap(), a);
        s.projects[0].id = "aaaa-alpha".into();
        s.projects[1].id = "ffff-beta".into();
        assert_eq!(resolve(&s, "ffff").unwrap(), "ffff-beta");
        assert!(matches!(
            resolve(&s, "Gamma"),
            Err(ValidationError::UnknownProject(_))
        ));
    }

    #[test]
    fn resolve_rejects_duplicate_names() {
        let mut s = empty();
        add(&mut s, "Same", 1, true).unwrap();
        add(&mut s, "Same", 2, true).unwrap();
        assert!(matches!(
            resolve(&s, "Same"),
            Err(ValidationError::AmbiguousProject { .. })
        ));
        assert_eq!(find_by_name(&s, "Same").unwrap().quota_per_week, 1);
    }
}
