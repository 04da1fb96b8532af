use rotaday_core::{BacklogReport, WeekStatus, WorkLog};

use super::{open_session, print_json, CommandResult};

pub fn status(json: bool) -> CommandResult {
    let (session, _) = open_session()?;
    let status = WeekStatus::build(session.state(), session.engine());
    if json {
        return print_json(&status);
    }
    print!("{status}");
    Ok(())
}

pub fn backlog(json: bool) -> CommandResult {
    let (session, _) = open_session()?;
    let report = BacklogReport::build(session.state());
    if json {
        return print_json(&report);
    }
    print!("{report}");
    Ok(())
}

pub fn log(json: bool) -> CommandResult {
    let (session, _) = open_session()?;
    let log = WorkLog::build(session.state());
    if json {
        return print_json(&log);
    }
    print!("{log}");
    Ok(())
}

pub fn odds(json: bool) -> CommandResult {
    let (session, _) = open_session()?;
    let weights = session.engine().pool_weights(&session.state().projects);
    if json {
        return print_json(&weights);
    }
    if weights.iter().all(|w| w.weight == 0) {
        println!("No project has quota left this week");
        return Ok(());
    }
    for w in weights.iter().filter(|w| w.weight > 0) {
        println!("{:<24} {:>3}  {:>5.1}%", w.name, w.weight, w.probability * 100.0);
    }
    Ok(())
}
