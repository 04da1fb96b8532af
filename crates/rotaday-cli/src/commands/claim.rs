//! Daily claim commands.

use rotaday_core::{
    registry, ClaimError, ClaimOutcome, CoreError, RandomSource, SeededRandom, ThreadRandom,
};

use super::{open_session, CommandResult};

pub fn auto(seed: Option<u64>) -> CommandResult {
    let (mut session, now) = open_session()?;
    let mut rng: Box<dyn RandomSource> = match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };

    match session.auto_claim(now, &mut *rng) {
        Ok(ClaimOutcome::Claimed { project }) => {
            println!("Today's item is {}", project.name);
        }
        Ok(ClaimOutcome::AlreadyClaimed { project }) => match project {
            Some(project) => println!("Already claimed today: {}", project.name),
            None => println!("Already claimed today"),
        },
        Ok(ClaimOutcome::WeeklyTargetMet { worked, target }) => {
            println!("Weekly target reached ({worked}/{target} days); nothing to claim");
        }
        Err(CoreError::Claim(ClaimError::EmptyPool)) => {
            println!("Nothing to claim: every project has met its quota this week");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

pub fn force(selector: &str) -> CommandResult {
    let (mut session, now) = open_session()?;
    let id = registry::resolve(session.state(), selector)?;
    let project = session.force_claim(&id, now)?;
    println!(
        "Worked {} today ({} day(s) this week)",
        project.name, project.worked_this_week
    );
    Ok(())
}

pub fn today() -> CommandResult {
    let (session, _) = open_session()?;
    match session.todays_project() {
        Some(project) => println!("Today's item is {}", project.name),
        None => println!("Today is not claimed yet"),
    }
    Ok(())
}
