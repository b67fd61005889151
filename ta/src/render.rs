//! Human-readable rendering of plans and scored task lists

use std::fmt::{self, Write};

use colored::*;

use crate::domain::{FinalPlan, PlanItem, PlanPayload, ScoredTask};

const NO_NICE_TO_HAVE: &str = "No nice-to-have tasks suggested for this session.";

const NOTHING_FITS: &str = "No tasks fit this session.";

fn write_item(out: &mut impl Write, index: usize, item: &PlanItem) -> fmt::Result {
    writeln!(
        out,
        "{}. {} {}",
        index + 1,
        item.title.bold(),
        format!("({} min, score {})", item.est_minutes, item.score).dimmed()
    )?;
    writeln!(out, "   Reason: {}", item.reason)
}

fn write_items(out: &mut impl Write, items: &[PlanItem], empty: &str) -> fmt::Result {
    if items.is_empty() {
        writeln!(out, "{}", empty)?;
    }
    for (i, item) in items.iter().enumerate() {
        write_item(out, i, item)?;
    }
    Ok(())
}

fn write_plan(out: &mut impl Write, plan: &FinalPlan) -> fmt::Result {
    writeln!(out, "{}", "Shortlist".green().bold())?;
    write_items(out, &plan.shortlist, NOTHING_FITS)?;

    writeln!(out)?;
    writeln!(out, "{}", "Nice to have".cyan().bold())?;
    write_items(out, &plan.nice_to_have, NO_NICE_TO_HAVE)?;

    writeln!(out)?;
    writeln!(out, "{} {}", "Summary:".yellow().bold(), plan.summary)
}

/// Render a final plan for the terminal
pub fn render_plan(plan: &FinalPlan) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_plan(&mut out, plan)?;
    Ok(out)
}

fn write_scored(out: &mut impl Write, index: usize, task: &ScoredTask) -> fmt::Result {
    writeln!(
        out,
        "{:>2}. {:<32} {:>6} {}",
        index + 1,
        task.title(),
        format!("{:.1}", task.score).yellow(),
        format!(
            "({} min, i={} u={} d={})",
            task.est_minutes(),
            task.task.importance.value(),
            task.task.urgency.value(),
            task.task.desire.value()
        )
        .dimmed()
    )
}

fn write_scores(out: &mut impl Write, payload: &PlanPayload) -> fmt::Result {
    writeln!(out, "{}", "Scored tasks".bold())?;
    for (i, task) in payload.all_tasks.iter().enumerate() {
        write_scored(out, i, task)?;
    }

    let shortlist = payload.suggested_shortlist.as_deref().unwrap_or_default();
    let total: u32 = shortlist.iter().map(|t| t.est_minutes()).sum();

    writeln!(out)?;
    writeln!(
        out,
        "{} {}",
        "Shortlist".green().bold(),
        format!("({} of {} min)", total, payload.available_minutes).dimmed()
    )?;
    if shortlist.is_empty() {
        writeln!(out, "{}", NOTHING_FITS)?;
    }
    for (i, task) in shortlist.iter().enumerate() {
        write_scored(out, i, task)?;
    }
    Ok(())
}

/// Render every scored task plus the deterministic shortlist
pub fn render_scores(payload: &PlanPayload) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_scores(&mut out, payload)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample_tasks;
    use crate::planner::{assemble_plan_data, choose_shortlist, score_tasks};

    fn item(title: &str) -> PlanItem {
        PlanItem {
            title: title.to_string(),
            reason: "Because".to_string(),
            est_minutes: 15,
            score: 8.0,
        }
    }

    #[test]
    fn test_render_plan_sections() {
        colored::control::set_override(false);
        let plan = FinalPlan {
            shortlist: vec![item("Email accountant")],
            nice_to_have: vec![item("Stretch")],
            summary: "Do the email.".to_string(),
        };

        let text = render_plan(&plan).unwrap();
        assert!(text.contains("1. Email accountant (15 min, score 8)"));
        assert!(text.contains("Reason: Because"));
        assert!(text.contains("1. Stretch"));
        assert!(text.contains("Summary: Do the email."));
        assert!(!text.contains(NO_NICE_TO_HAVE));
    }

    #[test]
    fn test_render_plan_without_extras() {
        colored::control::set_override(false);
        let plan = FinalPlan {
            shortlist: vec![],
            nice_to_have: vec![],
            summary: "Nothing fits.".to_string(),
        };

        let text = render_plan(&plan).unwrap();
        assert!(text.contains(NOTHING_FITS));
        assert!(text.contains(NO_NICE_TO_HAVE));
    }

    #[test]
    fn test_render_scores() {
        colored::control::set_override(false);
        let scored = score_tasks(&sample_tasks());
        let shortlist = choose_shortlist(&scored, 60);
        let payload = assemble_plan_data(scored, 60, "medium", Some(shortlist));

        let text = render_scores(&payload).unwrap();
        assert!(text.contains("14.5"));
        assert!(text.contains("(40 of 60 min)"));
        assert!(text.contains("Practice DSA"));
    }

    /// Sink that rejects every write
    struct FailingWriter;

    impl Write for FailingWriter {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_write_errors_propagate() {
        let plan = FinalPlan {
            shortlist: vec![item("Email accountant")],
            nice_to_have: vec![],
            summary: "x".to_string(),
        };
        assert!(write_plan(&mut FailingWriter, &plan).is_err());

        let payload = assemble_plan_data(score_tasks(&sample_tasks()), 60, "medium", None);
        assert!(write_scores(&mut FailingWriter, &payload).is_err());
    }
}
