//! Plain-text rendering of a session plan and its reasoning trace.

use crate::milestones::FamilyScore;
use crate::planner::RecommendationLine;
use crate::session::SessionPlan;

const RULE_WIDTH: usize = 70;

/// Tonnage of one line, or `None` when its text does not parse.
pub fn line_tonnage(line: &RecommendationLine) -> Option<f64> {
    let mut parts = line.sets_reps.split(" x ");
    let sets: u32 = parts.next()?.trim().parse().ok()?;
    let reps: u32 = parts.next()?.trim().parse().ok()?;
    let load: f64 = line.load.trim().parse().ok()?;
    Some(f64::from(sets) * f64::from(reps) * load)
}

/// Sum of sets x reps x load; malformed lines are left out.
pub fn estimated_tonnage(lines: &[RecommendationLine]) -> f64 {
    lines.iter().filter_map(line_tonnage).sum()
}

/// Whole number with comma thousands separators.
pub fn with_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 && digits != "0" {
        out.insert(0, '-');
    }
    out
}

fn trace_line(score: &FamilyScore) -> String {
    let days = match score.days_since {
        Some(d) => format!("{d}d since last"),
        None => "never trained".to_string(),
    };
    format!(
        " {:<10} score={:.2} (gap={:.0}%, {})",
        score.family.label(),
        score.score,
        score.gap * 100.0,
        days
    )
}

pub fn render_report(plan: &SessionPlan) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let focus: Vec<&str> = plan.focus_families().iter().map(|f| f.label()).collect();

    let mut s = String::new();
    s.push_str(&format!("{heavy}\n"));
    s.push_str(" RECOMMENDED NEXT SESSION\n");
    s.push_str(&format!(" Focus: {}\n", focus.join(" + ")));
    s.push_str(&format!("{heavy}\n"));
    s.push_str(&format!(
        " {:<30} {:<14} {:<12} {}\n",
        "Movement", "Sets x Reps", "Load (kg)", "Rationale"
    ));
    s.push_str(&format!("{light}\n"));
    for line in &plan.lines {
        s.push_str(&format!(
            "{:<30} {:<14} {:<12} {}\n",
            line.movement, line.sets_reps, line.load, line.rationale
        ));
    }
    s.push_str(&format!("{light}\n"));
    s.push_str(&format!(
        " Estimated session tonnage: ~{} kg\n",
        with_thousands(estimated_tonnage(&plan.lines))
    ));
    s.push_str(" --- Priority Reasoning ---\n");
    for score in &plan.scores {
        s.push_str(&trace_line(score));
        s.push('\n');
    }
    s
}
