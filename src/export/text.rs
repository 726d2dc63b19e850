use super::ExportError;
use crate::models::{AdvisoryNote, Exercise, Plan, Week};
use crate::vocabulary::{Localizer, Namespace};
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ExerciseRow {
    #[tabled(rename = "Exercise")]
    exercise: String,
    #[tabled(rename = "Prescription")]
    prescription: String,
    #[tabled(rename = "Rest")]
    rest: String,
    #[tabled(rename = "Note")]
    note: String,
}

/// Sets and reps as `4×(8–12)`; zero-set entries read `rest`
pub fn format_prescription(exercise: &Exercise) -> String {
    if exercise.is_rest() {
        "rest".to_string()
    } else {
        format!("{}×({})", exercise.sets, exercise.reps)
    }
}

fn exercise_row(exercise: &Exercise, localizer: &dyn Localizer) -> ExerciseRow {
    ExerciseRow {
        exercise: localizer.exercise(exercise.name),
        prescription: format_prescription(exercise),
        rest: exercise
            .rest_sec
            .map(|secs| format!("{}s", secs))
            .unwrap_or_else(|| "-".to_string()),
        note: exercise.note.map(|note| localizer.note(note)).unwrap_or_default(),
    }
}

/// Display line for an advisory note
pub fn format_note(note: &AdvisoryNote, localizer: &dyn Localizer) -> String {
    let label = localizer.translate(Namespace::Advisory, note.key());
    match note {
        AdvisoryNote::PreferencesNoted(text) => format!("{}: {}", label, text),
        _ => label,
    }
}

/// Human-readable rendering of one week
pub fn render_week(week: &Week, localizer: &dyn Localizer) -> Result<String, ExportError> {
    let mut out = String::new();

    let deload = if week.is_deload { " [deload]" } else { "" };
    writeln!(out, "WEEK {} (reps {}){}", week.week, week.rep_hint, deload)?;
    writeln!(out, "-")?;

    for day in &week.days {
        writeln!(out, "{} · {}", localizer.day(day.day), localizer.block(day.block))?;

        let rows: Vec<ExerciseRow> = day.items.iter().map(|e| exercise_row(e, localizer)).collect();
        let mut table = Table::new(rows);
        table.with(Style::psql());
        writeln!(out, "{}", table)?;
        writeln!(out)?;
    }

    Ok(out)
}

/// Human-readable rendering of a full plan
pub fn render_plan(plan: &Plan, localizer: &dyn Localizer) -> Result<String, ExportError> {
    let mut out = String::new();
    let nutrition = &plan.nutrition;

    writeln!(out, "=")?;
    writeln!(out, "TRAINING PLAN")?;
    writeln!(out, "=")?;
    writeln!(out)?;
    writeln!(out, "Split: {}", localizer.translate(Namespace::Split, &plan.summary.split))?;
    writeln!(
        out,
        "Microcycle: {}",
        localizer.translate(Namespace::Microcycle, plan.summary.microcycle.key())
    )?;
    writeln!(out)?;

    writeln!(out, "NUTRITION")?;
    writeln!(out, "-")?;
    writeln!(out, "TDEE: {} kcal", nutrition.tdee)?;
    writeln!(out, "Calories: {} kcal", nutrition.calories)?;
    writeln!(out, "Protein: {}–{} g", nutrition.protein_g.low, nutrition.protein_g.high)?;
    writeln!(out, "Fat: {}–{} g", nutrition.fat_g.low, nutrition.fat_g.high)?;
    writeln!(out, "Carbs: {} g", nutrition.carbs_g)?;
    writeln!(out, "{}", localizer.translate(Namespace::Rationale, nutrition.rationale.key()))?;
    writeln!(out)?;

    if !plan.summary.notes.is_empty() {
        writeln!(out, "NOTES")?;
        writeln!(out, "-")?;
        for note in &plan.summary.notes {
            writeln!(out, "• {}", format_note(note, localizer))?;
        }
        writeln!(out)?;
    }

    for week in &plan.weeks {
        out.push_str(&render_week(week, localizer)?);
    }

    Ok(out)
}

/// Export a plan to human-readable text format
pub fn export_plan<P: AsRef<Path>>(
    plan: &Plan,
    localizer: &dyn Localizer,
    output_path: P,
) -> Result<(), ExportError> {
    let mut file = std::fs::File::create(output_path)?;
    file.write_all(render_plan(plan, localizer)?.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_profile, ExerciseKey, Goal, NoteKey};
    use crate::planner::PlanGenerator;
    use crate::vocabulary::Catalog;
    use rust_decimal_macros::dec;
    use tempfile::NamedTempFile;

    #[test]
    fn test_prescription_format() {
        let bench = Exercise {
            name: ExerciseKey::BarbellBenchPress,
            sets: 4,
            reps: "4–6".to_string(),
            rest_sec: Some(120),
            note: None,
        };
        assert_eq!(format_prescription(&bench), "4×(4–6)");

        let rest = Exercise {
            name: ExerciseKey::RestRecovery,
            sets: 0,
            reps: "-".to_string(),
            rest_sec: None,
            note: Some(NoteKey::SleepHydration),
        };
        assert_eq!(format_prescription(&rest), "rest");
    }

    #[test]
    fn test_render_plan_english() {
        let mut profile = sample_profile();
        profile.goal = Goal::Bulk;
        profile.weight_kg = dec!(95);
        profile.preferences = Some("mornings only".to_string());
        let plan = PlanGenerator::default().generate(&profile);

        let text = render_plan(&plan, &Catalog::english()).unwrap();
        assert!(text.contains("Split: Upper / Lower / Rest / Pull-Shoulders / Cardio"));
        assert!(text.contains("Small surplus ~10% to support hypertrophy"));
        assert!(text.contains("• High BMI – consider short cut before bulking."));
        assert!(text.contains("• Preferences noted: mornings only"));
        assert!(text.contains("WEEK 4 (reps 10–12 (deload)) [deload]"));
        assert!(text.contains("Sun · Upper"));
        assert!(text.contains("Barbell bench press"));
        assert!(text.contains("sleep, hydration"));
    }

    #[test]
    fn test_render_single_week() {
        let week = PlanGenerator::default().generate_week(&sample_profile(), 4);
        let text = render_week(&week, &Catalog::english()).unwrap();

        assert!(text.starts_with("WEEK 4 (reps 10–12 (deload)) [deload]\n"));
        assert_eq!(text.matches(" · ").count(), 7);
    }

    #[test]
    fn test_unmapped_keys_render_as_identifiers() {
        let plan = PlanGenerator::default().generate(&sample_profile());
        let text = render_plan(&plan, &Catalog::new("xx")).unwrap();

        assert!(text.contains("sun · upper"));
        assert!(text.contains("barbell_bench_press"));
        assert!(text.contains("Microcycle: 3-up-1-down"));
    }

    #[test]
    fn test_export_plan_text_file() {
        let plan = PlanGenerator::default().generate(&sample_profile());

        let temp_file = NamedTempFile::new().unwrap();
        export_plan(&plan, &Catalog::english(), temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("TRAINING PLAN"));
        assert!(content.contains("Calories: 2345 kcal"));
        assert_eq!(content.matches("WEEK ").count(), 4);
    }
}
