use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fitplan::export::{self, ExportFormat};
use fitplan::models::{ActivityLevel, Equipment, Experience, Gender, Goal, Injuries, Profile};
use fitplan::{Catalog, PlanGenerator};
use rust_decimal_macros::dec;

/// Plan generation benchmarks
///
/// Generation is a pure function, so these measure the rule tables, set
/// scaling and allocation cost per plan.

fn bench_plan_generation(c: &mut Criterion) {
    let generator = PlanGenerator::default();

    let mut group = c.benchmark_group("Plan Generation");

    for &days in &[2u8, 4, 7] {
        let profile = create_benchmark_profile(days);

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("generate", days), &profile, |b, profile| {
            b.iter(|| generator.generate(black_box(profile)));
        });
    }

    group.finish();
}

fn bench_profile_batch(c: &mut Criterion) {
    let generator = PlanGenerator::default();

    let mut group = c.benchmark_group("Profile Batch");

    for &size in &[10usize, 100, 1000] {
        let profiles = create_profile_dataset(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("generate_batch", size), &profiles, |b, profiles| {
            b.iter(|| {
                for profile in profiles {
                    let _ = generator.generate(profile);
                }
            });
        });
    }

    group.finish();
}

fn bench_text_rendering(c: &mut Criterion) {
    let plan = PlanGenerator::default().generate(&create_benchmark_profile(5));
    let catalog = Catalog::english();

    c.bench_function("render_text_plan", |b| {
        b.iter(|| export::render_plan(black_box(&plan), ExportFormat::Text, &catalog));
    });
    c.bench_function("render_json_plan", |b| {
        b.iter(|| export::render_plan(black_box(&plan), ExportFormat::Json, &catalog));
    });
}

fn create_benchmark_profile(days: u8) -> Profile {
    Profile {
        age: Some(32),
        gender: Gender::Male,
        weight_kg: dec!(82.5),
        height_cm: dec!(178),
        goal: Goal::Bulk,
        activity: ActivityLevel::Moderate,
        equipment: Equipment::Gym,
        experience: Experience::Intermediate,
        days_per_week: days,
        session_length_min: 60,
        injuries: Injuries::none(),
        preferences: None,
    }
}

fn create_profile_dataset(size: usize) -> Vec<Profile> {
    let experiences = [Experience::Beginner, Experience::Intermediate, Experience::Advanced];
    let lengths = [30, 45, 60, 75, 90];

    (0..size)
        .map(|seed| {
            let mut profile = create_benchmark_profile(2 + (seed % 6) as u8);
            profile.experience = experiences[seed % experiences.len()];
            profile.session_length_min = lengths[seed % lengths.len()];
            profile.equipment = if seed % 2 == 0 { Equipment::Gym } else { Equipment::Home };
            profile.injuries.knees = seed % 7 == 0;
            profile.injuries.shoulders = seed % 5 == 0;
            profile
        })
        .collect()
}

criterion_group!(benches, bench_plan_generation, bench_profile_batch, bench_text_rendering);
criterion_main!(benches);
