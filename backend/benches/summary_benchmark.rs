use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use room_usage::config::DashboardSettings;
use room_usage::models::{Event, EventId, FilterName, FilterSet, WeekStart, WindowMode};
use room_usage::services::{build_summary, SummaryRequest};

const TITLES: [&str; 6] = [
    "cpe Lecture",
    "mcpe Lab",
    "isne Seminar",
    "Room reservation",
    "xternal mcpe Workshop",
    "Staff meeting",
];

fn synthetic_events(count: usize) -> Vec<Event> {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let start = base + Duration::minutes((i as i64 * 37) % (31 * 24 * 60));
            Event {
                id: EventId::new(i.to_string()),
                title: TITLES[i % TITLES.len()].to_string(),
                start_dt: start.fixed_offset(),
                end_dt: (start + Duration::minutes(30 + (i as i64 % 4) * 30)).fixed_offset(),
                location: (i % 11 != 0).then(|| format!("Room {}", 500 + i % 25)),
                who: Some("Staff".to_string()),
                notes: None,
            }
        })
        .collect()
}

fn bench_build_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_summary");
    let settings = DashboardSettings {
        timezone: chrono_tz::Asia::Bangkok,
        week_start: WeekStart::Sunday,
    };
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 5, 0, 0).unwrap();

    for count in [100usize, 1_000, 10_000] {
        let events = synthetic_events(count);
        let request = SummaryRequest::new(WindowMode::Month);
        group.bench_with_input(BenchmarkId::new("month", count), &events, |b, events| {
            b.iter(|| build_summary(black_box(events), &request, now, &settings));
        });

        let filtered = SummaryRequest::new(WindowMode::Month)
            .with_filters(FilterSet::with_active([FilterName::Mcpe]))
            .with_search("room 51");
        group.bench_with_input(
            BenchmarkId::new("month_filtered_search", count),
            &events,
            |b, events| {
                b.iter(|| build_summary(black_box(events), &filtered, now, &settings));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build_summary);
criterion_main!(benches);
