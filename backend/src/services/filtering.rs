//! Filter engine.
//!
//! An event is *filtered in* when its start lies inside the time window and
//! its title satisfies every active keyword filter. The search term is applied
//! afterwards, on the already filtered events, to produce the list view. Both
//! sets are exposed through [`FilteredView`]; charts and statistics are built
//! from `filtered`, never from `displayed`.

use chrono_tz::Tz;

use crate::models::{Event, FilterSet, TimeWindow};

/// The two views derived from one base filter pass.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    /// Window + category stages. Feeds charts and statistics.
    pub filtered: Vec<&'a Event>,
    /// `filtered` narrowed by the search term. Feeds the event list.
    pub displayed: Vec<&'a Event>,
}

/// Window stage: start instant within the inclusive window.
pub fn passes_window(event: &Event, window: &TimeWindow) -> bool {
    window.contains(&event.start_dt)
}

/// Category stage: every active filter keyword present, case-sensitively.
pub fn passes_categories(event: &Event, filters: &FilterSet) -> bool {
    filters.matches(&event.title)
}

/// Search stage.
///
/// Text fields are compared case-insensitively. The rendered start date and
/// start/end times are compared literally against the raw term, so `9:00`
/// finds a 9 AM event while `9:00 am` does not.
pub fn matches_search(event: &Event, term: &str, tz: &Tz) -> bool {
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();
    let text_match = event.title.to_lowercase().contains(&needle)
        || [event.notes(), event.location(), event.who()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle));
    if text_match {
        return true;
    }

    event.start_date_label(tz).contains(term)
        || event.start_time_label(tz).contains(term)
        || event.end_time_label(tz).contains(term)
}

/// Window and category stages over the whole collection.
pub fn filter_events<'a>(
    events: &'a [Event],
    window: &TimeWindow,
    filters: &FilterSet,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| passes_window(event, window) && passes_categories(event, filters))
        .collect()
}

/// Search stage over an already filtered collection.
pub fn search_events<'a>(filtered: &[&'a Event], term: &str, tz: &Tz) -> Vec<&'a Event> {
    filtered
        .iter()
        .copied()
        .filter(|event| matches_search(event, term, tz))
        .collect()
}

/// Run all three stages and keep both resulting views.
pub fn apply_filters<'a>(
    events: &'a [Event],
    window: &TimeWindow,
    filters: &FilterSet,
    search_term: &str,
    tz: &Tz,
) -> FilteredView<'a> {
    let filtered = filter_events(events, window, filters);
    let displayed = search_events(&filtered, search_term, tz);
    log::debug!(
        "Filtered {} of {} events, {} displayed for search {:?}",
        filtered.len(),
        events.len(),
        displayed.len(),
        search_term
    );
    FilteredView {
        filtered,
        displayed,
    }
}
