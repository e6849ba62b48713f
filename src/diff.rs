use crate::models::Snapshot;

/// Slots present in `current` with no equal counterpart in `previous`.
///
/// A (park, date) pair unknown to `previous` contributes all of its
/// slots. Pairs that exist only in `previous` are ignored: a slot
/// disappearing means someone booked it, which is not worth an alert.
/// The result never carries empty date lists or empty parks.
pub fn diff(previous: &Snapshot, current: &Snapshot) -> Snapshot {
    let mut new_slots = Snapshot::default();

    for (location, dates) in &current.0 {
        for (date, slots) in dates {
            let fresh: Vec<_> = match previous.slots(location, *date) {
                Some(seen) => slots
                    .iter()
                    .filter(|slot| !seen.contains(slot))
                    .cloned()
                    .collect(),
                None => slots.clone(),
            };
            if !fresh.is_empty() {
                new_slots
                    .0
                    .entry(location.clone())
                    .or_default()
                    .insert(*date, fresh);
            }
        }
    }

    new_slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Slot, TimeRange};
    use chrono::NaiveDate;

    fn slot(time: &str, cost: &str, url: &str) -> Slot {
        Slot::paid(TimeRange::parse(time).unwrap(), cost, url).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn identical_snapshots_diff_to_nothing() {
        let mut snapshot = Snapshot::default();
        snapshot.push("LondonFieldsPark", date("2024-06-01"), slot("09:00 - 10:00", "£3", "u1"));
        snapshot.push("LondonFieldsPark", date("2024-06-01"), slot("14:00 - 15:00", "£5", "u1"));
        snapshot.push("HackneyDowns", date("2024-06-02"), slot("10:00 - 11:00", "£4", "u2"));

        assert!(diff(&snapshot, &snapshot).is_empty());
    }

    #[test]
    fn everything_is_new_against_an_empty_baseline() {
        let mut current = Snapshot::default();
        current.push("AskeGardens", date("2024-06-01"), slot("09:00 - 10:00", "£3", "u1"));
        current.push("AskeGardens", date("2024-06-03"), slot("18:00 - 19:00", "£6", "u1"));

        assert_eq!(diff(&Snapshot::default(), &current), current);
    }

    #[test]
    fn price_change_on_the_same_interval_counts_as_new() {
        let mut previous = Snapshot::default();
        previous.push("HackneyDowns", date("2024-06-01"), slot("09:00 - 10:00", "£3", "u"));
        let mut current = Snapshot::default();
        current.push("HackneyDowns", date("2024-06-01"), slot("09:00 - 10:00", "£4", "u"));

        let result = diff(&previous, &current);
        assert_eq!(
            result.slots("HackneyDowns", date("2024-06-01")),
            Some(&[slot("09:00 - 10:00", "£4", "u")][..])
        );
    }

    #[test]
    fn disappearing_slots_are_not_reported() {
        let mut previous = Snapshot::default();
        previous.push("HackneyDowns", date("2024-06-01"), slot("09:00 - 10:00", "£3", "u"));
        previous.push("SpringHillParkTennis", date("2024-06-02"), slot("10:00 - 11:00", "£3", "u"));
        let mut current = Snapshot::default();
        current.push("HackneyDowns", date("2024-06-01"), slot("09:00 - 10:00", "£3", "u"));

        assert!(diff(&previous, &current).is_empty());
    }

    #[test]
    fn unchanged_dates_are_pruned_not_left_empty() {
        let mut previous = Snapshot::default();
        previous.push("HackneyDowns", date("2024-06-01"), slot("09:00 - 10:00", "£3", "u"));
        let mut current = previous.clone();
        current.push("HackneyDowns", date("2024-06-02"), slot("11:00 - 12:00", "£3", "u"));

        let result = diff(&previous, &current);
        let dates = &result.0["HackneyDowns"];
        assert!(!dates.contains_key(&date("2024-06-01")));
        assert_eq!(dates[&date("2024-06-02")].len(), 1);
    }

    #[test]
    fn a_park_whose_every_date_is_unchanged_is_pruned() {
        let mut previous = Snapshot::default();
        previous.push("AskeGardens", date("2024-06-01"), slot("09:00 - 10:00", "£3", "u"));
        previous.push("HackneyDowns", date("2024-06-01"), slot("09:00 - 10:00", "£3", "u"));
        let mut current = previous.clone();
        current.push("AskeGardens", date("2024-06-01"), slot("17:00 - 18:00", "£5", "u"));

        let result = diff(&previous, &current);
        assert!(result.0.contains_key("AskeGardens"));
        assert!(!result.0.contains_key("HackneyDowns"));
    }
}
