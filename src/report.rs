use chrono::NaiveDate;

use crate::models::Snapshot;

/// One cell of the availability grid: the price, linked to its booking
/// page. Carries no markup; rendering is the mailer's problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCell {
    pub cost: String,
    pub url: String,
}

/// The grid for one park: `rows[time][date]` holds the slot found for
/// that time range on that date, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationReport {
    pub location: String,
    /// Column headers, chronological.
    pub dates: Vec<NaiveDate>,
    /// Row headers, sorted time-range strings.
    pub times: Vec<String>,
    pub rows: Vec<Vec<Option<ReportCell>>>,
}

/// Rendering-agnostic report, one grid per park.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTable {
    pub locations: Vec<LocationReport>,
}

impl ReportTable {
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Reshape a diff (or a whole snapshot) into per-park grids.
///
/// Row order is the sorted set of distinct time-range strings, which
/// for zero-padded 24h times is chronological; column order is date
/// order. When a date holds duplicate slots for one time range, the
/// first in collection order wins.
pub fn project(result: &Snapshot) -> ReportTable {
    let mut locations = Vec::with_capacity(result.0.len());

    for (location, dates) in &result.0 {
        let date_columns: Vec<NaiveDate> = dates.keys().copied().collect();

        let mut times: Vec<String> = dates
            .values()
            .flatten()
            .map(|slot| slot.time.to_string())
            .collect();
        times.sort();
        times.dedup();

        let rows = times
            .iter()
            .map(|time| {
                date_columns
                    .iter()
                    .map(|date| {
                        dates[date]
                            .iter()
                            .find(|slot| slot.time.to_string() == *time)
                            .map(|slot| ReportCell {
                                cost: slot.cost.clone(),
                                url: slot.url.clone(),
                            })
                    })
                    .collect()
            })
            .collect();

        locations.push(LocationReport {
            location: location.clone(),
            dates: date_columns,
            times,
            rows,
        });
    }

    ReportTable { locations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Slot, TimeRange};

    fn slot(time: &str, cost: &str, url: &str) -> Slot {
        Slot::paid(TimeRange::parse(time).unwrap(), cost, url).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn rows_sort_by_time_and_columns_by_date_regardless_of_input_order() {
        let mut result = Snapshot::default();
        result.push("HackneyDowns", date("2024-06-03"), slot("14:00 - 15:00", "£5", "a"));
        result.push("HackneyDowns", date("2024-06-01"), slot("14:00 - 15:00", "£5", "b"));
        result.push("HackneyDowns", date("2024-06-01"), slot("09:00 - 10:00", "£3", "c"));

        let table = project(&result);
        assert_eq!(table.locations.len(), 1);
        let park = &table.locations[0];
        assert_eq!(park.times, vec!["09:00 - 10:00", "14:00 - 15:00"]);
        assert_eq!(park.dates, vec![date("2024-06-01"), date("2024-06-03")]);

        // 09:00 exists only on the 1st, 14:00 on both dates
        assert!(park.rows[0][0].is_some());
        assert!(park.rows[0][1].is_none());
        assert!(park.rows[1][0].is_some());
        assert!(park.rows[1][1].is_some());
    }

    #[test]
    fn first_matching_slot_wins_for_duplicate_time_ranges() {
        let mut result = Snapshot::default();
        let day = date("2024-06-01");
        result.push("AskeGardens", day, slot("09:00 - 10:00", "£3", "first"));
        result.push("AskeGardens", day, slot("09:00 - 10:00", "£4", "second"));

        let table = project(&result);
        let cell = table.locations[0].rows[0][0].as_ref().unwrap();
        assert_eq!(cell.cost, "£3");
        assert_eq!(cell.url, "first");
    }

    #[test]
    fn projection_is_deterministic() {
        let mut a = Snapshot::default();
        a.push("AskeGardens", date("2024-06-01"), slot("18:00 - 19:00", "£6", "u"));
        a.push("AskeGardens", date("2024-06-01"), slot("09:00 - 10:00", "£3", "u"));
        let mut b = Snapshot::default();
        b.push("AskeGardens", date("2024-06-01"), slot("09:00 - 10:00", "£3", "u"));
        b.push("AskeGardens", date("2024-06-01"), slot("18:00 - 19:00", "£6", "u"));

        assert_eq!(project(&a).locations[0].times, project(&b).locations[0].times);
        assert_eq!(project(&a).locations[0].dates, project(&b).locations[0].dates);
    }

    #[test]
    fn empty_diff_projects_to_an_empty_table() {
        assert!(project(&Snapshot::default()).is_empty());
    }
}
