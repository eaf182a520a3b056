//! Vitals tab: recency filtering, sorting, pagination and chart series.

use chrono::{Duration, NaiveDateTime};
use medcard_core::VitalReading;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseOptionError;

/// Rows per table page
pub const PAGE_SIZE: usize = 5;

const CHART_LABEL_FORMAT: &str = "%b %-d, %-I %p";
const ROW_LABEL_FORMAT: &str = "%b %-d, %-I:%M %p";

/// Recency window applied before charting and tabulating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    Day,
    #[default]
    Week,
    Month,
    All,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::Day,
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::All,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TimeRange::Day => "24h",
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
            TimeRange::All => "all",
        }
    }

    pub fn window(self) -> Option<Duration> {
        match self {
            TimeRange::Day => Some(Duration::days(1)),
            TimeRange::Week => Some(Duration::days(7)),
            TimeRange::Month => Some(Duration::days(30)),
            TimeRange::All => None,
        }
    }

    /// Whether a reading taken at `taken_at` falls in the window ending at `now`.
    /// Readings without a usable timestamp only appear under `All`.
    pub fn contains(self, taken_at: Option<NaiveDateTime>, now: NaiveDateTime) -> bool {
        match self.window() {
            None => true,
            Some(window) => taken_at.is_some_and(|t| now - t <= window),
        }
    }
}

/// Table column a sort applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    DateTime,
    BloodPressure,
    HeartRate,
    Temperature,
    BloodSugar,
    Weight,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        SortField::DateTime,
        SortField::BloodPressure,
        SortField::HeartRate,
        SortField::Temperature,
        SortField::BloodSugar,
        SortField::Weight,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SortField::DateTime => "datetime",
            SortField::BloodPressure => "bp",
            SortField::HeartRate => "hr",
            SortField::Temperature => "temp",
            SortField::BloodSugar => "sugar",
            SortField::Weight => "weight",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            SortField::DateTime => "Date & Time",
            SortField::BloodPressure => "BP",
            SortField::HeartRate => "HR",
            SortField::Temperature => "Temp",
            SortField::BloodSugar => "Sugar",
            SortField::Weight => "Weight",
        }
    }

    /// Ascending comparison of two readings on this field
    pub fn compare(self, a: &VitalReading, b: &VitalReading) -> Ordering {
        match self {
            SortField::DateTime => a.taken_at().cmp(&b.taken_at()),
            SortField::BloodPressure => a.blood_pressure.systolic.cmp(&b.blood_pressure.systolic),
            SortField::HeartRate => a.heart_rate.cmp(&b.heart_rate),
            SortField::Temperature => a.temperature.total_cmp(&b.temperature),
            SortField::BloodSugar => a.blood_sugar.value.cmp(&b.blood_sugar.value),
            SortField::Weight => a.weight.total_cmp(&b.weight),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn id(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn flip(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

macro_rules! parse_by_id {
    ($ty:ty, $kind:literal, $all:expr) => {
        impl FromStr for $ty {
            type Err = ParseOptionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $all.into_iter()
                    .find(|v| v.id().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| {
                        let ids: Vec<&str> = $all.iter().map(|v| v.id()).collect();
                        ParseOptionError::new($kind, s, &ids)
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.id())
            }
        }
    };
}

parse_by_id!(TimeRange, "time range", TimeRange::ALL);
parse_by_id!(SortField, "sort field", SortField::ALL);
parse_by_id!(SortOrder, "sort order", [SortOrder::Asc, SortOrder::Desc]);

/// Vitals tab state: window, sort and current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitalsQuery {
    pub range: TimeRange,
    pub field: SortField,
    pub order: SortOrder,
    /// 1-based page number
    pub page: usize,
}

impl Default for VitalsQuery {
    fn default() -> Self {
        Self {
            range: TimeRange::default(),
            field: SortField::default(),
            order: SortOrder::default(),
            page: 1,
        }
    }
}

impl VitalsQuery {
    /// Clicking a column heading: the active column flips its order, any
    /// other column becomes active in descending order.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.field == field {
            self.order = self.order.flip();
        } else {
            self.field = field;
            self.order = SortOrder::Desc;
        }
        self.page = 1;
    }

    pub fn set_range(&mut self, range: TimeRange) {
        self.range = range;
        self.page = 1;
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page = self.page.saturating_add(1).min(total_pages.max(1));
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Readings inside the window, in input order
    pub fn filter<'a>(&self, readings: &'a [VitalReading], now: NaiveDateTime) -> Vec<&'a VitalReading> {
        readings
            .iter()
            .filter(|r| self.range.contains(r.taken_at(), now))
            .collect()
    }

    /// Filter, then stable-sort by the active field and order
    pub fn sorted<'a>(&self, readings: &'a [VitalReading], now: NaiveDateTime) -> Vec<&'a VitalReading> {
        let mut rows = self.filter(readings, now);
        rows.sort_by(|a, b| {
            let ord = self.field.compare(a, b);
            match self.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        rows
    }

    /// Compute the full tab contents for `readings` as of `now`
    pub fn apply(&self, readings: &[VitalReading], now: NaiveDateTime) -> VitalsView {
        let filtered = self.filter(readings, now);
        let series = Metric::ALL
            .into_iter()
            .map(|metric| ChartSeries::collect(metric, &filtered))
            .collect();

        let sorted = self.sorted(readings, now);
        let total_pages = total_pages(sorted.len());
        let page = self.page.clamp(1, total_pages.max(1));
        let rows = sorted
            .into_iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .map(VitalRow::from_reading)
            .collect();

        VitalsView {
            query: VitalsQuery { page, ..*self },
            total_readings: filtered.len(),
            total_pages,
            rows,
            series,
        }
    }
}

pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Charted vital sign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Systolic,
    Diastolic,
    HeartRate,
    BloodSugar,
    Temperature,
    Weight,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Systolic,
        Metric::Diastolic,
        Metric::HeartRate,
        Metric::BloodSugar,
        Metric::Temperature,
        Metric::Weight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Systolic => "Systolic",
            Metric::Diastolic => "Diastolic",
            Metric::HeartRate => "Heart Rate",
            Metric::BloodSugar => "Blood Sugar",
            Metric::Temperature => "Temperature",
            Metric::Weight => "Weight",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Systolic | Metric::Diastolic => "mmHg",
            Metric::HeartRate => "bpm",
            Metric::BloodSugar => "mg/dL",
            Metric::Temperature => "°C",
            Metric::Weight => "kg",
        }
    }

    pub fn value(self, reading: &VitalReading) -> f64 {
        match self {
            Metric::Systolic => reading.blood_pressure.systolic.into(),
            Metric::Diastolic => reading.blood_pressure.diastolic.into(),
            Metric::HeartRate => reading.heart_rate.into(),
            Metric::BloodSugar => reading.blood_sugar.value.into(),
            Metric::Temperature => reading.temperature,
            Metric::Weight => reading.weight,
        }
    }

    /// Whether `value` is outside the normal band. Weight has no band.
    pub fn is_abnormal(self, value: f64) -> bool {
        match self {
            Metric::Systolic => !(90.0..=140.0).contains(&value),
            Metric::Diastolic => !(60.0..=90.0).contains(&value),
            Metric::HeartRate => !(60.0..=100.0).contains(&value),
            Metric::Temperature => !(36.0..=37.8).contains(&value),
            Metric::BloodSugar => !(70.0..=140.0).contains(&value),
            Metric::Weight => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// One trend line; drawing it is up to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub metric: Metric,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    fn collect(metric: Metric, readings: &[&VitalReading]) -> Self {
        let points = readings
            .iter()
            .map(|r| ChartPoint {
                label: reading_label(r, CHART_LABEL_FORMAT),
                value: metric.value(r),
            })
            .collect();
        Self { metric, points }
    }

    /// Final point in series order
    pub fn last(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }

    pub fn min(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }
}

/// A table cell value with its out-of-range flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flagged<T> {
    pub value: T,
    pub abnormal: bool,
}

impl<T: Copy + Into<f64>> Flagged<T> {
    fn check(metric: Metric, value: T) -> Self {
        Self {
            value,
            abnormal: metric.is_abnormal(value.into()),
        }
    }
}

/// One row of the detailed history table
#[derive(Debug, Clone, PartialEq)]
pub struct VitalRow {
    pub taken_at: String,
    pub systolic: Flagged<u32>,
    pub diastolic: Flagged<u32>,
    pub heart_rate: Flagged<u32>,
    pub temperature: Flagged<f64>,
    pub blood_sugar: Flagged<u32>,
    pub sugar_kind: String,
    /// Weight with one decimal
    pub weight: String,
}

impl VitalRow {
    fn from_reading(reading: &VitalReading) -> Self {
        Self {
            taken_at: reading_label(reading, ROW_LABEL_FORMAT),
            systolic: Flagged::check(Metric::Systolic, reading.blood_pressure.systolic),
            diastolic: Flagged::check(Metric::Diastolic, reading.blood_pressure.diastolic),
            heart_rate: Flagged::check(Metric::HeartRate, reading.heart_rate),
            temperature: Flagged::check(Metric::Temperature, reading.temperature),
            blood_sugar: Flagged::check(Metric::BloodSugar, reading.blood_sugar.value),
            sugar_kind: reading.blood_sugar.kind.clone(),
            weight: format!("{:.1}", reading.weight),
        }
    }
}

/// Computed vitals tab
#[derive(Debug, Clone, PartialEq)]
pub struct VitalsView {
    /// The query actually applied, page clamped
    pub query: VitalsQuery,
    /// Readings inside the window
    pub total_readings: usize,
    pub total_pages: usize,
    pub rows: Vec<VitalRow>,
    pub series: Vec<ChartSeries>,
}

fn reading_label(reading: &VitalReading, format: &str) -> String {
    match reading.taken_at() {
        Some(at) => at.format(format).to_string(),
        None => format!("{} {}", reading.date, reading.time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use medcard_core::generate_record;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M").unwrap()
    }

    fn sample() -> Vec<VitalReading> {
        generate_record().vital_readings
    }

    /// `count` readings one day apart ending 2024-03-20 08:00, heart rate rising
    fn daily(count: u32) -> Vec<VitalReading> {
        let template = sample()[0].clone();
        let end = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        (0..count)
            .map(|i| {
                let mut r = template.clone();
                let day = end - Duration::days(i64::from(count - 1 - i));
                r.date = day.format("%Y-%m-%d").to_string();
                r.time = "08:00".into();
                r.heart_rate = 60 + i;
                r
            })
            .collect()
    }

    #[test]
    fn windows() {
        let readings = sample();
        let now = at("2024-03-16", "09:00");
        let count = |range: TimeRange| {
            VitalsQuery {
                range,
                ..Default::default()
            }
            .filter(&readings, now)
            .len()
        };

        assert_eq!(count(TimeRange::Day), 1);
        assert_eq!(count(TimeRange::Week), 1);
        assert_eq!(count(TimeRange::Month), 2);
        assert_eq!(count(TimeRange::All), 3);
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let readings = sample();
        let exactly_a_day_later = at("2024-03-16", "09:30");
        assert!(TimeRange::Day.contains(readings[0].taken_at(), exactly_a_day_later));
        let a_minute_more = at("2024-03-16", "09:31");
        assert!(!TimeRange::Day.contains(readings[0].taken_at(), a_minute_more));
    }

    #[test]
    fn unparsable_readings_only_under_all() {
        let mut readings = sample();
        readings[0].time = "morning".into();
        let now = at("2024-03-16", "09:00");

        assert!(!TimeRange::Week.contains(readings[0].taken_at(), now));
        assert!(TimeRange::All.contains(readings[0].taken_at(), now));

        let view = VitalsQuery {
            range: TimeRange::All,
            ..Default::default()
        }
        .apply(&readings, now);
        assert_eq!(view.total_readings, 3);
        assert!(view.rows.iter().any(|r| r.taken_at == "2024-03-15 morning"));
    }

    #[test]
    fn toggle_sort() {
        let mut query = VitalsQuery {
            page: 3,
            ..Default::default()
        };
        assert_eq!((query.field, query.order), (SortField::DateTime, SortOrder::Desc));

        query.toggle_sort(SortField::DateTime);
        assert_eq!(query.order, SortOrder::Asc);
        assert_eq!(query.page, 1);

        query.page = 2;
        query.toggle_sort(SortField::HeartRate);
        assert_eq!((query.field, query.order), (SortField::HeartRate, SortOrder::Desc));
        assert_eq!(query.page, 1);
    }

    #[test]
    fn sorts_by_each_field() {
        let readings = sample();
        let now = at("2024-03-16", "09:00");
        let mut query = VitalsQuery {
            range: TimeRange::All,
            ..Default::default()
        };

        let dates: Vec<&str> = query.sorted(&readings, now).into_iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2024-03-15", "2024-02-15", "2024-01-15"]);

        query.toggle_sort(SortField::BloodPressure);
        query.toggle_sort(SortField::BloodPressure);
        let systolic: Vec<u32> = query
            .sorted(&readings, now)
            .iter()
            .map(|r| r.blood_pressure.systolic)
            .collect();
        assert_eq!(systolic, [128, 130, 132]);

        query.toggle_sort(SortField::Temperature);
        let temps: Vec<f64> = query.sorted(&readings, now).iter().map(|r| r.temperature).collect();
        assert_eq!(temps, [36.9, 36.8, 36.7]);
    }

    #[test]
    fn sort_is_stable() {
        let mut readings = daily(4);
        for r in &mut readings {
            r.weight = 70.0;
        }
        let now = at("2024-03-20", "12:00");
        let query = VitalsQuery {
            range: TimeRange::All,
            field: SortField::Weight,
            order: SortOrder::Desc,
            page: 1,
        };

        let rates: Vec<u32> = query.sorted(&readings, now).iter().map(|r| r.heart_rate).collect();
        assert_eq!(rates, [60, 61, 62, 63]);
    }

    #[test]
    fn pagination() {
        let readings = daily(12);
        let now = at("2024-03-20", "12:00");
        let mut query = VitalsQuery {
            range: TimeRange::Month,
            ..Default::default()
        };

        let view = query.apply(&readings, now);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.rows[0].heart_rate.value, 71);

        query.next_page(view.total_pages);
        query.next_page(view.total_pages);
        query.next_page(view.total_pages);
        assert_eq!(query.page, 3);
        let view = query.apply(&readings, now);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[1].heart_rate.value, 60);

        query.prev_page();
        query.prev_page();
        query.prev_page();
        assert_eq!(query.page, 1);
    }

    #[test]
    fn next_page_saturates() {
        let mut query = VitalsQuery {
            page: usize::MAX,
            ..Default::default()
        };
        query.next_page(usize::MAX);
        assert_eq!(query.page, usize::MAX);

        query.next_page(3);
        assert_eq!(query.page, 3);
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let readings = daily(7);
        let now = at("2024-03-20", "12:00");
        let view = VitalsQuery {
            range: TimeRange::All,
            page: 40,
            ..Default::default()
        }
        .apply(&readings, now);

        assert_eq!(view.query.page, 2);
        assert_eq!(view.rows.len(), 2);

        let empty = VitalsQuery::default().apply(&[], now);
        assert_eq!(empty.total_pages, 0);
        assert_eq!(empty.query.page, 1);
        assert!(empty.rows.is_empty());
    }

    #[test]
    fn abnormal_flags() {
        let mut reading = sample()[0].clone();
        reading.blood_pressure.systolic = 141;
        reading.blood_pressure.diastolic = 59;
        reading.heart_rate = 100;
        reading.temperature = 37.9;
        reading.blood_sugar.value = 69;

        let row = VitalRow::from_reading(&reading);
        assert!(row.systolic.abnormal);
        assert!(row.diastolic.abnormal);
        assert!(!row.heart_rate.abnormal);
        assert!(row.temperature.abnormal);
        assert!(row.blood_sugar.abnormal);

        let normal = VitalRow::from_reading(&sample()[0]);
        assert!(!normal.systolic.abnormal);
        assert!(!normal.diastolic.abnormal);
        assert!(!normal.temperature.abnormal);
        assert!(!normal.blood_sugar.abnormal);
    }

    #[test]
    fn labels_and_series() {
        let readings = sample();
        let now = at("2024-03-16", "09:00");
        let view = VitalsQuery {
            range: TimeRange::Month,
            ..Default::default()
        }
        .apply(&readings, now);

        assert_eq!(view.rows[0].taken_at, "Mar 15, 9:30 AM");
        assert_eq!(view.rows[0].weight, "68.0");

        let heart = view
            .series
            .iter()
            .find(|s| s.metric == Metric::HeartRate)
            .unwrap();
        // Series keep input order, not table order
        assert_eq!(heart.points[0].label, "Mar 15, 9 AM");
        assert_eq!(heart.points[1].label, "Feb 15, 10 AM");
        assert_eq!(heart.last(), Some(75.0));
        assert_eq!(heart.min(), Some(72.0));
        assert_eq!(heart.max(), Some(75.0));
    }

    #[test]
    fn parse_options() {
        assert_eq!("24h".parse::<TimeRange>().unwrap(), TimeRange::Day);
        assert_eq!("ALL".parse::<TimeRange>().unwrap(), TimeRange::All);
        assert_eq!("bp".parse::<SortField>().unwrap(), SortField::BloodPressure);
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert!("90d".parse::<TimeRange>().is_err());
    }
}
