use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Row – one line of the simulation output
// ---------------------------------------------------------------------------

/// A single CSV record. The input has no header, so fields are bound by
/// position: `time, position, u, v`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Row {
    pub time: f64,
    pub position: f64,
    pub u: f64,
    pub v: f64,
}

// ---------------------------------------------------------------------------
// TimeKey – a time value usable as a map key
// ---------------------------------------------------------------------------

/// A `time` value with a total order so it can key a `BTreeMap`.
/// `-0.0` and `0.0` are the same key.
#[derive(Debug, Clone, Copy)]
pub struct TimeKey(f64);

impl TimeKey {
    pub fn new(t: f64) -> Self {
        // Fold negative zero into positive zero.
        TimeKey(if t == 0.0 { 0.0 } else { t })
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

// -- Manual Eq/Ord so we can put TimeKey in a BTreeMap --

impl PartialEq for TimeKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for TimeKey {}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::hash::Hash for TimeKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_g(self.0))
    }
}

/// Format like C's `%g`: six significant digits, trailing zeros dropped,
/// exponent notation below `1e-4` or from `1e6` up.
pub fn format_g(x: f64) -> String {
    const PRECISION: i32 = 6;

    if x == 0.0 || !x.is_finite() {
        return if x == 0.0 { "0".to_string() } else { x.to_string() };
    }

    // Round to the target precision first; rounding can bump the exponent.
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, x);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    } else {
        let decimals = (PRECISION - 1 - exp) as usize;
        trim_fraction(&format!("{x:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

// ---------------------------------------------------------------------------
// TimeGroup – all rows sharing one time value
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TimeGroup {
    pub time: TimeKey,
    /// Rows in their original file order.
    pub rows: Vec<Row>,
}

// ---------------------------------------------------------------------------
// TimeSeries – the complete loaded table, grouped by time
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("no rows recorded for time {0}")]
    MissingTime(TimeKey),
}

/// The parsed table partitioned by `time`.
///
/// Groups are stored in the order their time value first appears in the
/// file; `index` maps each key to its slot in `groups`.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    groups: Vec<TimeGroup>,
    index: BTreeMap<TimeKey, usize>,
}

impl TimeSeries {
    /// Group rows by their `time` column.
    pub fn from_rows(rows: impl IntoIterator<Item = Row>) -> Self {
        let mut groups: Vec<TimeGroup> = Vec::new();
        let mut index: BTreeMap<TimeKey, usize> = BTreeMap::new();

        for row in rows {
            let key = TimeKey::new(row.time);
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push(TimeGroup {
                    time: key,
                    rows: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].rows.push(row);
        }

        TimeSeries { groups, index }
    }

    /// Look up the rows for one time value.
    pub fn group(&self, time: TimeKey) -> Result<&TimeGroup, DataError> {
        self.index
            .get(&time)
            .map(|&slot| &self.groups[slot])
            .ok_or(DataError::MissingTime(time))
    }

    /// Distinct time values in first-occurrence order.
    pub fn times(&self) -> impl Iterator<Item = TimeKey> + '_ {
        self.groups.iter().map(|g| g.time)
    }

    pub fn groups(&self) -> &[TimeGroup] {
        &self.groups
    }

    /// Number of distinct time values (frames).
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of rows across all groups.
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(time: f64, position: f64, u: f64, v: f64) -> Row {
        Row {
            time,
            position,
            u,
            v,
        }
    }

    #[test]
    fn groups_follow_first_occurrence_order() {
        let rows = vec![
            row(2.0, 0.0, 0.0, 0.0),
            row(1.0, 0.0, 0.0, 0.0),
            row(2.0, 1.0, 0.0, 0.0),
            row(0.5, 0.0, 0.0, 0.0),
            row(1.0, 1.0, 0.0, 0.0),
        ];
        let series = TimeSeries::from_rows(rows);

        let times: Vec<f64> = series.times().map(TimeKey::value).collect();
        assert_eq!(times, vec![2.0, 1.0, 0.5]);
    }

    #[test]
    fn every_row_lands_in_exactly_one_group() {
        let rows = vec![
            row(0.0, 0.0, 1.0, 0.0),
            row(1.0, 0.0, 2.0, 0.0),
            row(0.0, 1.0, 0.0, 1.0),
            row(1.0, 1.0, 0.0, 2.0),
            row(3.0, 0.0, 7.0, 7.0),
        ];
        let series = TimeSeries::from_rows(rows.clone());

        assert_eq!(series.len(), 3);
        assert_eq!(series.row_count(), rows.len());

        let mut regrouped: Vec<Row> = series
            .groups()
            .iter()
            .flat_map(|g| g.rows.iter().copied())
            .collect();
        let mut original = rows;
        let by_fields = |a: &Row, b: &Row| {
            (a.time, a.position, a.u, a.v)
                .partial_cmp(&(b.time, b.position, b.u, b.v))
                .unwrap()
        };
        regrouped.sort_by(by_fields);
        original.sort_by(by_fields);
        assert_eq!(regrouped, original);

        for g in series.groups() {
            assert!(g.rows.iter().all(|r| TimeKey::new(r.time) == g.time));
        }
    }

    #[test]
    fn group_keeps_row_order() {
        let series = TimeSeries::from_rows(vec![
            row(0.0, 3.0, 0.3, 0.0),
            row(0.0, 1.0, 0.1, 0.0),
            row(0.0, 2.0, 0.2, 0.0),
        ]);
        let g = series.group(TimeKey::new(0.0)).unwrap();
        let positions: Vec<f64> = g.rows.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn negative_zero_shares_a_group_with_zero() {
        let series = TimeSeries::from_rows(vec![
            row(0.0, 0.0, 0.0, 0.0),
            row(-0.0, 1.0, 0.0, 0.0),
        ]);
        assert_eq!(series.len(), 1);
        assert_eq!(series.row_count(), 2);
    }

    #[test]
    fn missing_time_is_an_error() {
        let series = TimeSeries::from_rows(vec![row(0.0, 0.0, 0.0, 0.0)]);
        let err = series.group(TimeKey::new(5.0)).unwrap_err();
        assert_eq!(err, DataError::MissingTime(TimeKey::new(5.0)));
        assert_eq!(err.to_string(), "no rows recorded for time 5");
    }

    #[test]
    fn time_key_display_drops_trailing_zero() {
        assert_eq!(TimeKey::new(1.0).to_string(), "1");
        assert_eq!(TimeKey::new(0.25).to_string(), "0.25");
        assert_eq!(TimeKey::new(0.0).to_string(), "0");
    }

    #[test]
    fn format_g_matches_printf() {
        assert_eq!(format_g(1e-5), "1e-05");
        assert_eq!(format_g(0.000125), "0.000125");
        assert_eq!(format_g(-0.5), "-0.5");
        assert_eq!(format_g(100000.0), "100000");
        assert_eq!(format_g(1234567.0), "1.23457e+06");
        assert_eq!(format_g(0.0204082), "0.0204082");
        assert_eq!(format_g(999999.7), "1e+06");
        assert_eq!(format_g(f64::NAN), "NaN");
    }
}
