use crate::data::model::{DataError, TimeGroup, TimeKey, TimeSeries};

// ---------------------------------------------------------------------------
// Frame – what gets drawn for one time value
// ---------------------------------------------------------------------------

/// The plot contents for a single time group: both concentration series
/// against position, in the group's row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub time: TimeKey,
    pub position: Vec<f64>,
    pub u: Vec<f64>,
    pub v: Vec<f64>,
}

impl Frame {
    /// Collect the columns of the group recorded at `time`.
    pub fn build(series: &TimeSeries, time: TimeKey) -> Result<Self, DataError> {
        series.group(time).map(Frame::from_group)
    }

    pub fn from_group(group: &TimeGroup) -> Self {
        let n = group.rows.len();
        let mut frame = Frame {
            time: group.time,
            position: Vec::with_capacity(n),
            u: Vec::with_capacity(n),
            v: Vec::with_capacity(n),
        };
        for row in &group.rows {
            frame.position.push(row.position);
            frame.u.push(row.u);
            frame.v.push(row.v);
        }
        frame
    }

    pub fn title(&self) -> String {
        format!("Time = {}", self.time)
    }

    /// `(position, u)` pairs.
    pub fn u_points(&self) -> Vec<[f64; 2]> {
        pair(&self.position, &self.u)
    }

    /// `(position, v)` pairs.
    pub fn v_points(&self) -> Vec<[f64; 2]> {
        pair(&self.position, &self.v)
    }

    /// Smallest and largest position, or `None` for an empty frame.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let min = self.position.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.position.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (min <= max).then_some((min, max))
    }
}

fn pair(xs: &[f64], ys: &[f64]) -> Vec<[f64; 2]> {
    xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn sample() -> TimeSeries {
        let rows = [
            (0.0, 0.0, 1.0, 0.0),
            (0.0, 1.0, 0.0, 1.0),
            (1.0, 0.0, 2.0, 0.0),
            (1.0, 1.0, 0.0, 2.0),
        ]
        .into_iter()
        .map(|(time, position, u, v)| Row {
            time,
            position,
            u,
            v,
        });
        TimeSeries::from_rows(rows)
    }

    #[test]
    fn frames_match_group_rows() {
        let series = sample();

        let f0 = Frame::build(&series, TimeKey::new(0.0)).unwrap();
        assert_eq!(f0.position, vec![0.0, 1.0]);
        assert_eq!(f0.u, vec![1.0, 0.0]);
        assert_eq!(f0.v, vec![0.0, 1.0]);
        assert_eq!(f0.u_points(), vec![[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(f0.v_points(), vec![[0.0, 0.0], [1.0, 1.0]]);

        let f1 = Frame::build(&series, TimeKey::new(1.0)).unwrap();
        assert_eq!(f1.u, vec![2.0, 0.0]);
        assert_eq!(f1.v, vec![0.0, 2.0]);
        assert_eq!(f1.title(), "Time = 1");
    }

    #[test]
    fn solver_sized_times_keep_their_printed_form() {
        let series = TimeSeries::from_rows([Row {
            time: 1e-5,
            position: 0.0,
            u: 0.0,
            v: 0.0,
        }]);
        let f = Frame::build(&series, TimeKey::new(1e-5)).unwrap();
        assert_eq!(f.title(), "Time = 1e-05");
    }

    #[test]
    fn unknown_time_is_rejected() {
        let series = sample();
        assert_eq!(
            Frame::build(&series, TimeKey::new(9.0)),
            Err(DataError::MissingTime(TimeKey::new(9.0)))
        );
    }

    #[test]
    fn x_range_spans_positions() {
        let series = sample();
        let f = Frame::build(&series, TimeKey::new(0.0)).unwrap();
        assert_eq!(f.x_range(), Some((0.0, 1.0)));
    }

    #[test]
    fn rebuilding_is_deterministic() {
        let series = sample();
        let first: Vec<Frame> = series
            .times()
            .map(|t| Frame::build(&series, t).unwrap())
            .collect();
        let second: Vec<Frame> = series
            .times()
            .map(|t| Frame::build(&series, t).unwrap())
            .collect();
        assert_eq!(first, second);
    }
}
