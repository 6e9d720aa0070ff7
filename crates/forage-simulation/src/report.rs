//! Tabular predator reports.
//!
//! Rows follow [`PredatorRecord::COLUMNS`]; downstream readers depend on
//! both the names and the order.

use crate::predator::PredatorRecord;

/// Render records as CSV with a `startInterval,stopInterval,x,y` header.
pub fn records_to_csv(records: &[PredatorRecord]) -> String {
    let mut out = PredatorRecord::COLUMNS.join(",");
    out.push('\n');
    for r in records {
        out.push_str(&format!(
            "{},{},{},{}\n",
            r.start_interval, r.stop_interval, r.x, r.y
        ));
    }
    out
}

/// Render records as a pretty-printed JSON array.
pub fn records_to_json(records: &[PredatorRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

#[cfg(test)]
mod tests {
    use forage_core::Point;

    use super::*;
    use crate::predator::Predator;

    fn sample() -> Vec<PredatorRecord> {
        vec![
            Predator::new(3, 13, Point::new(2.3, 13.6)).unwrap().record(),
            Predator::new(5, 15, Point::new(4.3, -4.2)).unwrap().record(),
        ]
    }

    #[test]
    fn csv_header_and_rows() {
        let csv = records_to_csv(&sample());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "startInterval,stopInterval,x,y");
        assert_eq!(lines[1], "3,13,2.3,13.6");
        assert_eq!(lines[2], "5,15,4.3,-4.2");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn csv_of_nothing_is_just_the_header() {
        assert_eq!(records_to_csv(&[]), "startInterval,stopInterval,x,y\n");
    }

    #[test]
    fn json_preserves_column_order() {
        let json = records_to_json(&sample()).unwrap();
        let start = json.find("startInterval").unwrap();
        let stop = json.find("stopInterval").unwrap();
        let x = json.find("\"x\"").unwrap();
        let y = json.find("\"y\"").unwrap();
        assert!(start < stop && stop < x && x < y);
        let back: Vec<PredatorRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
