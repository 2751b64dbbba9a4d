//! Operator and reception report CSV loading.
//!
//! Both files are headerless. Operator rows are
//! `call, lat, lon, power, antenna type, gain, height` with `-100` (or an
//! empty antenna type) for values the operator didn't supply. Report rows
//! are two call signs and a category; which call sign is the transmitter
//! depends on the map mode.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use projection::Projector;
use reception_common::{
    normalize_call_sign, CallSignMatch, GeoCoordinate, MapMode, Operator, OperatorCatalog,
    ReceptionError, ReceptionResult, ReportMatrix,
};
use tracing::{debug, info};

const OPERATOR_FIELDS: usize = 7;
const REPORT_FIELDS: usize = 3;

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader)
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map_or(0, |pos| pos.line())
}

fn invalid_record(source_name: &str, line: u64, message: impl Into<String>) -> ReceptionError {
    ReceptionError::InvalidRecord {
        source_name: source_name.to_string(),
        line,
        message: message.into(),
    }
}

fn csv_error(source_name: &str, err: csv::Error) -> ReceptionError {
    let line = err.position().map_or(0, |pos| pos.line());
    invalid_record(source_name, line, err.to_string())
}

fn parse_number(source_name: &str, line: u64, field: &str, value: &str) -> ReceptionResult<f64> {
    value.parse::<f64>().map_err(|_| {
        invalid_record(source_name, line, format!("can't parse {} '{}'", field, value))
    })
}

fn open(path: &Path, what: &str) -> ReceptionResult<File> {
    File::open(path).map_err(|e| ReceptionError::asset(path, format!("can't open {}: {}", what, e)))
}

/// Parse operator records and place each one on the map.
///
/// A row with the wrong number of fields, an unparseable number, or a
/// location the projector rejects is an error naming the line.
pub fn read_operators<R: Read>(
    reader: R,
    source_name: &str,
    projector: &Projector,
    matching: CallSignMatch,
) -> ReceptionResult<OperatorCatalog> {
    let mut catalog = OperatorCatalog::new(matching);
    let mut reader = csv_reader(reader);

    for result in reader.records() {
        let record = result.map_err(|e| csv_error(source_name, e))?;
        let line = record_line(&record);

        if record.len() < OPERATOR_FIELDS {
            return Err(invalid_record(
                source_name,
                line,
                format!("expected {} fields, found {}", OPERATOR_FIELDS, record.len()),
            ));
        }

        let call_sign = normalize_call_sign(&record[0]);
        if call_sign.is_empty() {
            return Err(invalid_record(source_name, line, "missing call sign"));
        }

        let location = GeoCoordinate::new(
            parse_number(source_name, line, "latitude", &record[1])?,
            parse_number(source_name, line, "longitude", &record[2])?,
        );
        let pixel = projector
            .project(location)
            .map_err(|e| invalid_record(source_name, line, format!("{}: {}", call_sign, e)))?;

        let operator = Operator {
            call_sign,
            location,
            pixel,
            power_watts: parse_number(source_name, line, "transmitter power", &record[3])?,
            antenna_type: record[4].to_string(),
            antenna_gain_dbi: parse_number(source_name, line, "antenna gain", &record[5])?,
            antenna_height_ft: parse_number(source_name, line, "antenna height", &record[6])?,
        };

        debug!(
            call_sign = %operator.call_sign,
            x = operator.pixel.x,
            y = operator.pixel.y,
            "Placed operator"
        );
        catalog.insert(operator);
    }

    Ok(catalog)
}

/// Load the operator file.
pub fn load_operators(
    path: &Path,
    projector: &Projector,
    matching: CallSignMatch,
) -> ReceptionResult<OperatorCatalog> {
    let file = open(path, "operator file")?;
    let catalog = read_operators(file, &path.display().to_string(), projector, matching)?;

    info!(path = %path.display(), count = catalog.len(), "Loaded operators");
    Ok(catalog)
}

/// Parse reception reports, assigning columns by map mode.
pub fn read_reports<R: Read>(reader: R, source_name: &str, mode: MapMode) -> ReceptionResult<ReportMatrix> {
    let mut reports = ReportMatrix::new();
    let mut reader = csv_reader(reader);

    for result in reader.records() {
        let record = result.map_err(|e| csv_error(source_name, e))?;
        let line = record_line(&record);

        if record.len() < REPORT_FIELDS {
            return Err(invalid_record(
                source_name,
                line,
                format!("expected {} fields, found {}", REPORT_FIELDS, record.len()),
            ));
        }

        let first = normalize_call_sign(&record[0]);
        let second = normalize_call_sign(&record[1]);
        if first.is_empty() || second.is_empty() {
            return Err(invalid_record(source_name, line, "missing call sign"));
        }

        let (transmitter, receiver) = mode.orient(&first, &second);
        reports.insert(transmitter, receiver, &record[2]);
    }

    Ok(reports)
}

/// Load the report file.
pub fn load_reports(path: &Path, mode: MapMode) -> ReceptionResult<ReportMatrix> {
    let file = open(path, "report file")?;
    let reports = read_reports(file, &path.display().to_string(), mode)?;

    info!(
        path = %path.display(),
        reports = reports.len(),
        transmitters = reports.transmitters().count(),
        ?mode,
        "Loaded reports"
    );
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reception_common::{PixelPoint, UNKNOWN_VALUE};
    use test_utils::{bounds, csv as fixtures, projected_bounds};

    fn projector() -> Projector {
        Projector::new(&projected_bounds(bounds::PUGET_SOUND), 1000, 800).unwrap()
    }

    #[test]
    fn test_read_operator_fixture() {
        let projector = projector();
        let catalog = read_operators(
            fixtures::OPERATORS.as_bytes(),
            "operators.csv",
            &projector,
            CallSignMatch::Exact,
        )
        .unwrap();

        assert_eq!(catalog.len(), 4);

        let alfa = catalog.get("ALFA").unwrap();
        assert_eq!(alfa.power_watts, 50.0);
        assert_eq!(alfa.antenna_type, "Vertical");
        assert_eq!(alfa.antenna_gain_dbi, 2.5);
        assert_eq!(alfa.antenna_height_ft, 30.0);
        assert_eq!(alfa.pixel, projector.project(alfa.location).unwrap());

        // Trimmed and uppercased
        let charlie = catalog.get("CHARLIE").unwrap();
        assert_eq!(charlie.power_watts, UNKNOWN_VALUE);
        assert_eq!(charlie.known_antenna_type(), None);
    }

    #[test]
    fn test_operator_bad_number_names_line() {
        let data = "ALFA,47.6,-122.3,50,Vertical,2.5,30\nBRAVO,47.7,north,5,,-100,-100\n";
        let err = read_operators(data.as_bytes(), "ops.csv", &projector(), CallSignMatch::Exact)
            .unwrap_err();

        match err {
            ReceptionError::InvalidRecord { source_name, line, message } => {
                assert_eq!(source_name, "ops.csv");
                assert_eq!(line, 2);
                assert!(message.contains("longitude"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_operator_short_row_is_error() {
        let data = "ALFA,47.6,-122.3\n";
        let err = read_operators(data.as_bytes(), "ops.csv", &projector(), CallSignMatch::Exact)
            .unwrap_err();
        assert_eq!(err.kind(), "data");
    }

    #[test]
    fn test_operator_outside_utm_domain_is_error() {
        let data = "POLAR,85.0,-122.3,50,Vertical,2.5,30\n";
        assert!(
            read_operators(data.as_bytes(), "ops.csv", &projector(), CallSignMatch::Exact).is_err()
        );
    }

    #[test]
    fn test_operator_off_map_still_placed() {
        let data = "FAR,48.0,-122.3,50,Vertical,2.5,30\n";
        let catalog =
            read_operators(data.as_bytes(), "ops.csv", &projector(), CallSignMatch::Exact).unwrap();
        assert!(catalog.get("FAR").unwrap().pixel.y < 0);
    }

    #[test]
    fn test_read_reports_transmit_mode() {
        let reports = read_reports(fixtures::REPORTS.as_bytes(), "reports.csv", MapMode::Transmit)
            .unwrap();

        // Column 0 heard column 1
        assert_eq!(reports.category("ALFA", "BRAVO"), Some("good"));
        assert_eq!(reports.category("ALFA", "CHARLIE"), Some("fair"));
        assert_eq!(reports.category("BRAVO", "ALFA"), Some("poor"));
        assert_eq!(reports.category("BRAVO", "DELTA"), Some("good"));
        assert_eq!(reports.transmitters().collect::<Vec<_>>(), vec!["ALFA", "BRAVO"]);
    }

    #[test]
    fn test_read_reports_receive_mode_swaps_columns() {
        let reports = read_reports(fixtures::REPORTS.as_bytes(), "reports.csv", MapMode::Receive)
            .unwrap();

        assert_eq!(reports.category("BRAVO", "ALFA"), Some("good"));
        assert_eq!(reports.category("DELTA", "BRAVO"), Some("good"));
        assert_eq!(
            reports.transmitters().collect::<Vec<_>>(),
            vec!["ALFA", "BRAVO", "CHARLIE", "DELTA"]
        );
    }

    #[test]
    fn test_report_fields_are_normalized() {
        let data = " k7abc-1 , w1aw ,  good \n";
        let reports = read_reports(data.as_bytes(), "r.csv", MapMode::Transmit).unwrap();
        assert_eq!(reports.category("W1AW", "K7ABC-1"), Some("good"));
    }

    #[test]
    fn test_report_missing_category_is_error() {
        let data = "ALFA,BRAVO,good\nALFA,BRAVO\n";
        let err = read_reports(data.as_bytes(), "r.csv", MapMode::Transmit).unwrap_err();
        assert!(matches!(err, ReceptionError::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn test_hyphenated_receiver_matches_base_operator() {
        let projector = projector();
        let operators = read_operators(
            fixtures::OPERATORS.as_bytes(),
            "operators.csv",
            &projector,
            CallSignMatch::BaseCall,
        )
        .unwrap();
        let reports = read_reports("BRAVO-P,ALFA,good\n".as_bytes(), "r.csv", MapMode::Transmit)
            .unwrap();

        let receiver = reports.receivers().next().unwrap();
        assert_eq!(receiver, "BRAVO-P");
        let bravo = operators.get(receiver).unwrap();
        assert_eq!(bravo.call_sign, "BRAVO");
        assert_ne!(bravo.pixel, PixelPoint::default());
    }
}
