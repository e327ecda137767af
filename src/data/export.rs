use std::path::Path;

use thiserror::Error;

use super::model::ProductRecord;

/// Default file name offered when saving an export.
pub const DEFAULT_EXPORT_FILE: &str = "dashboard_export.csv";

/// Fixed column set of the export, in output order.
pub const EXPORT_HEADERS: [&str; 9] = [
    "Product Name",
    "PIN Code",
    "Platform",
    "Price",
    "MRP",
    "Discount %",
    "Position",
    "Rating",
    "Date",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing export to {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Render records as export CSV: a header line, then one line per record,
/// joined by `\n` without a trailing newline. The product name is always
/// quoted; all other cells are written as-is.
pub fn export_csv<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a ProductRecord>,
{
    let mut lines = vec![EXPORT_HEADERS.join(",")];

    for rec in records {
        let cells = [
            quote(&rec.product_name),
            rec.pin_code.clone(),
            rec.source.clone(),
            format_number(rec.price),
            format_number(rec.mrp),
            rec.discount_percent.clone(),
            format_number(rec.position),
            rec.rating.clone(),
            rec.date.clone(),
        ];
        lines.push(cells.join(","));
    }

    lines.join("\n")
}

/// Save export text to `path`, replacing any existing file.
pub fn write_export(path: &Path, contents: &str) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    log::info!("Exported {} bytes to {}", contents.len(), path.display());
    Ok(())
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Shortest decimal form of `v`: integral values print without a fractional
/// part (`27`, not `27.0`) and `-0` prints as `0`. Very large or very small
/// magnitudes are written out in full, never in exponent notation.
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    format!("{v}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(name: &str, price: f64) -> ProductRecord {
        ProductRecord {
            product_name: name.to_string(),
            pin_code: "560001".into(),
            source: "zepto".into(),
            price,
            mrp: 30.0,
            discount_percent: "10".into(),
            position: 3.0,
            rating: "4.2".into(),
            date: "2024-06-01".into(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_export_is_header_only() {
        let out = export_csv(std::iter::empty());
        assert_eq!(
            out,
            "Product Name,PIN Code,Platform,Price,MRP,Discount %,Position,Rating,Date"
        );
    }

    #[test]
    fn rows_follow_the_fixed_column_order() {
        let records = vec![listing("Toned Milk", 27.0), listing("Gold Milk", 34.5)];
        let out = export_csv(&records);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "\"Toned Milk\",560001,zepto,27,30,10,3,4.2,2024-06-01");
        assert_eq!(lines[2], "\"Gold Milk\",560001,zepto,34.5,30,10,3,4.2,2024-06-01");
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn product_name_quotes_are_escaped() {
        let records = vec![listing("Paneer \"Fresh\", 200g", 90.0)];
        let out = export_csv(&records);

        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "Paneer \"Fresh\", 200g");
        assert_eq!(&row[3], "90");
    }

    #[test]
    fn numbers_use_plain_decimal_form() {
        assert_eq!(format_number(27.0), "27");
        assert_eq!(format_number(34.5), "34.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e21), "1000000000000000000000");
        assert_eq!(format_number(1e-7), "0.0000001");
    }

    #[test]
    fn write_export_saves_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE);

        write_export(&path, "a,b").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b");
    }

    #[test]
    fn write_export_reports_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        let err = write_export(&path, "x").unwrap_err();
        assert!(err.to_string().starts_with("writing export to"));
    }
}
