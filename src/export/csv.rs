//! Delimited-text (CSV) encoder

use super::{ExportRecord, RowEncoder};

/// Lets spreadsheet applications detect UTF-8
const BOM: &str = "\u{FEFF}";

/// Header row of bare column names, then every value double-quoted with
/// embedded quotes doubled. Rows are joined by `\n` with no trailing newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedTextEncoder;

impl RowEncoder for DelimitedTextEncoder {
    const EXTENSION: &'static str = "csv";
    const MIME_TYPE: &'static str = "text/csv";

    fn encode_body<R: ExportRecord>(&self, rows: &[R]) -> Vec<u8> {
        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(
            R::COLUMNS
                .iter()
                .map(|c| c.name)
                .collect::<Vec<_>>()
                .join(","),
        );

        for row in rows {
            lines.push(
                row.values()
                    .iter()
                    .map(|value| quote(value.as_deref().unwrap_or("")))
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }

        let mut out = String::from(BOM);
        out.push_str(&lines.join("\n"));
        out.into_bytes()
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
