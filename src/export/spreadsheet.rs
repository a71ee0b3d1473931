//! SpreadsheetML 2003 encoder (XML served as `.xls`)

use super::{ExportRecord, RowEncoder};

const HEADER_STYLE: &str = "header";
const RTL_STYLE: &str = "arabic";

/// One worksheet: a styled header row followed by one row per record.
/// The record's right-to-left column is right-aligned in a larger Arabic font.
#[derive(Debug, Clone)]
pub struct SpreadsheetEncoder {
    pub worksheet_name: String,
}

impl Default for SpreadsheetEncoder {
    fn default() -> Self {
        Self {
            worksheet_name: "Quran_Export".to_string(),
        }
    }
}

impl RowEncoder for SpreadsheetEncoder {
    const EXTENSION: &'static str = "xls";
    const MIME_TYPE: &'static str = "application/vnd.ms-excel";

    fn encode_body<R: ExportRecord>(&self, rows: &[R]) -> Vec<u8> {
        let mut xml = String::new();

        xml.push_str(
            r#"<?xml version="1.0" encoding="utf-8"?>
<?mso-application progid="Excel.Sheet"?>
<Workbook xmlns="urn:schemas-microsoft-com:office:spreadsheet"
 xmlns:o="urn:schemas-microsoft-com:office:office"
 xmlns:x="urn:schemas-microsoft-com:office:excel"
 xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet"
 xmlns:html="http://www.w3.org/TR/REC-html40">
"#,
        );
        xml.push_str(&format!(
            r##" <Styles>
  <Style ss:ID="Default" ss:Name="Normal">
   <Alignment ss:Vertical="Bottom"/>
   <Borders/>
   <Font ss:FontName="Calibri" x:Family="Swiss" ss:Size="11" ss:Color="#000000"/>
  </Style>
  <Style ss:ID="{rtl}">
   <Alignment ss:Horizontal="Right" ss:Vertical="Center" ss:ReadingOrder="RightToLeft"/>
   <Font ss:FontName="Amiri" ss:Size="14"/>
  </Style>
  <Style ss:ID="{header}">
   <Font ss:FontName="Calibri" ss:Bold="1" ss:Size="11"/>
   <Interior ss:Color="#EAEAEA" ss:Pattern="Solid"/>
  </Style>
 </Styles>
"##,
            rtl = RTL_STYLE,
            header = HEADER_STYLE,
        ));
        xml.push_str(&format!(
            " <Worksheet ss:Name=\"{}\">\n  <Table>\n",
            escape_xml(&self.worksheet_name)
        ));

        for column in R::COLUMNS {
            xml.push_str(&format!(
                "   <Column ss:AutoFitWidth=\"0\" ss:Width=\"{}\"/>\n",
                column.width
            ));
        }

        xml.push_str(&format!("   <Row ss:StyleID=\"{}\">", HEADER_STYLE));
        for column in R::COLUMNS {
            push_cell(&mut xml, column.name, None);
        }
        xml.push_str("</Row>\n");

        for row in rows {
            xml.push_str("   <Row>");
            for (column, value) in R::COLUMNS.iter().zip(row.values()) {
                let style = (R::RTL_COLUMN == Some(column.name)).then_some(RTL_STYLE);
                push_cell(&mut xml, value.as_deref().unwrap_or(""), style);
            }
            xml.push_str("</Row>\n");
        }

        xml.push_str("  </Table>\n </Worksheet>\n</Workbook>\n");
        xml.into_bytes()
    }
}

fn push_cell(xml: &mut String, value: &str, style: Option<&str>) {
    match style {
        Some(style) => xml.push_str(&format!("<Cell ss:StyleID=\"{}\">", style)),
        None => xml.push_str("<Cell>"),
    }
    xml.push_str("<Data ss:Type=\"String\">");
    xml.push_str(&escape_xml(value));
    xml.push_str("</Data></Cell>");
}

/// Escape XML special characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
