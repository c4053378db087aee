//! JSON format exporter.

use crate::differ::ApiDiffReport;
use crate::exporter::ExportConfig;

/// Export a report to JSON format.
pub fn export(report: &ApiDiffReport, config: &ExportConfig) -> Result<String, serde_json::Error> {
    if config.pretty_print {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::{Change, UnitReport};
    use crate::element::DeclarationKind;
    use std::collections::BTreeMap;

    fn report() -> ApiDiffReport {
        let mut units = BTreeMap::new();
        units.insert(
            "MyLib".to_string(),
            UnitReport::new(vec![Change::addition(
                "public struct C".to_string(),
                Some("MyLib".to_string()),
                DeclarationKind::Struct,
            )]),
        );
        ApiDiffReport::new(units)
    }

    #[test]
    fn test_export_json() {
        let output = export(&report(), &ExportConfig::default()).unwrap();
        assert!(output.contains("\"type\":\"addition\""));
        assert!(output.contains("\"description\":\"public struct C\""));
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_export_json_pretty() {
        let config = ExportConfig::new(true, "API Changes");
        let output = export(&report(), &config).unwrap();
        assert!(output.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["units"]["MyLib"]["summary"]["additions"], 1);
    }
}
