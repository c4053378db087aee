//! JSON output formatting for machine-readable output.

use serde::Serialize;

/// JSON output formatter
pub struct JsonOutput;

impl JsonOutput {
    /// Format data as a JSON string, pretty-printed or on a single line.
    pub fn format<T: Serialize + ?Sized>(data: &T, pretty: bool) -> String {
        if pretty {
            serde_json::to_string_pretty(data)
                .unwrap_or_else(|e| format!("{{\n  \"error\": \"{}\"\n}}", e))
        } else {
            serde_json::to_string(data).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        count: u32,
    }

    #[test]
    fn test_json_format_pretty() {
        let data = TestData {
            name: "MyLib".to_string(),
            count: 3,
        };
        let output = JsonOutput::format(&data, true);
        assert!(output.contains("\"name\": \"MyLib\""));
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_json_format_compact() {
        let data = TestData {
            name: "MyLib".to_string(),
            count: 3,
        };
        let output = JsonOutput::format(&data, false);
        assert_eq!(output, r#"{"name":"MyLib","count":3}"#);
    }
}
