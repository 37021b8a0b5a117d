use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CspViolationReport {
    #[serde(rename = "document-uri", default)]
    pub document_uri: String,

    #[serde(rename = "referrer", default)]
    pub referrer: String,

    #[serde(rename = "blocked-uri", default)]
    pub blocked_uri: String,

    #[serde(rename = "violated-directive", default)]
    pub violated_directive: String,

    #[serde(rename = "effective-directive", default)]
    pub effective_directive: String,

    #[serde(rename = "original-policy", default)]
    pub original_policy: String,

    #[serde(rename = "disposition", default)]
    pub disposition: String,

    #[serde(rename = "source-file", skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,

    #[serde(rename = "line-number", skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,

    #[serde(rename = "column-number", skip_serializing_if = "Option::is_none")]
    pub column_number: Option<u32>,

    #[serde(rename = "status-code", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    #[serde(rename = "script-sample", skip_serializing_if = "Option::is_none")]
    pub script_sample: Option<String>,
}

impl CspViolationReport {
    #[inline]
    pub fn is_enforce(&self) -> bool {
        self.disposition == "enforce"
    }

    #[inline]
    pub fn is_report(&self) -> bool {
        self.disposition == "report"
    }

    pub fn from_body(bytes: &[u8]) -> Result<Option<Self>, serde_json::Error> {
        let json: serde_json::Value = serde_json::from_slice(bytes)?;

        match json.get("csp-report") {
            Some(report) => serde_json::from_value(report.clone()).map(Some),
            None => Ok(None),
        }
    }
}
