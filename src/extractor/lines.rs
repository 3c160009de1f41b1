use regex::Regex;
use serde::{Deserialize, Serialize};

/// One `N/tcp` line from the port table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRecord {
    pub port: String,
    pub state: String,
    pub service: String,
    pub version: String,
}

/// Structured fields pulled out of free-form scan output.
///
/// Always fully formed: fields a run never mentions stay empty rather
/// than absent, so downstream consumers never see a partial record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanRecord {
    pub ports: Vec<PortRecord>,
    pub service_info: String,
    pub scan_summary: String,
}

const SERVICE_INFO_PREFIX: &str = "Service Info: ";

/// Pulls port, service-info, and summary lines out of raw scan text.
///
/// The input is untrusted and frequently truncated (a scan killed
/// mid-run), so every line that fits no pattern is skipped silently; no
/// input ever makes extraction fail.
pub struct LineExtractor {
    port_line: Regex,
    scan_summary: Regex,
}

impl LineExtractor {
    pub fn new() -> Self {
        Self {
            port_line: Regex::new(r"^(\d+/tcp)\s+(\S+)\s+(\S+)\s*(.*)$")
                .expect("port line pattern is valid"),
            scan_summary: Regex::new(r"Nmap done:.*scanned in [0-9.]+ seconds")
                .expect("scan summary pattern is valid"),
        }
    }

    /// Scan `raw` line by line and collect every match.
    ///
    /// Each line is tested against all three patterns independently; a
    /// single line may contribute to more than one field. `ports` keeps
    /// source-line order including duplicates, while the two scalar
    /// fields are last-match-wins.
    pub fn extract(&self, raw: &str) -> ScanRecord {
        let mut record = ScanRecord::default();

        for line in raw.lines() {
            if let Some(captures) = self.port_line.captures(line) {
                record.ports.push(PortRecord {
                    port: captures[1].to_string(),
                    state: captures[2].to_string(),
                    service: captures[3].to_string(),
                    version: captures[4].trim().to_string(),
                });
            }

            if let Some(rest) = line.strip_prefix(SERVICE_INFO_PREFIX) {
                record.service_info = rest.to_string();
            }

            if let Some(found) = self.scan_summary.find(line) {
                record.scan_summary = found.as_str().to_string();
            }
        }

        record
    }
}

impl Default for LineExtractor {
    fn default() -> Self {
        Self::new()
    }
}
