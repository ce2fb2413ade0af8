//! Test data builders for creating export text

use cookvis_rs::timeline::COLUMN_HEADERS;

use super::PREAMBLE;

/// One data line of an export
#[derive(Debug, Clone)]
pub struct LineBuilder {
    sequence_number: i64,
    timestamp: f64,
    core: f32,
    state: String,
    note: String,
}

impl LineBuilder {
    pub fn new(sequence_number: i64) -> Self {
        Self {
            sequence_number,
            timestamp: sequence_number as f64 * 5.0,
            core: 20.0,
            state: "Cooking".to_string(),
            note: String::new(),
        }
    }

    pub fn timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn core(mut self, core: f32) -> Self {
        self.core = core;
        self
    }

    pub fn state(mut self, state: &str) -> Self {
        self.state = state.to_string();
        self
    }

    pub fn note(mut self, note: &str) -> Self {
        self.note = note.to_string();
        self
    }

    /// Cells for the 23 device columns
    fn device_cells(&self) -> String {
        format!(
            "{:?},8C3E,{},19.5,20.0,21.0,22.0,23.0,24.0,25.0,26.0,{:?},30.5,110.0,{:?},63.0,T1,T4,T8,{},Time to Removal,Removal,1800",
            self.timestamp, self.sequence_number, self.core, self.core, self.state
        )
    }
}

/// Builder for export text
#[derive(Debug, Clone)]
pub struct ExportBuilder {
    preamble: String,
    with_notes_column: bool,
    line_ending: &'static str,
    lines: Vec<String>,
}

impl Default for ExportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportBuilder {
    pub fn new() -> Self {
        Self {
            preamble: PREAMBLE.to_string(),
            with_notes_column: false,
            line_ending: "\n",
            lines: Vec::new(),
        }
    }

    pub fn preamble(mut self, preamble: &str) -> Self {
        self.preamble = preamble.to_string();
        self
    }

    /// Include a `Notes` header as written by an earlier save
    pub fn with_notes_column(mut self) -> Self {
        self.with_notes_column = true;
        self
    }

    pub fn crlf(mut self) -> Self {
        self.line_ending = "\r\n";
        self
    }

    pub fn line(mut self, line: LineBuilder) -> Self {
        let mut text = line.device_cells();
        if self.with_notes_column {
            text.push(',');
            text.push_str(&line.note);
        }
        self.lines.push(text);
        self
    }

    /// Add `count` consecutive rows starting at sequence number `start`
    pub fn rows(mut self, start: i64, count: i64) -> Self {
        for seq in start..start + count {
            self = self.line(LineBuilder::new(seq));
        }
        self
    }

    /// Add a raw, possibly corrupt, data line
    pub fn raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn build(self) -> String {
        let headers = if self.with_notes_column {
            COLUMN_HEADERS.join(",")
        } else {
            COLUMN_HEADERS[..COLUMN_HEADERS.len() - 1].join(",")
        };

        let mut parts = vec![self.preamble, String::new(), headers];
        parts.extend(self.lines);
        parts.join("\n").replace('\n', self.line_ending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_builder() {
        let text = ExportBuilder::new().rows(0, 2).build();
        let lines: Vec<_> = text.split('\n').collect();

        assert_eq!(lines.len(), 3 + 2 + 2);
        assert!(lines[5].starts_with("0.0,8C3E,0,"));
    }
}
