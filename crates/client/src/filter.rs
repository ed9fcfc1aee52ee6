//! Dashboard filter state and the stdin commands that change it.
//!
//! ```text
//! area 명동 관광특구,홍대 관광특구   show only these areas
//! area                               show every area
//! hours 6                            window length, 1..=168
//! refresh                            refetch now
//! quit                               exit
//! ```

use popdash_core::error::CoreError;
use popdash_core::window::TimeWindow;

/// Filters applied to every panel's request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardFilter {
    pub window: TimeWindow,
    pub areas: Vec<String>,
}

impl DashboardFilter {
    pub fn new(window: TimeWindow, area: Option<&str>) -> Self {
        Self {
            window,
            areas: area.map(split_areas).unwrap_or_default(),
        }
    }

    /// Query-string pairs understood by the windowed API routes.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("hours", self.window.hours().to_string())];
        if !self.areas.is_empty() {
            pairs.push(("area", self.areas.join(",")));
        }
        pairs
    }

    /// Whether rows for `area` pass the area filter. No areas means all.
    pub fn includes_area(&self, area: &str) -> bool {
        self.areas.is_empty() || self.areas.iter().any(|a| a == area)
    }

    /// Apply `command`. Returns `true` if the filter changed.
    pub fn apply(&mut self, command: &FilterCommand) -> bool {
        match command {
            FilterCommand::SetAreas(areas) => {
                let changed = self.areas != *areas;
                self.areas = areas.clone();
                changed
            }
            FilterCommand::SetWindow(window) => {
                let changed = self.window != *window;
                self.window = *window;
                changed
            }
            FilterCommand::Refresh | FilterCommand::Quit => false,
        }
    }
}

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCommand {
    SetAreas(Vec<String>),
    SetWindow(TimeWindow),
    Refresh,
    Quit,
}

impl FilterCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CoreError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match verb {
            "area" | "areas" => Self::SetAreas(split_areas(rest)),
            "hours" => {
                let hours: u32 = rest
                    .parse()
                    .map_err(|_| CoreError::Validation(format!("invalid hours: '{rest}'")))?;
                Self::SetWindow(TimeWindow::new(hours)?)
            }
            "refresh" => Self::Refresh,
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(CoreError::Validation(format!("unknown command: '{other}'")));
            }
        };
        Ok(Some(command))
    }
}

fn split_areas(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from)
        .collect()
}
