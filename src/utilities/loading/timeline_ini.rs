//! Timeline configuration files.
//!
//! A timeline is an INI file with one section per phase:
//!
//! ```ini
//! [DEFAULT]
//! tzinfo = CET
//!
//! [PP dark]
//! start = 2016-07-20 19:00
//! end = 2016-07-21 07:00
//! ```
//!
//! Keys of the `DEFAULT` section apply to every phase that does not set them.
//! Times are local to `tzinfo` (an IANA zone name, UTC if absent) and may
//! carry seconds. Lines starting with `#` or `;` are comments.

use crate::api::errors::{AnalysisError, Result};
use crate::api::traits::timeline_source::TimelineSource;
use crate::structs::phase::Phase;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const DEFAULT_SECTION: &str = "DEFAULT";
const TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"];

/// Phases read from a timeline INI file.
#[derive(Debug, Clone)]
pub struct IniTimeline {
    phases: Vec<Phase>,
    index: HashMap<String, usize>,
    zone: Tz,
}

/// One `[section]` and its keys, with the line numbers they were found on.
struct Section {
    name: String,
    line: usize,
    entries: HashMap<String, (String, usize)>,
}

impl IniTimeline {
    pub fn load(path: &Path) -> Result<Self> {
        let timeline = Self::parse(&fs::read_to_string(path)?)?;
        info!(
            "loaded {} phases from {}",
            timeline.phases.len(),
            path.display()
        );
        Ok(timeline)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let sections = read_sections(text)?;

        let defaults = sections
            .iter()
            .find(|section| section.name == DEFAULT_SECTION)
            .map(|section| section.entries.clone())
            .unwrap_or_default();

        let mut phases = Vec::new();
        let mut index = HashMap::new();
        let mut zone = None;

        for section in sections.iter().filter(|s| s.name != DEFAULT_SECTION) {
            let lookup = |key: &str| section.entries.get(key).or_else(|| defaults.get(key));

            let phase_zone = match lookup("tzinfo") {
                Some((name, line)) => name.parse::<Tz>().map_err(|e| AnalysisError::TimelineSyntax {
                    line: *line,
                    message: format!("Unknown time zone '{}': {}", name, e),
                })?,
                None => Tz::UTC,
            };
            zone.get_or_insert(phase_zone);

            let bound = |key: &str| match lookup(key) {
                Some((value, line)) => parse_local_time(value, phase_zone, *line),
                None => Err(AnalysisError::TimelineSyntax {
                    line: section.line,
                    message: format!("Phase '{}' has no '{}' key", section.name, key),
                }),
            };

            let start = bound("start")?;
            let end = bound("end")?;
            if end <= start {
                return Err(AnalysisError::TimelineSyntax {
                    line: section.line,
                    message: format!("Phase '{}' ends before it starts", section.name),
                });
            }

            index.insert(section.name.clone(), phases.len());
            phases.push(Phase::new(section.name.clone(), start, end));
        }

        let zone = match (zone, defaults.get("tzinfo")) {
            (Some(zone), _) => zone,
            (None, Some((name, line))) => {
                name.parse::<Tz>().map_err(|e| AnalysisError::TimelineSyntax {
                    line: *line,
                    message: format!("Unknown time zone '{}': {}", name, e),
                })?
            }
            (None, None) => Tz::UTC,
        };

        Ok(Self {
            phases,
            index,
            zone,
        })
    }

    /// All phases in file order.
    pub fn all_phases(&self) -> &[Phase] {
        &self.phases
    }
}

impl TimelineSource for IniTimeline {
    fn time_bounds(&self, phase: &str) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let phase = self
            .index
            .get(phase)
            .map(|&index| &self.phases[index])
            .ok_or_else(|| AnalysisError::DataAccess(format!("Unknown phase '{}'", phase)))?;

        Ok((phase.start, phase.end))
    }

    fn phase_label(&self, at: DateTime<Utc>) -> Option<&str> {
        self.phases
            .iter()
            .find(|phase| phase.contains(at))
            .map(|phase| phase.name.as_str())
    }

    fn time_zone(&self) -> Tz {
        self.zone
    }
}

fn read_sections(text: &str) -> Result<Vec<Section>> {
    let mut sections: Vec<Section> = Vec::new();

    for (line_index, raw_line) in text.lines().enumerate() {
        let line_number = line_index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| AnalysisError::TimelineSyntax {
                    line: line_number,
                    message: format!("Malformed section header '{}'", line),
                })?;

            if sections.iter().any(|section| section.name == name) {
                return Err(AnalysisError::TimelineSyntax {
                    line: line_number,
                    message: format!("Duplicate phase '{}'", name),
                });
            }

            sections.push(Section {
                name: name.to_string(),
                line: line_number,
                entries: HashMap::new(),
            });
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .or_else(|| line.split_once(':'))
            .ok_or_else(|| AnalysisError::TimelineSyntax {
                line: line_number,
                message: format!("Expected 'key = value', got '{}'", line),
            })?;

        let section = sections.last_mut().ok_or_else(|| AnalysisError::TimelineSyntax {
            line: line_number,
            message: "Key outside of any section".to_string(),
        })?;

        section.entries.insert(
            key.trim().to_lowercase(),
            (value.trim().to_string(), line_number),
        );
    }

    Ok(sections)
}

fn parse_local_time(value: &str, zone: Tz, line: usize) -> Result<DateTime<Utc>> {
    let naive = TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| AnalysisError::TimelineSyntax {
            line,
            message: format!("Invalid time '{}', expected YYYY-MM-DD HH:MM", value),
        })?;

    // Ambiguous local times (the repeated hour at the end of DST) resolve to the earlier one.
    zone.from_local_datetime(&naive)
        .earliest()
        .map(|time| time.with_timezone(&Utc))
        .ok_or_else(|| AnalysisError::TimelineSyntax {
            line,
            message: format!("Time '{}' does not exist in {}", value, zone.name()),
        })
}
