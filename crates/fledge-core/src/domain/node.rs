//! Node.js release lines a project targets.
//!
//! A fresh project supports every long-term-support line that has been
//! released and has not reached end of life on the day it is created.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// `(year, month, day)`; compared lexicographically.
type Day = (i32, u32, u32);

struct Release {
    major: u32,
    released: Day,
    end_of_life: Day,
}

/// Long-term-support lines, oldest first.
const RELEASES: &[Release] = &[
    Release {
        major: 14,
        released: (2020, 4, 21),
        end_of_life: (2023, 4, 30),
    },
    Release {
        major: 16,
        released: (2021, 4, 20),
        end_of_life: (2023, 9, 11),
    },
    Release {
        major: 18,
        released: (2022, 4, 19),
        end_of_life: (2025, 4, 30),
    },
    Release {
        major: 20,
        released: (2023, 4, 18),
        end_of_life: (2026, 4, 30),
    },
    Release {
        major: 22,
        released: (2024, 4, 24),
        end_of_life: (2027, 4, 30),
    },
    Release {
        major: 24,
        released: (2025, 5, 6),
        end_of_life: (2028, 4, 30),
    },
    Release {
        major: 26,
        released: (2026, 4, 22),
        end_of_life: (2029, 4, 30),
    },
];

/// Supported Node.js major versions, ascending and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeVersions {
    majors: Vec<u32>,
}

impl NodeVersions {
    /// Lines supported on `today`.
    ///
    /// Outside the table's range the closest line is used: the newest
    /// released one after the last end of life, the oldest one before the
    /// first release.
    pub fn for_date(today: NaiveDate) -> Self {
        let day = (today.year(), today.month(), today.day());
        let mut majors: Vec<u32> = RELEASES
            .iter()
            .filter(|r| r.released <= day && day <= r.end_of_life)
            .map(|r| r.major)
            .collect();

        if majors.is_empty() {
            let fallback = RELEASES
                .iter()
                .rev()
                .find(|r| r.released <= day)
                .or(RELEASES.first());
            majors.extend(fallback.map(|r| r.major));
        }
        Self { majors }
    }

    /// Read an `engines.node` range such as `^20 || ^22 || >=24` back.
    ///
    /// Each alternative contributes its leading major number. `None` when
    /// no alternative names one.
    pub fn from_engines(range: &str) -> Option<Self> {
        let mut majors: Vec<u32> = range
            .split("||")
            .filter_map(|alternative| {
                let digits: String = alternative
                    .trim()
                    .trim_start_matches(['^', '~', '>', '=', 'v'])
                    .trim_start()
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .collect();
                digits.parse().ok()
            })
            .collect();
        majors.sort_unstable();
        majors.dedup();
        (!majors.is_empty()).then_some(Self { majors })
    }

    pub fn majors(&self) -> &[u32] {
        &self.majors
    }

    /// `engines.node` value: caret ranges, with the newest line open-ended.
    pub fn engines_range(&self) -> String {
        let last = self.majors.len().saturating_sub(1);
        self.majors
            .iter()
            .enumerate()
            .map(|(i, major)| {
                if i == last {
                    format!(">={major}")
                } else {
                    format!("^{major}")
                }
            })
            .collect::<Vec<_>>()
            .join(" || ")
    }

    /// Flow-sequence form for a CI matrix, e.g. `[22.x, 24.x]`.
    pub fn ci_matrix(&self) -> String {
        let entries: Vec<_> = self.majors.iter().map(|m| format!("{m}.x")).collect();
        format!("[{}]", entries.join(", "))
    }
}
