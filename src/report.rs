// 🧾 Report Formatter - One text block per statistic family
//
// Line format: key|field1|field2...\n
// Each family renders its whole block first, then appends it to the sink with
// a single write. Blocks never interleave; their relative order in the
// concurrent writer is not fixed.

use crate::aggregator::PayrollStats;
use crate::error::Result;
use crate::model::Employee;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

// ============================================================================
// FAMILIES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    GlobalAvg,
    AreaAvg,
    GlobalMax,
    GlobalMin,
    LeastEmployees,
    MostEmployees,
    AreaMax,
    AreaMin,
    LastNameMax,
}

impl Family {
    /// Canonical order used by `ReportFormatter::render`
    pub const ALL: [Family; 9] = [
        Family::GlobalAvg,
        Family::AreaAvg,
        Family::GlobalMax,
        Family::GlobalMin,
        Family::LeastEmployees,
        Family::MostEmployees,
        Family::AreaMax,
        Family::AreaMin,
        Family::LastNameMax,
    ];

    /// Line key printed before the first '|'
    pub fn key(&self) -> &'static str {
        match self {
            Family::GlobalAvg => "global_avg",
            Family::AreaAvg => "area_avg",
            Family::GlobalMax => "global_max",
            Family::GlobalMin => "global_min",
            Family::LeastEmployees => "least_employees",
            Family::MostEmployees => "most_employees",
            Family::AreaMax => "area_max",
            Family::AreaMin => "area_min",
            Family::LastNameMax => "last_name_max",
        }
    }
}

fn push_line(out: &mut String, key: &str, fields: &[&str]) {
    out.push_str(key);
    for field in fields {
        out.push('|');
        out.push_str(field);
    }
    out.push('\n');
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

// ============================================================================
// FORMATTER
// ============================================================================

pub struct ReportFormatter<'a> {
    stats: &'a PayrollStats,
}

impl<'a> ReportFormatter<'a> {
    pub fn new(stats: &'a PayrollStats) -> Self {
        ReportFormatter { stats }
    }

    fn employee(&self, idx: usize) -> &'a Employee {
        &self.stats.employees[idx]
    }

    /// Render one family as a complete block (empty string if no lines)
    pub fn render_family(&self, family: Family) -> String {
        let stats = self.stats;
        let key = family.key();
        let mut out = String::new();

        match family {
            Family::GlobalAvg => {
                push_line(&mut out, key, &[&money(stats.global_average())]);
            }
            Family::AreaAvg => {
                for (area, area_stats) in stats.staffed_areas() {
                    let avg = area_stats.average().unwrap_or_default();
                    push_line(&mut out, key, &[&area.name, &money(avg)]);
                }
            }
            Family::GlobalMax | Family::GlobalMin => {
                let holder = if family == Family::GlobalMax {
                    &stats.global_max
                } else {
                    &stats.global_min
                };
                for &idx in holder.members() {
                    let emp = self.employee(idx);
                    push_line(&mut out, key, &[&emp.full_name(), &money(emp.salary)]);
                }
            }
            Family::LeastEmployees | Family::MostEmployees => {
                let holder = if family == Family::MostEmployees {
                    &stats.most_employees
                } else {
                    &stats.least_employees
                };
                let count = holder.value().unwrap_or_default().to_string();
                for &a in holder.members() {
                    push_line(&mut out, key, &[&stats.areas[a].name, &count]);
                }
            }
            Family::AreaMax | Family::AreaMin => {
                for (area, area_stats) in stats.staffed_areas() {
                    let holder = if family == Family::AreaMax {
                        &area_stats.max
                    } else {
                        &area_stats.min
                    };
                    for &idx in holder.members() {
                        let emp = self.employee(idx);
                        push_line(
                            &mut out,
                            key,
                            &[&area.name, &emp.full_name(), &money(emp.salary)],
                        );
                    }
                }
            }
            Family::LastNameMax => {
                for entry in &stats.last_names {
                    for &idx in entry.best.members() {
                        let emp = self.employee(idx);
                        push_line(
                            &mut out,
                            key,
                            &[&entry.surname, &emp.full_name(), &money(emp.salary)],
                        );
                    }
                }
            }
        }

        out
    }

    /// Whole report in canonical family order (deterministic)
    pub fn render(&self) -> String {
        Family::ALL
            .iter()
            .map(|&family| self.render_family(family))
            .collect()
    }

    /// Write the report with one rayon task per family
    ///
    /// global_avg goes first; the other 8 families follow in completion
    /// order. Returns the sink after all tasks joined and it was flushed.
    pub fn write_concurrent<W: Write + Send>(&self, sink: W) -> Result<W> {
        let sink = Mutex::new(sink);
        let failure: Mutex<Option<io::Error>> = Mutex::new(None);

        self.append(Family::GlobalAvg, &sink, &failure);

        rayon::scope(|s| {
            for family in Family::ALL.into_iter().skip(1) {
                let sink = &sink;
                let failure = &failure;
                s.spawn(move |_| self.append(family, sink, failure));
            }
        });

        if let Some(err) = failure.into_inner().unwrap_or_else(PoisonError::into_inner) {
            return Err(err.into());
        }

        let mut sink = sink.into_inner().unwrap_or_else(PoisonError::into_inner);
        sink.flush()?;
        Ok(sink)
    }

    fn append<W: Write>(&self, family: Family, sink: &Mutex<W>, failure: &Mutex<Option<io::Error>>) {
        let block = self.render_family(family);
        if block.is_empty() {
            return;
        }

        debug!("writing {} block ({} bytes)", family.key(), block.len());

        let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = sink.write_all(block.as_bytes()) {
            failure
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get_or_insert(err);
        }
    }
}
