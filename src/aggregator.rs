// 📊 Aggregator - Single-pass fold into tie-preserving statistics
//
// Runs on one thread, once, in dataset order. Tie order in every family is
// the order employees were encountered, so it follows the merged block order.
//
// Per employee:
//   1. best salary per surname (dedup by first name on ties)
//   2. global max / min
//   3. area count + sum + min / max, then the "most employees" ranking
// After the pass:
//   4. "least employees" over areas with at least one employee

use crate::merge::Dataset;
use crate::model::{Area, Employee};
use crate::ties::{ExtremumHolder, Offer};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{info, trace, warn};

// ============================================================================
// AREA STATS
// ============================================================================

/// Running stats for one area (parallel to `PayrollStats::areas`)
#[derive(Debug, Clone, PartialEq)]
pub struct AreaStats {
    pub count: usize,
    pub salary_sum: f64,
    pub min: ExtremumHolder<f64>,
    pub max: ExtremumHolder<f64>,
}

impl AreaStats {
    pub fn new() -> Self {
        AreaStats {
            count: 0,
            salary_sum: 0.0,
            min: ExtremumHolder::min(),
            max: ExtremumHolder::max(),
        }
    }

    /// None for an area nobody works in
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.salary_sum / self.count as f64)
        }
    }
}

impl Default for AreaStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Best salary for one surname (sobrenome)
#[derive(Debug, Clone, PartialEq)]
pub struct SurnameBest {
    pub surname: String,
    pub best: ExtremumHolder<f64>,
}

// ============================================================================
// AGGREGATED CONTEXT
// ============================================================================

/// Everything the report needs. Read-only once the engine returns it.
#[derive(Debug, Clone)]
pub struct PayrollStats {
    pub employees: Vec<Employee>,
    pub areas: Vec<Area>,
    pub area_stats: Vec<AreaStats>,
    pub salary_sum: f64,
    pub global_max: ExtremumHolder<f64>,
    pub global_min: ExtremumHolder<f64>,
    pub most_employees: ExtremumHolder<usize>,
    pub least_employees: ExtremumHolder<usize>,

    /// In first-seen surname order
    pub last_names: Vec<SurnameBest>,

    /// Employees whose area code matches no area
    pub unassigned: usize,
}

impl PayrollStats {
    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    pub fn assigned_count(&self) -> usize {
        self.area_stats.iter().map(|s| s.count).sum()
    }

    pub fn unassigned_count(&self) -> usize {
        self.unassigned
    }

    /// Mean salary over all employees; 0.0 when there are none
    pub fn global_average(&self) -> f64 {
        if self.employees.is_empty() {
            0.0
        } else {
            self.salary_sum / self.employees.len() as f64
        }
    }

    /// Areas with at least one employee, with their stats
    pub fn staffed_areas(&self) -> impl Iterator<Item = (&Area, &AreaStats)> {
        self.areas
            .iter()
            .zip(self.area_stats.iter())
            .filter(|(_, stats)| stats.count > 0)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} employees ({} assigned, {} unassigned), {} areas ({} staffed), {} surnames, avg ${:.2}",
            self.employee_count(),
            self.assigned_count(),
            self.unassigned_count(),
            self.areas.len(),
            self.staffed_areas().count(),
            self.last_names.len(),
            self.global_average()
        )
    }
}

// ============================================================================
// STATS ENGINE
// ============================================================================

pub struct StatsEngine;

impl StatsEngine {
    pub fn new() -> Self {
        StatsEngine
    }

    /// Fold the whole dataset into PayrollStats
    pub fn aggregate(&self, dataset: Dataset) -> PayrollStats {
        let Dataset { employees, areas } = dataset;

        let area_index = Self::index_areas(&areas);
        let mut area_stats = vec![AreaStats::new(); areas.len()];

        let mut global_max = ExtremumHolder::max();
        let mut global_min = ExtremumHolder::min();
        let mut most_employees = ExtremumHolder::max();
        let mut salary_sum = 0.0;
        let mut unassigned = 0;

        let mut surname_index: HashMap<&str, usize> = HashMap::new();
        let mut last_names: Vec<SurnameBest> = Vec::new();

        for (idx, emp) in employees.iter().enumerate() {
            // 1. Best per surname
            match surname_index.get(emp.surname.as_str()) {
                Some(&slot) => {
                    last_names[slot]
                        .best
                        .offer_unless(emp.salary, idx, |m| employees[m].first_name == emp.first_name);
                }
                None => {
                    let mut best = ExtremumHolder::max();
                    best.offer(emp.salary, idx);
                    surname_index.insert(emp.surname.as_str(), last_names.len());
                    last_names.push(SurnameBest {
                        surname: emp.surname.clone(),
                        best,
                    });
                }
            }

            // 2. Global max / min
            if global_max.offer(emp.salary, idx) == Offer::Replaced {
                trace!("new global max {:.2} ({})", emp.salary, emp.full_name());
            }
            if global_min.offer(emp.salary, idx) == Offer::Replaced {
                trace!("new global min {:.2} ({})", emp.salary, emp.full_name());
            }
            salary_sum += emp.salary;

            // 3. Per area + most employees
            match area_index.get(emp.area_code.as_str()) {
                Some(&a) => {
                    let stats = &mut area_stats[a];
                    stats.count += 1;
                    stats.salary_sum += emp.salary;
                    stats.min.offer(emp.salary, idx);
                    stats.max.offer(emp.salary, idx);

                    most_employees.offer(stats.count, a);
                }
                None => unassigned += 1,
            }
        }

        // 4. Least employees (only areas with employees)
        let mut least_employees = ExtremumHolder::min();
        for (a, stats) in area_stats.iter().enumerate() {
            if stats.count > 0 {
                least_employees.offer(stats.count, a);
            }
        }

        if unassigned > 0 {
            warn!("{} employees reference an unknown area code", unassigned);
        }

        // Both indexes borrow from the vectors moved below
        drop(surname_index);
        drop(area_index);

        let stats = PayrollStats {
            employees,
            areas,
            area_stats,
            salary_sum,
            global_max,
            global_min,
            most_employees,
            least_employees,
            last_names,
            unassigned,
        };

        info!("aggregated {}", stats.summary());

        stats
    }

    /// code → first area with that code
    fn index_areas(areas: &[Area]) -> HashMap<&str, usize> {
        let mut index = HashMap::with_capacity(areas.len());

        for (i, area) in areas.iter().enumerate() {
            match index.entry(area.code.as_str()) {
                Entry::Vacant(slot) => {
                    slot.insert(i);
                }
                Entry::Occupied(first) => {
                    warn!(
                        "duplicate area code {:?} ({:?}), keeping area #{}",
                        area.code,
                        area.name,
                        first.get()
                    );
                }
            }
        }

        index
    }
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::new()
    }
}
