// 🔗 Result Merger - All partial scans → one dataset
//
// Every partial is consumed. Records are moved, never borrowed, so nothing
// points back into per-task storage after the merge.

use crate::model::{Area, Employee};
use crate::splitter::PartialScan;
use serde::Deserialize;
use tracing::{debug, info};

/// Unified collection of every scanned record, in block order
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Dataset {
    #[serde(rename = "funcionarios")]
    pub employees: Vec<Employee>,

    pub areas: Vec<Area>,
}

impl Dataset {
    pub fn new(employees: Vec<Employee>, areas: Vec<Area>) -> Self {
        Dataset { employees, areas }
    }
}

/// Merge all partial results, ordered by block index
pub fn merge(mut partials: Vec<PartialScan>) -> Dataset {
    partials.sort_by_key(|p| p.block);

    let employees_total: usize = partials.iter().map(|p| p.employees.len()).sum();
    let areas_total: usize = partials.iter().map(|p| p.areas.len()).sum();

    let mut dataset = Dataset {
        employees: Vec::with_capacity(employees_total),
        areas: Vec::with_capacity(areas_total),
    };

    let blocks = partials.len();
    for partial in partials {
        debug!(
            "merging block {} ({} records)",
            partial.block,
            partial.record_count()
        );
        dataset.employees.extend(partial.employees);
        dataset.areas.extend(partial.areas);
    }

    info!(
        "merged {} blocks: {} employees, {} areas",
        blocks,
        dataset.employees.len(),
        dataset.areas.len()
    );

    dataset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(block: usize, names: &[&str]) -> PartialScan {
        let mut p = PartialScan::new(block);
        for (i, name) in names.iter().enumerate() {
            p.employees
                .push(Employee::new(i as u64, name, "Silva", 100.0, "EN"));
        }
        p
    }

    #[test]
    fn test_merge_keeps_every_partial() {
        let mut p2 = partial(2, &["Caio"]);
        p2.areas.push(Area::new("EN", "Engenharia"));

        let dataset = merge(vec![partial(0, &["Ana", "Bia"]), partial(1, &[]), p2]);

        assert_eq!(dataset.employees.len(), 3);
        assert_eq!(dataset.areas.len(), 1);
    }

    #[test]
    fn test_merge_orders_by_block() {
        let dataset = merge(vec![partial(1, &["Second"]), partial(0, &["First"])]);

        let names: Vec<&str> = dataset
            .employees
            .iter()
            .map(|e| e.first_name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_merge_empty() {
        let dataset = merge(Vec::new());
        assert_eq!(dataset, Dataset::default());
    }
}
