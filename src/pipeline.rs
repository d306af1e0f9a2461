// 🚚 Pipeline - read → split/scan → merge → aggregate → report
//
// No global state: each stage hands an owned value to the next one.

use crate::aggregator::{PayrollStats, StatsEngine};
use crate::config::ScanConfig;
use crate::error::{PayrollError, Result};
use crate::merge::{merge, Dataset};
use crate::report::ReportFormatter;
use crate::splitter::scan_blocks;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Read the whole input file into memory
pub fn load_input(path: &Path) -> Result<Vec<u8>> {
    let data = std::fs::read(path).map_err(|source| PayrollError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    info!("loaded {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Scan all blocks and merge every partial result
pub fn scan_dataset(data: &[u8], config: &ScanConfig) -> Result<Dataset> {
    let partials = scan_blocks(data, config)?;
    Ok(merge(partials))
}

/// Scan + aggregate an in-memory document
pub fn analyze(data: &[u8], config: &ScanConfig) -> Result<PayrollStats> {
    let dataset = scan_dataset(data, config)?;
    Ok(StatsEngine::new().aggregate(dataset))
}

/// Full run: file in, report out
pub fn run<W: Write + Send>(path: &Path, config: &ScanConfig, sink: W) -> Result<PayrollStats> {
    let data = load_input(path)?;
    let stats = analyze(&data, config)?;
    ReportFormatter::new(&stats).write_concurrent(sink)?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{decode_reference, render_input};
    use crate::model::{Area, Employee};

    fn example_document() -> String {
        render_input(
            &[
                Employee::new(1, "Ana", "Silva", 100.0, "EN"),
                Employee::new(2, "Bia", "Silva", 100.0, "EN"),
                Employee::new(3, "Cao", "Souza", 50.0, "TI"),
            ],
            &[Area::new("EN", "Engenharia"), Area::new("TI", "TI")],
        )
        .unwrap()
    }

    fn larger_document() -> String {
        let surnames = ["Silva", "Souza", "Costa", "Lima", "Rocha"];
        let codes = ["EN", "TI", "RH", "SM"];

        let employees: Vec<Employee> = (0..300)
            .map(|i| {
                Employee::new(
                    i as u64,
                    &format!("Nome{}", i % 40),
                    surnames[i % surnames.len()],
                    1000.0 + ((i * 37) % 101) as f64 * 12.25,
                    codes[i % codes.len()],
                )
            })
            .collect();

        let areas = vec![
            Area::new("EN", "Engenharia"),
            Area::new("TI", "Tecnologia da Informação"),
            Area::new("RH", "Recursos Humanos"),
            Area::new("SM", "Gerenciamento de Software"),
            Area::new("VZ", "Sem Pessoas"),
        ];

        render_input(&employees, &areas).unwrap()
    }

    fn sorted_ids(dataset: &Dataset) -> Vec<u64> {
        let mut ids: Vec<u64> = dataset.employees.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_end_to_end_example() {
        let doc = example_document();
        let stats = analyze(doc.as_bytes(), &ScanConfig::new()).unwrap();
        let report = ReportFormatter::new(&stats).render();

        assert!(report.contains("global_avg|83.33\n"));
        assert!(report.contains("global_max|Ana Silva|100.00\nglobal_max|Bia Silva|100.00\n"));
        assert!(report.contains("global_min|Cao Souza|50.00\n"));
        assert!(report.contains("most_employees|Engenharia|2\n"));
        assert!(report.contains("least_employees|TI|1\n"));
        assert!(report.ends_with('\n'));
    }

    #[test]
    fn test_block_counts_yield_same_records() {
        let doc = larger_document();
        let reference = decode_reference(&doc).unwrap();

        for blocks in [1, 4, 16] {
            let config = ScanConfig::new().with_blocks(blocks);
            let dataset = scan_dataset(doc.as_bytes(), &config).unwrap();

            assert_eq!(dataset.employees.len(), 300, "blocks={}", blocks);
            assert_eq!(dataset.areas, reference.areas, "blocks={}", blocks);
            assert_eq!(sorted_ids(&dataset), sorted_ids(&reference), "blocks={}", blocks);
            // Block order is preserved, so the merged order matches the file
            assert_eq!(dataset.employees, reference.employees, "blocks={}", blocks);
        }
    }

    #[test]
    fn test_global_avg_independent_of_block_count() {
        let doc = larger_document();
        let reference = decode_reference(&doc).unwrap();
        let mean = reference.employees.iter().map(|e| e.salary).sum::<f64>()
            / reference.employees.len() as f64;

        for blocks in [1, 4, 16] {
            let stats = analyze(doc.as_bytes(), &ScanConfig::new().with_blocks(blocks)).unwrap();
            let line = ReportFormatter::new(&stats).render_family(crate::report::Family::GlobalAvg);
            assert_eq!(line, format!("global_avg|{:.2}\n", mean));
        }
    }

    #[test]
    fn test_counts_add_up() {
        let doc = larger_document();
        let stats = analyze(doc.as_bytes(), &ScanConfig::new()).unwrap();

        assert_eq!(stats.assigned_count(), stats.employee_count());
        assert_eq!(stats.unassigned_count(), 0);

        let report = ReportFormatter::new(&stats).render();
        assert!(!report.contains("Sem Pessoas"));
    }

    #[test]
    fn test_run_reads_file_and_writes_report() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(example_document().as_bytes()).unwrap();

        let mut out = Vec::new();
        let stats = run(file.path(), &ScanConfig::new().with_blocks(2), &mut out).unwrap();

        assert_eq!(stats.employee_count(), 3);
        let report = String::from_utf8(out).unwrap();
        assert!(report.starts_with("global_avg|83.33\n"));
        assert_eq!(report.lines().count(), 17);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_input(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(PayrollError::ReadInput { .. })));
    }
}
