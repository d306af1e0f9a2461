// ✂️ Block Splitter - Parallel scan over record-aligned byte ranges
//
// The input is cut into N ranges whose boundaries always sit on a record's
// opening '{', so no record is ever split between two blocks. Every range is
// scanned on the rayon pool with its own private PartialScan.

use crate::config::{ScanConfig, MAX_BLOCKS};
use crate::error::Result;
use crate::model::{Area, Employee, Record};
use crate::scanner::scan_record;
use rayon::prelude::*;
use std::ops::Range;
use tracing::debug;

const OPEN: u8 = b'{';
const CLOSE: u8 = b'}';

// ============================================================================
// PARTIAL RESULT
// ============================================================================

/// Everything one scan task found in its block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialScan {
    /// Index of the block this partial belongs to
    pub block: usize,
    pub employees: Vec<Employee>,
    pub areas: Vec<Area>,
}

impl PartialScan {
    pub fn new(block: usize) -> Self {
        PartialScan {
            block,
            employees: Vec::new(),
            areas: Vec::new(),
        }
    }

    pub fn push(&mut self, record: Record) {
        match record {
            Record::Employee(emp) => self.employees.push(emp),
            Record::Area(area) => self.areas.push(area),
        }
    }

    pub fn record_count(&self) -> usize {
        self.employees.len() + self.areas.len()
    }
}

// ============================================================================
// SPLITTING
// ============================================================================

fn find(data: &[u8], needle: u8) -> Option<usize> {
    data.iter().position(|&b| b == needle)
}

/// Partition `data` into `blocks` ranges aligned to '{'
///
/// Starts right after the first '{' (the enclosing document). Each boundary is
/// the first '{' at or after `k * len/blocks`. When no '{' is left, the
/// remaining ranges are empty. The last non-empty range runs to the end.
///
/// The count is clamped to 1..=MAX_BLOCKS and to the input length, so a
/// huge request never turns into millions of empty tasks.
pub fn block_ranges(data: &[u8], blocks: usize) -> Vec<Range<usize>> {
    let blocks = blocks.clamp(1, MAX_BLOCKS).min(data.len().max(1));
    let len = data.len();

    let start = match find(data, OPEN) {
        Some(pos) => pos + 1,
        None => return vec![len..len; blocks],
    };

    let step = len / blocks;
    let mut boundaries = vec![start];
    let mut prev = start;

    for k in 1..blocks {
        let target = (k * step).max(prev + 1);
        if target >= len {
            break;
        }

        match find(&data[target..], OPEN) {
            Some(offset) => {
                prev = target + offset;
                boundaries.push(prev);
            }
            None => break,
        }
    }

    let mut ranges: Vec<Range<usize>> = boundaries
        .windows(2)
        .map(|pair| pair[0]..pair[1])
        .collect();
    ranges.push(prev..len);

    while ranges.len() < blocks {
        ranges.push(len..len);
    }

    ranges
}

// ============================================================================
// SCANNING
// ============================================================================

/// Scan one block: every '{' … next '}' pair is handed to the record scanner
pub fn scan_block(block: usize, data: &[u8]) -> PartialScan {
    let mut partial = PartialScan::new(block);
    let mut i = 0;

    while let Some(offset) = find(&data[i..], OPEN) {
        let open = i + offset;

        let close = match find(&data[open..], CLOSE) {
            Some(len) => open + len,
            None => break, // unterminated record ends the block
        };

        if let Some(record) = scan_record(&data[open..=close]) {
            partial.push(record);
        }

        i = close + 1;
    }

    debug!(
        "block {}: {} bytes, {} employees, {} areas",
        block,
        data.len(),
        partial.employees.len(),
        partial.areas.len()
    );

    partial
}

/// Split + scan all blocks concurrently
///
/// Returns exactly one PartialScan per block, ordered by block index.
pub fn scan_blocks(data: &[u8], config: &ScanConfig) -> Result<Vec<PartialScan>> {
    config.validate()?;

    let ranges = block_ranges(data, config.blocks);

    let partials: Vec<PartialScan> = ranges
        .into_par_iter()
        .enumerate()
        .map(|(block, range)| scan_block(block, &data[range]))
        .collect();

    Ok(partials)
}
