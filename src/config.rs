// ⚙️ Scan Configuration
//
// Block count for the splitter. Default 16, overridable via PAYROLL_BLOCKS.

use crate::error::{PayrollError, Result};

/// Default number of concurrent blocks the input is broken into
pub const DEFAULT_BLOCKS: usize = 16;

/// Upper bound for the block count
pub const MAX_BLOCKS: usize = 1024;

/// Environment variable that overrides the block count
pub const BLOCKS_ENV: &str = "PAYROLL_BLOCKS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Number of byte ranges scanned concurrently (default: 16)
    pub blocks: usize,
}

impl ScanConfig {
    pub fn new() -> Self {
        ScanConfig {
            blocks: DEFAULT_BLOCKS,
        }
    }

    pub fn with_blocks(mut self, blocks: usize) -> Self {
        self.blocks = blocks;
        self
    }

    /// Build config from the environment
    ///
    /// Missing PAYROLL_BLOCKS → default. Present but not a positive integer → error.
    pub fn from_env() -> Result<Self> {
        match std::env::var(BLOCKS_ENV) {
            Ok(raw) => Self::parse_blocks(&raw).map(|blocks| Self::new().with_blocks(blocks)),
            Err(_) => Ok(Self::new()),
        }
    }

    fn parse_blocks(raw: &str) -> Result<usize> {
        let blocks = raw.trim().parse::<usize>().map_err(|e| {
            PayrollError::InvalidConfig(format!("{}={:?} is not a block count: {}", BLOCKS_ENV, raw, e))
        })?;
        Self::new().with_blocks(blocks).validate()?;
        Ok(blocks)
    }

    pub fn validate(&self) -> Result<()> {
        if self.blocks == 0 {
            return Err(PayrollError::InvalidConfig(
                "block count must be at least 1".to_string(),
            ));
        }
        if self.blocks > MAX_BLOCKS {
            return Err(PayrollError::InvalidConfig(format!(
                "block count {} exceeds the maximum of {}",
                self.blocks, MAX_BLOCKS
            )));
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_blocks() {
        assert_eq!(ScanConfig::default().blocks, 16);
        assert!(ScanConfig::default().validate().is_ok());
    }

    #[test]
    fn test_with_blocks() {
        let config = ScanConfig::new().with_blocks(4);
        assert_eq!(config.blocks, 4);
    }

    #[test]
    fn test_zero_blocks_rejected() {
        let result = ScanConfig::new().with_blocks(0).validate();
        assert!(matches!(result, Err(PayrollError::InvalidConfig(_))));
    }

    #[test]
    fn test_parse_blocks() {
        assert_eq!(ScanConfig::parse_blocks(" 8 ").unwrap(), 8);
        assert!(ScanConfig::parse_blocks("0").is_err());
        assert!(ScanConfig::parse_blocks("many").is_err());
        assert_eq!(ScanConfig::parse_blocks("1024").unwrap(), 1024);
        assert!(ScanConfig::parse_blocks("1025").is_err());
        assert!(ScanConfig::parse_blocks("18446744073709551615").is_err());
    }

    #[test]
    fn test_huge_block_count_rejected() {
        let result = ScanConfig::new().with_blocks(usize::MAX).validate();
        assert!(matches!(result, Err(PayrollError::InvalidConfig(_))));
    }
}
