// 👥 Record Model - Employees (funcionarios) + Areas
//
// Field order of the serde derives IS the canonical input key order.
// Do not reorder fields: the scanner and the dataset writer both rely on it.

use serde::{Deserialize, Serialize};

// ============================================================================
// EMPLOYEE
// ============================================================================

/// Employee (funcionario) - immutable once scanned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u64,

    #[serde(rename = "nome")]
    pub first_name: String,

    #[serde(rename = "sobrenome")]
    pub surname: String,

    #[serde(rename = "salario")]
    pub salary: f64,

    #[serde(rename = "area")]
    pub area_code: String,
}

impl Employee {
    pub fn new(id: u64, first_name: &str, surname: &str, salary: f64, area_code: &str) -> Self {
        Employee {
            id,
            first_name: first_name.to_string(),
            surname: surname.to_string(),
            salary,
            area_code: area_code.to_string(),
        }
    }

    /// "<nome> <sobrenome>" as printed in the report
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.surname)
    }
}

// ============================================================================
// AREA
// ============================================================================

/// Area - code + display name. Running stats live in the aggregation, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "nome")]
    pub name: String,
}

impl Area {
    pub fn new(code: &str, name: &str) -> Self {
        Area {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// Output of the record scanner: one employee OR one area
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Employee(Employee),
    Area(Area),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let emp = Employee::new(1, "Ana", "Silva", 100.0, "EN");
        assert_eq!(emp.full_name(), "Ana Silva");
    }

    #[test]
    fn test_employee_serializes_in_canonical_order() {
        let emp = Employee::new(7, "Aahron", "Abaine", 68379.29, "PI");
        let json = serde_json::to_string(&emp).unwrap();
        assert_eq!(
            json,
            r#"{"id":7,"nome":"Aahron","sobrenome":"Abaine","salario":68379.29,"area":"PI"}"#
        );
    }

    #[test]
    fn test_area_serializes_in_canonical_order() {
        let area = Area::new("SM", "Gerenciamento de Software");
        let json = serde_json::to_string(&area).unwrap();
        assert_eq!(json, r#"{"codigo":"SM","nome":"Gerenciamento de Software"}"#);
    }
}
