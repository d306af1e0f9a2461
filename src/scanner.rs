// 🔎 Record Scanner - Fixed-schema field extraction
//
// Input: one record range, from its opening '{' to its closing '}'.
//   {"id":1,"nome":"Aahron","sobrenome":"Abaine","salario":68379.29,"area":"PI"}
//   {"codigo":"SM", "nome":"Gerenciamento de Software"}
//
// No generic JSON parser here. A small state machine walks the bytes once and
// yields (key, value) pairs; fields are bound by key name. No escapes, no
// nesting: records must be flat and minimal (precondition, not checked).

use crate::error::ScanError;
use crate::model::{Area, Employee, Record};
use tracing::{debug, warn};

/// Key that marks a record as an employee when it comes first
pub const EMPLOYEE_KEY: &[u8] = b"id";

// ============================================================================
// TOKENIZER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Quoted value, quotes stripped
    Text(&'a [u8]),

    /// Unquoted value (numbers), up to the next ',' or '}'
    Bare(&'a [u8]),
}

impl<'a> FieldValue<'a> {
    pub fn bytes(&self) -> &'a [u8] {
        match self {
            FieldValue::Text(b) | FieldValue::Bare(b) => *b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub key: &'a [u8],
    pub value: FieldValue<'a>,
}

#[derive(Debug, Clone, Copy)]
enum State {
    SeekKey,
    InKey(usize),
    SeekColon,
    SeekValue,
    InText(usize),
    InBare(usize),
}

/// Walks a flat record and yields its fields in order
pub struct FieldTokenizer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FieldTokenizer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        FieldTokenizer { data, pos: 0 }
    }
}

impl<'a> Iterator for FieldTokenizer<'a> {
    type Item = Field<'a>;

    fn next(&mut self) -> Option<Field<'a>> {
        let data = self.data;
        let mut state = State::SeekKey;
        let mut key: &'a [u8] = &[];

        while self.pos < data.len() {
            let i = self.pos;
            let b = data[i];
            self.pos += 1;

            state = match state {
                State::SeekKey if b == b'"' => State::InKey(i + 1),
                State::SeekKey => State::SeekKey,
                State::InKey(start) if b == b'"' => {
                    key = &data[start..i];
                    State::SeekColon
                }
                State::SeekColon if b == b':' => State::SeekValue,
                State::SeekValue => match b {
                    b'"' => State::InText(i + 1),
                    b' ' | b'\t' | b'\r' | b'\n' => State::SeekValue,
                    b',' | b'}' => {
                        return Some(Field {
                            key,
                            value: FieldValue::Bare(&[]),
                        })
                    }
                    _ => State::InBare(i),
                },
                State::InText(start) if b == b'"' => {
                    return Some(Field {
                        key,
                        value: FieldValue::Text(&data[start..i]),
                    });
                }
                State::InBare(start) if b == b',' || b == b'}' => {
                    return Some(Field {
                        key,
                        value: FieldValue::Bare(&data[start..i]),
                    });
                }
                other => other,
            };
        }

        // Range ended inside a bare value (record without closing brace)
        if let State::InBare(start) = state {
            return Some(Field {
                key,
                value: FieldValue::Bare(&data[start..]),
            });
        }

        None
    }
}

// ============================================================================
// RECORD SCANNER
// ============================================================================

/// Scan one record range into an Employee or an Area
///
/// First key "id" → employee, anything else → re-dispatched as area.
/// Returns None for a record with no fields at all ("{}").
pub fn scan_record(record: &[u8]) -> Option<Record> {
    let mut fields = FieldTokenizer::new(record).peekable();

    let first = match fields.peek() {
        Some(field) => *field,
        None => {
            debug!("skipping record without fields ({} bytes)", record.len());
            return None;
        }
    };

    if first.key == EMPLOYEE_KEY {
        Some(Record::Employee(bind_employee(fields)))
    } else {
        Some(Record::Area(bind_area(fields)))
    }
}

fn bind_employee<'a>(fields: impl Iterator<Item = Field<'a>>) -> Employee {
    let mut emp = Employee::new(0, "", "", 0.0, "");

    for field in fields {
        match field.key {
            b"id" => emp.id = parse_id(field.value.bytes()),
            b"nome" => emp.first_name = text(field.value.bytes()),
            b"sobrenome" => emp.surname = text(field.value.bytes()),
            b"salario" => {
                emp.salary = parse_salary(field.value.bytes()).unwrap_or_else(|e| {
                    warn!("salary conversion failed, using 0.00: {}", e);
                    0.0
                })
            }
            b"area" => emp.area_code = text(field.value.bytes()),
            _ => {}
        }
    }

    emp
}

fn bind_area<'a>(fields: impl Iterator<Item = Field<'a>>) -> Area {
    let mut area = Area::new("", "");

    for field in fields {
        match field.key {
            b"codigo" => area.code = text(field.value.bytes()),
            b"nome" => area.name = text(field.value.bytes()),
            _ => {}
        }
    }

    area
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn parse_id(raw: &[u8]) -> u64 {
    let raw = text(raw);
    raw.trim().parse().unwrap_or_else(|_| {
        debug!("unparsable employee id {:?}, using 0", raw);
        0
    })
}

/// Parse a salary value
///
/// Keeps everything up to the last ASCII digit, so trailing blanks or junk
/// before the delimiter are cut: "68379.29 \n" → 68379.29
pub fn parse_salary(raw: &[u8]) -> Result<f64, ScanError> {
    let end = raw
        .iter()
        .rposition(|b| b.is_ascii_digit())
        .map_or(0, |pos| pos + 1);
    let digits = text(&raw[..end]);
    let digits = digits.trim();

    digits
        .parse::<f64>()
        .map_err(|source| ScanError::InvalidSalary {
            raw: text(raw),
            source,
        })
}
