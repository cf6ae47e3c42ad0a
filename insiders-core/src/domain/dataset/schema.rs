// insiders-core/src/domain/dataset/schema.rs

use datafusion::arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Semantic type a column must be coerced into before ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Text,
    Integer,
    Float,
    Date,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "floating-point number",
            Self::Date => "date",
        }
    }

    /// Arrow representation of a fully coerced column.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Text => DataType::Utf8,
            Self::Integer => DataType::Int64,
            Self::Float => DataType::Float64,
            Self::Date => DataType::Date32,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Header as it appears in uploaded files.
    pub raw_name: &'static str,
    /// Name after snake_case normalization.
    pub name: &'static str,
    pub semantic_type: SemanticType,
    pub description: &'static str,
}

pub const INVOICE_NO: &str = "invoice_no";
pub const QUANTITY: &str = "quantity";
pub const INVOICE_DATE: &str = "invoice_date";
pub const UNIT_PRICE: &str = "unit_price";
pub const CUSTOMER_ID: &str = "customer_id";

/// Date layout of `InvoiceDate` values, e.g. `9-Apr-17`.
pub const INVOICE_DATE_FORMAT: &str = "%d-%b-%y";

/// Prefix marking a cancelled invoice (`C536379`).
pub const CANCELLATION_MARKER: char = 'C';

pub static EXPECTED_COLUMNS: [ColumnSpec; 8] = [
    ColumnSpec {
        raw_name: "InvoiceNo",
        name: INVOICE_NO,
        semantic_type: SemanticType::Integer,
        description: "Invoice number (A 6-digit integral number uniquely assigned to each transaction)",
    },
    ColumnSpec {
        raw_name: "StockCode",
        name: "stock_code",
        semantic_type: SemanticType::Text,
        description: "Product (item) code",
    },
    ColumnSpec {
        raw_name: "Description",
        name: "description",
        semantic_type: SemanticType::Text,
        description: "Product (item) name",
    },
    ColumnSpec {
        raw_name: "Quantity",
        name: QUANTITY,
        semantic_type: SemanticType::Integer,
        description: "The quantities of each product (item) per transaction",
    },
    ColumnSpec {
        raw_name: "InvoiceDate",
        name: INVOICE_DATE,
        semantic_type: SemanticType::Date,
        description: "The day when each transaction was generated",
    },
    ColumnSpec {
        raw_name: "UnitPrice",
        name: UNIT_PRICE,
        semantic_type: SemanticType::Float,
        description: "Unit price (Product price per unit)",
    },
    ColumnSpec {
        raw_name: "CustomerID",
        name: CUSTOMER_ID,
        semantic_type: SemanticType::Integer,
        description: "Customer number (Unique ID assigned to each customer)",
    },
    ColumnSpec {
        raw_name: "Country",
        name: "country",
        semantic_type: SemanticType::Text,
        description: "Country name (The name of the country where each customer resides)",
    },
];

/// Rows shown to uploaders next to the schema, in `EXPECTED_COLUMNS` order.
/// `549716A` and `T540168` are real invoice numbers the `InvoiceNo` check rejects.
pub const SAMPLE_ROWS: [[&str; 8]; 5] = [
    ["549716A", "22797C", "CHEST OF DRAWERS GINGHAM HEART ", "1", "9-Apr-17", "16.95", "14628", "United Kingdom"],
    ["557625", "20724R", "RED RETROSPOT CHARLOTTE BAG", "10", "19-Jun-17", "0.85", "15159", "United Kingdom"],
    ["T540168", "48194", "DOORMAT HEARTS", "2", "3-Jan-17", "7.95", "13715", "United Kingdom"],
    ["547249", "85199L", "LARGE HANGING IVORY & RED WOOD BIRD", "1", "20-Mar-17", "1.25", "17832", "Spain"],
    ["572318", "23165", "LARGE CERAMIC TOP STORAGE JAR", "1", "21-Oct-17", "1.65", "15436", "United Kingdom"],
];

/// The fixed layout every admissible upload must follow.
pub struct ExpectedSchema;

impl ExpectedSchema {
    pub fn columns() -> &'static [ColumnSpec] {
        &EXPECTED_COLUMNS
    }

    pub fn raw_names() -> BTreeSet<&'static str> {
        EXPECTED_COLUMNS.iter().map(|c| c.raw_name).collect()
    }

    /// Set comparison of actual headers against the raw names. Order is ignored.
    pub fn compare<S: AsRef<str>>(actual: &[S]) -> SchemaDiff {
        let expected = Self::raw_names();
        let actual: BTreeSet<&str> = actual.iter().map(|s| s.as_ref()).collect();

        SchemaDiff {
            missing: expected
                .difference(&actual)
                .map(|s| s.to_string())
                .collect(),
            unexpected: actual
                .difference(&expected)
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaDiff {
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
}

impl SchemaDiff {
    pub fn is_match(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

impl fmt::Display for SchemaDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing columns [{}], unexpected columns [{}]",
            self.missing.join(", "),
            self.unexpected.join(", ")
        )
    }
}

/// Rewrites a PascalCase/camelCase header into snake_case.
///
/// `CustomerID` -> `customer_id`, `HTTPStatus` -> `http_status`, dashes become underscores.
pub fn to_snake_case(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let word_boundary = prev.is_ascii_lowercase() || prev.is_ascii_digit();
            let acronym_end = prev.is_ascii_uppercase() && next_is_lower;
            if word_boundary || acronym_end {
                out.push('_');
            }
        }
        if c == '-' {
            out.push('_');
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}
