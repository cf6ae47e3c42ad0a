// insiders-core/src/domain/dataset/coercion.rs

use std::sync::Arc;

use chrono::NaiveDate;
use datafusion::arrow::array::{
    Array, ArrayRef, Date32Array, Float64Array, Int64Array, StringArray,
};
use datafusion::arrow::datatypes::{DataType, Date32Type};
use thiserror::Error;

use super::schema::{INVOICE_DATE_FORMAT, SemanticType};

#[derive(Debug, Error, PartialEq)]
pub enum CoercionError {
    #[error("column '{column}', row {row}: cannot read '{value}' as {target}")]
    Unparsable {
        column: String,
        row: usize,
        value: String,
        target: SemanticType,
    },

    #[error("column '{column}', row {row}: missing value where {target} is required")]
    Missing {
        column: String,
        row: usize,
        target: SemanticType,
    },

    #[error("column '{column}' holds {data_type} values, which cannot become {target}")]
    UnsupportedType {
        column: String,
        data_type: DataType,
        target: SemanticType,
    },
}

impl CoercionError {
    pub fn target(&self) -> SemanticType {
        match self {
            Self::Unparsable { target, .. }
            | Self::Missing { target, .. }
            | Self::UnsupportedType { target, .. } => *target,
        }
    }
}

/// Integer literal: surrounding whitespace allowed, optional sign, no decimals.
pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Floating-point literal, including `nan` and `inf`.
pub fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

/// Strict `D-Mon-YY` date. Whitespace is not tolerated.
pub fn parse_invoice_date(raw: &str) -> Option<NaiveDate> {
    // chrono's %b also accepts full month names; only the abbreviation is valid here.
    let mut parts = raw.split('-');
    let well_formed = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(day), Some(month), Some(year), None) => {
            (1..=2).contains(&day.len()) && month.len() == 3 && year.len() == 2
        }
        _ => false,
    };
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(raw, INVOICE_DATE_FORMAT).ok()
}

/// Converts a text column into `target`. A column already holding `target`
/// values is returned untouched. Nulls stay null.
pub fn coerce_array(
    column: &str,
    array: &ArrayRef,
    target: SemanticType,
) -> Result<ArrayRef, CoercionError> {
    if array.data_type() == &target.data_type() {
        return Ok(array.clone());
    }

    let text = array
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| CoercionError::UnsupportedType {
            column: column.to_string(),
            data_type: array.data_type().clone(),
            target,
        })?;

    let coerced: ArrayRef = match target {
        SemanticType::Text => Arc::new(text.clone()),
        SemanticType::Integer => Arc::new(
            convert(column, text, target, parse_integer)?
                .into_iter()
                .collect::<Int64Array>(),
        ),
        SemanticType::Float => Arc::new(
            convert(column, text, target, parse_float)?
                .into_iter()
                .collect::<Float64Array>(),
        ),
        SemanticType::Date => Arc::new(
            convert(column, text, target, parse_invoice_date)?
                .into_iter()
                .map(|d| d.map(Date32Type::from_naive_date))
                .collect::<Date32Array>(),
        ),
    };

    Ok(coerced)
}

/// Same as `coerce_array`, but the column must end up without nulls, as an
/// integer column cannot hold a missing value.
pub fn coerce_required(
    column: &str,
    array: &ArrayRef,
    target: SemanticType,
) -> Result<ArrayRef, CoercionError> {
    let coerced = coerce_array(column, array, target)?;
    if let Some(row) = (0..coerced.len()).find(|&i| coerced.is_null(i)) {
        return Err(CoercionError::Missing {
            column: column.to_string(),
            row,
            target,
        });
    }
    Ok(coerced)
}

fn convert<T>(
    column: &str,
    text: &StringArray,
    target: SemanticType,
    parse: fn(&str) -> Option<T>,
) -> Result<Vec<Option<T>>, CoercionError> {
    text.iter()
        .enumerate()
        .map(|(row, value)| match value {
            None => Ok(None),
            Some(raw) => parse(raw)
                .map(Some)
                .ok_or_else(|| CoercionError::Unparsable {
                    column: column.to_string(),
                    row,
                    value: raw.to_string(),
                    target,
                }),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn text(values: Vec<Option<&str>>) -> ArrayRef {
        Arc::new(StringArray::from(values))
    }

    #[test]
    fn test_parse_integer_rules() {
        assert_eq!(parse_integer(" 12 "), Some(12));
        assert_eq!(parse_integer("-3"), Some(-3));
        assert_eq!(parse_integer("+7"), Some(7));
        assert_eq!(parse_integer("1.0"), None);
        assert_eq!(parse_integer("549716A"), None);
        assert_eq!(parse_integer(""), None);
    }

    #[test]
    fn test_parse_invoice_date_is_strict() {
        assert_eq!(
            parse_invoice_date("9-Apr-17"),
            NaiveDate::from_ymd_opt(2017, 4, 9)
        );
        assert_eq!(
            parse_invoice_date("21-Oct-17"),
            NaiveDate::from_ymd_opt(2017, 10, 21)
        );
        assert_eq!(parse_invoice_date("2017-04-09"), None);
        assert_eq!(parse_invoice_date("04/09/2017"), None);
        assert_eq!(parse_invoice_date("9-April-17"), None);
    }

    #[test]
    fn test_coerce_integer_keeps_nulls() {
        let out = coerce_array("quantity", &text(vec![Some("6"), None, Some("-2")]), SemanticType::Integer)
            .unwrap();
        let ints = out.as_any().downcast_ref::<Int64Array>().unwrap();
        assert_eq!(ints.value(0), 6);
        assert!(ints.is_null(1));
        assert_eq!(ints.value(2), -2);
    }

    #[test]
    fn test_coerce_required_rejects_nulls() {
        let err = coerce_required(
            "quantity",
            &text(vec![Some("6"), Some("2"), None]),
            SemanticType::Integer,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoercionError::Missing {
                column: "quantity".into(),
                row: 2,
                target: SemanticType::Integer,
            }
        );

        let ok = coerce_required("quantity", &text(vec![Some("6")]), SemanticType::Integer).unwrap();
        assert_eq!(ok.null_count(), 0);
    }

    #[test]
    fn test_coerce_reports_first_bad_row() {
        let err = coerce_array(
            "unit_price",
            &text(vec![Some("2.55"), Some("two"), Some("x")]),
            SemanticType::Float,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoercionError::Unparsable {
                column: "unit_price".into(),
                row: 1,
                value: "two".into(),
                target: SemanticType::Float,
            }
        );
    }

    #[test]
    fn test_coerce_same_type_is_noop() {
        let ints: ArrayRef = Arc::new(Int64Array::from(vec![536365, 536366]));
        let out = coerce_array("invoice_no", &ints, SemanticType::Integer).unwrap();
        assert!(Arc::ptr_eq(&ints, &out));
    }

    #[test]
    fn test_coerce_rejects_foreign_type() {
        let floats: ArrayRef = Arc::new(Float64Array::from(vec![1.5]));
        let err = coerce_array("quantity", &floats, SemanticType::Integer).unwrap_err();
        assert!(matches!(err, CoercionError::UnsupportedType { .. }));
        assert_eq!(err.target(), SemanticType::Integer);
    }

    #[test]
    fn test_coerce_dates() {
        let out = coerce_array("invoice_date", &text(vec![Some("3-Jan-17")]), SemanticType::Date)
            .unwrap();
        assert_eq!(out.data_type(), &DataType::Date32);
    }
}
