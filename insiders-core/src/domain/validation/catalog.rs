// insiders-core/src/domain/validation/catalog.rs

use super::checks::{self, Workspace};
use super::error::CheckError;
use super::pipeline::PipelineOptions;

pub type CheckFn = fn(&mut Workspace<'_>, &PipelineOptions) -> Result<(), CheckError>;

/// One ordered validation step and the message shown when it fails.
#[derive(Clone, Copy)]
pub struct Check {
    pub name: &'static str,
    pub message: &'static str,
    pub run: CheckFn,
}

impl std::fmt::Debug for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Check")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish()
    }
}

/// Ingestion order. Each check sees the dataset as left by the previous ones.
pub static CATALOG: [Check; 8] = [
    Check {
        name: "convert_csv",
        message: "Error when converting csv to a dataset",
        run: checks::convert_csv,
    },
    Check {
        name: "column_names",
        message: "Please check the column names",
        run: checks::column_names,
    },
    Check {
        name: "change_columns_case",
        message: "Error when changing columns case",
        run: checks::change_columns_case,
    },
    Check {
        name: "customer_id",
        message: "Please check \"CustomerID\" column",
        run: checks::customer_id,
    },
    Check {
        name: "quantity",
        message: "Please check the \"Quantity\" column",
        run: checks::quantity,
    },
    Check {
        name: "unit_price",
        message: "Please check the \"UnitPrice\" column",
        run: checks::unit_price,
    },
    Check {
        name: "invoice_date",
        message: "Please check the \"InvoiceDate\" column",
        run: checks::invoice_date,
    },
    Check {
        name: "invoice_no",
        message: "Please check the \"InvoiceNo\" column",
        run: checks::invoice_no,
    },
];
