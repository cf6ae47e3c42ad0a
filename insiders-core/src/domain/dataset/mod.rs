// insiders-core/src/domain/dataset/mod.rs

pub mod coercion;
pub mod frame;
pub mod reader;
pub mod schema;

pub use coercion::CoercionError;
pub use frame::Dataset;
pub use reader::read_csv;
pub use schema::{ColumnSpec, ExpectedSchema, SAMPLE_ROWS, SchemaDiff, SemanticType};
