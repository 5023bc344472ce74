use crate::domain::chart::value_objects::{Row, Schema};
use crate::domain::errors::ChartResult;

/// Rendering-environment capability able to build schema-typed tables
pub trait TableWorker {
    type Table: ChartTable;

    fn create_table(&self, schema: &Schema) -> ChartResult<Self::Table>;
}

/// Backing table of the visualization widget
pub trait ChartTable {
    /// Append rows; the widget re-renders on its own.
    fn update(&self, rows: &[Row]) -> ChartResult<()>;
}

/// Display element that renders a table
pub trait ChartViewer<T: ChartTable> {
    fn load(&self, table: &T) -> ChartResult<()>;

    fn set_attribute(&self, name: &str, value: &str) -> ChartResult<()>;
}
