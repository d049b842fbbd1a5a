pub mod console;
pub mod formatter;
pub mod model_table;
