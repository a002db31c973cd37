pub mod batch;

pub use batch::{collect_inputs, BatchConverter, BatchReport};
