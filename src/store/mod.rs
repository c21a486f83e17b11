pub mod annotations_csv;
pub mod examples_file;
pub mod file_store;
pub mod traits;

pub use annotations_csv::*;
pub use examples_file::*;
pub use file_store::*;
pub use traits::*;
