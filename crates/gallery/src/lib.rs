pub mod backend;
pub mod markers;
pub mod path;
pub mod pipeline;
pub mod sync;

pub use backend::*;
pub use markers::*;
pub use path::*;
pub use pipeline::*;
pub use sync::*;
