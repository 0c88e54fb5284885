pub mod observation;
pub mod spy;
pub mod subscription;

// Feed crate: viewport observation contract and the active-item resolver.
pub use observation::*;
pub use spy::*;
pub use subscription::*;
