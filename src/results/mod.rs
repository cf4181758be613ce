//! Values produced by dispatch and generated response types.

pub mod call_result;
pub mod collection;

pub use call_result::CallResult;
pub use collection::Collection;
