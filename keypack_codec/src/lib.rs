//! # keypack
//!
//! A dense binary codec for heterogeneous scalar and sequence values.
//!
//! Values are packed either under a struct-pack style format string
//! ([`pack_formatted`] / [`unpack_formatted`]) or by inferring the wire shape
//! from each value's own kind ([`pack_values`] / [`unpack_values`]).
//!
//! Integers wider than 8 bits use the order-preserving varint in [`vint`]:
//! encoded bytes compare the same way the numbers do, so a packed record can be
//! used directly as a sortable binary key.

pub mod cursor;
pub mod directive;
pub mod err;
mod formatted;
mod inferred;
pub mod value;
pub mod vint;

pub use err::{PackErr, PackResult};
pub use formatted::*;
pub use inferred::*;
pub use value::{Seq, Value, ValueKind};
