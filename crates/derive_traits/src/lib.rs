//! The trait lives in its own crate so that the attribute macro in
//! `derive_custom` can refer to it by an absolute path, both from the
//! main crate and from its examples and benches.
use serde::Deserialize;
use serde::Serialize;

pub trait BalanceParameters: Serialize + for<'de> Deserialize<'de> + Default {
    fn section_name() -> &'static str;
}
