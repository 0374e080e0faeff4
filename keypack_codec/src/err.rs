use derive_more::Display;

#[derive(PartialEq, Eq, Clone, Debug, Display)]
pub enum PackErr {
    #[display(fmt = "Invalid parameter. {}", _0)]
    InvalidParam(String),
}
impl std::error::Error for PackErr {}

pub type PackResult<T> = Result<T, PackErr>;

/// Shorthand for building a [`PackErr::InvalidParam`], in the manner of `anyhow!`.
macro_rules! invalid {
    ($($arg:tt)*) => {
        $crate::err::PackErr::InvalidParam(format!($($arg)*))
    };
}
pub(crate) use invalid;
