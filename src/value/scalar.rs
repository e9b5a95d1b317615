use super::{CoerceError, ScalarKind};

/// A Rust type that can be coerced from a single text literal.
pub trait Scalar: Sized {
    const KIND: ScalarKind;

    fn coerce(text: &str) -> Result<Self, CoerceError>;
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::Text;

    fn coerce(text: &str) -> Result<Self, CoerceError> {
        Ok(text.to_string())
    }
}

/// Matching is case-sensitive. Literals outside both tables coerce to `false`
/// rather than failing, including the empty string.
impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn coerce(text: &str) -> Result<Self, CoerceError> {
        let value = match text {
            "true" | "yes" | "1" | "y" | "enable" => true,
            "false" | "no" | "0" | "n" | "disable" => false,
            _ => false,
        };
        Ok(value)
    }
}

macro_rules! impl_signed {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;

                fn coerce(text: &str) -> Result<Self, CoerceError> {
                    text.parse().map_err(|_| CoerceError::invalid(Self::KIND, text))
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;

                fn coerce(text: &str) -> Result<Self, CoerceError> {
                    parse_unsigned(text).ok_or_else(|| CoerceError::invalid(Self::KIND, text))
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;

                fn coerce(text: &str) -> Result<Self, CoerceError> {
                    let value: $ty = text
                        .parse()
                        .map_err(|_| CoerceError::invalid(Self::KIND, text))?;
                    // finite literals too large for the precision parse as infinity
                    if value.is_infinite() && !spells_infinity(text) {
                        return Err(CoerceError::invalid(Self::KIND, text));
                    }
                    Ok(value)
                }
            }
        )*
    };
}

impl_signed!(i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64);
impl_unsigned!(u8 => Uint8, u16 => Uint16, u32 => Uint32, u64 => Uint64);
impl_float!(f32 => Float32, f64 => Float64);

impl Scalar for isize {
    const KIND: ScalarKind = ScalarKind::Int;

    fn coerce(text: &str) -> Result<Self, CoerceError> {
        text.parse::<i32>()
            .map(|v| v as isize)
            .map_err(|_| CoerceError::invalid(Self::KIND, text))
    }
}

impl Scalar for usize {
    const KIND: ScalarKind = ScalarKind::Uint;

    fn coerce(text: &str) -> Result<Self, CoerceError> {
        parse_unsigned::<u32>(text)
            .map(|v| v as usize)
            .ok_or_else(|| CoerceError::invalid(Self::KIND, text))
    }
}

/// Unsigned literals carry no sign, not even `+`.
fn parse_unsigned<T: std::str::FromStr>(text: &str) -> Option<T> {
    if text.starts_with('+') {
        return None;
    }
    text.parse().ok()
}

fn spells_infinity(text: &str) -> bool {
    let unsigned = text.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
