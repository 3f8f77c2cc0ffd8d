//! Small wrappers around function calls.
//!
//! - [`invoke`]: call a closure immediately, keeping the result
//! - [`memoize`] / [`memoize_onevar`]: cache results by argument
//! - [`debug`] / [`debug_rec`]: print every call and its result
//!
//! The wrappers that support recursion hand the wrapped function a
//! recursion handle (`&dyn Fn(A) -> R`) which routes back through the
//! wrapper. Functions of several arguments take them as a tuple.

use std::fmt;

pub mod memo;
pub mod trace;

pub use memo::{memoize, memoize_onevar, Memoize, MemoizeOnevar};
pub use trace::{debug, debug_rec, debug_rec_to, debug_to, DebugCall, DebugRec};

/// Immediately invokes `f` and returns its result.
///
/// Useful for limiting the scope of temporaries while computing a value:
///
/// ```rust
/// use lonely::decorator::invoke;
///
/// let xs = vec![2, 5, 6, 1, 7, 3, 7, 5];
/// let sorted_copy = invoke(|| {
///     let mut tmp = xs.clone();
///     tmp.sort();
///     tmp
/// });
/// assert_eq!(xs, [2, 5, 6, 1, 7, 3, 7, 5]);
/// assert_eq!(sorted_copy, [1, 2, 3, 5, 5, 6, 7, 7]);
/// ```
pub fn invoke<T>(f: impl FnOnce() -> T) -> T {
    f()
}

/// Arguments that can be printed as the inside of a call expression.
///
/// Tuples print as comma-separated lists, so a call taking `(1, "a")`
/// prints as `f(1, "a")`. Common scalar types print as a single argument.
pub trait CallArgs {
    fn fmt_args(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

macro_rules! impl_call_args_tuple {
    ($($T:ident $v:ident),*) => {
        impl<$($T: fmt::Debug),*> CallArgs for ($($T,)*) {
            #[allow(unused_variables, unused_mut, unused_assignments)]
            fn fmt_args(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let ($($v,)*) = self;
                let mut sep = "";
                $(
                    write!(f, "{sep}{:?}", $v)?;
                    sep = ", ";
                )*
                Ok(())
            }
        }
    };
}

impl_call_args_tuple!();
impl_call_args_tuple!(A a);
impl_call_args_tuple!(A a, B b);
impl_call_args_tuple!(A a, B b, C c);
impl_call_args_tuple!(A a, B b, C c, D d);
impl_call_args_tuple!(A a, B b, C c, D d, E e);
impl_call_args_tuple!(A a, B b, C c, D d, E e, G g);

macro_rules! impl_call_args_scalar {
    ($($t:ty),*) => {
        $(
            impl CallArgs for $t {
                fn fmt_args(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{:?}", self)
                }
            }
        )*
    };
}

impl_call_args_scalar!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char, String,
    &str
);

impl<T: fmt::Debug> CallArgs for Vec<T> {
    fn fmt_args(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Displays as `name(args)`.
pub(crate) struct Call<'a, A: ?Sized>(pub &'a str, pub &'a A);

impl<A: CallArgs + ?Sized> fmt::Display for Call<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.0)?;
        self.1.fmt_args(f)?;
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke() {
        let value = invoke(|| 40 + 2);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_format_call() {
        assert_eq!(Call("f", &()).to_string(), "f()");
        assert_eq!(Call("f", &(1,)).to_string(), "f(1)");
        assert_eq!(Call("f", &(1, "a", 2.5)).to_string(), "f(1, \"a\", 2.5)");
        assert_eq!(Call("fib", &10u64).to_string(), "fib(10)");
        assert_eq!(Call("sum", &vec![1, 2]).to_string(), "sum([1, 2])");
    }
}
