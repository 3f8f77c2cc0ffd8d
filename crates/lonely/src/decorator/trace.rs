//! Call tracing.
//!
//! Use delicately.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::io::{self, Write};
use std::thread;

use crate::decorator::{Call, CallArgs};

const INDENT_CHARS: &str = "  ";
const MAX_INDENT: usize = 16;

thread_local! {
    /// Nesting depth shared by every [`DebugRec`] on this thread, so that
    /// mutually recursive functions indent together.
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Runs a closure when dropped.
struct OnDrop<G: FnMut()>(G);

impl<G: FnMut()> Drop for OnDrop<G> {
    fn drop(&mut self) {
        (self.0)();
    }
}

fn emit<W: Write>(sink: &RefCell<W>, line: fmt::Arguments<'_>) {
    // Tracing must not change the outcome of the traced call.
    let _ = writeln!(sink.borrow_mut(), "{line}");
}

// =============================================================================
// DEBUG
// =============================================================================

/// Prints every call and its result once the call returns.
///
/// Output has the form `name(args) = result`. If the call panics,
/// `name(args) = ...oh, my.` is printed and the panic continues.
pub struct DebugCall<F, W = io::Stderr> {
    name: Cow<'static, str>,
    func: F,
    sink: RefCell<W>,
}

/// Traces calls to `func` on standard error.
pub fn debug<A, R, F>(name: impl Into<Cow<'static, str>>, func: F) -> DebugCall<F>
where
    F: Fn(A) -> R,
{
    debug_to(name, io::stderr(), func)
}

/// Traces calls to `func` on `sink`.
pub fn debug_to<A, R, F, W>(name: impl Into<Cow<'static, str>>, sink: W, func: F) -> DebugCall<F, W>
where
    F: Fn(A) -> R,
    W: Write,
{
    DebugCall {
        name: name.into(),
        func,
        sink: RefCell::new(sink),
    }
}

impl<F, W: Write> DebugCall<F, W> {
    pub fn call<A, R>(&self, args: A) -> R
    where
        F: Fn(A) -> R,
        A: CallArgs,
        R: fmt::Debug,
    {
        let call = Call(&self.name, &args).to_string();
        let _unwind = OnDrop(|| {
            if thread::panicking() {
                emit(&self.sink, format_args!("{call} = ...oh, my."));
            }
        });
        let result = (self.func)(args);
        emit(&self.sink, format_args!("{call} = {result:?}"));
        result
    }

    /// Returns the sink, consuming the wrapper.
    pub fn into_sink(self) -> W {
        self.sink.into_inner()
    }
}

// =============================================================================
// DEBUG_REC
// =============================================================================

/// Prints calls to a recursive function, indented by depth.
///
/// Unlike [`DebugCall`], the call is printed before the function runs:
///
/// ```text
/// fib(2):
///   fib(1):
///   fib(1) = 1
///   fib(0):
///   fib(0) = 1
/// fib(2) = 2
/// ```
///
/// Indentation is capped at 16 levels. The wrapped function receives a
/// recursion handle as its first argument.
pub struct DebugRec<F, W = io::Stderr> {
    name: Cow<'static, str>,
    func: F,
    sink: RefCell<W>,
}

/// Traces a recursive function on standard error.
pub fn debug_rec<A, R, F>(name: impl Into<Cow<'static, str>>, func: F) -> DebugRec<F>
where
    F: Fn(&dyn Fn(A) -> R, A) -> R,
{
    debug_rec_to(name, io::stderr(), func)
}

/// Traces a recursive function on `sink`.
pub fn debug_rec_to<A, R, F, W>(name: impl Into<Cow<'static, str>>, sink: W, func: F) -> DebugRec<F, W>
where
    F: Fn(&dyn Fn(A) -> R, A) -> R,
    W: Write,
{
    DebugRec {
        name: name.into(),
        func,
        sink: RefCell::new(sink),
    }
}

impl<F, W: Write> DebugRec<F, W> {
    pub fn call<A, R>(&self, args: A) -> R
    where
        F: Fn(&dyn Fn(A) -> R, A) -> R,
        A: CallArgs,
        R: fmt::Debug,
    {
        let saved = DEPTH.with(Cell::get);
        let indent = INDENT_CHARS.repeat(saved);
        DEPTH.with(|depth| depth.set((saved + 1).min(MAX_INDENT)));

        let call = Call(&self.name, &args).to_string();
        emit(&self.sink, format_args!("{indent}{call}:"));

        let restore = OnDrop(|| {
            DEPTH.with(|depth| depth.set(saved));
            if thread::panicking() {
                emit(&self.sink, format_args!("{indent}{call} failed horribly!"));
            }
        });
        let result = (self.func)(&|a| self.call(a), args);
        drop(restore);

        emit(&self.sink, format_args!("{indent}{call} = {result:?}"));
        result
    }

    /// Returns the sink, consuming the wrapper.
    pub fn into_sink(self) -> W {
        self.sink.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use super::*;

    #[test]
    fn test_debug_prints_result() {
        let add = debug_to("add", Vec::new(), |(a, b): (i32, i32)| a + b);
        assert_eq!(add.call((1, 2)), 3);
        assert_eq!(add.call((3, 4)), 7);
        let out = String::from_utf8(add.into_sink()).unwrap();
        assert_eq!(out, "add(1, 2) = 3\nadd(3, 4) = 7\n");
    }

    #[test]
    fn test_debug_result_values() {
        let parse = debug_to("parse", Vec::new(), |s: &str| s.parse::<u8>().map_err(|_| "bad"));
        assert_eq!(parse.call("7"), Ok(7));
        assert!(parse.call("x").is_err());
        let out = String::from_utf8(parse.into_sink()).unwrap();
        assert_eq!(out, "parse(\"7\") = Ok(7)\nparse(\"x\") = Err(\"bad\")\n");
    }

    #[test]
    fn test_debug_on_panic() {
        let boom = debug_to("boom", Vec::new(), |n: u32| -> u32 {
            if n > 1 {
                panic!("too big");
            }
            n
        });
        let result = panic::catch_unwind(AssertUnwindSafe(|| boom.call(5)));
        assert!(result.is_err());
        let out = String::from_utf8(boom.into_sink()).unwrap();
        assert_eq!(out, "boom(5) = ...oh, my.\n");
    }

    #[test]
    fn test_debug_rec_indents() {
        let fib = debug_rec_to("fib", Vec::new(), |fib, n: u32| -> u32 {
            if n < 2 { 1 } else { fib(n - 1) + fib(n - 2) }
        });
        assert_eq!(fib.call(2), 2);
        let out = String::from_utf8(fib.into_sink()).unwrap();
        assert_eq!(
            out,
            "fib(2):\n  fib(1):\n  fib(1) = 1\n  fib(0):\n  fib(0) = 1\nfib(2) = 2\n"
        );
        assert_eq!(DEPTH.with(Cell::get), 0);
    }

    #[test]
    fn test_debug_rec_caps_indent() {
        let count = debug_rec_to("count", Vec::new(), |count, n: usize| -> usize {
            if n == 0 { 0 } else { 1 + count(n - 1) }
        });
        assert_eq!(count.call(20), 20);
        let out = String::from_utf8(count.into_sink()).unwrap();
        let widest = out
            .lines()
            .map(|line| line.len() - line.trim_start().len())
            .max()
            .unwrap();
        assert_eq!(widest, MAX_INDENT * INDENT_CHARS.len());
        assert_eq!(DEPTH.with(Cell::get), 0);
    }

    #[test]
    fn test_debug_rec_restores_depth_on_panic() {
        let dive = debug_rec_to("dive", Vec::new(), |dive, n: u32| -> u32 {
            if n == 0 {
                panic!("bottom");
            }
            dive(n - 1)
        });
        let result = panic::catch_unwind(AssertUnwindSafe(|| dive.call(1)));
        assert!(result.is_err());
        assert_eq!(DEPTH.with(Cell::get), 0);
        let out = String::from_utf8(dive.into_sink()).unwrap();
        assert_eq!(
            out,
            "dive(1):\n  dive(0):\n  dive(0) failed horribly!\ndive(1) failed horribly!\n"
        );
    }

    #[test]
    fn test_debug_rec_depth_shared_between_wrappers() {
        let half = debug_rec_to("half", Vec::new(), |_, n: u32| -> u32 { n / 2 });
        let outer = debug_rec_to("outer", Vec::new(), |_, n: u32| -> u32 { half.call(n) + 1 });
        assert_eq!(outer.call(8), 5);
        let outer_out = String::from_utf8(outer.into_sink()).unwrap();
        let half_out = String::from_utf8(half.into_sink()).unwrap();
        assert_eq!(outer_out, "outer(8):\nouter(8) = 5\n");
        assert_eq!(half_out, "  half(8):\n  half(8) = 4\n");
        assert_eq!(DEPTH.with(Cell::get), 0);
    }
}
