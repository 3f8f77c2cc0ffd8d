//! Memoization.

use std::cell::{Ref, RefCell};
use std::hash::Hash;

use rustc_hash::FxHashMap;

/// A memoized function.
///
/// Every result is cached by argument, and the cached value is returned
/// whenever the same argument is seen again. This is intended for recursive
/// functions that would otherwise make an exceedingly large number of calls
/// with the same values ("dynamic programming").
///
/// The wrapped function receives a recursion handle as its first argument;
/// recursive calls made through the handle go through the cache.
///
/// ```rust
/// use lonely::decorator::memoize;
///
/// let fib = memoize(|fib, n: u64| if n < 2 { 1 } else { fib(n - 1) + fib(n - 2) });
/// assert_eq!(fib.call(10), 89);
/// // The cache can be inspected directly.
/// assert_eq!(fib.memo_dict().get(&9), Some(&55));
/// ```
///
/// Results are cloned out of the cache, so interior mutability in `R` is
/// shared between every caller that receives the same cached value.
/// Functions that need a large shared input should capture it in the
/// closure rather than take it as an argument.
pub struct Memoize<A, R, F> {
    func: F,
    memo: RefCell<FxHashMap<A, R>>,
}

/// Memoizes `func`. Functions of several arguments take them as a tuple.
pub fn memoize<A, R, F>(func: F) -> Memoize<A, R, F>
where
    A: Hash + Eq + Clone,
    R: Clone,
    F: Fn(&dyn Fn(A) -> R, A) -> R,
{
    Memoize {
        func,
        memo: RefCell::new(FxHashMap::default()),
    }
}

impl<A, R, F> Memoize<A, R, F>
where
    A: Hash + Eq + Clone,
    R: Clone,
    F: Fn(&dyn Fn(A) -> R, A) -> R,
{
    /// Calls the function, or returns the cached result for `args`.
    pub fn call(&self, args: A) -> R {
        let cached = self.memo.borrow().get(&args).cloned();
        if let Some(result) = cached {
            return result;
        }
        let result = (self.func)(&|a| self.call(a), args.clone());
        self.memo.borrow_mut().insert(args, result.clone());
        result
    }

    /// The cached results, keyed by argument.
    ///
    /// The returned guard must be dropped before the next call.
    pub fn memo_dict(&self) -> Ref<'_, FxHashMap<A, R>> {
        self.memo.borrow()
    }

    /// The undecorated function.
    pub fn memo_func(&self) -> &F {
        &self.func
    }

    /// Forgets every cached result.
    pub fn clear(&self) {
        self.memo.borrow_mut().clear();
    }
}

/// A memoized function of one `Copy` argument.
///
/// Like [`Memoize`], but keys are copied instead of cloned, which avoids
/// the clone on every cache miss for cheap keys.
pub struct MemoizeOnevar<A, R, F> {
    func: F,
    memo: RefCell<FxHashMap<A, R>>,
}

/// Memoizes a function of one `Copy` argument.
pub fn memoize_onevar<A, R, F>(func: F) -> MemoizeOnevar<A, R, F>
where
    A: Hash + Eq + Copy,
    R: Clone,
    F: Fn(&dyn Fn(A) -> R, A) -> R,
{
    MemoizeOnevar {
        func,
        memo: RefCell::new(FxHashMap::default()),
    }
}

impl<A, R, F> MemoizeOnevar<A, R, F>
where
    A: Hash + Eq + Copy,
    R: Clone,
    F: Fn(&dyn Fn(A) -> R, A) -> R,
{
    pub fn call(&self, x: A) -> R {
        if let Some(result) = self.memo.borrow().get(&x) {
            return result.clone();
        }
        let result = (self.func)(&|y| self.call(y), x);
        self.memo.borrow_mut().insert(x, result.clone());
        result
    }

    pub fn memo_dict(&self) -> Ref<'_, FxHashMap<A, R>> {
        self.memo.borrow()
    }

    pub fn memo_func(&self) -> &F {
        &self.func
    }

    pub fn clear(&self) {
        self.memo.borrow_mut().clear();
    }
}
