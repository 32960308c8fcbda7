// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fork-join over the four quadrants of a node.

/// Run `f` on each of the four inputs and wait for all of them.
///
/// With `parallel` set (and the `parallel` feature enabled) the calls are
/// spread over rayon's pool as two nested joins; otherwise they run in order on
/// the calling thread. Results come back in input order either way.
pub(crate) fn join4<I, R, F>(inputs: [I; 4], parallel: bool, f: F) -> [R; 4]
where
    I: Send,
    R: Send,
    F: Fn(I) -> R + Sync,
{
    let [a, b, c, d] = inputs;
    #[cfg(feature = "parallel")]
    if parallel {
        let ((ra, rb), (rc, rd)) = rayon::join(
            || rayon::join(|| f(a), || f(b)),
            || rayon::join(|| f(c), || f(d)),
        );
        return [ra, rb, rc, rd];
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    [f(a), f(b), f(c), f(d)]
}
