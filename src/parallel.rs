use std::sync::atomic::{AtomicUsize, Ordering};

/// Default worker count for construction calls that let the caller omit it.
pub fn default_concurrency() -> usize {
    num_cpus::get()
}

/// Apply `f` to every index in `[0, n)` using a fixed pool of worker threads.
///
/// Workers repeatedly claim the next contiguous chunk of indices through a
/// shared atomic cursor and process each claimed index in increasing order.
/// The call blocks until every worker has joined; there is no cancellation.
///
/// `chunk` overrides the chunk size (default `ceil(n / threads)`).
///
/// `f` is invoked concurrently on disjoint indices and must only write
/// disjoint memory. It must not panic: a panicking worker is resumed on the
/// calling thread and takes the whole construction down with it.
pub fn parallel_for<F>(n: usize, concurrency: usize, chunk: Option<usize>, f: F)
where
    F: Fn(usize) + Send + Sync,
{
    if n == 0 {
        return;
    }
    let threads = concurrency.max(1).min(n);
    if threads == 1 {
        for i in 0..n {
            f(i);
        }
        return;
    }
    let chunk = match chunk {
        Some(c) if c > 0 => c,
        _ => (n + threads - 1) / threads,
    };
    let cursor = AtomicUsize::new(0);
    let f = &f;
    let cursor = &cursor;
    let result = crossbeam::thread::scope(|s| {
        for _ in 0..threads {
            s.spawn(move |_| loop {
                let start = cursor.fetch_add(chunk, Ordering::Relaxed);
                if start >= n {
                    break;
                }
                let end = (start + chunk).min(n);
                for i in start..end {
                    f(i);
                }
            });
        }
    });
    if let Err(payload) = result {
        std::panic::resume_unwind(payload);
    }
}
