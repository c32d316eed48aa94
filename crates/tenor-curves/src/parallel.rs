//! Per-observation fan-out.
//!
//! Uses rayon when the `parallel` feature is enabled and the caller asks for
//! it. Output order always matches input order.

/// Maps `f` over `items`, in parallel when enabled.
#[allow(unused_variables)]
pub(crate) fn maybe_parallel_map<T, U, F>(items: &[T], parallel: bool, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if parallel && items.len() > 1 {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_preserved() {
        let items: Vec<u32> = (0..64).collect();
        let sequential = maybe_parallel_map(&items, false, |x| x * 2);
        let parallel = maybe_parallel_map(&items, true, |x| x * 2);

        assert_eq!(sequential, parallel);
        assert_eq!(parallel[10], 20);
    }
}
