//! Round-robin pixel striping for the render workers.
//!
//! Worker `k` of `n` owns pixels `k, k + n, k + 2n, ...`. Every pixel
//! belongs to exactly one stripe, so workers write disjoint slots of the
//! framebuffer without locking.

/// One worker's pixels: flat pixel index plus exclusive access to its slot.
pub type Stripe<'a, T> = Vec<(usize, &'a mut T)>;

/// Split `pixels` into `workers` interleaved stripes.
///
/// `workers` must be non-zero.
pub fn stripe_pixels<T>(pixels: &mut [T], workers: usize) -> Vec<Stripe<'_, T>> {
    let per_worker = pixels.len().div_ceil(workers);
    let mut stripes: Vec<Stripe<'_, T>> = (0..workers)
        .map(|_| Vec::with_capacity(per_worker))
        .collect();

    for (index, pixel) in pixels.iter_mut().enumerate() {
        stripes[index % workers].push((index, pixel));
    }

    stripes
}
