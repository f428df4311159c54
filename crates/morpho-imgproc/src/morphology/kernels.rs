//! Per-row 5-tap stencil kernels.
//!
//! Each kernel reads one interior row of a replicate-padded buffer through
//! the five Von Neumann taps (center, left, right, up, down) and writes the
//! per-pixel minimum or maximum into an unpadded output row. A vectorized
//! path processes [`TILE_WIDTH`] pixels per step through unaligned loads;
//! the final partial tile of a row falls back to the scalar path so no more
//! than `width` bytes of the output row are ever written. Both paths are
//! bit-identical.

#[cfg(target_arch = "aarch64")]
use std::arch::is_aarch64_feature_detected;
#[cfg(target_arch = "x86_64")]
use std::arch::is_x86_feature_detected;

/// Number of pixels processed per step by the vectorized path.
pub(crate) const TILE_WIDTH: usize = 16;

/// Write the 5-tap minimum of one padded row into `dst`.
///
/// `base` indexes the first interior sample of the row and `stride` is the
/// padded row length. The caller guarantees at least one readable sample
/// left and right of the interior span and one full padded row above and
/// below it.
#[inline]
pub(crate) fn erode_row(padded: &[u8], base: usize, stride: usize, dst: &mut [u8]) {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("sse2") {
            unsafe { erode_row_sse2(padded, base, stride, dst) };
            return;
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        if is_aarch64_feature_detected!("neon") {
            unsafe { erode_row_neon(padded, base, stride, dst) };
            return;
        }
    }

    erode_row_scalar(padded, base, stride, dst);
}

/// Write the 5-tap maximum of one padded row into `dst`.
///
/// Same contract as [`erode_row`].
#[inline]
pub(crate) fn dilate_row(padded: &[u8], base: usize, stride: usize, dst: &mut [u8]) {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("sse2") {
            unsafe { dilate_row_sse2(padded, base, stride, dst) };
            return;
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        if is_aarch64_feature_detected!("neon") {
            unsafe { dilate_row_neon(padded, base, stride, dst) };
            return;
        }
    }

    dilate_row_scalar(padded, base, stride, dst);
}

pub(crate) fn erode_row_scalar(padded: &[u8], base: usize, stride: usize, dst: &mut [u8]) {
    for (c, out) in dst.iter_mut().enumerate() {
        let i = base + c;
        let mut v = padded[i];
        v = v.min(padded[i - 1]);
        v = v.min(padded[i + 1]);
        v = v.min(padded[i - stride]);
        v = v.min(padded[i + stride]);
        *out = v;
    }
}

pub(crate) fn dilate_row_scalar(padded: &[u8], base: usize, stride: usize, dst: &mut [u8]) {
    for (c, out) in dst.iter_mut().enumerate() {
        let i = base + c;
        let mut v = padded[i];
        v = v.max(padded[i - 1]);
        v = v.max(padded[i + 1]);
        v = v.max(padded[i - stride]);
        v = v.max(padded[i + stride]);
        *out = v;
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
unsafe fn erode_row_sse2(padded: &[u8], base: usize, stride: usize, dst: &mut [u8]) {
    use std::arch::x86_64::{__m128i, _mm_loadu_si128, _mm_min_epu8, _mm_storeu_si128};

    let width = dst.len();
    let src = padded.as_ptr().add(base);
    let out = dst.as_mut_ptr();

    let mut x = 0usize;
    while x + TILE_WIDTH <= width {
        let center = src.add(x);
        let mut m = _mm_loadu_si128(center.sub(1) as *const __m128i);
        m = _mm_min_epu8(m, _mm_loadu_si128(center.add(1) as *const __m128i));
        m = _mm_min_epu8(m, _mm_loadu_si128(center as *const __m128i));
        m = _mm_min_epu8(m, _mm_loadu_si128(center.sub(stride) as *const __m128i));
        m = _mm_min_epu8(m, _mm_loadu_si128(center.add(stride) as *const __m128i));
        _mm_storeu_si128(out.add(x) as *mut __m128i, m);
        x += TILE_WIDTH;
    }

    // partial tile at the row end: clip to the remaining width
    if x < width {
        erode_row_scalar(padded, base + x, stride, &mut dst[x..]);
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
unsafe fn dilate_row_sse2(padded: &[u8], base: usize, stride: usize, dst: &mut [u8]) {
    use std::arch::x86_64::{__m128i, _mm_loadu_si128, _mm_max_epu8, _mm_storeu_si128};

    let width = dst.len();
    let src = padded.as_ptr().add(base);
    let out = dst.as_mut_ptr();

    let mut x = 0usize;
    while x + TILE_WIDTH <= width {
        let center = src.add(x);
        let mut m = _mm_loadu_si128(center.sub(1) as *const __m128i);
        m = _mm_max_epu8(m, _mm_loadu_si128(center.add(1) as *const __m128i));
        m = _mm_max_epu8(m, _mm_loadu_si128(center as *const __m128i));
        m = _mm_max_epu8(m, _mm_loadu_si128(center.sub(stride) as *const __m128i));
        m = _mm_max_epu8(m, _mm_loadu_si128(center.add(stride) as *const __m128i));
        _mm_storeu_si128(out.add(x) as *mut __m128i, m);
        x += TILE_WIDTH;
    }

    if x < width {
        dilate_row_scalar(padded, base + x, stride, &mut dst[x..]);
    }
}

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
unsafe fn erode_row_neon(padded: &[u8], base: usize, stride: usize, dst: &mut [u8]) {
    use std::arch::aarch64::{vld1q_u8, vminq_u8, vst1q_u8};

    let width = dst.len();
    let src = padded.as_ptr().add(base);
    let out = dst.as_mut_ptr();

    let mut x = 0usize;
    while x + TILE_WIDTH <= width {
        let center = src.add(x);
        let mut m = vld1q_u8(center.sub(1));
        m = vminq_u8(m, vld1q_u8(center.add(1)));
        m = vminq_u8(m, vld1q_u8(center));
        m = vminq_u8(m, vld1q_u8(center.sub(stride)));
        m = vminq_u8(m, vld1q_u8(center.add(stride)));
        vst1q_u8(out.add(x), m);
        x += TILE_WIDTH;
    }

    if x < width {
        erode_row_scalar(padded, base + x, stride, &mut dst[x..]);
    }
}

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
unsafe fn dilate_row_neon(padded: &[u8], base: usize, stride: usize, dst: &mut [u8]) {
    use std::arch::aarch64::{vld1q_u8, vmaxq_u8, vst1q_u8};

    let width = dst.len();
    let src = padded.as_ptr().add(base);
    let out = dst.as_mut_ptr();

    let mut x = 0usize;
    while x + TILE_WIDTH <= width {
        let center = src.add(x);
        let mut m = vld1q_u8(center.sub(1));
        m = vmaxq_u8(m, vld1q_u8(center.add(1)));
        m = vmaxq_u8(m, vld1q_u8(center));
        m = vmaxq_u8(m, vld1q_u8(center.sub(stride)));
        m = vmaxq_u8(m, vld1q_u8(center.add(stride)));
        vst1q_u8(out.add(x), m);
        x += TILE_WIDTH;
    }

    if x < width {
        dilate_row_scalar(padded, base + x, stride, &mut dst[x..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_padded(width: usize, height: usize, pad: usize, seed: u64) -> (Vec<u8>, usize) {
        let stride = width + 2 * pad;
        let mut rng = StdRng::seed_from_u64(seed);
        let data = (0..stride * (height + 2 * pad))
            .map(|_| rng.random())
            .collect();
        (data, stride)
    }

    // the dispatched path (vectorized where the host supports it) must be
    // bit-identical to the scalar path, tail tiles included
    #[test]
    fn dispatch_matches_scalar() {
        let pad = 4;
        for &width in &[1usize, 2, 7, 15, 16, 17, 31, 32, 33, 64, 100] {
            let height = 3;
            let (padded, stride) = random_padded(width, height, pad, width as u64);

            for r in 0..height {
                let base = (r + pad) * stride + pad;

                let mut fast = vec![0u8; width];
                let mut slow = vec![0u8; width];
                erode_row(&padded, base, stride, &mut fast);
                erode_row_scalar(&padded, base, stride, &mut slow);
                assert_eq!(fast, slow, "erode mismatch at width {width} row {r}");

                dilate_row(&padded, base, stride, &mut fast);
                dilate_row_scalar(&padded, base, stride, &mut slow);
                assert_eq!(fast, slow, "dilate mismatch at width {width} row {r}");
            }
        }
    }

    #[test]
    fn partial_tile_is_clipped() {
        let pad = 4;
        let width = TILE_WIDTH + 1;
        let (padded, stride) = random_padded(width, 1, pad, 42);

        // the kernel must never write past the row slice it is given
        let mut dst = vec![0xAAu8; width + 8];
        let base = pad * stride + pad;
        erode_row(&padded, base, stride, &mut dst[..width]);
        assert!(dst[width..].iter().all(|&v| v == 0xAA));
    }

    #[test]
    fn scalar_single_pixel_row() {
        // one pixel surrounded by its own replicated value collapses to itself
        let pad = 1;
        let padded = vec![9u8; 9];
        let mut dst = [0u8; 1];
        erode_row_scalar(&padded, 4, 3, &mut dst);
        assert_eq!(dst[0], 9);
        dilate_row_scalar(&padded, 4, 3, &mut dst);
        assert_eq!(dst[0], 9);
    }
}
