//! Size arithmetic for downsampling, rescaling, and cache capacity.

use crate::domain::entities::{Dimensions, TargetSize};

/// Largest integer factor that shrinks `actual` without dropping below
/// `target` on either axis. Never less than 1, so this path never upsamples.
#[must_use]
pub fn downsample_factor(target: TargetSize, actual: Dimensions) -> u32 {
    let by_width = actual.width / target.width();
    let by_height = actual.height / target.height();
    by_width.min(by_height).max(1)
}

/// Largest size with the aspect ratio of `source` that fits inside `target`.
///
/// Equivalent to `floor(side * min(tw / sw, th / sh))` per side, computed in
/// integers so the bound side lands exactly on the target. Each side is
/// clamped to at least one pixel.
#[must_use]
pub fn fit_within(source: Dimensions, target: TargetSize) -> Dimensions {
    if source.width == 0 || source.height == 0 {
        return Dimensions::new(1, 1);
    }

    let (sw, sh) = (u64::from(source.width), u64::from(source.height));
    let (tw, th) = (u64::from(target.width()), u64::from(target.height()));

    // tw / sw <= th / sh  <=>  tw * sh <= th * sw
    let (width, height) = if tw * sh <= th * sw {
        (tw, sh * tw / sw)
    } else {
        (sw * th / sh, th)
    };

    Dimensions::new(
        clamp_side(width, target.width()),
        clamp_side(height, target.height()),
    )
}

fn clamp_side(side: u64, max: u32) -> u32 {
    u32::try_from(side).unwrap_or(max).clamp(1, max)
}

/// Cache capacity in bytes for a host memory budget.
///
/// `min(ceiling, max(1, host_memory_hint / budget_divisor))`, saturated into
/// `usize`. A zero divisor is treated as one.
#[must_use]
pub fn capacity_bytes(ceiling: u64, host_memory_hint: u64, budget_divisor: u64) -> usize {
    let share = (host_memory_hint / budget_divisor.max(1)).max(1);
    let bytes = ceiling.min(share);
    usize::try_from(bytes).unwrap_or(usize::MAX)
}
