//! Whole-percent allocation helpers shared by the blend engine.
//!
//! Every allocation produced here sums to exactly [`TOTAL_PERCENT`]. Rounding
//! leftovers land on the last slot in input order.

pub const TOTAL_PERCENT: u32 = 100;

/// Rounds `value` to `decimals` decimal places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Even whole-percent split across `count` slots; the remainder goes to the last slot.
pub(crate) fn even_split(count: usize) -> Vec<u32> {
    if count == 0 {
        return Vec::new();
    }
    let slots = u32::try_from(count).unwrap_or(TOTAL_PERCENT);
    let share = TOTAL_PERCENT / slots;
    let mut shares = vec![share; count];
    if let Some(last) = shares.last_mut() {
        *last += TOTAL_PERCENT - share * slots;
    }
    shares
}

/// Rescales `values` so they sum to 100, holding every slot at or above `min`.
pub(crate) fn renormalize(values: &[u32], min: u32) -> Vec<u32> {
    let sum: u32 = values.iter().sum();
    if sum == 0 {
        return even_split(values.len());
    }
    let scale = f64::from(TOTAL_PERCENT) / f64::from(sum);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut scaled: Vec<u32> = values
        .iter()
        .map(|&v| ((f64::from(v) * scale).round() as u32).max(min))
        .collect();
    absorb_remainder(&mut scaled, min);
    scaled
}

/// Pushes the difference between the current sum and 100 onto the last slot.
///
/// When the last slot would drop below `min` it is held there and the
/// shortfall is taken from the largest other slot (first on ties).
pub(crate) fn absorb_remainder(shares: &mut [u32], min: u32) {
    let Some(last_idx) = shares.len().checked_sub(1) else {
        return;
    };
    let total: i64 = shares.iter().map(|&s| i64::from(s)).sum();
    let last = i64::from(shares[last_idx]) + i64::from(TOTAL_PERCENT) - total;
    if last >= i64::from(min) {
        shares[last_idx] = u32::try_from(last).unwrap_or(TOTAL_PERCENT);
        return;
    }
    shares[last_idx] = min;
    let mut shortfall = i64::from(min) - last;
    while shortfall > 0 {
        let Some(donor) = largest_above(&shares[..last_idx], min) else {
            break;
        };
        let spare = i64::from(shares[donor] - min);
        let taken = spare.min(shortfall);
        // taken <= spare, which came from a u32
        shares[donor] -= u32::try_from(taken).unwrap_or(0);
        shortfall -= taken;
    }
}

fn largest_above(shares: &[u32], min: u32) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, &share) in shares.iter().enumerate() {
        if share > min && best.map_or(true, |b| share > shares[b]) {
            best = Some(idx);
        }
    }
    best
}
