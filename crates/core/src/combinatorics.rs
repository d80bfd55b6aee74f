/// `n!` for small `n`. Overflows `u128` past `n = 34`.
pub fn factorial(n: u32) -> u128 {
    (2..=n as u128).product()
}

/// Number of ways to choose `k` items from `n`, saturating at `u128::MAX`.
///
/// Computed multiplicatively over the smaller of `k` and `n - k`. Each step
/// cancels the common factor of `acc` and the divisor first, so `acc` only
/// ever holds `C(n, i)` and overflows only when the true value does.
pub fn combination(n: u32, k: u32) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        let divisor = (i + 1) as u128;
        let common = gcd(acc, divisor);
        let factor = (n - i) as u128 / (divisor / common);
        match (acc / common).checked_mul(factor) {
            Some(next) => acc = next,
            None => return u128::MAX,
        }
    }
    acc
}

/// Natural log of `C(n, k)`; negative infinity when `k > n`.
pub fn ln_combination(n: u32, k: u32) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    let k = k.min(n - k);
    (0..k)
        .map(|i| ((n - i) as f64 / (i + 1) as f64).ln())
        .sum()
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
