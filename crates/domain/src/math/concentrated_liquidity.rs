use crate::value_objects::price_range::PriceRange;

/// Amount of token0 (x) for liquidity between two sqrt prices.
/// delta_x = L * (1/sqrt(P_a) - 1/sqrt(P_b))
/// where P_a < P_b
pub fn get_amount0_delta(liquidity: f64, sqrt_price_a: f64, sqrt_price_b: f64) -> f64 {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    if lower <= 0.0 {
        return 0.0;
    }
    // delta_x = L * ( (upper - lower) / (lower * upper) )
    liquidity * (upper - lower) / (lower * upper)
}

/// Amount of token1 (y) for liquidity between two sqrt prices.
/// delta_y = L * (sqrt(P_b) - sqrt(P_a))
/// where P_a < P_b
pub fn get_amount1_delta(liquidity: f64, sqrt_price_a: f64, sqrt_price_b: f64) -> f64 {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    liquidity * (upper - lower)
}

/// Token amounts `(x, y)` held by `liquidity` in `range` when the pool price is `price`.
///
/// Below the range the position is entirely token0, above it entirely token1.
pub fn amounts_at_price(liquidity: f64, price: f64, range: &PriceRange) -> (f64, f64) {
    let sqrt_lower = range.lower_price.sqrt();
    let sqrt_upper = range.upper_price.sqrt();
    let sqrt_p = price.sqrt();

    if sqrt_p < sqrt_lower {
        (get_amount0_delta(liquidity, sqrt_lower, sqrt_upper), 0.0)
    } else if sqrt_p >= sqrt_upper {
        (0.0, get_amount1_delta(liquidity, sqrt_lower, sqrt_upper))
    } else {
        (
            get_amount0_delta(liquidity, sqrt_p, sqrt_upper),
            get_amount1_delta(liquidity, sqrt_lower, sqrt_p),
        )
    }
}

/// Value in token1 units of the amounts held at `price`.
pub fn value_at_price(liquidity: f64, price: f64, range: &PriceRange) -> f64 {
    let (x, y) = amounts_at_price(liquidity, price, range);
    x * price + y
}

/// Liquidity whose position is worth `value` at `price`.
pub fn liquidity_for_value(value: f64, price: f64, range: &PriceRange) -> f64 {
    let unit_value = value_at_price(1.0, price, range);
    if unit_value <= 0.0 {
        return 0.0;
    }
    value / unit_value
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a < b { (a, b) } else { (b, a) }
}
