/// Rounds `value` up (towards positive infinity) to `decimals` decimal places.
pub fn float_to_dec(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    // trims representation noise such as 3.1500000000000004 before taking the ceiling
    let rounded = (scaled * 1e6).round() / 1e6;
    rounded.ceil() / factor
}
