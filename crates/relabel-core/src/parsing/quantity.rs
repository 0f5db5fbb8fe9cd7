/// Quantity used when no usable digit run is found.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Extract the first contiguous run of ASCII digits in a line.
///
/// Handles lines like:
/// - "3" -> Some(3)
/// - "Qty: 12 pcs" -> Some(12)
/// - "2 x 250ml" -> Some(2) (later runs are ignored)
/// - "no digits here" -> None
///
/// A run that is all zeros or does not fit in a u32 yields None.
pub fn first_digit_run(line: &str) -> Option<u32> {
    let start = line.find(|c: char| c.is_ascii_digit())?;
    let rest = &line[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    match rest[..end].parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

/// Read the quantity from `lines[idx]`, defaulting to 1.
///
/// An index past the end of the page is not an error.
pub fn quantity_at<S: AsRef<str>>(lines: &[S], idx: usize) -> u32 {
    lines
        .get(idx)
        .and_then(|line| first_digit_run(line.as_ref()))
        .unwrap_or(DEFAULT_QUANTITY)
}
