//! Unlock pricing shown on the preview and payment screens.

/// Struck-through reference price.
pub const PRICE_OLD: f64 = 12.0;

/// Discounted price actually charged.
pub const PRICE_NEW: f64 = 5.5;

/// Format a price the Brazilian way, e.g. "R$ 5,50".
pub fn format_brl(value: f64) -> String {
    format!("R$ {value:.2}").replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(PRICE_NEW), "R$ 5,50");
        assert_eq!(format_brl(PRICE_OLD), "R$ 12,00");
        assert_eq!(format_brl(0.0), "R$ 0,00");
    }
}
