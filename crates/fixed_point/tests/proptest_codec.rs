use proptest::prelude::*;
use qcodec_fixed_point::{ErrorStrategy, QFormat};

/// Layouts up to 53 bits wide, the most an f64 holds exactly
fn layout() -> impl Strategy<Value = QFormat> {
    (any::<bool>(), 1u32..=53)
        .prop_flat_map(|(signed, total)| (Just(signed), Just(total), 0..=total))
        .prop_filter_map("empty layout", |(signed, total, significand)| {
            QFormat::new(signed, significand, total - significand).ok()
        })
}

/// A layout together with one of its valid bit patterns
fn layout_and_pattern() -> impl Strategy<Value = (QFormat, u128)> {
    layout().prop_flat_map(|format| (Just(format), 0..=format.full_mask()))
}

// Property 1: decode then encode gives back the same pattern
proptest! {
    #[test]
    fn prop_pattern_roundtrip((format, bits) in layout_and_pattern()) {
        let value = format.decode(bits).unwrap();
        prop_assert!(value >= format.min_value() && value <= format.max_value());
        let back = format.encode(value, ErrorStrategy::Raise).unwrap();
        prop_assert_eq!(back, bits, "{} {:#b} -> {} -> {:#b}", format, bits, value, back);
    }
}

// Property 2: on-grid values survive encode then decode exactly
proptest! {
    #[test]
    fn prop_grid_value_roundtrip((format, bits) in layout_and_pattern()) {
        let value = format.decode(bits).unwrap();
        let encoded = format.encode(value, ErrorStrategy::Skip).unwrap();
        prop_assert_eq!(format.decode(encoded).unwrap(), value);
    }
}

// Property 3: encoding an arbitrary in-range value lands within half a step
proptest! {
    #[test]
    fn prop_encode_error_bounded(format in layout(), t in 0.0f64..=1.0) {
        let value = format.min_value() + t * (format.max_value() - format.min_value());
        let bits = format.encode(value, ErrorStrategy::Raise).unwrap();
        prop_assert!(format.fits(bits));
        let decoded = format.decode(bits).unwrap();
        let step = 1.0 / format.scale();
        prop_assert!(
            (decoded - value).abs() <= step / 2.0,
            "{} {} -> {}", format, value, decoded
        );
    }
}

// Property 4: everything past a bound saturates to the same pattern
proptest! {
    #[test]
    fn prop_saturation_monotonic(format in layout(), a in 0.0f64..1e6, b in 0.0f64..1e6) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };

        let above = |d: f64| format.encode(format.max_value() + d, ErrorStrategy::Skip).unwrap();
        prop_assert_eq!(above(near), format.max_pattern());
        prop_assert_eq!(above(far), format.max_pattern());

        let below = |d: f64| format.encode(format.min_value() - d, ErrorStrategy::Skip).unwrap();
        prop_assert_eq!(below(near), format.min_pattern());
        prop_assert_eq!(below(far), format.min_pattern());
    }
}

// Property 5: Raise rejects exactly what Skip has to clamp
proptest! {
    #[test]
    fn prop_raise_rejects_outside(format in layout(), d in 1.0f64..1e6) {
        prop_assert!(format.encode(format.max_value() + d, ErrorStrategy::Raise).is_err());
        prop_assert!(format.encode(format.min_value() - d, ErrorStrategy::Raise).is_err());
    }
}

// Property 6: Display and parse agree
proptest! {
    #[test]
    fn prop_specifier_roundtrip(format in layout()) {
        let parsed: QFormat = format.to_string().parse().unwrap();
        prop_assert_eq!(parsed, format);
    }
}
