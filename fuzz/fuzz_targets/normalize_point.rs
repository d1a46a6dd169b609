//! Point normalization is idempotent and agrees with point equality.

#![no_main]

use launchgate_core::{normalize, normalize_observed, normalize_str, same_point};
use libfuzzer_sys::fuzz_target;
use url::Url;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    let once = normalize_str(raw);
    assert_eq!(normalize_str(once), once);

    let Ok(point) = Url::parse(raw) else {
        return;
    };
    assert!(same_point(&point, &point));

    let observed = normalize_observed(point.clone());
    assert_eq!(normalize_observed(observed.clone()), observed);
    if point.query().is_none() && point.fragment().is_none() {
        assert_eq!(normalize(&point), normalize(&observed));
    }
});
