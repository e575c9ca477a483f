//! Property-based tests for error composition and severity.

use hidpower_errors::{
    common::{ErrorSeverity, HidPowerError},
    device::DeviceError,
    variable::VariableError,
};
use proptest::prelude::*;

fn severity_from(n: u8) -> ErrorSeverity {
    match n {
        0 => ErrorSeverity::Info,
        1 => ErrorSeverity::Warning,
        2 => ErrorSeverity::Error,
        _ => ErrorSeverity::Critical,
    }
}

proptest! {
    #[test]
    fn test_error_severity_ordering(a in 0u8..=3, b in 0u8..=3) {
        prop_assert_eq!(a.cmp(&b), severity_from(a).cmp(&severity_from(b)));
    }

    #[test]
    fn test_no_match_message_contains_path(path in "[A-Za-z0-9.\\[\\]]+") {
        let err = VariableError::no_match(&path);
        prop_assert!(err.to_string().contains(&path));
        prop_assert!(err.is_absent());
    }

    #[test]
    fn test_variable_errors_never_critical(name in "[a-z.]+", raw in -1.0e6f64..1.0e6) {
        let errors = [
            VariableError::no_match(&name),
            VariableError::conversion_miss(&name, raw),
            VariableError::unwritable(&name),
            VariableError::invalid_value(&name, "x"),
        ];
        for err in errors {
            let wrapped: HidPowerError = err.into();
            prop_assert!(wrapped.is_recoverable());
        }
    }

    #[test]
    fn test_mismatch_message_contains_ids(vid: u16, pid: u16) {
        let msg = DeviceError::mismatch("p", vid, pid).to_string();
        let vid_hex = format!("{vid:#06x}");
        let pid_hex = format!("{pid:#06x}");
        prop_assert!(msg.contains(&vid_hex));
        prop_assert!(msg.contains(&pid_hex));
    }
}
