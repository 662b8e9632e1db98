//! Property-based tests for async_file_logger using proptest

use async_file_logger::core::format::count_placeholders;
use async_file_logger::prelude::*;
use async_file_logger::{format_message, RotationState};
use proptest::prelude::*;
use std::path::{Path, PathBuf};

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Info),
        Just(LogLevel::Debug),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
    ]
}

// ============================================================================
// Template Formatting Tests
// ============================================================================

proptest! {
    /// Substitution interleaves literal segments and arguments left to right
    #[test]
    fn test_format_interleaves_segments_and_args(
        segments in prop::collection::vec("[a-zA-Z0-9 ,.:]{0,12}", 1..8),
        arg_pool in prop::collection::vec("[a-zA-Z0-9{} ]{0,8}", 8),
    ) {
        let args: Vec<String> = arg_pool[..segments.len() - 1].to_vec();
        let template = segments.join("{}");

        let mut expected = segments[0].clone();
        for (arg, segment) in args.iter().zip(&segments[1..]) {
            expected.push_str(arg);
            expected.push_str(segment);
        }

        prop_assert_eq!(format_message(&template, &args).unwrap(), expected);
    }

    /// Any placeholder/argument count mismatch is a format error
    #[test]
    fn test_format_rejects_count_mismatch(
        placeholders in 0usize..6,
        arguments in 0usize..6,
    ) {
        prop_assume!(placeholders != arguments);
        let template = vec!["x"; placeholders + 1].join("{}");
        let args: Vec<String> = (0..arguments).map(|i| i.to_string()).collect();

        let err = format_message(&template, &args).unwrap_err();
        prop_assert!(err.is_format_error());
        let is_mismatch = matches!(
            err,
            LoggerError::PlaceholderMismatch { placeholders: p, arguments: a, .. }
                if p == placeholders && a == arguments
        );
        prop_assert!(is_mismatch);
    }

    /// A template without placeholders is returned unchanged
    #[test]
    fn test_format_without_placeholders_is_identity(template in "[^{}]*") {
        prop_assert_eq!(count_placeholders(&template), 0);
        let args: [&str; 0] = [];
        prop_assert_eq!(format_message(&template, &args).unwrap(), template);
    }
}

// ============================================================================
// Rotation Policy Tests
// ============================================================================

proptest! {
    /// should_rotate is exactly "current + incoming exceeds the cap"
    #[test]
    fn test_should_rotate_matches_definition(
        max in 0u64..1_000_000,
        current in 0u64..1_000_000,
        incoming in 0u64..10_000,
    ) {
        let policy = RotationPolicy::new(max);
        prop_assert_eq!(policy.should_rotate(current, incoming), current + incoming > max);
    }

    /// Kilobyte caps are 1024-byte multiples
    #[test]
    fn test_from_kb(kb in 0u64..100_000) {
        prop_assert_eq!(RotationPolicy::from_kb(kb).max_size_bytes(), kb * 1024);
    }

    /// Rotated names are `<base>.<index>` and indices only grow
    #[test]
    fn test_rotation_names_are_sequential(name in "[a-z]{1,8}\\.log", rotations in 1usize..20) {
        let base = PathBuf::from("/tmp/logs").join(&name);
        let mut state = RotationState::new(&base, RotationPolicy::default());
        prop_assert_eq!(state.current_path(), base.clone());

        for expected in 1..=rotations {
            let path = state.advance();
            prop_assert_eq!(state.current_index(), expected as u64);
            prop_assert_eq!(
                path,
                Path::new("/tmp/logs").join(format!("{}.{}", name, expected))
            );
        }
    }
}

// ============================================================================
// Record Tests
// ============================================================================

proptest! {
    /// Every record renders to exactly one line of the advertised length
    #[test]
    fn test_record_is_one_line(
        level in any_level(),
        message in ".*",
        timestamp in "[0-9: -]{0,20}",
    ) {
        let record = FormattedRecord::new(level, &message, timestamp.clone());
        let line = record.render_line();

        prop_assert_eq!(line.matches('\n').count(), 1);
        prop_assert!(line.ends_with('\n'));
        prop_assert!(!line.contains('\r'));
        prop_assert_eq!(record.encoded_len(), line.len() as u64);
        let prefix = format!("[{}] [{}] ", timestamp, level);
        prop_assert!(line.starts_with(&prefix));
    }

    /// LogLevel string conversions roundtrip, case-insensitively
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), lower in any::<bool>()) {
        let text = if lower { level.to_str().to_lowercase() } else { level.to_string() };
        prop_assert_eq!(text.parse::<LogLevel>(), Ok(level));
    }
}
