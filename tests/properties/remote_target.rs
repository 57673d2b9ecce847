//! Property tests for remote target derivation.

use std::path::PathBuf;

use proptest::prelude::*;

use cloudsync::SyncConfig;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-][A-Za-z0-9 _.-]{0,15}")
        .unwrap()
        .prop_filter("not a dot segment", |s| s != "." && s != ".." && !s.ends_with(' '))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: with no subpath the target is `remote:<folder base name>`.
    #[test]
    fn property_target_defaults_to_base_name(
        remote in "[a-z][a-z0-9]{0,10}",
        segments in proptest::collection::vec(segment(), 1..6),
    ) {
        let mut folder = PathBuf::from("/");
        for s in &segments {
            folder.push(s);
        }
        let config = SyncConfig::new(folder, remote.clone());

        prop_assert_eq!(
            config.remote_target(),
            format!("{}:{}", remote, segments.last().unwrap())
        );
    }

    /// PROPERTY: a non-empty subpath always wins over the folder name.
    #[test]
    fn property_subpath_overrides_folder(
        remote in "[a-z][a-z0-9]{0,10}",
        subpath in "[A-Za-z0-9/_-]{1,20}",
        folder in segment(),
    ) {
        let config = SyncConfig::new(PathBuf::from("/data").join(folder), remote.clone())
            .with_subpath(subpath.clone());

        prop_assert_eq!(config.remote_target(), format!("{}:{}", remote, subpath));
    }
}
