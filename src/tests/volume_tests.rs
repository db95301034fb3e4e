use crate::volume::remote::parse_df;

const DF_OUTPUT: &str = "\
Filesystem         1-blocks       Used  Available Capacity Mounted on
/dev/sda1      499963174912 249981587456 249981587456      50% /data
";

#[test]
fn parse_df_extracts_total_and_available() {
    let facts = parse_df(DF_OUTPUT).unwrap();
    assert_eq!(facts.total_capacity, 499963174912, "total comes from the blocks column");
    assert_eq!(facts.remaining_free, 249981587456, "free comes from the available column");
}

#[test]
fn parse_df_rejects_garbage() {
    assert!(parse_df("no such file or directory\n").is_err(), "error text is not a data line");
    assert!(parse_df("").is_err(), "empty output is not parseable");
}

#[test]
fn parse_df_handles_full_volume() {
    let output = "\
Filesystem 1-blocks       Used Available Capacity Mounted on
/dev/sdb1  1000000000 1000000000         0     100% /var/lib/db
";
    let facts = parse_df(output).unwrap();
    assert_eq!(facts.total_capacity, 1000000000, "total parses on a full volume");
    assert_eq!(facts.remaining_free, 0, "zero available parses");
}

#[cfg(unix)]
#[test]
fn local_facts_resolve_for_an_existing_path() {
    use crate::volume::{SystemVolumes, VolumeSource};
    use std::time::Duration;

    let tmp = std::env::temp_dir();
    let volumes = SystemVolumes::new("testhost".to_string(), Duration::from_secs(5));

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
    let facts = runtime
        .block_on(volumes.volume_info("testhost", &tmp.to_string_lossy()))
        .unwrap();

    assert!(facts.total_capacity > 0, "a real filesystem has capacity");
    assert!(
        facts.remaining_free <= facts.total_capacity,
        "free can never exceed capacity"
    );
}

#[cfg(unix)]
#[test]
fn local_facts_fail_for_a_missing_path() {
    use crate::volume::{SystemVolumes, VolumeSource};
    use std::time::Duration;

    let volumes = SystemVolumes::new("testhost".to_string(), Duration::from_secs(5));
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();

    assert!(
        runtime
            .block_on(volumes.volume_info("testhost", "/definitely/not/a/real/path"))
            .is_err(),
        "statvfs on a missing path must surface an error"
    );
}
