use download_worker::config::Config;

#[test]
fn parse_example_config() {
    let raw = include_str!("../download-worker.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert!(!cfg.job.endpoint.is_empty());
    assert_eq!(cfg.paths.image_filename, "image.jpg");
    assert_eq!(cfg.classification.transport_errors, "failure");
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let cfg: Config = toml::from_str("[job]\nendpoint = \"http://localhost/x.jpg\"\nmin_work_delay_ms = 0\n")
        .expect("parse TOML");
    assert_eq!(cfg.job.min_work_delay_ms, 0);
    assert_eq!(cfg.notification.channel_id, "download_channel");
    assert!(cfg.paths.per_job_sink);
}

#[test]
fn effective_config_is_written_as_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("debug").join("effective-config.toml");
    let mut cfg = Config::default();
    cfg.job.endpoint = "http://localhost/effective.jpg".into();

    cfg.write_effective(&path).expect("write config");

    let back = Config::load(&path).expect("load written config");
    assert_eq!(back.job.endpoint, "http://localhost/effective.jpg");
    assert_eq!(back.debug.effective_config_path, "effective-config.toml");
}
