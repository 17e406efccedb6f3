//! Integration tests for layered configuration loading.
//!
//! Uses `figment::Jail` for sandboxed cwd and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use iolab_config::IoLabConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[files]
log = "audit.log"

[fifo]
mode = 0o600
poll_interval_ms = 20
max_wait_ms = 500

[stream_lock]
messages = 2
startup_delay_ms = 10
"#,
        )?;

        let config: IoLabConfig = Figment::from(Serialized::defaults(IoLabConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.files.log, "audit.log");
        assert_eq!(config.files.record, "data");
        assert_eq!(config.fifo.mode, 0o600);
        assert_eq!(config.fifo.poll_interval_ms, 20);
        assert_eq!(config.fifo.max_wait_ms(), Some(500));
        assert_eq!(config.stream_lock.messages, 2);
        assert_eq!(config.stream_lock.write_delay_ms, 100);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_from_cwd() {
    Jail::expect_with(|jail| {
        jail.create_dir(".iolab")?;
        jail.create_file(".iolab/config.toml", "[select]\ntimeout_secs = 5\n")?;

        let config = IoLabConfig::load(None).expect("config loads");
        assert_eq!(config.select.timeout_secs, 5);
        assert_eq!(config.select.capacity, 1024);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".iolab")?;
        jail.create_file(".iolab/config.toml", "[read]\ncapacity = 64\n")?;
        jail.set_env("IOLAB_READ__CAPACITY", "16");

        let config = IoLabConfig::load(None).expect("config loads");
        assert_eq!(config.read.capacity, 16);
        Ok(())
    });
}

#[test]
fn explicit_file_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".iolab")?;
        jail.create_file(".iolab/config.toml", "[zerocopy]\npreview_len = 8\n")?;
        jail.create_file("override.toml", "[zerocopy]\npreview_len = 32\n")?;

        let config =
            IoLabConfig::load(Some(std::path::Path::new("override.toml"))).expect("config loads");
        assert_eq!(config.zerocopy.preview_len, 32);
        Ok(())
    });
}

#[test]
fn missing_explicit_file_is_an_error() {
    Jail::expect_with(|_jail| {
        let result = IoLabConfig::load(Some(std::path::Path::new("nope.toml")));
        assert!(result.is_err());
        Ok(())
    });
}

#[test]
fn invalid_value_from_env_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("IOLAB_ZEROCOPY__FILE_SIZE", "0");
        let error = IoLabConfig::load(None).expect_err("zero-size mapping rejected");
        assert!(error.to_string().contains("zerocopy.file_size"));
        Ok(())
    });
}
