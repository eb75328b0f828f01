use figment::Jail;
use gradient_range::config::{ConfigError, Settings};
use std::path::Path;

#[test]
fn test_default_settings_build_default_slider() {
    let settings = Settings::default();
    assert_eq!(settings.thumbs, vec![0.0, 100.0]);
    assert_eq!(settings.gradient.stops.len(), 3);
    assert_eq!(settings.gradient.stops[1].color, "#ffd306");

    let slider = settings.build().unwrap();
    assert_eq!(slider.thumbs(), &[0.0, 100.0]);
}

#[test]
fn test_parse_toml() {
    let toml_str = r##"
thumbs = [10.0, 60.0]

[slider]
min_separation = 10.0
track_size = 18.0

[[gradient.stops]]
position = 0.0
color = "black"

[[gradient.stops]]
position = 100.0
color = "rgb(255, 255, 255)"
"##;

    let settings: Settings = toml::from_str(toml_str).unwrap();
    assert_eq!(settings.thumbs, vec![10.0, 60.0]);
    assert_eq!(settings.slider.min_separation, 10.0);
    assert_eq!(settings.slider.max, 100.0);

    let mut slider = settings.build().unwrap();
    assert_eq!(slider.apply_drag(0, 58.0).unwrap(), 50.0);
}

#[test]
fn test_layered_file_and_env() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "range.toml",
            r#"
thumbs = [20.0, 80.0]

[slider]
min_separation = 2.0
"#,
        )?;
        jail.set_env("GRADIENT_RANGE_SLIDER__MIN_SEPARATION", "7");

        let settings = Settings::load(Some(Path::new("range.toml"))).expect("settings load");
        assert_eq!(settings.thumbs, vec![20.0, 80.0]);
        assert_eq!(settings.slider.min_separation, 7.0);
        assert_eq!(settings.gradient.stops.len(), 3);
        Ok(())
    });
}

#[test]
fn test_missing_config_file_is_an_error() {
    let result = Settings::load(Some(Path::new("/definitely/not/here.toml")));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_bad_color_is_reported() {
    let mut settings = Settings::default();
    settings.gradient.stops[1].color = "chartreuse-ish".to_string();
    let err = settings.build().unwrap_err();
    assert!(err.to_string().contains("Invalid color"));
}

#[test]
fn test_save_and_reload() {
    Jail::expect_with(|jail| {
        let mut slider = Settings::default().build().expect("default slider");
        slider.apply_drag(0, 75.0).expect("drag");

        let path = jail.directory().join("saved.toml");
        Settings::from_slider(&slider).save(&path).expect("save");

        let reloaded = Settings::load(Some(path.as_path())).expect("reload");
        assert_eq!(reloaded.thumbs, vec![75.0, 100.0]);
        assert_eq!(reloaded, Settings::from_slider(&slider));
        Ok(())
    });
}
