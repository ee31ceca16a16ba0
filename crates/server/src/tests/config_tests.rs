use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_path(name: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    env::temp_dir().join(format!("todo_server_{name}_{suffix}.toml"))
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(&temp_path("missing"), &HashMap::new());
    assert_eq!(settings, Settings::default());
}

#[test]
fn file_sets_bind_addr_and_seed_items() {
    let path = temp_path("file");
    fs::write(
        &path,
        "bind_addr = \"0.0.0.0:9000\"\n\n[[seed]]\ntitle = \"Buy milk\"\nowner_id = 3380\n\n[[seed]]\ntitle = \"Walk dog\"\nowner_id = 3380\ncompleted = true\n",
    )
    .expect("write");

    let settings = load_settings_from(&path, &HashMap::new());
    fs::remove_file(&path).expect("cleanup");

    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.seed.len(), 2);
    assert!(settings.seed[1].completed);
    assert_eq!(settings.seed[0].owner_id, OwnerId(3380));
}

#[test]
fn app_prefixed_env_overrides_everything() {
    let path = temp_path("env");
    fs::write(&path, "bind_addr = \"0.0.0.0:9000\"\n").expect("write");
    let env = HashMap::from([
        ("SERVER_BIND".to_string(), "127.0.0.1:1".to_string()),
        ("APP__BIND_ADDR".to_string(), "127.0.0.1:2".to_string()),
    ]);

    let settings = load_settings_from(&path, &env);
    fs::remove_file(&path).expect("cleanup");

    assert_eq!(settings.server_bind, "127.0.0.1:2");
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let path = temp_path("malformed");
    fs::write(&path, "bind_addr = [").expect("write");

    let settings = load_settings_from(&path, &HashMap::new());
    fs::remove_file(&path).expect("cleanup");

    assert_eq!(settings.server_bind, Settings::default().server_bind);
}
