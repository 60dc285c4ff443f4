use bindery::{
    ActionManager, BindSettings, BindingProfile, CallbackSettings, Frequency, LogListener,
    Modifiers,
};

const PROFILE: &str = r#"
name = "demo"

[[bindings]]
action = "jump"
inputs = ["space"]

[[bindings]]
action = "save"
inputs = ["s"]
settings = { ctrl = true }
"#;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let profile = BindingProfile::from_toml_str(PROFILE).expect("valid profile");
    let mut mgr = ActionManager::new();
    mgr.apply_profile(&profile);
    mgr.bind("walk", &["w", "up"], BindSettings::default().no_modifiers());

    mgr.on(
        "jump",
        |ev, _| println!("jump {} via {}", ev.key_action, ev.input_name),
        CallbackSettings::default().frequency(Frequency::Change),
    );
    mgr.on(
        "save",
        |_, _| println!("saved (only once)"),
        CallbackSettings::default().expiry(1),
    );
    mgr.add_listener("walk", LogListener::new(), CallbackSettings::default());

    // Simulated host event stream
    mgr.key_down("space", Modifiers::NONE);
    mgr.update();
    mgr.key_up("space", Modifiers::NONE);

    mgr.key_down("s", Modifiers::NONE);
    mgr.key_down("s", Modifiers::CTRL);
    mgr.key_down("s", Modifiers::CTRL);
    mgr.key_up("s", Modifiers::NONE);

    mgr.key_down("w", Modifiers::NONE);
    mgr.key_down("w", Modifiers::NONE);
    mgr.key_up("w", Modifiers::NONE);
}
