use bindery::{ActionManager, BindSettings, CallbackSettings, LogListener};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut mgr = ActionManager::discover();
    mgr.bind("any_button", &["any"], BindSettings::default());
    mgr.bind("left_stick", &["gp-a-left"], BindSettings::default());
    mgr.bind("right_stick", &["gp-a-right"], BindSettings::default());
    for action in ["any_button", "left_stick", "right_stick"] {
        mgr.add_listener(action, LogListener::new(), CallbackSettings::default());
    }

    loop {
        mgr.update();
        // Roughly one frame at 60 Hz
        std::thread::sleep(std::time::Duration::from_millis(16));
    }
}
