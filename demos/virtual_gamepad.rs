use bindery::backends::virtual_input::VirtualGamepads;
use bindery::{ActionManager, AxisCondition, BindSettings, CallbackSettings, Frequency, Stick};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Create a virtual gamepad and keep a handle to drive it
    let pads = VirtualGamepads::new();
    let mut mgr = ActionManager::with_source(pads.clone());

    mgr.bind("fire", &["gp-b0"], BindSettings::default());
    mgr.bind(
        "steer_right",
        &["gp-a-left"],
        BindSettings::default().conditions(AxisCondition::Pos, AxisCondition::Ignore),
    );

    mgr.on(
        "fire",
        |ev, _| println!("(Virtual) fire {}", ev.key_action),
        CallbackSettings::default(),
    );
    mgr.on(
        "steer_right",
        |ev, _| {
            if let Some((x, y)) = ev.axes {
                println!("(Virtual) steer {} x={x:.2} y={y:.2}", ev.key_action);
            }
        },
        CallbackSettings::default().frequency(Frequency::Continuous),
    );

    pads.plug(0);
    mgr.update();

    pads.set_button(0, 0, true);
    pads.set_stick(0, Stick::Left, (0.75, 0.1));
    mgr.update();
    mgr.update();

    pads.set_button(0, 0, false);
    pads.set_stick(0, Stick::Left, (0.0, 0.0));
    mgr.update();

    pads.unplug(0);
    mgr.update();
}
